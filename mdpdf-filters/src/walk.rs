//! Tree walking and rewriting
//!
//! # The High-Level Concept
//!
//!     A pandoc document is nested arrays and mappings, with nodes (tagged mappings) showing
//!     up inside arrays. The walker visits every node, asks an [`Action`] what to do with it,
//!     folds the answer back into the surrounding array and keeps going into the result.
//!
//! # The Algorithm
//!
//! 1. **Sequences:**
//!    - Give the action a chance to rewrite the sequence as a whole (identity by default)
//!    - For each element that is a node, ask the action for a [`Rewrite`]:
//!      - `Unchanged`: walk the original element and keep it in place
//!      - `Replace(value)`: walk the replacement and put it where the original was
//!      - `Splice(values)`: walk each replacement and splice them all in, in order
//!        (an empty splice deletes the element)
//!    - Elements that are not nodes are walked and kept in place
//!
//! 2. **Mappings:**
//!    - Walk every value, keeping the key set and key order
//!
//! 3. **Scalars:**
//!    - Returned as they are; this is where recursion stops
//!
//!     Replacements are walked with the same action, so an action's output may match the
//!     action again. Actions must make sure this converges; the walker does not guard
//!     against rewrites that keep reproducing the tag they match.
//!
//!     Errors from the action abort the walk and are returned untouched.

use crate::error::Result;
use crate::node::NodeRef;
use serde_json::{Map, Value};

/// Document metadata, as found under the document's `meta` key.
pub type Meta = Map<String, Value>;

/// What an [`Action`] wants done with the node it was offered.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Keep the node; its content is still walked.
    Unchanged,
    /// Put a single value in place of the node.
    Replace(Value),
    /// Splice zero or more values in place of the node.
    Splice(Vec<Value>),
}

impl Rewrite {
    /// Remove the node from its parent sequence.
    pub fn delete() -> Self {
        Rewrite::Splice(Vec::new())
    }
}

/// A rewrite applied to every node of a tree.
///
/// `format` is the target output format the filter was invoked with and `meta` is the
/// document's metadata; both are passed through by the walker without interpretation.
pub trait Action {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "action"
    }

    /// Decide what to do with a node carrying `tag` and optional `content`.
    fn rewrite(
        &mut self,
        tag: &str,
        content: Option<&Value>,
        format: &str,
        meta: &Meta,
    ) -> Result<Rewrite>;

    /// Rewrite a whole sequence before its elements are visited.
    ///
    /// Lets an action look at siblings together. The default keeps the sequence as-is.
    fn rewrite_sequence(
        &mut self,
        items: Vec<Value>,
        _format: &str,
        _meta: &Meta,
    ) -> Result<Vec<Value>> {
        Ok(items)
    }
}

/// An [`Action`] backed by a closure. See [`from_fn`].
pub struct FnAction<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named [`Action`].
///
/// ```ignore
/// let mut drop_rules = from_fn("drop-rules", |tag, _content, _format, _meta| {
///     Ok(if tag == "HorizontalRule" { Rewrite::delete() } else { Rewrite::Unchanged })
/// });
/// let doc = walk(doc, &mut drop_rules, "latex", &Meta::new())?;
/// ```
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnAction<F>
where
    F: FnMut(&str, Option<&Value>, &str, &Meta) -> Result<Rewrite>,
{
    FnAction {
        name: name.into(),
        f,
    }
}

impl<F> Action for FnAction<F>
where
    F: FnMut(&str, Option<&Value>, &str, &Meta) -> Result<Rewrite>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn rewrite(
        &mut self,
        tag: &str,
        content: Option<&Value>,
        format: &str,
        meta: &Meta,
    ) -> Result<Rewrite> {
        (self.f)(tag, content, format, meta)
    }
}

/// Walk `tree`, applying `action` to every node, and return the rewritten tree.
pub fn walk<A>(tree: Value, action: &mut A, format: &str, meta: &Meta) -> Result<Value>
where
    A: Action + ?Sized,
{
    match tree {
        Value::Array(items) => walk_sequence(items, action, format, meta).map(Value::Array),
        Value::Object(map) => {
            let mut walked = Map::with_capacity(map.len());
            for (key, value) in map {
                walked.insert(key, walk(value, action, format, meta)?);
            }
            Ok(Value::Object(walked))
        }
        scalar => Ok(scalar),
    }
}

fn walk_sequence<A>(
    items: Vec<Value>,
    action: &mut A,
    format: &str,
    meta: &Meta,
) -> Result<Vec<Value>>
where
    A: Action + ?Sized,
{
    let items = action.rewrite_sequence(items, format, meta)?;
    let mut walked = Vec::with_capacity(items.len());

    for item in items {
        let rewrite = match NodeRef::from_value(&item) {
            Some(node) => action.rewrite(node.tag, node.content, format, meta)?,
            None => Rewrite::Unchanged,
        };

        match rewrite {
            Rewrite::Unchanged => walked.push(walk(item, action, format, meta)?),
            Rewrite::Replace(replacement) => {
                walked.push(walk(replacement, action, format, meta)?);
            }
            Rewrite::Splice(replacements) => {
                for replacement in replacements {
                    walked.push(walk(replacement, action, format, meta)?);
                }
            }
        }
    }

    Ok(walked)
}
