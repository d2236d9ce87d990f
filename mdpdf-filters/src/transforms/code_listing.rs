//! Code blocks as typeset listings
//!
//!     Pandoc's LaTeX writer renders a code block as its own verbatim environment, detached
//!     from the paragraph introducing it. This action instead moves every `CodeBlock` that
//!     directly follows a `Para` into that paragraph, as a raw inline holding a listing
//!     environment:
//!
//!     ```text
//!     [Para [Str "See:"], CodeBlock (["", ["rust"], []], "fn main() {}")]
//!         =>
//!     [Para [Str "See:", RawInline "latex" "\n\\begin{lstlisting}[language=rust]\n..."]]
//!     ```
//!
//!     Several code blocks in a row all land in the same paragraph, in order. Anything that
//!     is not a code block ends the run.

use crate::error::Result;
use crate::node::{node, tag_of, NodeRef, CODE_BLOCK, CONTENT_KEY, PARA, RAW_INLINE};
use crate::text::Attributes;
use crate::walk::{Action, Meta, Rewrite};
use serde_json::Value;
use tracing::{debug, warn};

/// Moves code blocks that follow a paragraph into it as raw listings.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeListing {
    raw_format: String,
    environment: String,
}

impl CodeListing {
    pub fn new(raw_format: impl Into<String>, environment: impl Into<String>) -> Self {
        CodeListing {
            raw_format: raw_format.into(),
            environment: environment.into(),
        }
    }

    /// Wrap `code` in the listing environment, tagging it with `language` if given.
    pub fn render(&self, language: Option<&str>, code: &str) -> String {
        let env = &self.environment;
        let options = language
            .map(|lang| format!("[language={lang}]"))
            .unwrap_or_default();
        format!("\n\\begin{{{env}}}{options}\n{code}\n\\end{{{env}}}")
    }

    /// The raw inline replacing `code_block`, or `None` if it is not a well-formed code block.
    fn listing_for(&self, code_block: &Value) -> Option<Value> {
        let block = NodeRef::from_value(code_block)?;
        if block.tag != CODE_BLOCK.tag() {
            return None;
        }

        let (attr, code) = match block.content.and_then(Value::as_array).map(Vec::as_slice) {
            Some([attr, Value::String(code)]) => (attr, code),
            _ => {
                warn!("skipping CodeBlock without [attr, text] content");
                return None;
            }
        };

        let attrs = Attributes::from_attr(attr);
        let text = self.render(attrs.classes.first().map(String::as_str), code);
        Some(node(
            RAW_INLINE.tag(),
            Some(Value::Array(vec![
                Value::String(self.raw_format.clone()),
                Value::String(text),
            ])),
        ))
    }
}

impl Default for CodeListing {
    fn default() -> Self {
        CodeListing::new("latex", "lstlisting")
    }
}

impl Action for CodeListing {
    fn name(&self) -> &str {
        "code-listing"
    }

    fn rewrite(&mut self, _: &str, _: Option<&Value>, _: &str, _: &Meta) -> Result<Rewrite> {
        Ok(Rewrite::Unchanged)
    }

    fn rewrite_sequence(
        &mut self,
        items: Vec<Value>,
        _format: &str,
        _meta: &Meta,
    ) -> Result<Vec<Value>> {
        if !items.iter().any(|item| tag_of(item) == Some(CODE_BLOCK.tag())) {
            return Ok(items);
        }

        let mut merged: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if let Some(listing) = self.listing_for(&item) {
                if let Some(inlines) = merged.last_mut().and_then(para_inlines_mut) {
                    debug!(listing = %listing, "moved code block into paragraph");
                    inlines.push(listing);
                    continue;
                }
            }
            merged.push(item);
        }

        Ok(merged)
    }
}

fn para_inlines_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
    if tag_of(value) != Some(PARA.tag()) {
        return None;
    }
    value.as_object_mut()?.get_mut(CONTENT_KEY)?.as_array_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::walk;
    use serde_json::json;

    fn run(tree: Value) -> Value {
        walk(tree, &mut CodeListing::default(), "latex", &Meta::new()).unwrap()
    }

    fn para(text: &str) -> Value {
        json!({"t": "Para", "c": [{"t": "Str", "c": text}]})
    }

    fn code_block(classes: &[&str], code: &str) -> Value {
        json!({"t": "CodeBlock", "c": [["", classes, []], code]})
    }

    #[test]
    fn code_block_after_para_is_merged() {
        let tree = json!([para("hi"), code_block(&[], "print(1)")]);
        let merged = run(tree);

        let blocks = merged.as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0],
            json!({"t": "Para", "c": [
                {"t": "Str", "c": "hi"},
                {"t": "RawInline", "c": ["latex", "\n\\begin{lstlisting}\nprint(1)\n\\end{lstlisting}"]}
            ]})
        );
    }

    #[test]
    fn first_class_becomes_the_language() {
        let tree = json!([para("see"), code_block(&["python", "numberLines"], "x = 1")]);
        let merged = run(tree);
        assert_eq!(
            merged[0]["c"][1]["c"][1],
            "\n\\begin{lstlisting}[language=python]\nx = 1\n\\end{lstlisting}"
        );
    }

    #[test]
    fn code_block_without_preceding_para_is_kept() {
        let tree = json!([
            {"t": "Header", "c": [1, ["", [], []], [{"t": "Str", "c": "H"}]]},
            code_block(&[], "a")
        ]);
        assert_eq!(run(tree.clone()), tree);

        let leading = json!([code_block(&[], "a"), para("after")]);
        assert_eq!(run(leading.clone()), leading);
    }

    #[test]
    fn consecutive_code_blocks_merge_in_order() {
        let tree = json!([para("p"), code_block(&[], "one"), code_block(&[], "two"), para("q")]);
        let merged = run(tree);

        let blocks = merged.as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        let inlines = blocks[0]["c"].as_array().unwrap();
        assert_eq!(inlines.len(), 3);
        assert!(inlines[1]["c"][1].as_str().unwrap().contains("one"));
        assert!(inlines[2]["c"][1].as_str().unwrap().contains("two"));
        assert_eq!(blocks[1], para("q"));
    }

    #[test]
    fn nested_block_lists_are_merged_too() {
        let tree = json!({
            "meta": {},
            "blocks": [
                {"t": "BlockQuote", "c": [para("quoted"), code_block(&["sh"], "ls")]},
                {"t": "Div", "c": [["d", [], []], [para("in div"), code_block(&[], "x")]]}
            ]
        });
        let merged = run(tree);

        let quote = &merged["blocks"][0]["c"];
        assert_eq!(quote.as_array().unwrap().len(), 1);
        assert_eq!(quote[0]["c"][1]["t"], "RawInline");
        let div_blocks = &merged["blocks"][1]["c"][1];
        assert_eq!(div_blocks.as_array().unwrap().len(), 1);
    }

    #[test]
    fn malformed_code_blocks_are_left_alone() {
        let tree = json!([para("p"), {"t": "CodeBlock", "c": "not a pair"}]);
        assert_eq!(run(tree.clone()), tree);
    }

    #[test]
    fn raw_format_and_environment_are_configurable() {
        let mut listing = CodeListing::new("tex", "minted");
        let tree = json!([para("p"), code_block(&["c"], "int x;")]);
        let merged = walk(tree, &mut listing, "", &Meta::new()).unwrap();
        assert_eq!(
            merged[0]["c"][1],
            json!({"t": "RawInline", "c": ["tex", "\n\\begin{minted}[language=c]\nint x;\n\\end{minted}"]})
        );
    }
}
