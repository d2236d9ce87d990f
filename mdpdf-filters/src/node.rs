//! Node model for the pandoc JSON AST
//!
//!     Pandoc serializes every element as a mapping with a tag under `"t"` and an optional
//!     payload under `"c"`. The walker never looks past that: the payload is just more tree.
//!
//!     This module provides two things:
//!     - [`ElementKind`]: the table of known tags with the number of content items each
//!       one takes, and arity-checked construction of nodes from positional arguments.
//!     - [`NodeRef`]: a borrowed view that recognizes a node inside an arbitrary value.
//!
//!     Construction rules follow the wire format: a 0-arity element carries no content key,
//!     a 1-arity element carries its single argument as-is, and anything larger carries the
//!     arguments as an array in order.

use crate::error::{FilterError, Result};
use serde_json::{Map, Value};

/// Key holding the node's tag.
pub const TAG_KEY: &str = "t";
/// Key holding the node's content payload.
pub const CONTENT_KEY: &str = "c";

/// A pandoc element kind and the number of positional content items it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKind {
    tag: &'static str,
    arity: usize,
}

impl ElementKind {
    pub const fn new(tag: &'static str, arity: usize) -> Self {
        ElementKind { tag, arity }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Build a node of this kind from positional content items.
    ///
    /// Fails with [`FilterError::ArityMismatch`] if `args` does not hold exactly
    /// [`ElementKind::arity`] items.
    pub fn build(&self, args: Vec<Value>) -> Result<Value> {
        if args.len() != self.arity {
            return Err(FilterError::ArityMismatch {
                tag: self.tag.to_string(),
                expected: self.arity,
                actual: args.len(),
            });
        }

        let content = match self.arity {
            0 => None,
            1 => args.into_iter().next(),
            _ => Some(Value::Array(args)),
        };
        Ok(node(self.tag, content))
    }

    /// Find the element kind registered for `tag`.
    pub fn lookup(tag: &str) -> Option<ElementKind> {
        ALL_ELEMENTS.iter().find(|kind| kind.tag == tag).copied()
    }

    /// All known element kinds, blocks first, then inlines, then meta values.
    pub fn all() -> &'static [ElementKind] {
        ALL_ELEMENTS
    }
}

// Block elements
pub const PLAIN: ElementKind = ElementKind::new("Plain", 1);
pub const PARA: ElementKind = ElementKind::new("Para", 1);
pub const CODE_BLOCK: ElementKind = ElementKind::new("CodeBlock", 2);
pub const RAW_BLOCK: ElementKind = ElementKind::new("RawBlock", 2);
pub const BLOCK_QUOTE: ElementKind = ElementKind::new("BlockQuote", 1);
pub const ORDERED_LIST: ElementKind = ElementKind::new("OrderedList", 2);
pub const BULLET_LIST: ElementKind = ElementKind::new("BulletList", 1);
pub const DEFINITION_LIST: ElementKind = ElementKind::new("DefinitionList", 1);
pub const HEADER: ElementKind = ElementKind::new("Header", 3);
pub const HORIZONTAL_RULE: ElementKind = ElementKind::new("HorizontalRule", 0);
pub const TABLE: ElementKind = ElementKind::new("Table", 5);
pub const DIV: ElementKind = ElementKind::new("Div", 2);
pub const NULL: ElementKind = ElementKind::new("Null", 0);

// Inline elements
pub const STR: ElementKind = ElementKind::new("Str", 1);
pub const EMPH: ElementKind = ElementKind::new("Emph", 1);
pub const STRONG: ElementKind = ElementKind::new("Strong", 1);
pub const STRIKEOUT: ElementKind = ElementKind::new("Strikeout", 1);
pub const SUPERSCRIPT: ElementKind = ElementKind::new("Superscript", 1);
pub const SUBSCRIPT: ElementKind = ElementKind::new("Subscript", 1);
pub const SMALL_CAPS: ElementKind = ElementKind::new("SmallCaps", 1);
pub const QUOTED: ElementKind = ElementKind::new("Quoted", 2);
pub const CITE: ElementKind = ElementKind::new("Cite", 2);
pub const CODE: ElementKind = ElementKind::new("Code", 2);
pub const SPACE: ElementKind = ElementKind::new("Space", 0);
pub const LINE_BREAK: ElementKind = ElementKind::new("LineBreak", 0);
pub const MATH: ElementKind = ElementKind::new("Math", 2);
pub const RAW_INLINE: ElementKind = ElementKind::new("RawInline", 2);
pub const LINK: ElementKind = ElementKind::new("Link", 3);
pub const IMAGE: ElementKind = ElementKind::new("Image", 3);
pub const NOTE: ElementKind = ElementKind::new("Note", 1);
pub const SOFT_BREAK: ElementKind = ElementKind::new("SoftBreak", 0);
pub const SPAN: ElementKind = ElementKind::new("Span", 2);

// Meta values
pub const META_STRING: ElementKind = ElementKind::new("MetaString", 1);
pub const META_INLINES: ElementKind = ElementKind::new("MetaInlines", 1);
pub const META_BLOCKS: ElementKind = ElementKind::new("MetaBlocks", 1);

const ALL_ELEMENTS: &[ElementKind] = &[
    PLAIN,
    PARA,
    CODE_BLOCK,
    RAW_BLOCK,
    BLOCK_QUOTE,
    ORDERED_LIST,
    BULLET_LIST,
    DEFINITION_LIST,
    HEADER,
    HORIZONTAL_RULE,
    TABLE,
    DIV,
    NULL,
    STR,
    EMPH,
    STRONG,
    STRIKEOUT,
    SUPERSCRIPT,
    SUBSCRIPT,
    SMALL_CAPS,
    QUOTED,
    CITE,
    CODE,
    SPACE,
    LINE_BREAK,
    MATH,
    RAW_INLINE,
    LINK,
    IMAGE,
    NOTE,
    SOFT_BREAK,
    SPAN,
    META_STRING,
    META_INLINES,
    META_BLOCKS,
];

/// Assemble a node value from a tag and optional content.
pub fn node(tag: &str, content: Option<Value>) -> Value {
    let mut map = Map::new();
    map.insert(TAG_KEY.to_string(), Value::String(tag.to_string()));
    if let Some(content) = content {
        map.insert(CONTENT_KEY.to_string(), content);
    }
    Value::Object(map)
}

/// Borrowed view of a node found inside a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRef<'a> {
    pub tag: &'a str,
    pub content: Option<&'a Value>,
}

impl<'a> NodeRef<'a> {
    /// Recognize `value` as a node: a mapping with a string tag.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let map = value.as_object()?;
        let tag = map.get(TAG_KEY)?.as_str()?;
        Some(NodeRef {
            tag,
            content: map.get(CONTENT_KEY),
        })
    }
}

/// Tag of `value` if it is a node.
pub fn tag_of(value: &Value) -> Option<&str> {
    NodeRef::from_value(value).map(|node| node.tag)
}
