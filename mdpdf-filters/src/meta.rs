//! Metadata values
//!
//! Pandoc keeps document metadata as a mapping from option name to a tagged meta value.
//! The helpers here build those values and replace a document's metadata wholesale.

use crate::error::{FilterError, Result};
use crate::filter::META_KEY;
use crate::node::{node, META_BLOCKS, META_INLINES, META_STRING, RAW_INLINE};
use crate::walk::Meta;
use serde_json::Value;
use tracing::info;

/// A plain string meta value.
pub fn meta_string(text: impl Into<String>) -> Value {
    node(META_STRING.tag(), Some(Value::String(text.into())))
}

/// A meta value holding inline content.
pub fn meta_inlines(inlines: Vec<Value>) -> Value {
    node(META_INLINES.tag(), Some(Value::Array(inlines)))
}

/// A meta value holding block content.
pub fn meta_blocks(blocks: Vec<Value>) -> Value {
    node(META_BLOCKS.tag(), Some(Value::Array(blocks)))
}

/// Raw `format` text as metadata, passed through to the writer untouched.
pub fn meta_raw(format: &str, text: impl Into<String>) -> Value {
    let raw = node(
        RAW_INLINE.tag(),
        Some(Value::Array(vec![
            Value::String(format.to_string()),
            Value::String(text.into()),
        ])),
    );
    meta_inlines(vec![raw])
}

/// Replace the whole metadata mapping of `doc` with `meta`.
///
/// Fails with [`FilterError::MalformedInput`] if the document root is not a mapping.
pub fn inject_meta(doc: &mut Value, meta: Meta) -> Result<()> {
    let root = doc.as_object_mut().ok_or_else(|| {
        FilterError::MalformedInput("document root is not a mapping".to_string())
    })?;

    info!(
        keys = ?meta.keys().collect::<Vec<_>>(),
        "replacing document metadata"
    );
    root.insert(META_KEY.to_string(), Value::Object(meta));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_constructors_follow_the_wire_format() {
        assert_eq!(meta_string("a4"), json!({"t": "MetaString", "c": "a4"}));
        assert_eq!(
            meta_blocks(vec![json!({"t": "Null"})]),
            json!({"t": "MetaBlocks", "c": [{"t": "Null"}]})
        );
        assert_eq!(
            meta_raw("tex", "\\usepackage{x}"),
            json!({"t": "MetaInlines", "c": [{"t": "RawInline", "c": ["tex", "\\usepackage{x}"]}]})
        );
    }

    #[test]
    fn inject_meta_overwrites_existing_metadata() {
        let mut doc = json!({"meta": {"title": {"t": "MetaString", "c": "Old"}}, "blocks": []});
        let mut meta = Meta::new();
        meta.insert("papersize".to_string(), meta_string("a4"));

        inject_meta(&mut doc, meta).unwrap();
        assert_eq!(
            doc,
            json!({"meta": {"papersize": {"t": "MetaString", "c": "a4"}}, "blocks": []})
        );
    }

    #[test]
    fn inject_meta_adds_missing_metadata() {
        let mut doc = json!({"blocks": []});
        inject_meta(&mut doc, Meta::new()).unwrap();
        assert_eq!(doc, json!({"blocks": [], "meta": {}}));
    }

    #[test]
    fn inject_meta_rejects_non_mapping_roots() {
        let mut doc = json!([1, 2]);
        let err = inject_meta(&mut doc, Meta::new()).unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput(_)));
    }
}
