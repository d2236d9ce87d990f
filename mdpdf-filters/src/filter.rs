//! Running actions over a serialized document
//!
//! A filter reads one pandoc JSON document, walks it once per action (in order, each pass
//! seeing the previous pass's output) and writes the result back out as JSON.

use crate::error::{FilterError, Result};
use crate::walk::{walk, Action, Meta};
use serde_json::Value;
use tracing::debug;

/// Key under which a document keeps its metadata.
pub const META_KEY: &str = "meta";
/// Key under which a document keeps its top-level blocks.
pub const BLOCKS_KEY: &str = "blocks";

/// Parse a pandoc JSON document.
pub fn parse_document(source: &str) -> Result<Value> {
    serde_json::from_str(source).map_err(|e| FilterError::MalformedInput(e.to_string()))
}

/// Serialize a document back to pandoc JSON.
pub fn serialize_document(doc: &Value) -> Result<String> {
    serde_json::to_string(doc).map_err(|e| FilterError::Serialization(e.to_string()))
}

/// The document's metadata mapping, or an empty one if it has none.
pub fn document_meta(doc: &Value) -> Meta {
    doc.get(META_KEY)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Apply `actions` in order to an already parsed document.
///
/// The metadata handed to each action is read from the document as it stands before that
/// action's pass, so later actions observe metadata rewritten by earlier ones.
pub fn apply_filters_to_document(
    actions: &mut [Box<dyn Action + '_>],
    doc: Value,
    format: &str,
) -> Result<Value> {
    actions.iter_mut().try_fold(doc, |doc, action| {
        let meta = document_meta(&doc);
        debug!(action = action.name(), format, "walking document");
        walk(doc, action.as_mut(), format, &meta)
    })
}

/// Parse `source`, apply `actions` in order and serialize the result.
pub fn apply_filters(
    actions: &mut [Box<dyn Action + '_>],
    source: &str,
    format: &str,
) -> Result<String> {
    let doc = parse_document(source)?;
    let filtered = apply_filters_to_document(actions, doc, format)?;
    serialize_document(&filtered)
}
