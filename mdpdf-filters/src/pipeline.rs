//! The full filter run: parse, rewrite, retag metadata, serialize.

use crate::error::Result;
use crate::filter::{apply_filters_to_document, parse_document, serialize_document};
use crate::transforms::TypesetMeta;
use crate::walk::Action;
use tracing::info;

/// An ordered list of actions plus optional metadata to inject afterwards.
#[derive(Default)]
pub struct Pipeline {
    actions: Vec<Box<dyn Action>>,
    meta: Option<TypesetMeta>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action; actions run in the order they were added.
    pub fn with_action<A: Action + 'static>(mut self, action: A) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Replace the document's metadata with `meta` once all actions ran.
    pub fn with_meta(mut self, meta: TypesetMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Names of the configured actions, in run order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|action| action.name()).collect()
    }

    /// Run the pipeline over a serialized document.
    pub fn run(&mut self, source: &str, format: &str) -> Result<String> {
        let doc = parse_document(source)?;
        let mut doc = apply_filters_to_document(&mut self.actions, doc, format)?;

        if let Some(meta) = &self.meta {
            meta.apply(&mut doc)?;
        }

        info!(actions = self.actions.len(), format, "filter finished");
        serialize_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::filter::BLOCKS_KEY;
    use crate::transforms::CodeListing;
    use serde_json::{json, Value};

    const DOC: &str = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"Para","c":[{"t":"Str","c":"hi"}]},{"t":"CodeBlock","c":[["",[],[]],"print(1)"]}]}"#;

    #[test]
    fn empty_pipeline_round_trips() {
        let output = Pipeline::new().run(DOC, "latex").unwrap();
        assert_eq!(output, DOC);
    }

    #[test]
    fn merges_listings_then_injects_meta() {
        let mut pipeline = Pipeline::new()
            .with_action(CodeListing::default())
            .with_meta(TypesetMeta::default());
        assert_eq!(pipeline.action_names(), vec!["code-listing"]);

        let output = pipeline.run(DOC, "latex").unwrap();
        let doc: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(doc[BLOCKS_KEY].as_array().unwrap().len(), 1);
        assert_eq!(doc[BLOCKS_KEY][0]["c"][1]["t"], "RawInline");
        assert_eq!(doc["meta"]["papersize"], json!({"t": "MetaString", "c": "a4"}));
        assert_eq!(doc["pandoc-api-version"], json!([1, 23, 1]));
    }

    #[test]
    fn malformed_documents_fail_before_any_action() {
        let err = Pipeline::new()
            .with_action(CodeListing::default())
            .run("[", "")
            .unwrap_err();
        assert!(matches!(err, FilterError::MalformedInput(_)));
    }
}
