//! Plain-text and attribute helpers built on top of the walker

use crate::error::Result;
use crate::node::{NodeRef, CODE, LINE_BREAK, MATH, META_STRING, SOFT_BREAK, SPACE, STR};
use crate::walk::{from_fn, walk, Meta, Rewrite};
use serde_json::{Map, Value};
use tracing::warn;

/// Concatenate the visible text of `tree`, leaving out all formatting.
///
/// `Str` and `MetaString` contribute their text, `Code` and `Math` their literal, and
/// `Space`, `SoftBreak` and `LineBreak` a single space. Everything else only contributes
/// through its children.
pub fn stringify(tree: &Value) -> String {
    // A lone node is only offered to the action when it sits in a sequence.
    let tree = if NodeRef::from_value(tree).is_some() {
        Value::Array(vec![tree.clone()])
    } else {
        tree.clone()
    };

    collect_text(tree).unwrap_or_else(|err| {
        warn!(%err, "stringify failed, returning no text");
        String::new()
    })
}

fn collect_text(tree: Value) -> Result<String> {
    let mut result = String::new();
    let mut collect = from_fn("stringify", |tag, content, _, _| {
        match content {
            Some(Value::String(text)) if tag == STR.tag() || tag == META_STRING.tag() => {
                result.push_str(text);
            }
            Some(Value::Array(parts)) if tag == CODE.tag() || tag == MATH.tag() => {
                if let Some(Value::String(text)) = parts.get(1) {
                    result.push_str(text);
                }
            }
            _ if tag == SPACE.tag() || tag == SOFT_BREAK.tag() || tag == LINE_BREAK.tag() => {
                result.push(' ');
            }
            _ => {}
        }
        Ok(Rewrite::Unchanged)
    });

    walk(tree, &mut collect, "", &Meta::new())?;
    drop(collect);
    Ok(result)
}

/// Identifier, classes and key/value pairs of an element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub id: String,
    pub classes: Vec<String>,
    pub keyvals: Vec<(String, Value)>,
}

impl Attributes {
    /// Read a pandoc `Attr` triple (`[id, [classes], [[key, value]]]`).
    ///
    /// Missing or oddly shaped parts fall back to their defaults.
    pub fn from_attr(attr: &Value) -> Self {
        let parts = attr.as_array().map(Vec::as_slice).unwrap_or_default();

        let id = parts
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let classes = parts
            .get(1)
            .map(string_list)
            .unwrap_or_default();
        let keyvals = parts
            .get(2)
            .and_then(Value::as_array)
            .map(|pairs| {
                pairs
                    .iter()
                    .filter_map(|pair| match pair.as_array().map(Vec::as_slice) {
                        Some([Value::String(key), value]) => Some((key.clone(), value.clone())),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Attributes {
            id,
            classes,
            keyvals,
        }
    }

    /// Render as a pandoc `Attr` triple.
    pub fn to_value(&self) -> Value {
        let keyvals = self
            .keyvals
            .iter()
            .map(|(key, value)| Value::Array(vec![Value::String(key.clone()), value.clone()]))
            .collect();
        Value::Array(vec![
            Value::String(self.id.clone()),
            Value::Array(self.classes.iter().cloned().map(Value::String).collect()),
            Value::Array(keyvals),
        ])
    }
}

/// Build [`Attributes`] from a mapping.
///
/// `"id"` gives the identifier, `"classes"` the class list, and every other key becomes a
/// key/value pair in mapping order. An absent mapping yields empty attributes.
pub fn attributes(attrs: Option<&Map<String, Value>>) -> Attributes {
    let Some(attrs) = attrs else {
        return Attributes::default();
    };

    let id = attrs
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let classes = attrs.get("classes").map(string_list).unwrap_or_default();
    let keyvals = attrs
        .iter()
        .filter(|(key, _)| key.as_str() != "id" && key.as_str() != "classes")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Attributes {
        id,
        classes,
        keyvals,
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stringify_joins_words_with_spaces() {
        let tree = json!([{"t": "Str", "c": "a"}, {"t": "Space"}, {"t": "Str", "c": "b"}]);
        assert_eq!(stringify(&tree), "a b");
    }

    #[test]
    fn stringify_reads_code_math_and_breaks() {
        let tree = json!([
            {"t": "Emph", "c": [{"t": "Str", "c": "x"}]},
            {"t": "SoftBreak"},
            {"t": "Code", "c": [["", [], []], "f()"]},
            {"t": "LineBreak"},
            {"t": "Math", "c": [{"t": "InlineMath"}, "e^x"]}
        ]);
        assert_eq!(stringify(&tree), "x f() e^x");
    }

    #[test]
    fn stringify_walks_whole_documents() {
        let doc = json!({
            "meta": {"title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "T"}]}},
            "blocks": [
                {"t": "Header", "c": [1, ["h", [], []], [{"t": "Str", "c": "Head"}]]},
                {"t": "Para", "c": [{"t": "Str", "c": "body"}]}
            ]
        });
        assert_eq!(stringify(&doc), "THeadbody");
    }

    #[test]
    fn stringify_accepts_a_single_node() {
        assert_eq!(stringify(&json!({"t": "Str", "c": "alone"})), "alone");
        assert_eq!(stringify(&json!({"t": "MetaString", "c": "a4"})), "a4");
    }

    #[test]
    fn collecting_text_reports_success_with_the_text() {
        let tree = json!([
            {"t": "Str", "c": "a"},
            {"t": "Space"},
            {"t": "Code", "c": [["", [], []], "b"]}
        ]);
        assert_eq!(collect_text(tree).unwrap(), "a b");
        assert_eq!(collect_text(json!({"t": "Str", "c": "lone"})).unwrap(), "");
    }

    #[test]
    fn stringify_does_not_touch_the_tree() {
        let tree = json!([{"t": "Str", "c": "a"}]);
        let before = tree.clone();
        let _ = stringify(&tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn attributes_split_id_classes_and_keyvals() {
        let attrs = json!({"id": "x", "classes": ["c1", "c2"], "foo": "bar"});
        let parsed = attributes(attrs.as_object());
        assert_eq!(parsed.id, "x");
        assert_eq!(parsed.classes, vec!["c1", "c2"]);
        assert_eq!(parsed.keyvals, vec![("foo".to_string(), json!("bar"))]);
        assert_eq!(parsed.to_value(), json!(["x", ["c1", "c2"], [["foo", "bar"]]]));
    }

    #[test]
    fn attributes_of_nothing_are_empty() {
        assert_eq!(attributes(None), Attributes::default());
        assert_eq!(attributes(Some(&Map::new())), Attributes::default());
    }

    #[test]
    fn attributes_keep_mapping_order() {
        let attrs = json!({"z": "1", "id": "i", "a": "2"});
        let keys: Vec<_> = attributes(attrs.as_object())
            .keyvals
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn attr_triples_are_read_back() {
        let attr = json!(["main", ["python", "numberLines"], [["startFrom", "3"]]]);
        let parsed = Attributes::from_attr(&attr);
        assert_eq!(parsed.id, "main");
        assert_eq!(parsed.classes, vec!["python", "numberLines"]);
        assert_eq!(parsed.keyvals, vec![("startFrom".to_string(), json!("3"))]);
        assert_eq!(parsed.to_value(), attr);
    }

    #[test]
    fn malformed_attr_triples_fall_back_to_defaults() {
        assert_eq!(Attributes::from_attr(&json!(null)), Attributes::default());
        assert_eq!(Attributes::from_attr(&json!([1, "x"])), Attributes::default());
    }
}
