use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid timestamps JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported timestamp shape: expected an array or object, got {0}")]
    UnsupportedShape(&'static str),

    #[error("invalid timestamp token at index {0}: expected a string or number")]
    InvalidToken(usize),
}

/// Classified shape of a raw timestamp document
#[derive(Debug, Clone, PartialEq)]
pub enum SpecShape {
    /// Bare sequence of tokens, no notes
    List(Vec<String>),
    /// Flat token -> note mapping
    Flat(Map<String, Value>),
    /// Inner `timestamps` mapping of the first qualifying nested entry
    Nested(Map<String, Value>),
}

/// A validated user-supplied timestamp specification
///
/// Keeps the raw document alongside its classified shape: the raw form is
/// what gets JSON-encoded into the submission payload, the shape is what the
/// normalizer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampSpec {
    raw: Value,
    shape: SpecShape,
}

impl TimestampSpec {
    /// Parse JSON text (e.g. an uploaded file) into a spec
    ///
    /// Malformed JSON yields [`SpecError::Parse`] with the underlying parser
    /// message. Callers owning a preview must reset it to the empty state on
    /// this error and must not start a job.
    pub fn from_json_str(text: &str) -> Result<Self, SpecError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Classify an already-parsed JSON value
    ///
    /// Detection order for objects: any entry whose value is itself an
    /// object carrying an object-valued `timestamps` field makes the whole
    /// document nested, and only that first entry's inner mapping is used;
    /// later qualifying entries are deliberately ignored. An object with no
    /// such entry is the flat token -> note mapping. Scalars and null are
    /// rejected rather than defaulted.
    pub fn from_value(value: Value) -> Result<Self, SpecError> {
        let shape = match &value {
            Value::Array(items) => {
                let mut tokens = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => tokens.push(s.clone()),
                        Value::Number(n) => tokens.push(n.to_string()),
                        _ => return Err(SpecError::InvalidToken(index)),
                    }
                }
                SpecShape::List(tokens)
            }
            Value::Object(map) => match find_nested(map) {
                Some(inner) => SpecShape::Nested(inner.clone()),
                None => SpecShape::Flat(map.clone()),
            },
            Value::Null => return Err(SpecError::UnsupportedShape("null")),
            Value::Bool(_) => return Err(SpecError::UnsupportedShape("a boolean")),
            Value::Number(_) => return Err(SpecError::UnsupportedShape("a number")),
            Value::String(_) => return Err(SpecError::UnsupportedShape("a string")),
        };

        Ok(Self { raw: value, shape })
    }

    pub fn shape(&self) -> &SpecShape {
        &self.shape
    }

    /// Raw document as submitted by the user, unmodified
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// JSON-encode the raw document for the submission payload
    pub fn to_json_string(&self) -> String {
        self.raw.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match &self.shape {
            SpecShape::List(tokens) => tokens.len(),
            SpecShape::Flat(map) | SpecShape::Nested(map) => map.len(),
        }
    }

    /// Tokens with their raw note values, in document order
    pub(crate) fn entries(&self) -> Vec<(String, Option<&Value>)> {
        match &self.shape {
            SpecShape::List(tokens) => {
                tokens.iter().map(|t| (t.clone(), None)).collect()
            }
            SpecShape::Flat(map) | SpecShape::Nested(map) => {
                map.iter().map(|(k, v)| (k.clone(), Some(v))).collect()
            }
        }
    }
}

/// Return the inner mapping of the first entry matching the nested shape
fn find_nested(map: &Map<String, Value>) -> Option<&Map<String, Value>> {
    for value in map.values() {
        if let Value::Object(entry) = value {
            if let Some(Value::Object(inner)) = entry.get("timestamps") {
                return Some(inner);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_array_form() {
        let spec = TimestampSpec::from_value(json!(["30", 90, "2:15"])).unwrap();
        assert!(matches!(spec.shape(), SpecShape::List(tokens) if tokens.len() == 3));
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn classifies_flat_form() {
        let spec = TimestampSpec::from_value(json!({"63": "a", "369": "b"})).unwrap();
        assert!(matches!(spec.shape(), SpecShape::Flat(_)));
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn classifies_nested_form() {
        let spec = TimestampSpec::from_value(json!({
            "videoId": {"title": "Some Video", "timestamps": {"63": "note"}}
        }))
        .unwrap();
        match spec.shape() {
            SpecShape::Nested(inner) => assert!(inner.contains_key("63")),
            other => panic!("expected nested, got {other:?}"),
        }
    }

    #[test]
    fn nested_detection_uses_first_qualifying_entry_only() {
        let spec = TimestampSpec::from_value(json!({
            "a": {"timestamps": {"5": "x"}},
            "b": {"timestamps": {"10": "y"}}
        }))
        .unwrap();
        match spec.shape() {
            SpecShape::Nested(inner) => {
                assert!(inner.contains_key("5"));
                assert!(!inner.contains_key("10"));
            }
            other => panic!("expected nested, got {other:?}"),
        }
    }

    #[test]
    fn entry_without_inner_object_does_not_qualify() {
        // `timestamps` must itself be an object for the nested shape
        let spec = TimestampSpec::from_value(json!({
            "a": {"timestamps": "not-a-map"},
            "b": "note"
        }))
        .unwrap();
        assert!(matches!(spec.shape(), SpecShape::Flat(_)));
    }

    #[test]
    fn rejects_scalar_shapes() {
        assert!(matches!(
            TimestampSpec::from_value(json!(42)),
            Err(SpecError::UnsupportedShape("a number"))
        ));
        assert!(matches!(
            TimestampSpec::from_value(json!(null)),
            Err(SpecError::UnsupportedShape("null"))
        ));
        assert!(matches!(
            TimestampSpec::from_value(json!("0:30")),
            Err(SpecError::UnsupportedShape("a string"))
        ));
    }

    #[test]
    fn rejects_non_scalar_array_tokens() {
        let err = TimestampSpec::from_value(json!(["30", {"bad": true}])).unwrap_err();
        assert!(matches!(err, SpecError::InvalidToken(1)));
    }

    #[test]
    fn parse_error_carries_parser_message() {
        let err = TimestampSpec::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)));
        assert!(err.to_string().starts_with("invalid timestamps JSON:"));
    }

    #[test]
    fn raw_round_trips_verbatim() {
        let raw = json!({"videoId": {"timestamps": {"63": "note"}}});
        let spec = TimestampSpec::from_value(raw.clone()).unwrap();
        assert_eq!(spec.raw(), &raw);
        assert_eq!(
            serde_json::from_str::<Value>(&spec.to_json_string()).unwrap(),
            raw
        );
    }
}
