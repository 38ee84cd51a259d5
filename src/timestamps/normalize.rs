use serde::Serialize;
use serde_json::Value;

use crate::timecode::Offset;

use super::spec::TimestampSpec;

/// One canonical timestamp entry, ready for preview or submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTimestamp {
    /// Token exactly as it appeared in the raw document
    pub raw_key: String,
    /// Parsed offset in seconds, `None` for non-numeric tokens
    pub offset_seconds: Option<f64>,
    /// `minutes:seconds` for numeric tokens, the raw token verbatim otherwise
    pub display_time: String,
    /// Note attached to this exact token, empty when absent
    pub note: String,
}

/// Produce the canonical sorted timestamp list for a spec
///
/// Sorting is all-or-nothing: when every token parses as a number the list
/// is ordered ascending by offset; a single non-numeric token forces the
/// entire list into lexicographic order by `raw_key`. An empty spec yields
/// an empty list, which callers must render as an explicit empty state.
///
/// Each call builds a fresh list; previews are replaced wholesale, never
/// patched.
pub fn normalize(spec: &TimestampSpec) -> Vec<NormalizedTimestamp> {
    let mut entries: Vec<NormalizedTimestamp> = spec
        .entries()
        .into_iter()
        .map(|(raw_key, note)| {
            let offset_seconds = parse_numeric(&raw_key);
            let display_time = match offset_seconds {
                Some(secs) => Offset(secs).to_display_time(),
                None => raw_key.clone(),
            };
            NormalizedTimestamp {
                raw_key,
                offset_seconds,
                display_time,
                note: note_text(note),
            }
        })
        .collect();

    if entries.iter().all(|e| e.offset_seconds.is_some()) {
        entries.sort_by(|a, b| {
            a.offset_seconds
                .unwrap_or(0.0)
                .total_cmp(&b.offset_seconds.unwrap_or(0.0))
        });
    } else {
        entries.sort_by(|a, b| a.raw_key.cmp(&b.raw_key));
    }

    entries
}

fn parse_numeric(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn note_text(note: Option<&Value>) -> String {
    match note {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> TimestampSpec {
        TimestampSpec::from_value(value).unwrap()
    }

    #[test]
    fn array_tokens_have_no_notes() {
        let out = normalize(&spec(json!(["90", "30"])));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.note.is_empty()));
    }

    #[test]
    fn numeric_tokens_sort_ascending_by_offset() {
        let out = normalize(&spec(json!(["369", "5", "63.5", 12])));
        let offsets: Vec<f64> = out.iter().filter_map(|e| e.offset_seconds).collect();
        assert_eq!(offsets, vec![5.0, 12.0, 63.5, 369.0]);
    }

    #[test]
    fn one_non_numeric_token_forces_lexicographic_order() {
        let out = normalize(&spec(json!(["10", "2", "intro"])));
        let keys: Vec<&str> = out.iter().map(|e| e.raw_key.as_str()).collect();
        // "10" < "2" < "intro" as strings, even though 2 < 10 numerically
        assert_eq!(keys, vec!["10", "2", "intro"]);
        assert_eq!(out[2].offset_seconds, None);
        assert_eq!(out[2].display_time, "intro");
    }

    #[test]
    fn display_time_formatting() {
        let out = normalize(&spec(json!(["3725", "59"])));
        assert_eq!(out[0].display_time, "0:59");
        assert_eq!(out[1].display_time, "62:05");
    }

    #[test]
    fn notes_attach_to_exact_keys() {
        let out = normalize(&spec(json!({"63": "intro ends", "369": "diagram"})));
        assert_eq!(out[0].raw_key, "63");
        assert_eq!(out[0].note, "intro ends");
        assert_eq!(out[1].note, "diagram");
    }

    #[test]
    fn nested_form_uses_only_first_entry() {
        let out = normalize(&spec(json!({
            "a": {"timestamps": {"5": "x"}},
            "b": {"timestamps": {"10": "y"}}
        })));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].offset_seconds, Some(5.0));
        assert_eq!(out[0].note, "x");
    }

    #[test]
    fn empty_spec_yields_empty_list() {
        assert!(normalize(&spec(json!([]))).is_empty());
        assert!(normalize(&spec(json!({}))).is_empty());
    }

    #[test]
    fn non_string_notes_render_as_compact_json() {
        let out = normalize(&spec(json!({"5": {"text": "x"}, "10": 7, "15": null})));
        assert_eq!(out[0].note, r#"{"text":"x"}"#);
        assert_eq!(out[1].note, "7");
        assert_eq!(out[2].note, "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(&spec(json!({"369": "b", "5": "a", "63": ""})));

        // Rebuild a flat document from the canonical output and re-run
        let mut rebuilt = serde_json::Map::new();
        for entry in &first {
            rebuilt.insert(entry.raw_key.clone(), json!(entry.note));
        }
        let second = normalize(&spec(Value::Object(rebuilt)));

        assert_eq!(first, second);
    }
}
