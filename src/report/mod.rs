//! Deterministic result interpretation and rendering.
//!
//! The optimizer's result shape is its own business; by convention it is a
//! mapping from bin identifier to the items placed in that bin. This module
//! interprets that convention without an LLM in the loop:
//!
//! - [`Assignments::from_result_value`] for the JSON form
//! - [`Assignments::parse_informal`] for the legacy `{bin1=[1, 4, 6], ...}`
//!   string the Java engine used to print
//! - [`format::markdown_table`] / [`format::run_summary`] for terminal output

pub mod format;

use serde_json::Value;

use crate::error::AppError;

/// Ordered bin -> items mapping (insertion order preserved for display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignments {
    pub bins: Vec<(String, Vec<String>)>,
}

impl Assignments {
    /// Interpret an optimizer result as bin assignments.
    ///
    /// Expects a JSON object whose values are arrays; array elements may be
    /// strings or numbers and are stringified either way. Anything else is a
    /// shape we do not know how to display.
    pub fn from_result_value(value: &Value) -> Result<Self, AppError> {
        let Some(map) = value.as_object() else {
            return Err(AppError::new(
                4,
                format!("Optimizer result is not a bin mapping: {value}"),
            ));
        };

        let mut bins = Vec::with_capacity(map.len());
        for (bin, items) in map {
            let Some(items) = items.as_array() else {
                return Err(AppError::new(
                    4,
                    format!("Bin {bin:?} does not map to an item list: {items}"),
                ));
            };
            let items = items.iter().map(stringify_item).collect::<Result<_, _>>()?;
            bins.push((bin.clone(), items));
        }
        Ok(Self { bins })
    }

    /// Parse the informal map syntax `{bin1=[1, 4, 6], bin2=[2, 5, 8]}`.
    ///
    /// This is how the Java engine's `HashMap#toString` output looks; older
    /// result captures still circulate in that form.
    pub fn parse_informal(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| {
                AppError::new(4, format!("Expected a {{bin=[...]}} mapping, got: {trimmed}"))
            })?;

        let mut bins = Vec::new();
        for part in split_entries(inner) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (bin, items) = part.split_once('=').ok_or_else(|| {
                AppError::new(4, format!("Malformed mapping entry (no '='): {part}"))
            })?;
            let items = items.trim();
            let items = items
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .ok_or_else(|| {
                    AppError::new(4, format!("Malformed item list for {}: {items}", bin.trim()))
                })?;
            let items = items
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            bins.push((bin.trim().to_string(), items));
        }
        Ok(Self { bins })
    }

    /// Re-encode as a plain JSON object (used when handing assignments to
    /// the LLM renderer).
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (bin, items) in &self.bins {
            map.insert(
                bin.clone(),
                Value::Array(items.iter().map(|i| Value::String(i.clone())).collect()),
            );
        }
        Value::Object(map)
    }
}

fn stringify_item(item: &Value) -> Result<String, AppError> {
    match item {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AppError::new(
            4,
            format!("Unexpected item value in optimizer result: {other}"),
        )),
    }
}

/// Split top-level entries on commas that are not inside brackets.
fn split_entries(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in input.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn informal_map_parses_to_assignments() {
        let parsed = Assignments::parse_informal("{bin1=[1, 4, 6], bin2=[2, 5, 8]}").unwrap();
        assert_eq!(
            parsed.bins,
            vec![
                ("bin1".to_string(), vec!["1".into(), "4".into(), "6".into()]),
                ("bin2".to_string(), vec!["2".into(), "5".into(), "8".into()]),
            ]
        );
    }

    #[test]
    fn informal_map_tolerates_empty_bins() {
        let parsed = Assignments::parse_informal("{bin1=[], bin2=[3]}").unwrap();
        assert_eq!(
            parsed.bins,
            vec![
                ("bin1".to_string(), vec![]),
                ("bin2".to_string(), vec!["3".to_string()]),
            ]
        );
    }

    #[test]
    fn informal_map_rejects_garbage() {
        assert!(Assignments::parse_informal("no braces here").is_err());
        assert!(Assignments::parse_informal("{bin1: [1]}").is_err());
    }

    #[test]
    fn json_result_with_numbers_is_stringified() {
        let value = json!({"1": [1, 4], "2": ["5"]});
        let parsed = Assignments::from_result_value(&value).unwrap();
        assert_eq!(
            parsed.bins,
            vec![
                ("1".to_string(), vec!["1".into(), "4".into()]),
                ("2".to_string(), vec!["5".into()]),
            ]
        );
    }

    #[test]
    fn non_mapping_result_is_rejected() {
        assert!(Assignments::from_result_value(&json!([1, 2])).is_err());
        assert!(Assignments::from_result_value(&json!({"bin1": 7})).is_err());
    }

    #[test]
    fn to_json_round_trips() {
        let value = json!({"bin1": ["1"], "bin2": ["2", "3"]});
        let parsed = Assignments::from_result_value(&value).unwrap();
        assert_eq!(parsed.to_json(), value);
    }
}
