//! # Raw Input Coercion
//!
//! Property editors hand over raw strings. Each field's [`FieldKind`] decides
//! how a raw string becomes a typed [`PropValue`]:
//!
//! | kind | rule |
//! |---|---|
//! | `Int` | leading integer prefix (`"12px"` → 12), malformed → 0, clamped |
//! | `Float` | leading float prefix, malformed → 0, clamped |
//! | `Lines` | split on newlines, trim, drop blank lines |
//! | `Tokens` | split on commas, trim, keep empty tokens |
//! | `Table` | newline-separated rows of comma-separated cells, trimmed |
//! | `Records` | strict JSON list of records with exactly the schema keys |
//! | `Color` | hex color (trimmed) |
//! | `Choice` | one of the listed options |
//! | `Text` | verbatim |
//!
//! `None` means the input is rejected and the field keeps its current value.

use blockmail_registry::{is_hex_color, FieldKind, PropValue, Record, RecordField, RecordKey};
use serde_json::Value;

/// Coerce a raw edit into the kind a field requires
pub fn coerce(kind: &FieldKind, raw: &str) -> Option<PropValue> {
    match kind {
        FieldKind::Text => Some(PropValue::Text(raw.to_string())),
        FieldKind::Color => {
            let color = raw.trim();
            is_hex_color(color).then(|| PropValue::Text(color.to_string()))
        }
        FieldKind::Choice(options) => options
            .contains(&raw)
            .then(|| PropValue::Text(raw.to_string())),
        FieldKind::Int { min, max } => {
            Some(PropValue::Int(parse_int_prefix(raw).unwrap_or(0).clamp(*min, *max)))
        }
        FieldKind::Float { min, max } => {
            Some(PropValue::Float(parse_float_prefix(raw).unwrap_or(0.0).clamp(*min, *max)))
        }
        FieldKind::Lines => Some(PropValue::List(split_lines(raw))),
        FieldKind::Tokens => Some(PropValue::List(split_tokens(raw))),
        FieldKind::Table => Some(PropValue::Table(split_table(raw))),
        FieldKind::Records(keys) => parse_records(raw, keys).map(PropValue::Records),
    }
}

/// Integer from the longest leading `[+-]digits` run, after leading
/// whitespace. Values beyond `i64` saturate.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let run: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if run.is_empty() {
        return None;
    }

    let magnitude = run.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Float from the longest leading prefix that parses as a finite number,
/// after leading whitespace.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..end];

    (1..=candidate.len())
        .rev()
        .filter_map(|len| candidate[..len].parse::<f64>().ok())
        .find(|value| value.is_finite())
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',').map(|token| token.trim().to_string()).collect()
}

/// One row per `\n`, blank rows included; cells are trimmed, which also
/// drops a `\r` line ending.
fn split_table(raw: &str) -> Vec<Vec<String>> {
    raw.split('\n').map(split_tokens).collect()
}

/// Strict parse: a JSON array of objects carrying exactly `keys`
fn parse_records(raw: &str, keys: &[RecordKey]) -> Option<Vec<Record>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let items = value.as_array()?;

    items
        .iter()
        .map(|item| {
            let object = item.as_object()?;
            if object.len() != keys.len() {
                return None;
            }
            keys.iter()
                .map(|key| {
                    let field = match object.get(key.name)? {
                        Value::Bool(flag) if key.flag => RecordField::Flag(*flag),
                        Value::String(text) if !key.flag => RecordField::Text(text.clone()),
                        _ => return None,
                    };
                    Some((key.name.to_string(), field))
                })
                .collect::<Option<Record>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURE_KEYS: &[RecordKey] = &[
        RecordKey::text("icon"),
        RecordKey::text("title"),
        RecordKey::text("text"),
    ];

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_int_prefix() {
        assert_eq!(parse_int_prefix("12px"), Some(12));
        assert_eq!(parse_int_prefix("  -7"), Some(-7));
        assert_eq!(parse_int_prefix("+3.9"), Some(3));
        assert_eq!(parse_int_prefix("px12"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("0.75"), Some(0.75));
        assert_eq!(parse_float_prefix(".5abc"), Some(0.5));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
    }

    #[test]
    fn test_int_clamps_and_defaults_to_zero() {
        let kind = FieldKind::int(12, 32);
        assert_eq!(coerce(&kind, "20px"), Some(PropValue::Int(20)));
        assert_eq!(coerce(&kind, "100"), Some(PropValue::Int(32)));
        assert_eq!(coerce(&kind, "abc"), Some(PropValue::Int(12)));

        let radius = FieldKind::int(0, 24);
        assert_eq!(coerce(&radius, "abc"), Some(PropValue::Int(0)));
    }

    #[test]
    fn test_opacity() {
        let kind = FieldKind::float(0.0, 1.0);
        assert_eq!(coerce(&kind, "0.3"), Some(PropValue::Float(0.3)));
        assert_eq!(coerce(&kind, "7"), Some(PropValue::Float(1.0)));
        assert_eq!(coerce(&kind, "-2"), Some(PropValue::Float(0.0)));
        assert_eq!(coerce(&kind, "dark"), Some(PropValue::Float(0.0)));
    }

    #[test]
    fn test_lines_drop_blanks() {
        assert_eq!(
            coerce(&FieldKind::Lines, "First\n\n  Second  \n"),
            Some(PropValue::List(strings(&["First", "Second"])))
        );
    }

    #[test]
    fn test_tokens_keep_empties() {
        assert_eq!(
            coerce(&FieldKind::Tokens, "Year, ,Language,"),
            Some(PropValue::List(strings(&["Year", "", "Language", ""])))
        );
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(
            coerce(&FieldKind::Table, "1,2\n3,4"),
            Some(PropValue::Table(vec![strings(&["1", "2"]), strings(&["3", "4"])]))
        );
    }

    #[test]
    fn test_table_keeps_blank_rows() {
        assert_eq!(
            coerce(&FieldKind::Table, "1,2\r\n"),
            Some(PropValue::Table(vec![strings(&["1", "2"]), strings(&[""])]))
        );
        assert_eq!(coerce(&FieldKind::Table, ""), Some(PropValue::Table(vec![strings(&[""])])));
    }

    #[test]
    fn test_records_strict() {
        let kind = FieldKind::Records(FEATURE_KEYS);

        let good = r#"[{"icon":"i.png","title":"Fast","text":"Very"}]"#;
        assert!(matches!(coerce(&kind, good), Some(PropValue::Records(r)) if r.len() == 1));

        assert_eq!(coerce(&kind, "not json"), None);
        assert_eq!(coerce(&kind, r#"{"icon":"i"}"#), None);
        assert_eq!(coerce(&kind, r#"[{"icon":"i","title":"t"}]"#), None);
        assert_eq!(coerce(&kind, r#"[{"icon":"i","title":"t","text":"x","extra":"y"}]"#), None);
        assert_eq!(coerce(&kind, r#"[{"icon":1,"title":"t","text":"x"}]"#), None);
    }

    #[test]
    fn test_color_and_choice() {
        assert_eq!(
            coerce(&FieldKind::Color, " #AABBCC "),
            Some(PropValue::Text("#AABBCC".to_string()))
        );
        assert_eq!(coerce(&FieldKind::Color, "blue"), None);

        let align = FieldKind::Choice(&["left", "center", "right"]);
        assert_eq!(coerce(&align, "right"), Some(PropValue::Text("right".to_string())));
        assert_eq!(coerce(&align, "justify"), None);
    }

    #[test]
    fn test_text_is_verbatim() {
        assert_eq!(
            coerce(&FieldKind::Text, "  <b>hi</b>  "),
            Some(PropValue::Text("  <b>hi</b>  ".to_string()))
        );
    }
}
