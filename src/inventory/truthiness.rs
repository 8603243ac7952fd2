use itertools::Itertools;
use serde_json::{Map, Number, Value};

/// Text form of an inventory variable value.  Used for var-leaf labels and as
/// the representation truthiness is judged against, so both always agree.
///
/// - strings are taken verbatim (no quotes)
/// - booleans, numbers and null use their JSON spelling, except that floats
///   with no fractional part drop the `.0` (`1.0` reads as `1`)
/// - sequences join their items' text with `,`
/// - mappings fall back to compact JSON
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(scalar_text).join(","),
        other => other.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        // Past 1e21 the exponent form is kept.
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// Whether `value` is an affirmative flag: the boolean `true`, or anything
/// whose text form lower-cases to `"true"`.  Total; never fails.
pub fn is_affirmative(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.to_lowercase() == "true",
        Value::Null | Value::Number(_) | Value::Object(_) => false,
        Value::Array(_) => scalar_text(value).to_lowercase() == "true",
    }
}

/// The warning flag of an entity given its (possibly absent) vars.  An absent
/// mapping or an absent `warning` key both count as not affirmative.
pub fn warning_flag(vars: Option<&Map<String, Value>>) -> bool {
    vars.and_then(|vars| vars.get("warning"))
        .map_or(false, is_affirmative)
}
