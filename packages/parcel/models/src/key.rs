//! Join-key normalization and numeric field coercion.
//!
//! Source identifiers arrive as a mix of strings and numbers with
//! inconsistent padding between the GIS layer and the assessor export.
//! Every key goes through the same stringify-and-trim pipeline on both
//! sides so the join predicate can match reliably. The pipeline is
//! idempotent: normalizing an already-normalized key is a no-op.

use serde_json::Value;

/// Placeholder for a null, blank, or absent key. Never equals a real
/// parcel id, so keyless rows never match a real parcel.
pub const MISSING_KEY: &str = "<missing>";

/// Converts a JSON property value to its canonical string form.
///
/// Integral floats render without a fractional part so that `12.0` and
/// `"12"` normalize identically. Returns `None` for JSON null and for
/// empty or whitespace-only strings, so blank cells normalize the same
/// way on both sides of the join.
#[must_use]
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(f) = n.as_f64() {
        // Render integral floats as integers so numeric and string
        // representations of the same id compare equal.
        #[allow(clippy::cast_possible_truncation)]
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
            return (f as i64).to_string();
        }
        return f.to_string();
    }
    n.to_string()
}

/// Normalizes a JSON property into a join key.
///
/// Missing and null values collapse to [`MISSING_KEY`].
#[must_use]
pub fn normalize_key(value: Option<&Value>) -> String {
    value
        .and_then(stringify)
        .unwrap_or_else(|| MISSING_KEY.to_owned())
}

/// Normalizes a textual field (e.g. a CSV cell) into a join key.
///
/// Absent, empty, and whitespace-only values all collapse to
/// [`MISSING_KEY`].
#[must_use]
pub fn normalize_key_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => MISSING_KEY.to_owned(),
    }
}

/// Coerces a raw textual field to a number.
///
/// Unparseable values (including currency formatting and thousands
/// separators) map to `None` rather than raising; the output is a
/// best-effort analytical artifact.
#[must_use]
pub fn coerce_numeric(value: Option<&str>) -> Option<f64> {
    value.and_then(|s| s.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_surrounding_whitespace() {
        let v = json!("  001-0001  ");
        assert_eq!(normalize_key(Some(&v)), "001-0001");
    }

    #[test]
    fn normalization_is_idempotent() {
        let v = json!(" 12-34 ");
        let once = normalize_key(Some(&v));
        let twice = normalize_key_text(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn integer_and_string_forms_match() {
        let as_int = json!(1234);
        let as_float = json!(1234.0);
        let as_str = json!("1234");
        assert_eq!(normalize_key(Some(&as_int)), "1234");
        assert_eq!(normalize_key(Some(&as_float)), "1234");
        assert_eq!(normalize_key(Some(&as_str)), "1234");
    }

    #[test]
    fn null_and_missing_collapse_to_placeholder() {
        assert_eq!(normalize_key(None), MISSING_KEY);
        assert_eq!(normalize_key(Some(&Value::Null)), MISSING_KEY);
        assert_eq!(normalize_key_text(None), MISSING_KEY);
    }

    #[test]
    fn blank_keys_collapse_to_placeholder_on_both_sides() {
        // A blank GeoJSON property and a blank CSV cell must normalize
        // identically, or blank-keyed rows would diverge between the
        // two inputs.
        let empty = json!("");
        let blank = json!("   ");
        assert_eq!(normalize_key(Some(&empty)), MISSING_KEY);
        assert_eq!(normalize_key(Some(&blank)), MISSING_KEY);
        assert_eq!(normalize_key_text(Some("")), MISSING_KEY);
        assert_eq!(normalize_key_text(Some("   ")), MISSING_KEY);
    }

    #[test]
    fn fractional_ids_keep_their_fraction() {
        let v = json!(12.5);
        assert_eq!(normalize_key(Some(&v)), "12.5");
    }

    #[test]
    fn coerces_plain_numbers() {
        assert_eq!(coerce_numeric(Some("500000")), Some(500_000.0));
        assert_eq!(coerce_numeric(Some("  2.75 ")), Some(2.75));
    }

    #[test]
    fn unparseable_values_become_null() {
        assert_eq!(coerce_numeric(Some("N/A")), None);
        assert_eq!(coerce_numeric(Some("$1,234")), None);
        assert_eq!(coerce_numeric(Some("")), None);
        assert_eq!(coerce_numeric(None), None);
    }
}
