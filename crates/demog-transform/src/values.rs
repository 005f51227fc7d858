//! Polars `AnyValue` helpers shared by the cleaning transforms.

use polars::prelude::AnyValue;

/// String rendering of a cell. Null renders empty; floats drop trailing
/// zeros so `1.0` and `1` name the same category.
pub fn any_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a cell; `None` for null and non-numeric values.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => s.trim().parse::<f64>().ok(),
        AnyValue::StringOwned(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Format a float without trailing zeros after the decimal point.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_and_nulls_render_plainly() {
        assert_eq!(any_to_string(&AnyValue::Null), "");
        assert_eq!(any_to_string(&AnyValue::String("1A")), "1A");
        assert_eq!(any_to_string(&AnyValue::Int64(-1)), "-1");
    }

    #[test]
    fn float_rendering_drops_trailing_zeros() {
        assert_eq!(any_to_string(&AnyValue::Float64(4.0)), "4");
        assert_eq!(any_to_string(&AnyValue::Float64(4.5)), "4.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn numeric_reading_parses_strings() {
        assert_eq!(any_to_f64(&AnyValue::String(" 2 ")), Some(2.0));
        assert_eq!(any_to_f64(&AnyValue::String("X")), None);
        assert_eq!(any_to_f64(&AnyValue::Int32(-1)), Some(-1.0));
        assert_eq!(any_to_f64(&AnyValue::Null), None);
    }
}
