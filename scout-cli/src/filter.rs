//! `name=value` filter arguments.

use scout_core::types::{FilterValue, NumericRange};

/// Parses `name=value` into a query field.
///
/// Values are read as, in order: `true`/`false`, integer, finite float,
/// `min..max` range (either side may be empty), comma-separated list, text.
pub fn parse_filter(arg: &str) -> Result<(String, FilterValue), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }
    Ok((name.to_string(), parse_value(raw)?))
}

fn parse_value(raw: &str) -> Result<FilterValue, String> {
    match raw {
        "true" => return Ok(FilterValue::Bool(true)),
        "false" => return Ok(FilterValue::Bool(false)),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(FilterValue::Integer(i));
    }
    if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        return Ok(FilterValue::Float(f));
    }
    if let Some((min, max)) = raw.split_once("..") {
        return Ok(FilterValue::Range(NumericRange {
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        }));
    }
    if raw.contains(',') {
        return Ok(FilterValue::List(
            raw.split(',').map(|s| s.trim().to_string()).collect(),
        ));
    }
    Ok(FilterValue::Text(raw.to_string()))
}

fn parse_bound(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Some)
        .ok_or_else(|| format!("invalid range bound '{raw}'"))
}
