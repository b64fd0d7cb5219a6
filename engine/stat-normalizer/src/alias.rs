//! First-present-wins alias lookup over raw JSON rows

use serde_json::Value;

/// Return the first alias present in `row` with a non-null value
pub(crate) fn pick<'a>(row: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = row.as_object()?;
    aliases.iter().find_map(|alias| map.get(*alias).filter(|v| !v.is_null()))
}

/// Return the first alias present in `row` as a non-empty string
pub(crate) fn pick_str(row: &Value, aliases: &[&str]) -> Option<String> {
    let map = row.as_object()?;
    aliases
        .iter()
        .filter_map(|alias| map.get(*alias))
        .find_map(|value| match value.as_str() {
            Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
}

/// Resolve the first present alias to a stat value, defaulting to zero.
///
/// Accepts JSON numbers and numeric strings (upstream emits both); any
/// other shape, non-finite value, or negative counter coerces to zero.
pub(crate) fn pick_stat(row: &Value, aliases: &[&str]) -> f64 {
    pick(row, aliases).map(coerce_stat).unwrap_or(0.0)
}

/// Coerce one raw value to a finite non-negative stat
pub(crate) fn coerce_stat(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_alias_wins() {
        let row = json!({ "passYards": 210, "netPassingYards": 999 });
        assert_eq!(pick_stat(&row, &["passingYards", "passYards", "netPassingYards"]), 210.0);
    }

    #[test]
    fn absent_aliases_default_to_zero() {
        let row = json!({ "somethingElse": 4 });
        assert_eq!(pick_stat(&row, &["rushingYards", "rushYards"]), 0.0);
    }

    #[test]
    fn null_valued_alias_falls_through_to_the_next() {
        let row = json!({ "rushingYards": null, "rushYards": 83 });
        assert_eq!(pick_stat(&row, &["rushingYards", "rushYards"]), 83.0);
    }

    #[test]
    fn numeric_strings_coerce() {
        let row = json!({ "receptions": "7" });
        assert_eq!(pick_stat(&row, &["receptions"]), 7.0);
    }

    #[test]
    fn garbage_and_negative_values_coerce_to_zero() {
        assert_eq!(coerce_stat(&json!("a lot")), 0.0);
        assert_eq!(coerce_stat(&json!(null)), 0.0);
        assert_eq!(coerce_stat(&json!({"nested": 1})), 0.0);
        assert_eq!(coerce_stat(&json!(-12)), 0.0);
    }

    #[test]
    fn non_object_rows_yield_nothing() {
        assert!(pick(&json!("not a row"), &["team"]).is_none());
        assert_eq!(pick_stat(&json!(42), &["targets"]), 0.0);
        assert!(pick_str(&json!([1, 2]), &["name"]).is_none());
    }
}
