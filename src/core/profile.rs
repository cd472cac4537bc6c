use crate::models::{PriceRange, UserProfile};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Build a `UserProfile` from raw, untrusted request context
///
/// This is the first stage of the recommendation pipeline and never fails:
/// absent fields and fields of the wrong shape fall back to the profile
/// defaults. A context given as a JSON-encoded string is decoded first.
/// Values are only coerced, never range checked.
pub fn extract_profile(raw: &Value) -> UserProfile {
    match raw {
        Value::Object(map) => extract_from_map(map),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => extract_from_map(&map),
            _ => {
                tracing::debug!("Context string is not a JSON object, using default profile");
                UserProfile::default()
            }
        },
        _ => UserProfile::default(),
    }
}

fn extract_from_map(map: &Map<String, Value>) -> UserProfile {
    let defaults = UserProfile::default();

    UserProfile {
        age: field(map, &["age"]).and_then(coerce_u32).unwrap_or(defaults.age),
        gender: field(map, &["gender"]).and_then(coerce_string).unwrap_or(defaults.gender),
        eye_conditions: field(map, &["eyeConditions", "eye_conditions"])
            .map(coerce_set)
            .unwrap_or_default(),
        screen_time_hours: field(map, &["screenTimeHours", "screen_time_hours", "screenTime"])
            .and_then(coerce_f64)
            .unwrap_or(defaults.screen_time_hours),
        sleep_hours: field(map, &["sleepHours", "sleep_hours"])
            .and_then(coerce_f64)
            .unwrap_or(defaults.sleep_hours),
        work_type: field(map, &["workType", "work_type"])
            .and_then(coerce_string)
            .unwrap_or(defaults.work_type),
        symptoms: field(map, &["symptoms"]).map(coerce_set).unwrap_or_default(),
        preferences: field(map, &["preferences"]).map(coerce_set).unwrap_or_default(),
        budget_range: field(map, &["budgetRange", "budget_range"])
            .and_then(coerce_budget)
            .unwrap_or(defaults.budget_range),
    }
}

/// First present, non-null value under any of the given keys
fn field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn coerce_u32(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let number = coerce_f64(value)?;
    if number < 0.0 || number > u32::MAX as f64 {
        return None;
    }
    Some(number.trunc() as u32)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Arrays keep their string members, a lone string becomes a singleton set
fn coerce_set(value: &Value) -> BTreeSet<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(coerce_string).collect(),
        Value::String(_) => coerce_string(value).into_iter().collect(),
        _ => BTreeSet::new(),
    }
}

/// Accepts `[min, max]` or `{"min": .., "max": ..}`
fn coerce_budget(value: &Value) -> Option<PriceRange> {
    let (min, max) = match value {
        Value::Array(items) if items.len() >= 2 => (coerce_f64(&items[0])?, coerce_f64(&items[1])?),
        Value::Object(map) => (
            field(map, &["min"]).and_then(coerce_f64)?,
            field(map, &["max"]).and_then(coerce_f64)?,
        ),
        _ => return None,
    };
    Some(PriceRange::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_context_yields_defaults() {
        let profile = extract_profile(&json!({}));
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.age, 30);
        assert_eq!(profile.gender, "unknown");
        assert_eq!(profile.work_type, "office");
        assert_eq!(profile.budget_range, PriceRange::new(100.0, 500.0));
    }

    #[test]
    fn test_non_object_context_yields_defaults() {
        assert_eq!(extract_profile(&Value::Null), UserProfile::default());
        assert_eq!(extract_profile(&json!([1, 2, 3])), UserProfile::default());
        assert_eq!(extract_profile(&json!("not json")), UserProfile::default());
    }

    #[test]
    fn test_full_context() {
        let profile = extract_profile(&json!({
            "age": 42,
            "gender": "female",
            "eyeConditions": ["myopia"],
            "screenTimeHours": 10.5,
            "sleepHours": 6,
            "workType": "gaming",
            "symptoms": ["eye_strain", "dry_eye"],
            "preferences": ["natural"],
            "budgetRange": [50, 200]
        }));

        assert_eq!(profile.age, 42);
        assert_eq!(profile.gender, "female");
        assert!(profile.eye_conditions.contains("myopia"));
        assert_eq!(profile.screen_time_hours, 10.5);
        assert_eq!(profile.sleep_hours, 6.0);
        assert_eq!(profile.work_type, "gaming");
        assert_eq!(profile.symptoms.len(), 2);
        assert_eq!(profile.budget_range, PriceRange::new(50.0, 200.0));
    }

    #[test]
    fn test_encoded_string_context() {
        let profile = extract_profile(&json!(r#"{"age": 55, "workType": "study"}"#));
        assert_eq!(profile.age, 55);
        assert_eq!(profile.work_type, "study");
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let profile = extract_profile(&json!({
            "age": -4,
            "gender": 12,
            "screenTimeHours": "lots",
            "workType": "",
            "symptoms": "eye_strain",
            "budgetRange": [10]
        }));

        assert_eq!(profile.age, 30);
        assert_eq!(profile.gender, "unknown");
        assert_eq!(profile.screen_time_hours, 8.0);
        assert_eq!(profile.work_type, "office");
        assert!(profile.symptoms.contains("eye_strain"));
        assert_eq!(profile.budget_range, PriceRange::new(100.0, 500.0));
    }

    #[test]
    fn test_numeric_strings_and_snake_case() {
        let profile = extract_profile(&json!({
            "age": "27",
            "screen_time_hours": "3.5",
            "budget_range": {"min": 600, "max": 20}
        }));

        assert_eq!(profile.age, 27);
        assert_eq!(profile.screen_time_hours, 3.5);
        // Inverted ranges are kept as given
        assert_eq!(profile.budget_range, PriceRange::new(600.0, 20.0));
    }
}
