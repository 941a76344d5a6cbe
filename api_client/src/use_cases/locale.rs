use serde_json::Value;

use crate::domain::Locale;

// Picks `<field>_<locale>` from an API record, then the default locale's
// variant, then the bare field. Blank strings are skipped.
pub fn localized<'a>(record: &'a Value, field: &str, locale: Locale) -> Option<&'a str> {
    let candidates = [
        format!("{field}_{}", locale.code()),
        format!("{field}_{}", Locale::default().code()),
        field.to_string(),
    ];

    candidates.iter().find_map(|key| {
        record
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    })
}
