use serde::{Deserialize, Serialize};
use std::fmt;

// Keys under which the client persists session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    EmployeeId,
    GuestId,
    Locale,
}

impl SessionKey {
    pub const ALL: [SessionKey; 4] = [
        SessionKey::Token,
        SessionKey::EmployeeId,
        SessionKey::GuestId,
        SessionKey::Locale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::EmployeeId => "employee_id",
            SessionKey::GuestId => "guest_id",
            SessionKey::Locale => "locale",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Identifiers that scope guest requests to a table/session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestContext {
    pub employee_id: Option<String>,
    pub guest_id: Option<String>,
}

impl GuestContext {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.guest_id.is_none()
    }

    // Present identifiers as (wire name, value), employee first.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(employee_id) = self.employee_id.as_deref() {
            pairs.push((SessionKey::EmployeeId.as_str(), employee_id));
        }
        if let Some(guest_id) = self.guest_id.as_deref() {
            pairs.push((SessionKey::GuestId.as_str(), guest_id));
        }
        pairs
    }
}

// Display language persisted under the `locale` key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    // Unknown codes fall back to the default locale.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Locale::Ar,
            _ => Locale::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_guest_context_has_both_ids_then_pairs_list_employee_first() {
        let context = GuestContext {
            employee_id: Some("7".to_string()),
            guest_id: Some("g-1".to_string()),
        };

        assert_eq!(
            context.pairs(),
            vec![("employee_id", "7"), ("guest_id", "g-1")]
        );
    }

    #[test]
    fn when_guest_context_is_default_then_it_is_empty() {
        assert!(GuestContext::default().is_empty());
        assert!(GuestContext::default().pairs().is_empty());
    }

    #[test]
    fn when_locale_code_is_unknown_then_default_is_used() {
        assert_eq!(Locale::from_code("AR"), Locale::Ar);
        assert_eq!(Locale::from_code("fr"), Locale::En);
    }
}
