use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Storage key holding the one and only credentials record.
pub const CREDENTIALS_KEY: &str = "credentials";

/// Missing keys decode as empty names so a partial record loads as incomplete
/// instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub first_name: String,
    pub last_name: String,
}

impl Credentials {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Both names present. A record loaded from storage is only shown when this holds.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
        }
    }
}

/// Per-field messages for the inputs currently failing validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_serialize_with_camel_case_keys() {
        let json = serde_json::to_string(&Credentials::new("Jean", "Dupont")).expect("json");
        assert_eq!(json, r#"{"firstName":"Jean","lastName":"Dupont"}"#);
    }

    #[test]
    fn credentials_with_an_empty_name_are_incomplete() {
        assert!(Credentials::new("Jean", "Dupont").is_complete());
        assert!(!Credentials::new("", "Dupont").is_complete());
        assert!(!Credentials::new("Jean", "").is_complete());
    }

    #[test]
    fn partial_record_decodes_as_incomplete() {
        let credentials: Credentials =
            serde_json::from_str(r#"{"firstName":"Jean"}"#).expect("json");
        assert_eq!(credentials, Credentials::new("Jean", ""));
        assert!(!credentials.is_complete());
    }

    #[test]
    fn validation_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::LastName, "Champs requis");
        let json = serde_json::to_string(&errors).expect("json");
        assert_eq!(json, r#"{"lastName":"Champs requis"}"#);
        assert_eq!(Field::LastName.key(), "lastName");
    }
}
