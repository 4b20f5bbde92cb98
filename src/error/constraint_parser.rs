use std::sync::LazyLock;

use regex::Regex;

/// Utility for parsing PostgreSQL constraint violation messages.
pub struct ConstraintParser;

/// Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"));

static COLUMN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"));

static RELATION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:relation|table) "([^"]+)""#).expect("valid relation pattern")
});

impl ConstraintParser {
    /// Extracts `(entity, field, value)` from a unique constraint violation.
    ///
    /// The constraint name (`users_email_key`) is tried first, then the
    /// `Key (field)=(value)` detail of the message.
    ///
    /// ```
    /// use staff_rs::error::ConstraintParser;
    ///
    /// let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(a@b.io) already exists.";
    /// let parsed = ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
    /// assert_eq!(parsed, Some(("users".into(), "email".into(), "a@b.io".into())));
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, v)| v)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_relation_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Extracts `(entity, field)` from a not-null violation message.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = COLUMN_NAME.captures(message)?.get(1)?.as_str().to_string();
        let entity = Self::extract_relation_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a `<table>_<column...>_<suffix>` constraint name.
    ///
    /// - "users_email_key" -> ("users", "email")
    /// - "users_first_name_idx" -> ("users", "first_name")
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = constraint_name.split('_').collect();
        if parts.len() < 3 {
            return None;
        }
        let entity = parts[0].to_string();
        let field = parts[1..parts.len() - 1].join("_");
        Some((entity, field))
    }

    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let captures = KEY_VALUE.captures(message)?;
        Some((
            captures.get(1)?.as_str().to_string(),
            captures.get(2)?.as_str().to_string(),
        ))
    }

    fn extract_relation_from_message(message: &str) -> Option<String> {
        RELATION_NAME
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL_DUP: &str = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(rick@citadel.io) already exists.";

    #[test]
    fn unique_violation_from_constraint_name() {
        let parsed = ConstraintParser::parse_unique_violation(EMAIL_DUP, Some("users_email_key"));
        assert_eq!(
            parsed,
            Some((
                "users".to_string(),
                "email".to_string(),
                "rick@citadel.io".to_string()
            ))
        );
    }

    #[test]
    fn unique_violation_without_constraint_name_uses_detail() {
        let parsed = ConstraintParser::parse_unique_violation(EMAIL_DUP, None);
        assert_eq!(
            parsed,
            Some((
                "resource".to_string(),
                "email".to_string(),
                "rick@citadel.io".to_string()
            ))
        );
    }

    #[test]
    fn unique_violation_with_unparseable_message() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("something odd", None),
            None
        );
        assert_eq!(
            ConstraintParser::parse_unique_violation("something odd", Some("users_email_key")),
            Some((
                "users".to_string(),
                "email".to_string(),
                "duplicate_value".to_string()
            ))
        );
    }

    #[test]
    fn multi_word_columns_survive_constraint_parsing() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_first_name_idx"),
            Some(("users".to_string(), "first_name".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("pkey"), None);
    }

    #[test]
    fn not_null_violation() {
        let message = "null value in column \"email\" of relation \"users\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            Some(("users".to_string(), "email".to_string()))
        );
    }
}
