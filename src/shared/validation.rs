use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::core::error::AppError;

/// Field name (camelCase, as sent on the wire) -> human-readable message
pub type FieldErrors = BTreeMap<String, String>;

lazy_static! {
    /// Phone numbers: digits, hyphen, plus, whitespace and parentheses only
    /// - Valid: "010-1234-5678", "+82 (2) 555 0100"
    /// - Invalid: "010.1234.5678", "call me", ""
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9\-+\s()]+$").unwrap();

    /// Service types offered on the application form
    pub static ref PROJECT_TYPE_REGEX: Regex =
        Regex::new(r"^(youtube|seo|sns|local|payment|consulting)$").unwrap();

    /// Monthly budget brackets offered on the application form
    pub static ref BUDGET_RANGE_REGEX: Regex = Regex::new(
        r"^(under_10m|range_10m_50m|range_50m_100m|range_100m_500m|over_500m)$"
    )
    .unwrap();
}

/// Convert `snake_case` validator keys to the camelCase names clients send.
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Flatten validator output into one message per field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let name = to_camel_case(&field.to_string());
        let message = errs
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| format!("{} is invalid", name));
        fields.insert(name, message);
    }
    fields
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::FieldValidation(field_errors(&errors))
    }
}

/// Trim an optional string in place, keeping it `Some` even when empty so that
/// length rules (rather than `required`) report blank input.
pub fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Parse a path id; anything that is not a UUID cannot name an existing row.
pub fn parse_id(raw: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(format!("{} not found", resource)))
}

/// Turn a free-text search term into a substring ILIKE pattern.
///
/// `%`, `_` and `\` match literally; `\` is the default LIKE escape in Postgres.
pub fn like_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("010-1234-5678"));
        assert!(PHONE_REGEX.is_match("+82 (2) 555 0100"));
        assert!(!PHONE_REGEX.is_match("010.1234.5678"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match(""));
    }

    #[test]
    fn test_enum_regexes() {
        assert!(PROJECT_TYPE_REGEX.is_match("payment"));
        assert!(!PROJECT_TYPE_REGEX.is_match("Payment"));
        assert!(!PROJECT_TYPE_REGEX.is_match("seo2"));
        assert!(BUDGET_RANGE_REGEX.is_match("range_10m_50m"));
        assert!(!BUDGET_RANGE_REGEX.is_match("range_10m"));
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("company_name"), "companyName");
        assert_eq!(to_camel_case("attachment_ids"), "attachmentIds");
        assert_eq!(to_camel_case("timeline"), "timeline");
        assert_eq!(to_camel_case("contactEmail"), "contactEmail");
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Notice").unwrap(), id);
        match parse_id("42", "Notice") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Notice not found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("  acme ").as_deref(), Some("%acme%"));
        assert_eq!(like_pattern("A_me").as_deref(), Some(r"%A\_me%"));
        assert_eq!(like_pattern("100%").as_deref(), Some(r"%100\%%"));
        assert_eq!(like_pattern(r"C:\dir").as_deref(), Some(r"%C:\\dir%"));
        assert!(like_pattern("   ").is_none());
    }
}
