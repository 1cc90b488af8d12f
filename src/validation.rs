//! Form sanitization helpers and custom field rules

use std::{borrow::Cow, collections::BTreeMap};

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::dates::parse_iso8601,
};

/// ASCII letters and digits only. Empty input is left to the length rule.
pub static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*$").expect("valid alphanumeric pattern"));

/// ISO-8601 date, optionally followed by a time of day and offset.
///
/// Accepts reduced precision (`YYYY`, `YYYY-MM`), the basic format
/// (`YYYYMMDD`), week dates (`YYYY-Www-D`) and ordinal dates (`YYYY-DDD`).
/// A time needs at least a month, week or ordinal day before it.
pub static ISO8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<year>[+-]?\d{4})
        (?:
            (?:
                -(?P<month>0[1-9]|1[0-2])(?:-(?P<day>0[1-9]|[12]\d|3[01]))?
              | (?P<bmonth>0[1-9]|1[0-2])(?P<bday>0[1-9]|[12]\d|3[01])
              | -W(?P<week>[0-4]\d|5[0-3])(?:-(?P<wday>[1-7]))?
              | W(?P<bweek>[0-4]\d|5[0-3])(?P<bwday>[1-7])?
              | -?(?P<ordinal>00[1-9]|0[1-9]\d|[12]\d{2}|3(?:[0-5]\d|6[0-6]))
            )
            (?:
                [T\s]
                (?:(?:[01]\d|2[0-3])(?::?[0-5]\d)?|24:?00)
                (?:[.,]\d+)?
                (?::?[0-5]\d(?:[.,]\d+)?)?
                (?:[zZ]|[+-](?:[01]\d|2[0-3]):?(?:[0-5]\d)?)?
            )?
        )?$",
    )
    .expect("valid ISO-8601 pattern")
});

/// Trim a required text field
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Trim an optional field; blank input counts as absent
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// HTML-escape user text before it is stored
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    match parse_iso8601(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

/// Run the derived rules and collect the first message of every failing field
pub fn check<T: Validate>(form: &T) -> Result<(), BTreeMap<String, String>> {
    form.validate().map_err(|errors| field_messages(&errors))
}

pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = first
                .message
                .clone()
                .unwrap_or_else(|| Cow::Owned(first.code.to_string()));
            Some((field.to_string(), message.into_owned()))
        })
        .collect()
}

/// Parse a record id. Malformed ids are a store failure, not a client error.
pub fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Store(format!("Cast to id failed for value \"{}\"", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(
            length(min = 1, message = "Name must be specified."),
            regex(path = *ALPHANUMERIC, message = "Name has non-alphanumeric characters.")
        )]
        name: String,
        #[validate(custom(function = "validate_iso8601", message = "Invalid date"))]
        when: Option<String>,
    }

    #[test]
    fn test_trim_optional() {
        assert_eq!(trim_optional(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(trim_optional(Some("   ".into())), None);
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape("<b>'x'</b>"), "&lt;b&gt;&#x27;x&#x27;&lt;&#x2F;b&gt;");
        assert_eq!(escape("Plain"), "Plain");
    }

    #[test]
    fn test_first_message_per_field() {
        let form = Sample { name: String::new(), when: Some("nope".into()) };
        let errors = check(&form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["name"], "Name must be specified.");
        assert_eq!(errors["when"], "Invalid date");

        let form = Sample { name: "Bad Name".into(), when: None };
        let errors = check(&form).unwrap_err();
        assert_eq!(errors["name"], "Name has non-alphanumeric characters.");
        assert!(!errors.contains_key("when"));
    }

    #[test]
    fn test_valid_form() {
        let form = Sample { name: "Asimov".into(), when: Some("1920-01-02".into()) };
        assert!(check(&form).is_ok());
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("12"), Err(AppError::Store(_))));
    }
}
