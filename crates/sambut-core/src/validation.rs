#![forbid(unsafe_code)]

//! Field validators for the contact form and the greeting input.
//!
//! Every validator is a pure function from the raw text to a
//! [`ValidationResult`]. Rules are checked in order and the first failing rule
//! wins. Validators never panic and never allocate on the success path.
//!
//! # Example
//!
//! ```
//! use sambut_core::validation::{FormField, validate_phone};
//!
//! assert!(validate_phone("081234567890").is_valid());
//! assert_eq!(validate_phone("0812").inline_text(), "Minimal 10 digit");
//! assert_eq!(FormField::Email.validate("").inline_text(), "Email harus diisi");
//! ```

use std::fmt;

use crate::messages;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for a blank field.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a value below its minimum length.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for a value above its maximum length.
pub const ERROR_CODE_MAX_LENGTH: &str = "too_long";
/// Error code for a value with characters outside the allowed set.
pub const ERROR_CODE_PATTERN: &str = "pattern";
/// Error code for a malformed email address.
pub const ERROR_CODE_EMAIL: &str = "email";
/// Error code for a phone number containing non-digits.
pub const ERROR_CODE_NUMERIC: &str = "numeric";

const NAME_MIN_LEN: usize = 2;
const PHONE_MIN_LEN: usize = 10;
const PHONE_MAX_LEN: usize = 15;
const MESSAGE_MIN_LEN: usize = 10;
const MESSAGE_MAX_LEN: usize = 500;

// ---------------------------------------------------------------------------
// FormField
// ---------------------------------------------------------------------------

/// One input of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// DOM id of the input element.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// DOM id of the inline error slot next to the input.
    #[must_use]
    pub const fn error_dom_id(self) -> &'static str {
        match self {
            Self::Name => "name-error",
            Self::Email => "email-error",
            Self::Phone => "phone-error",
            Self::Message => "message-error",
        }
    }

    /// Resolve a DOM id back to its field.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.dom_id() == id)
    }

    /// Run this field's validator.
    #[must_use]
    pub fn validate(self, value: &str) -> ValidationResult {
        match self {
            Self::Name => validate_name(value),
            Self::Email => validate_email(value),
            Self::Phone => validate_phone(value),
            Self::Message => validate_message(value),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationError / ValidationResult
// ---------------------------------------------------------------------------

/// A failed rule: stable code plus the message shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling.
    pub code: &'static str,
    /// Localized message.
    pub message: &'static str,
}

impl ValidationError {
    #[must_use]
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The result of a validation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the error if the result is `Invalid`, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Text for the inline error slot: empty when valid.
    #[must_use]
    pub fn inline_text(&self) -> &'static str {
        match self {
            Self::Valid => "",
            Self::Invalid(e) => e.message,
        }
    }

    /// Combine two results, returning the first error if any.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Valid => next(),
            Self::Invalid(_) => self,
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationResult {
    ValidationResult::Invalid(ValidationError::new(code, message))
}

fn check(ok: bool, code: &'static str, message: &'static str) -> ValidationResult {
    if ok {
        ValidationResult::Valid
    } else {
        invalid(code, message)
    }
}

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Whitespace as browsers define it for `String.prototype.trim` and the `\s`
/// regex class. Differs from [`char::is_whitespace`] on U+0085 (not
/// whitespace here) and U+FEFF (whitespace here).
#[must_use]
pub fn is_browser_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `value` without leading or trailing browser whitespace.
#[must_use]
pub fn trim_browser(value: &str) -> &str {
    value.trim_matches(is_browser_whitespace)
}

fn is_blank(value: &str) -> bool {
    trim_browser(value).is_empty()
}

/// ASCII letters and whitespace only, at least one character.
fn is_letters_and_spaces(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || is_browser_whitespace(c))
}

fn is_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`: no whitespace, exactly one `@` with text on both
/// sides, and a `.` in the domain with text on both sides of it.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(is_browser_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Contact name: required, at least 2 characters, letters and spaces only.
#[must_use]
pub fn validate_name(value: &str) -> ValidationResult {
    check(!is_blank(value), ERROR_CODE_REQUIRED, messages::NAME_REQUIRED)
        .and_then(|| {
            check(
                char_len(value) >= NAME_MIN_LEN,
                ERROR_CODE_MIN_LENGTH,
                messages::NAME_TOO_SHORT,
            )
        })
        .and_then(|| {
            check(
                is_letters_and_spaces(value),
                ERROR_CODE_PATTERN,
                messages::NAME_INVALID_CHARS,
            )
        })
}

#[must_use]
pub fn validate_email(value: &str) -> ValidationResult {
    check(!is_blank(value), ERROR_CODE_REQUIRED, messages::EMAIL_REQUIRED)
        .and_then(|| check(is_email_shaped(value), ERROR_CODE_EMAIL, messages::EMAIL_INVALID))
}

/// Phone: required, digits only, 10 to 15 digits inclusive.
#[must_use]
pub fn validate_phone(value: &str) -> ValidationResult {
    if is_blank(value) {
        return invalid(ERROR_CODE_REQUIRED, messages::PHONE_REQUIRED);
    }
    if !is_ascii_digits(value) {
        return invalid(ERROR_CODE_NUMERIC, messages::PHONE_NOT_NUMERIC);
    }
    match value.len() {
        n if n < PHONE_MIN_LEN => invalid(ERROR_CODE_MIN_LENGTH, messages::PHONE_TOO_SHORT),
        n if n > PHONE_MAX_LEN => invalid(ERROR_CODE_MAX_LENGTH, messages::PHONE_TOO_LONG),
        _ => ValidationResult::Valid,
    }
}

#[must_use]
pub fn validate_message(value: &str) -> ValidationResult {
    if is_blank(value) {
        return invalid(ERROR_CODE_REQUIRED, messages::MESSAGE_REQUIRED);
    }
    match char_len(value) {
        n if n < MESSAGE_MIN_LEN => invalid(ERROR_CODE_MIN_LENGTH, messages::MESSAGE_TOO_SHORT),
        n if n > MESSAGE_MAX_LEN => invalid(ERROR_CODE_MAX_LENGTH, messages::MESSAGE_TOO_LONG),
        _ => ValidationResult::Valid,
    }
}

/// Greeting name, already trimmed by the caller.
///
/// Same rules as [`validate_name`] but checked as empty, then pattern, then
/// length, with the greeting's own wording for the empty case.
#[must_use]
pub fn validate_display_name(trimmed: &str) -> ValidationResult {
    check(!trimmed.is_empty(), ERROR_CODE_REQUIRED, messages::GREETING_EMPTY)
        .and_then(|| {
            check(
                is_letters_and_spaces(trimmed),
                ERROR_CODE_PATTERN,
                messages::NAME_INVALID_CHARS,
            )
        })
        .and_then(|| {
            check(
                char_len(trimmed) >= NAME_MIN_LEN,
                ERROR_CODE_MIN_LENGTH,
                messages::NAME_TOO_SHORT,
            )
        })
}
