//! Validation rules for the individual lead fields

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const NAME_MESSAGE: &str = "Bitte gib deinen Namen an.";
pub const PHONE_MESSAGE: &str = "Bitte gib eine gültige Telefonnummer an.";
pub const EMAIL_MESSAGE: &str = "Bitte gib eine gültige E-Mail an (oder leer lassen).";
pub const TOPIC_MESSAGE: &str = "Bitte wähle ein Thema aus.";
pub const CONTACT_PREF_MESSAGE: &str = "Bitte wähle einen Kontaktweg.";
pub const CONSENT_MESSAGE: &str = "Bitte bestätige die Einwilligung.";

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 7;

lazy_static! {
    // ASCII digits only; a leading `+` or digit, then digits, whitespace, `-`, `(`, `)`.
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^[+0-9][0-9\s\-()]+$"
    ).unwrap();

    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Length is measured in UTF-16 code units, as browsers report it.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().encode_utf16().count() < MIN_NAME_LENGTH {
        return Err(failure("name_too_short", NAME_MESSAGE));
    }

    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(failure("phone_required", PHONE_MESSAGE));
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(failure("phone_too_few_digits", PHONE_MESSAGE));
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err(failure("phone_format", PHONE_MESSAGE));
    }

    Ok(())
}

/// The e-mail field is optional, so blank input passes.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Ok(());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(failure("email_format", EMAIL_MESSAGE));
    }

    Ok(())
}

pub fn validate_topic(topic: &str, options: &[String]) -> Result<(), ValidationError> {
    if topic.is_empty() || !options.iter().any(|option| option == topic) {
        return Err(failure("topic_required", TOPIC_MESSAGE));
    }

    Ok(())
}

pub fn validate_contact_pref(choice: Option<&str>, options: &[String]) -> Result<(), ValidationError> {
    match choice {
        Some(value) if options.iter().any(|option| option == value) => Ok(()),
        _ => Err(failure("contact_pref_required", CONTACT_PREF_MESSAGE)),
    }
}

pub fn validate_consent(consent: bool) -> Result<(), ValidationError> {
    if !consent {
        return Err(failure("consent_required", CONSENT_MESSAGE));
    }

    Ok(())
}
