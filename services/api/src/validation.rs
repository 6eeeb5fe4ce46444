//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::UserPayload;

/// Symbols accepted as the special character of a password
const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

/// Minimum password length, in characters
const MIN_PASSWORD_LEN: usize = 8;

/// Reason a user payload was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid password")]
    InvalidPassword,
}

/// Validate email
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Validate password strength.
///
/// Requires a lowercase letter, an uppercase letter, a digit, one of
/// `@$!%*#?&`, at least 8 characters and no run of three identical
/// characters. Stops at the first rule that fails.
pub fn is_valid_password(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();

    if !chars.iter().any(|c| c.is_ascii_lowercase()) {
        return false;
    }

    if !chars.iter().any(|c| c.is_ascii_uppercase()) {
        return false;
    }

    if !chars.iter().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if !chars.iter().any(|c| PASSWORD_SYMBOLS.contains(*c)) {
        return false;
    }

    if chars.len() < MIN_PASSWORD_LEN {
        return false;
    }

    !chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Check that every required field of a user payload is present
pub fn validate_required(payload: &UserPayload) -> Result<(), ValidationError> {
    if payload.name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    if payload.email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    if payload.password_hash.is_empty() {
        return Err(ValidationError::MissingField("password_hash"));
    }

    Ok(())
}

/// Validate a payload submitted for account creation
pub fn validate_new_user(payload: &UserPayload) -> Result<(), ValidationError> {
    validate_required(payload)?;

    if !is_valid_email(&payload.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_valid_password(&payload.password_hash) {
        return Err(ValidationError::InvalidPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, password: &str) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("leitor@biblioteca.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("a_b%c-d@sub-domain.io"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@biblioteca.com"));
        assert!(!is_valid_email("leitor@"));
        assert!(!is_valid_email("leitor@biblioteca"));
        assert!(!is_valid_email("leitor@biblioteca.c"));
        assert!(!is_valid_email("leitor@biblioteca.c0m"));
        assert!(!is_valid_email("lei tor@biblioteca.com"));
        assert!(!is_valid_email("leitor@@biblioteca.com"));
    }

    #[test]
    fn password_examples() {
        assert!(is_valid_password("Abcdef1!"));
        assert!(is_valid_password("Ab1!ab1!"));
        assert!(!is_valid_password("abcdefg1!"));
        assert!(!is_valid_password("Aaa1111!"));
    }

    #[test]
    fn password_requires_each_character_class() {
        assert!(!is_valid_password("ABCDEF1!"), "no lowercase");
        assert!(!is_valid_password("abcdef1!"), "no uppercase");
        assert!(!is_valid_password("Abcdefg!"), "no digit");
        assert!(!is_valid_password("Abcdefg1"), "no symbol");
        assert!(!is_valid_password("Abcdef1^"), "symbol outside the set");
    }

    #[test]
    fn password_length_boundary() {
        assert!(!is_valid_password("Abcde1!"));
        assert!(is_valid_password("Abcde1!x"));
    }

    #[test]
    fn password_rejects_triple_runs_anywhere() {
        assert!(!is_valid_password("AAAbc1!xy"));
        assert!(!is_valid_password("Abc1!xyzzz"));
        assert!(!is_valid_password("Ab!!!c1xy"));
        assert!(is_valid_password("Aabb11!!"));
    }

    #[test]
    fn new_user_reports_first_failing_rule() {
        assert_eq!(
            validate_new_user(&payload("", "a@b.com", "Abcdef1!")),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            validate_new_user(&payload("Ana", "", "Abcdef1!")),
            Err(ValidationError::MissingField("email"))
        );
        assert_eq!(
            validate_new_user(&payload("Ana", "a@b.com", "")),
            Err(ValidationError::MissingField("password_hash"))
        );
        assert_eq!(
            validate_new_user(&payload("Ana", "not-an-email", "weak")),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_new_user(&payload("Ana", "ana@biblioteca.com", "weak")),
            Err(ValidationError::InvalidPassword)
        );
        assert_eq!(
            validate_new_user(&payload("Ana", "ana@biblioteca.com", "Abcdef1!")),
            Ok(())
        );
    }
}
