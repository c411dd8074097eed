//! Field Validators
//!
//! Shared validation rules for user input and uploads. Messages are the
//! user-facing strings returned in 400 bodies.

use std::sync::OnceLock;

use regex::Regex;

use super::{DomainError, DomainResult};

/// Maximum upload size in bytes (5 MB)
pub const MAX_UPLOAD_SIZE: usize = 5_242_880;

/// Document uploads are PDF only
pub const ALLOWED_DOCUMENT_EXTENSION: &str = "pdf";

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?1?\d{9,15}$").unwrap())
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email_re().is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput("Enter a valid email address".into()))
    }
}

/// Phone numbers: optional +, 9-15 digits
pub fn validate_phone(phone: &str) -> DomainResult<()> {
    if phone_re().is_match(phone) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(
            "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.".into(),
        ))
    }
}

/// Passwords need at least 8 characters with an upper, a lower and a digit
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < 8 {
        return Err(DomainError::InvalidInput(
            "Password must be at least 8 characters long".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidInput(
            "Password must contain at least one number".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::InvalidInput(
            "Password must contain at least one uppercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(DomainError::InvalidInput(
            "Password must contain at least one lowercase letter".into(),
        ));
    }
    Ok(())
}

/// Check a document upload: extension and size
pub fn validate_document_upload(filename: &str, size: usize) -> DomainResult<()> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    if ext != ALLOWED_DOCUMENT_EXTENSION {
        return Err(DomainError::InvalidInput("Only PDF files are allowed".into()));
    }
    if size > MAX_UPLOAD_SIZE {
        return Err(DomainError::InvalidInput(
            "File size must not exceed 5 MB".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("student@example.edu.np").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+9779841000000").is_ok());
        assert!(validate_phone("9841000000").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("abc123").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Secret123").is_ok());
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("nouppercase1").is_err());
        assert!(validate_password("NOLOWERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_document_upload() {
        assert!(validate_document_upload("notes.pdf", 1024).is_ok());
        assert!(validate_document_upload("notes.PDF", 1024).is_ok());
        assert!(validate_document_upload("notes.docx", 1024).is_err());
        assert!(validate_document_upload("big.pdf", MAX_UPLOAD_SIZE + 1).is_err());
    }
}
