use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|err| panic!("email pattern: {err}"))
});

pub const MISSING_FIELDS: &str = "♟ Please fill in email and password";
pub const INVALID_EMAIL: &str = "♟ Invalid email.\n\nPlease enter a valid email with any password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRejection {
    MissingFields,
    InvalidEmail,
}

impl LoginRejection {
    pub fn message(self) -> &'static str {
        match self {
            LoginRejection::MissingFields => MISSING_FIELDS,
            LoginRejection::InvalidEmail => INVALID_EMAIL,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Accepts any well-formed email with any non-empty password and returns the
/// marker to store.
pub fn check_credentials(email: &str, password: &str) -> Result<String, LoginRejection> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(LoginRejection::MissingFields);
    }

    let normalized = email.to_lowercase();
    if !is_valid_email(&normalized) {
        return Err(LoginRejection::InvalidEmail);
    }
    Ok(normalized)
}
