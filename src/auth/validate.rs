//! Client-side checks applied before a registration request leaves the
//! machine. The server enforces the same rules; failing early spares a
//! round trip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ClientError, ClientResult};

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("compile name regex"));

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(stud\.)?noroff\.no$").expect("compile email regex"));

const PASSWORD_MIN: usize = 8;

pub fn registration(name: &str, email: &str, password: &str) -> ClientResult<()> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ClientError::Validation(
            "All required fields must be filled in.".into(),
        ));
    }
    if !NAME_REGEX.is_match(name) {
        return Err(ClientError::Validation(
            "The name must only contain letters, numbers, and underscores.".into(),
        ));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ClientError::Validation(
            "Please use a valid Noroff email address.".into(),
        ));
    }
    if password.len() < PASSWORD_MIN {
        return Err(ClientError::Validation(
            "Password must be at least 8 characters long.".into(),
        ));
    }
    Ok(())
}

pub fn login(email: &str, password: &str) -> ClientResult<()> {
    if email.is_empty() || password.is_empty() {
        return Err(ClientError::Validation(
            "Please fill in both email and password.".into(),
        ));
    }
    Ok(())
}
