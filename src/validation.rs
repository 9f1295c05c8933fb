//! Request validators: pure functions that reject malformed input before it
//! reaches the repositories. Handlers map the returned messages to 400s.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::todo::{PRIORITIES, STATUSES};

pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err("All fields are required.".to_string());
    }
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.trim().chars().count();
    if !(3..=20).contains(&len) {
        return Err("Username must be 3-20 characters.".to_string());
    }
    Ok(())
}

/// Basic shape check only; deliverability is the mail service's problem.
pub fn validate_email(email: &str) -> Result<(), String> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format.".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters.".to_string());
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required.".to_string());
    }
    Ok(())
}

pub fn validate_priority(priority: &str) -> Result<(), String> {
    if !PRIORITIES.contains(&priority) {
        return Err("Priority must be: low, medium, high".to_string());
    }
    Ok(())
}

pub fn validate_status(status: &str) -> Result<(), String> {
    if !STATUSES.contains(&status) {
        return Err("Status must be pending or completed".to_string());
    }
    Ok(())
}

/// An empty value is treated as "no due date"; anything else must be a real
/// calendar date in ISO form.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.trim()
        .parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| "Invalid date format".to_string())
}

pub fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| "Invalid todo id".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_requires_all_fields() {
        assert!(validate_signup("", "a@example.com", "secret1").is_err());
        assert!(validate_signup("alice", "", "secret1").is_err());
        assert!(validate_signup("alice", "a@example.com", "").is_err());
        assert!(validate_signup("alice", "a@example.com", "secret1").is_ok());
    }

    #[test]
    fn username_length_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"x".repeat(20)).is_ok());
        assert!(validate_username(&"x".repeat(21)).is_err());
        // surrounding whitespace does not count toward the length
        assert!(validate_username("  ab  ").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn title_rejects_whitespace_only() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("Buy Milk").is_ok());
    }

    #[test]
    fn priority_and_status_enums() {
        assert!(validate_priority("low").is_ok());
        assert!(validate_priority("medium").is_ok());
        assert!(validate_priority("high").is_ok());
        assert!(validate_priority("urgent").is_err());

        assert!(validate_status("pending").is_ok());
        assert!(validate_status("completed").is_ok());
        assert!(validate_status("done").is_err());
    }

    #[test]
    fn due_date_parsing() {
        assert_eq!(parse_due_date(""), Ok(None));
        assert_eq!(parse_due_date("  "), Ok(None));
        assert_eq!(
            parse_due_date("2026-12-31"),
            Ok(Some(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()))
        );
        assert!(parse_due_date("2026-02-30").is_err());
        assert!(parse_due_date("next tuesday").is_err());
    }

    #[test]
    fn id_parsing() {
        assert!(parse_id("0f0e4e9c-9d3e-4f1a-8a66-3c2b7f0b8a10").is_ok());
        assert!(parse_id("507f1f77bcf86cd799439011").is_err());
        assert!(parse_id("").is_err());
    }
}
