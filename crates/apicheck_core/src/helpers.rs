//! Unique input generation.

use crate::error::{HarnessError, Result};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

const EMAIL_STAMP: &str = "%Y%m%d%H%M%S";

/// Splices a `YYYYMMDDHHmmss` stamp in front of the '@' of an email address.
///
/// `user@example.com` at 2024-03-05 14:07:09 becomes
/// `user20240305140709@example.com`.
pub fn email_with_timestamp<Tz>(email: &str, at: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| HarnessError::InvalidEmail(email.to_string()))?;
    Ok(format!("{}{}@{}", local, at.format(EMAIL_STAMP), domain))
}

/// Timestamp-suffixed email using the current local time.
pub fn unique_email(email: &str) -> Result<String> {
    email_with_timestamp(email, &Local::now())
}

/// A title that will not collide with anything already on the server.
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, Local::now().format("%Y%m%d%H%M%S%f"))
}
