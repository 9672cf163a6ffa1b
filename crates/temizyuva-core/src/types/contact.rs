//! Contact-form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message sent through the public contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Submission ID
    pub id: i64,
    /// Sender name
    #[serde(default)]
    pub full_name: String,
    /// Sender email
    #[serde(default)]
    pub email: String,
    /// Sender phone
    #[serde(default)]
    pub phone: String,
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// Message body
    #[serde(default)]
    pub message: String,
    /// Whether an administrator opened it
    #[serde(default)]
    pub is_read: bool,
    /// Submission time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    /// When it was marked as read
    #[serde(default, with = "crate::types::timestamp::option")]
    pub read_at: Option<DateTime<Utc>>,
}
