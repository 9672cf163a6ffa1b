//! Recipients of administrative email notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::coded_enum;

coded_enum! {
    /// Which events a recipient is notified about
    NotificationType {
        /// New reservations only
        Reservations = 1 => "Reservations",
        /// New contact-form submissions only
        ContactForms = 2 => "ContactForms",
        /// Everything
        All = 3 => "All",
    }
}

/// An email address that receives notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceiver {
    /// Recipient ID
    pub id: i64,
    /// Email address
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Subscribed events
    #[serde(rename = "type", default)]
    pub kind: NotificationType,
    /// Whether mails are sent
    #[serde(default)]
    pub is_active: bool,
    /// Creation time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Create/update form for a recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceiverInput {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Subscribed events
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Whether mails are sent
    pub is_active: bool,
}

impl NotificationReceiverInput {
    /// Check required fields before submitting
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or an email without `@`.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::validation("name", "is required"));
        }
        if !self.email.contains('@') {
            return Err(crate::Error::validation("email", "is not a valid address"));
        }
        Ok(())
    }
}

impl From<&NotificationReceiver> for NotificationReceiverInput {
    fn from(receiver: &NotificationReceiver) -> Self {
        Self {
            name: receiver.name.clone(),
            email: receiver.email.clone(),
            kind: receiver.kind,
            is_active: receiver.is_active,
        }
    }
}
