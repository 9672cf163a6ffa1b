//! Customer ratings left after a completed reservation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A star rating with an optional comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Rating ID
    pub id: i64,
    /// Rated reservation
    #[serde(default)]
    pub reservation_id: i64,
    /// Title of the rated service
    #[serde(default)]
    pub service_title: String,
    /// Customer name
    #[serde(default)]
    pub user_full_name: String,
    /// Stars, 0 to 5
    #[serde(default)]
    pub rating: u8,
    /// Comment text
    #[serde(default)]
    pub comment: String,
    /// Submission time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Whether it is shown publicly
    #[serde(default)]
    pub is_approved: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_approval_flag_means_pending() {
        let rating: Rating = serde_json::from_value(json!({
            "id": 5,
            "reservationId": 41,
            "serviceTitle": "Ev Temizliği",
            "userFullName": "Zeynep Kaya",
            "rating": 5,
            "comment": "Çok memnun kaldık",
            "createdAt": "2024-06-12T18:00:00"
        }))
        .unwrap();

        assert!(!rating.is_approved);
        assert_eq!(rating.rating, 5);
    }

    #[test]
    fn test_rating_above_u8_is_rejected() {
        let result = serde_json::from_value::<Rating>(json!({
            "id": 1,
            "rating": 300,
            "createdAt": "2024-06-12T18:00:00"
        }));
        assert!(result.is_err());
    }
}
