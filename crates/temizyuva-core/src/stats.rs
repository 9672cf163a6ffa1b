//! Summary cards computed from fetched collections

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::{BlogPost, Rating, User};

/// Counters shown above the users table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// All users
    pub total: usize,
    /// Administrators
    pub admins: usize,
    /// Confirmed email addresses
    pub confirmed: usize,
    /// Unconfirmed email addresses
    pub pending: usize,
    /// Registered during the last seven days
    pub last_week: usize,
}

impl UserStats {
    /// Count users relative to `now`
    pub fn compute(users: &[User], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.is_admin).count(),
            confirmed: users.iter().filter(|u| u.is_email_confirmed).count(),
            pending: users.iter().filter(|u| !u.is_email_confirmed).count(),
            last_week: users.iter().filter(|u| u.created_at >= week_ago).count(),
        }
    }
}

/// Counters shown above the ratings tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    /// All ratings
    pub total: usize,
    /// Publicly shown
    pub approved: usize,
    /// Awaiting moderation
    pub pending: usize,
    /// Mean of approved non-zero ratings, 0 when there are none
    pub average: f64,
    /// Five-star ratings, approved or not
    pub five_star: usize,
}

impl RatingStats {
    /// Aggregate a ratings list
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(ratings: &[Rating]) -> Self {
        let approved = ratings.iter().filter(|r| r.is_approved).count();
        let scored: Vec<u8> = ratings
            .iter()
            .filter(|r| r.is_approved && r.rating > 0)
            .map(|r| r.rating)
            .collect();
        let average = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|&r| f64::from(r)).sum::<f64>() / scored.len() as f64
        };

        Self {
            total: ratings.len(),
            approved,
            pending: ratings.len() - approved,
            average,
            five_star: ratings.iter().filter(|r| r.rating == 5).count(),
        }
    }
}

/// Distinct non-empty categories in alphabetical order
pub fn blog_categories(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|p| p.category.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::timestamp;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user(id: i64, created: &str, confirmed: bool, admin: bool) -> User {
        serde_json::from_value(json!({
            "id": id,
            "firstName": "Kullanıcı",
            "lastName": id.to_string(),
            "email": format!("u{id}@example.com"),
            "createdAt": created,
            "isEmailConfirmed": confirmed,
            "isAdmin": admin
        }))
        .unwrap()
    }

    fn rating(id: i64, stars: u8, approved: bool) -> Rating {
        serde_json::from_value(json!({
            "id": id,
            "rating": stars,
            "createdAt": "2024-06-01T00:00:00",
            "isApproved": approved
        }))
        .unwrap()
    }

    #[test]
    fn test_user_stats() {
        let now = timestamp::parse("2024-06-15T12:00:00Z").unwrap();
        let users = vec![
            user(1, "2024-06-14T08:00:00", true, true),
            user(2, "2024-06-08T12:00:00", false, false),
            user(3, "2024-01-01T00:00:00", true, false),
        ];

        assert_eq!(
            UserStats::compute(&users, now),
            UserStats {
                total: 3,
                admins: 1,
                confirmed: 2,
                pending: 1,
                last_week: 2,
            }
        );
    }

    #[test]
    fn test_rating_stats_average_skips_pending_and_zero() {
        let ratings = vec![
            rating(1, 5, true),
            rating(2, 4, true),
            rating(3, 0, true),
            rating(4, 1, false),
            rating(5, 5, false),
        ];
        let stats = RatingStats::compute(&ratings);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.approved, 3);
        assert_eq!(stats.pending, 2);
        assert!((stats.average - 4.5).abs() < f64::EPSILON);
        assert_eq!(stats.five_star, 2);
    }

    #[test]
    fn test_rating_stats_empty() {
        let stats = RatingStats::compute(&[]);
        assert!(stats.average.abs() < f64::EPSILON);
    }

    #[test]
    fn test_blog_categories() {
        let post = |category: Option<&str>| -> BlogPost {
            serde_json::from_value(json!({
                "id": 1,
                "title": "x",
                "category": category,
                "createdAt": "2024-01-01T00:00:00"
            }))
            .unwrap()
        };
        let posts = vec![
            post(Some(" Temizlik ")),
            post(Some("Bakım")),
            post(Some("Temizlik")),
            post(Some("  ")),
            post(None),
        ];

        assert_eq!(blog_categories(&posts), vec!["Bakım".to_string(), "Temizlik".to_string()]);
    }
}
