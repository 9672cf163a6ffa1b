//! Client-side search, filter and sort for fetched collections
//!
//! Every list page fetches the whole collection and narrows it locally.
//! Filters are plain values; applying one never mutates its input and
//! applying it twice yields the same result as applying it once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{
    BlogPost, BlogStatus, ContactForm, NotificationReceiver, NotificationType, PaymentStatus,
    Rating, Reservation, ReservationStatus, Service, User,
};

/// A predicate, and optionally an ordering, over a collection
pub trait ClientFilter<T> {
    /// Whether `item` passes every criterion
    fn matches(&self, item: &T) -> bool;

    /// Reorder matching items; the default keeps input order
    fn sort(&self, _items: &mut [T]) {}

    /// Matching items in display order
    fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let mut selected: Vec<T> = items.iter().filter(|item| self.matches(item)).cloned().collect();
        self.sort(&mut selected);
        selected
    }
}

/// Lowercased, trimmed search term, `None` when blank
fn needle(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn opt_eq<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

/// Reservations page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Customer name, service, address, phone or id fragment
    pub search: Option<String>,
    /// Lifecycle status
    pub status: Option<ReservationStatus>,
    /// Payment status
    pub payment_status: Option<PaymentStatus>,
    /// Appointment day
    pub date: Option<NaiveDate>,
}

impl ClientFilter<Reservation> for ReservationFilter {
    fn matches(&self, r: &Reservation) -> bool {
        if !opt_eq(self.status.as_ref(), &r.status)
            || !opt_eq(self.payment_status.as_ref(), &r.payment_status)
            || !opt_eq(self.date.as_ref(), &r.day())
        {
            return false;
        }
        needle(self.search.as_deref()).is_none_or(|term| {
            contains(&r.user_full_name, &term)
                || contains(&r.service_title, &term)
                || contains(&r.address_title, &term)
                || r.phone.contains(&term)
                || r.id.to_string().contains(&term)
        })
    }
}

/// Users page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Name, email or phone fragment
    pub search: Option<String>,
    /// Email confirmation state
    pub email_confirmed: Option<bool>,
    /// Administrator flag
    pub admin: Option<bool>,
}

impl ClientFilter<User> for UserFilter {
    fn matches(&self, u: &User) -> bool {
        if !opt_eq(self.email_confirmed.as_ref(), &u.is_email_confirmed)
            || !opt_eq(self.admin.as_ref(), &u.is_admin)
        {
            return false;
        }
        needle(self.search.as_deref()).is_none_or(|term| {
            contains(&u.first_name, &term)
                || contains(&u.last_name, &term)
                || contains(&u.email, &term)
                || u.phone_number.as_deref().is_some_and(|p| p.contains(&term))
        })
    }
}

/// Active/inactive selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// No restriction
    #[default]
    All,
    /// Only active records
    Active,
    /// Only inactive records
    Inactive,
}

impl Activity {
    /// Whether a record with the given flag is selected
    pub const fn admits(self, is_active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }
}

/// Services page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFilter {
    /// Title or short description fragment
    pub search: Option<String>,
    /// Active state
    pub activity: Activity,
}

impl ClientFilter<Service> for ServiceFilter {
    fn matches(&self, s: &Service) -> bool {
        self.activity.admits(s.is_active)
            && needle(self.search.as_deref()).is_none_or(|term| {
                contains(&s.title, &term) || contains(&s.short_description, &term)
            })
    }
}

/// Sort direction on creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

/// Contact forms page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormFilter {
    /// Name, email, phone or subject fragment
    pub search: Option<String>,
    /// Read state
    pub read: Option<bool>,
    /// Order on creation time
    pub order: SortOrder,
}

impl ClientFilter<ContactForm> for ContactFormFilter {
    fn matches(&self, c: &ContactForm) -> bool {
        opt_eq(self.read.as_ref(), &c.is_read)
            && needle(self.search.as_deref()).is_none_or(|term| {
                contains(&c.full_name, &term)
                    || contains(&c.email, &term)
                    || contains(&c.subject, &term)
                    || c.phone.contains(&term)
            })
    }

    fn sort(&self, items: &mut [ContactForm]) {
        match self.order {
            SortOrder::Asc => items.sort_by_key(|c| c.created_at),
            SortOrder::Desc => items.sort_by_key(|c| std::cmp::Reverse(c.created_at)),
        }
    }
}

/// Notifications page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Subscribed events
    pub kind: Option<NotificationType>,
    /// Active state
    pub activity: Activity,
}

impl ClientFilter<NotificationReceiver> for NotificationFilter {
    fn matches(&self, n: &NotificationReceiver) -> bool {
        opt_eq(self.kind.as_ref(), &n.kind) && self.activity.admits(n.is_active)
    }
}

/// Ratings page tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingFilter {
    /// `Some(true)` approved only, `Some(false)` pending only
    pub approved: Option<bool>,
}

impl ClientFilter<Rating> for RatingFilter {
    fn matches(&self, r: &Rating) -> bool {
        opt_eq(self.approved.as_ref(), &r.is_approved)
    }
}

/// Blog page filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFilter {
    /// Title or meta description fragment
    pub search: Option<String>,
    /// Publication status, `None` for all
    pub status: Option<BlogStatus>,
    /// Exact category
    pub category: Option<String>,
}

impl ClientFilter<BlogPost> for BlogFilter {
    fn matches(&self, p: &BlogPost) -> bool {
        if !opt_eq(self.status.as_ref(), &p.status) {
            return false;
        }
        if let Some(category) = &self.category {
            if p.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        needle(self.search.as_deref()).is_none_or(|term| {
            contains(&p.title, &term)
                || p.meta_description.as_deref().is_some_and(|m| contains(m, &term))
        })
    }
}
