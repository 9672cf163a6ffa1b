//! Typed access to each admin resource
//!
//! Services borrow the [`AdminClient`] and are cheap to create; obtain them
//! through the accessor methods, e.g. `client.reservations().list()`.

use serde_json::Value;

use temizyuva_core::Envelope;

use crate::client::AdminClient;

pub mod blog;
pub mod catalog;
pub mod contact_forms;
pub mod dashboard;
pub mod notifications;
pub mod ratings;
pub mod reservations;
pub mod users;

pub use blog::BlogService;
pub use catalog::CatalogService;
pub use contact_forms::ContactFormsService;
pub use dashboard::DashboardService;
pub use notifications::NotificationsService;
pub use ratings::RatingsService;
pub use reservations::ReservationsService;
pub use users::UsersService;

impl AdminClient {
    /// User accounts
    pub const fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Service catalogue
    pub const fn services(&self) -> CatalogService<'_> {
        CatalogService::new(self)
    }

    /// Reservations and payments
    pub const fn reservations(&self) -> ReservationsService<'_> {
        ReservationsService::new(self)
    }

    /// Contact-form inbox
    pub const fn contact_forms(&self) -> ContactFormsService<'_> {
        ContactFormsService::new(self)
    }

    /// Notification recipients
    pub const fn notifications(&self) -> NotificationsService<'_> {
        NotificationsService::new(self)
    }

    /// Customer ratings
    pub const fn ratings(&self) -> RatingsService<'_> {
        RatingsService::new(self)
    }

    /// Blog posts
    pub const fn blog(&self) -> BlogService<'_> {
        BlogService::new(self)
    }

    /// Dashboard figures
    pub const fn dashboard(&self) -> DashboardService<'_> {
        DashboardService::new(self)
    }
}

/// Record echoed back by a mutation, if the backend sent one that fits
///
/// Mutation responses range from an empty body to the full record, so a
/// payload that does not decode is dropped instead of failing a request
/// the backend already accepted.
pub(crate) fn echoed<T: serde::de::DeserializeOwned>(envelope: Envelope) -> Option<T> {
    match envelope.payload {
        Value::Null => None,
        payload => match serde_json::from_value(payload) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring mutation response payload");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temizyuva_core::types::Service;

    #[test]
    fn test_echoed_is_lenient() {
        let full = Envelope::split(
            json!({"success": true, "data": {"id": 2, "title": "Cam Silme"}}),
            &[],
        );
        let service: Option<Service> = echoed(full);
        assert_eq!(service.map(|s| s.id), Some(2));

        let empty = Envelope::split(json!({"success": true, "message": "ok"}), &[]);
        assert!(echoed::<Service>(empty).is_none());

        let mismatched = Envelope::split(json!({"success": true, "data": "saved"}), &[]);
        assert!(echoed::<Service>(mismatched).is_none());
    }
}
