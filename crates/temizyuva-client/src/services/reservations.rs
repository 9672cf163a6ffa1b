//! Reservations, payments and customer notifications

use http::Method;
use tracing::info;

use temizyuva_core::Page;
use temizyuva_core::filter::{ClientFilter, ReservationFilter};
use temizyuva_core::types::{PaymentInput, Reservation, ReservationUpdate};

use super::echoed;
use crate::client::AdminClient;
use crate::error::ClientResult;

/// Reservation endpoints
#[derive(Debug, Clone, Copy)]
pub struct ReservationsService<'a> {
    client: &'a AdminClient,
}

impl<'a> ReservationsService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every reservation
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a
    /// reservation list.
    pub async fn list(&self) -> ClientResult<Vec<Reservation>> {
        self.client.get_list("/Reservations/all", &["reservations"]).await
    }

    /// One page of the reservations passing `filter`
    ///
    /// The backend returns the whole collection; paging happens after
    /// filtering so page counts reflect the filtered set.
    ///
    /// # Errors
    ///
    /// See [`ReservationsService::list`].
    pub async fn list_page(
        &self,
        filter: &ReservationFilter,
        page: u32,
        page_size: u32,
    ) -> ClientResult<Page<Reservation>> {
        let matching = filter.apply(&self.list().await?);
        Ok(Page::from_vec(matching, page, page_size))
    }

    /// One reservation with its payment figures
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reservation does not exist.
    pub async fn get(&self, id: i64) -> ClientResult<Reservation> {
        self.client
            .get(&format!("/admin/reservations/{id}"), &["reservation"])
            .await
    }

    /// Save the schedule, price, notes and status of a reservation
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete form, or the request error.
    pub async fn update(&self, id: i64, update: ReservationUpdate) -> ClientResult<Option<Reservation>> {
        let update = update.normalized()?;
        let envelope = self
            .client
            .mutate(Method::PUT, &format!("/admin/reservations/{id}"), Some(&update))
            .await?;
        info!(id, status = %update.status, "Reservation updated");
        Ok(echoed(envelope))
    }

    /// Record a payment against `reservation`
    ///
    /// The amount is checked against the reservation's outstanding balance
    /// before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive or excessive amount, or
    /// the request error.
    pub async fn add_payment(&self, reservation: &Reservation, payment: &PaymentInput) -> ClientResult<()> {
        payment.validate(reservation.remaining_amount)?;
        self.client
            .mutate(
                Method::POST,
                &format!("/Reservations/{}/payments", reservation.id),
                Some(payment),
            )
            .await?;
        info!(
            id = reservation.id,
            amount = payment.amount,
            method = %payment.method,
            "Payment recorded"
        );
        Ok(())
    }

    /// Email the customer a reminder of the appointment
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn send_reminder(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::POST, &format!("/admin/reservations/{id}/send-reminder"))
            .await?;
        info!(id, "Reminder sent");
        Ok(())
    }

    /// Email the customer a request to rate the finished job
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn send_rating_request(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::POST, &format!("/ratings/send-email/{id}"))
            .await?;
        info!(id, "Rating request sent");
        Ok(())
    }
}
