//! Customer reservations and payments

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::coded_enum;

coded_enum! {
    /// Reservation lifecycle status, owned by the backend
    ReservationStatus {
        /// Waiting for an administrator decision
        Pending = 0 => "Pending",
        /// Accepted and scheduled
        Approved = 1 => "Approved",
        /// Declined by an administrator
        Rejected = 2 => "Rejected",
        /// Cancelled by either side
        Canceled = 3 => "Canceled",
        /// Service delivered
        Completed = 4 => "Completed",
    }
}

coded_enum! {
    /// How much of the final price has been collected
    PaymentStatus {
        /// Nothing collected
        NotPaid = 0 => "NotPaid",
        /// Some amount outstanding
        PartiallyPaid = 1 => "PartiallyPaid",
        /// Settled
        FullyPaid = 2 => "FullyPaid",
    }
}

coded_enum! {
    /// Payment channel
    PaymentMethod {
        /// Not specified
        None = 0 => "None",
        /// Paid online at booking time
        Online = 1 => "Online",
        /// Card payment
        CreditCard = 2 => "CreditCard",
        /// Cash on site
        Cash = 3 => "Cash",
        /// Wire transfer
        BankTransfer = 4 => "BankTransfer",
    }
}

/// A booked service appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation ID
    pub id: i64,
    /// Booking user, absent for call-center bookings
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Customer name
    #[serde(default)]
    pub user_full_name: String,
    /// Customer email
    #[serde(default)]
    pub email: String,
    /// Customer phone
    #[serde(default)]
    pub phone: String,
    /// Booked service
    #[serde(default)]
    pub service_id: Option<i64>,
    /// Booked service title
    #[serde(default)]
    pub service_title: String,
    /// Address ID
    #[serde(default)]
    pub address_id: Option<i64>,
    /// Address label
    #[serde(default)]
    pub address_title: String,
    /// Full address text
    #[serde(default)]
    pub address_full_address: String,
    /// Appointment day
    #[serde(with = "crate::types::timestamp")]
    pub reservation_date: DateTime<Utc>,
    /// Start time (`HH:MM[:SS]`)
    #[serde(default)]
    pub start_time: String,
    /// End time (`HH:MM[:SS]`)
    #[serde(default)]
    pub end_time: Option<String>,
    /// Customer notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: ReservationStatus,
    /// Collection status
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Payment channel
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Why the reservation was rejected
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Why the reservation was cancelled
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    /// List price
    #[serde(default)]
    pub price: f64,
    /// Absolute discount
    #[serde(default)]
    pub discount_amount: f64,
    /// Percentage discount
    #[serde(default)]
    pub discount_percentage: f64,
    /// Amount paid up-front
    #[serde(default)]
    pub prepaid_amount: f64,
    /// Price after discounts
    #[serde(default)]
    pub final_price: f64,
    /// Sum of all recorded payments
    #[serde(default)]
    pub paid_total: f64,
    /// Amount still to collect
    #[serde(default)]
    pub remaining_amount: f64,
    /// Creation time
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(default, with = "crate::types::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Last payment time
    #[serde(default, with = "crate::types::timestamp::option")]
    pub payment_date: Option<DateTime<Utc>>,
    /// Booking channel (web, mobile, call center)
    #[serde(default)]
    pub platform: Option<String>,
}

impl Reservation {
    /// Appointment day as a calendar date
    pub fn day(&self) -> NaiveDate {
        self.reservation_date.date_naive()
    }
}

/// Editable fields of a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    /// Appointment day
    pub reservation_date: NaiveDate,
    /// Start time
    pub start_time: String,
    /// End time, defaults to the start time when left empty
    pub end_time: String,
    /// Notes
    pub notes: String,
    /// List price
    pub price: f64,
    /// New status
    pub status: ReservationStatus,
}

impl ReservationUpdate {
    /// Start an update form from the current record
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            reservation_date: reservation.day(),
            start_time: reservation.start_time.clone(),
            end_time: reservation.end_time.clone().unwrap_or_default(),
            notes: reservation.notes.clone().unwrap_or_default(),
            price: reservation.price,
            status: reservation.status,
        }
    }

    /// Check the form and fill the end time the backend requires
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing start time or negative price.
    pub fn normalized(mut self) -> crate::Result<Self> {
        if self.start_time.trim().is_empty() {
            return Err(crate::Error::validation("startTime", "is required"));
        }
        if !(self.price.is_finite() && self.price >= 0.0) {
            return Err(crate::Error::validation("price", "must not be negative"));
        }
        if self.end_time.trim().is_empty() {
            self.end_time.clone_from(&self.start_time);
        }
        Ok(self)
    }
}

/// A payment recorded against a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Amount collected
    pub amount: f64,
    /// Payment channel
    #[serde(rename = "methodId")]
    pub method: PaymentMethod,
    /// Free-form note
    pub note: String,
}

impl PaymentInput {
    /// Check the amount against what is still owed
    ///
    /// # Errors
    ///
    /// Returns a validation error when the amount is not positive or exceeds
    /// `remaining_amount`.
    pub fn validate(&self, remaining_amount: f64) -> crate::Result<()> {
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(crate::Error::validation("amount", "must be greater than zero"));
        }
        if self.amount > remaining_amount {
            return Err(crate::Error::validation(
                "amount",
                format!("must not exceed the remaining amount {remaining_amount:.2}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(0), ReservationStatus::Pending)]
    #[case(json!(4), ReservationStatus::Completed)]
    #[case(json!("Approved"), ReservationStatus::Approved)]
    #[case(json!("canceled"), ReservationStatus::Canceled)]
    #[case(json!("SomethingNew"), ReservationStatus::Pending)]
    fn test_status_accepts_code_or_name(
        #[case] wire: serde_json::Value,
        #[case] expected: ReservationStatus,
    ) {
        let status: ReservationStatus = serde_json::from_value(wire).unwrap();
        assert_eq!(status, expected);
    }

    #[rstest]
    #[case(json!(9))]
    #[case(json!(-1))]
    #[case(json!(null))]
    #[case(json!(2.5))]
    #[case(json!({"code": 1}))]
    fn test_status_unrecognized_value_falls_back_to_default(#[case] wire: serde_json::Value) {
        let status: ReservationStatus = serde_json::from_value(wire).unwrap();
        assert_eq!(status, ReservationStatus::Pending);
    }

    #[test]
    fn test_malformed_record_does_not_fail_the_list() {
        let reservations: Vec<Reservation> = serde_json::from_value(json!([
            {
                "id": 1,
                "reservationDate": "2024-06-10T00:00:00",
                "status": 1,
                "paymentMethod": 3,
                "createdAt": "2024-06-01T12:00:00Z"
            },
            {
                "id": 2,
                "reservationDate": "2024-06-11T00:00:00",
                "status": 5,
                "paymentStatus": "Refunded",
                "paymentMethod": null,
                "createdAt": "2024-06-01T12:00:00Z"
            }
        ]))
        .unwrap();

        let decoded: Vec<_> = reservations
            .iter()
            .map(|r| (r.id, r.status, r.payment_status, r.payment_method))
            .collect();
        assert_eq!(
            decoded,
            vec![
                (1, ReservationStatus::Approved, PaymentStatus::NotPaid, PaymentMethod::Cash),
                (2, ReservationStatus::Pending, PaymentStatus::NotPaid, PaymentMethod::None),
            ]
        );
    }

    #[test]
    fn test_status_serializes_as_code() {
        assert_eq!(serde_json::to_value(ReservationStatus::Rejected).unwrap(), json!(2));
        assert_eq!(serde_json::to_value(PaymentMethod::BankTransfer).unwrap(), json!(4));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("completed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Completed);
        assert_eq!("2".parse::<PaymentStatus>().unwrap(), PaymentStatus::FullyPaid);
        assert!("Lost".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_reservation_deserializes_mixed_shapes() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id": 41,
            "userFullName": "Zeynep Kaya",
            "phone": "05551112233",
            "serviceTitle": "Ev Temizliği",
            "addressTitle": "Ev",
            "reservationDate": "2024-06-10T00:00:00",
            "startTime": "09:00",
            "status": "Completed",
            "paymentStatus": 1,
            "paymentMethod": "Cash",
            "price": 1500.0,
            "finalPrice": 1350.0,
            "paidTotal": 500.0,
            "remainingAmount": 850.0,
            "createdAt": "2024-06-01T12:00:00Z",
            "updatedAt": null
        }))
        .unwrap();

        assert_eq!(reservation.status, ReservationStatus::Completed);
        assert_eq!(reservation.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(reservation.payment_method, PaymentMethod::Cash);
        assert_eq!(reservation.day(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert!(reservation.updated_at.is_none());
    }

    #[test]
    fn test_update_defaults_end_time() {
        let update = ReservationUpdate {
            reservation_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            start_time: "10:00".to_string(),
            end_time: String::new(),
            notes: String::new(),
            price: 900.0,
            status: ReservationStatus::Approved,
        }
        .normalized()
        .unwrap();

        assert_eq!(update.end_time, "10:00");

        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire["reservationDate"], "2024-06-10");
        assert_eq!(wire["status"], 1);
    }

    #[test]
    fn test_payment_validation() {
        let payment = PaymentInput {
            amount: 300.0,
            method: PaymentMethod::CreditCard,
            note: String::new(),
        };
        assert!(payment.validate(850.0).is_ok());
        assert!(payment.validate(200.0).is_err());

        let zero = PaymentInput { amount: 0.0, ..payment.clone() };
        assert!(zero.validate(850.0).is_err());

        let wire = serde_json::to_value(&payment).unwrap();
        assert_eq!(wire, json!({"amount": 300.0, "methodId": 2, "note": ""}));
    }
}
