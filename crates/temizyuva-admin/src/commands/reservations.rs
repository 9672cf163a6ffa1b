//! reservations list / show / update / pay / remind / request-rating

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use temizyuva_client::Route;
use temizyuva_core::Page;
use temizyuva_core::filter::ReservationFilter;
use temizyuva_core::types::{
    PaymentInput, PaymentMethod, PaymentStatus, Reservation, ReservationStatus, ReservationUpdate,
};

use super::Context;
use crate::output::{self, Table, money};

/// Reservation commands
#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations, one page at a time
    List {
        /// Customer, service, address, phone or ID fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Lifecycle status (name or code)
        #[arg(long)]
        status: Option<ReservationStatus>,

        /// Payment status (name or code)
        #[arg(long)]
        payment_status: Option<PaymentStatus>,

        /// Appointment day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Reservations per page
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },

    /// Show a reservation with its payment figures
    Show {
        /// Reservation ID
        id: i64,
    },

    /// Edit schedule, price, notes or status
    Update {
        /// Reservation ID
        id: i64,

        #[command(flatten)]
        changes: ReservationChanges,
    },

    /// Record a payment
    Pay {
        /// Reservation ID
        id: i64,

        /// Amount collected
        #[arg(long)]
        amount: f64,

        /// Payment channel (name or code)
        #[arg(long, default_value = "Cash")]
        method: PaymentMethod,

        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Email the customer an appointment reminder
    Remind {
        /// Reservation ID
        id: i64,
    },

    /// Email the customer a request to rate the job
    RequestRating {
        /// Reservation ID
        id: i64,
    },
}

/// Optional overrides for an existing reservation
#[derive(Debug, Args)]
pub struct ReservationChanges {
    /// Appointment day (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Start time (HH:MM)
    #[arg(long)]
    start: Option<String>,

    /// End time (HH:MM); defaults to the start time
    #[arg(long)]
    end: Option<String>,

    /// Notes
    #[arg(long)]
    notes: Option<String>,

    /// List price
    #[arg(long)]
    price: Option<f64>,

    /// New status (name or code)
    #[arg(long)]
    status: Option<ReservationStatus>,
}

impl ReservationChanges {
    fn apply(self, mut update: ReservationUpdate) -> ReservationUpdate {
        if let Some(date) = self.date {
            update.reservation_date = date;
        }
        if let Some(start) = self.start {
            update.start_time = start;
        }
        if let Some(end) = self.end {
            update.end_time = end;
        }
        if let Some(notes) = self.notes {
            update.notes = notes;
        }
        if let Some(price) = self.price {
            update.price = price;
        }
        if let Some(status) = self.status {
            update.status = status;
        }
        update
    }
}

pub async fn run(ctx: &Context, command: ReservationsCommand) -> anyhow::Result<()> {
    let reservations = ctx.client.reservations();

    match command {
        ReservationsCommand::List {
            search,
            status,
            payment_status,
            date,
            page,
            page_size,
        } => {
            ctx.enter(Route::Reservations).await?;
            let filter = ReservationFilter {
                search,
                status,
                payment_status,
                date,
            };
            let page = reservations.list_page(&filter, page, page_size).await?;
            output::emit(ctx.output, &page, page_table)
        }
        ReservationsCommand::Show { id } => {
            ctx.enter(Route::ReservationDetail(id)).await?;
            let reservation = reservations.get(id).await?;
            output::emit(ctx.output, &reservation, detail_table)
        }
        ReservationsCommand::Update { id, changes } => {
            ctx.enter(Route::ReservationEdit(id)).await?;
            let current = reservations.get(id).await?;
            let update = changes.apply(ReservationUpdate::from_reservation(&current));
            reservations.update(id, update).await?;
            output::done(ctx.output, &format!("Reservation {id} updated."))
        }
        ReservationsCommand::Pay {
            id,
            amount,
            method,
            note,
        } => {
            ctx.enter(Route::ReservationDetail(id)).await?;
            let reservation = reservations.get(id).await?;
            let payment = PaymentInput { amount, method, note };
            reservations.add_payment(&reservation, &payment).await?;
            output::done(
                ctx.output,
                &format!("Recorded {} ({method}) for reservation {id}.", money(amount)),
            )
        }
        ReservationsCommand::Remind { id } => {
            ctx.enter(Route::ReservationDetail(id)).await?;
            reservations.send_reminder(id).await?;
            output::done(ctx.output, &format!("Reminder sent for reservation {id}."))
        }
        ReservationsCommand::RequestRating { id } => {
            ctx.enter(Route::ReservationDetail(id)).await?;
            reservations.send_rating_request(id).await?;
            output::done(ctx.output, &format!("Rating request sent for reservation {id}."))
        }
    }
}

fn page_table(page: &Page<Reservation>) -> Table {
    let mut table = Table::new(["ID", "CUSTOMER", "SERVICE", "DATE", "TIME", "STATUS", "PAYMENT", "PRICE"]);
    for r in &page.items {
        table.push([
            r.id.to_string(),
            r.user_full_name.clone(),
            r.service_title.clone(),
            r.day().to_string(),
            r.start_time.clone(),
            r.status.to_string(),
            r.payment_status.to_string(),
            money(r.final_price),
        ]);
    }
    table.with_footer(format!(
        "Page {}/{}, {} matching reservations",
        page.current_page, page.total_pages, page.total_count
    ))
}

fn detail_table(r: &Reservation) -> Table {
    let schedule = match r.end_time.as_deref().filter(|e| !e.is_empty()) {
        Some(end) => format!("{} {}-{}", r.day(), r.start_time, end),
        None => format!("{} {}", r.day(), r.start_time),
    };

    let mut rows = vec![
        ("ID", r.id.to_string()),
        ("Customer", r.user_full_name.clone()),
        ("Email", r.email.clone()),
        ("Phone", r.phone.clone()),
        ("Service", r.service_title.clone()),
        ("Address", format!("{} - {}", r.address_title, r.address_full_address)),
        ("Schedule", schedule),
        ("Status", r.status.to_string()),
        ("Price", money(r.price)),
        ("Discount", money(r.discount_amount)),
        ("Final price", money(r.final_price)),
        ("Paid", money(r.paid_total)),
        ("Remaining", money(r.remaining_amount)),
        ("Payment", format!("{} ({})", r.payment_status, r.payment_method)),
    ];
    for (label, value) in [
        ("Notes", &r.notes),
        ("Rejection reason", &r.rejection_reason),
        ("Cancellation reason", &r.cancellation_reason),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            rows.push((label, value.to_string()));
        }
    }
    rows.push(("Created", output::date_time(r.created_at)));

    Table::fields(rows)
}
