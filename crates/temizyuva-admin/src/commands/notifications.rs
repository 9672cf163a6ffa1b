//! notifications list / add / update / enable / disable / delete

use anyhow::Context as _;
use clap::{Args, Subcommand};

use temizyuva_client::Route;
use temizyuva_core::filter::NotificationFilter;
use temizyuva_core::types::{NotificationReceiver, NotificationReceiverInput, NotificationType};

use super::Context;
use super::services::ActivityArg;
use crate::output::{self, Table, yes_no};

/// Notification recipient commands
#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List recipients
    List {
        /// Subscribed events (Reservations, ContactForms, All or 1-3)
        #[arg(long = "type")]
        kind: Option<NotificationType>,

        /// Filter on active state
        #[arg(long, value_enum, default_value_t)]
        status: ActivityArg,
    },

    /// Add a recipient
    Add(RecipientForm),

    /// Replace a recipient's details
    Update {
        /// Recipient ID
        id: i64,

        #[command(flatten)]
        form: RecipientForm,
    },

    /// Resume mails to a recipient
    Enable {
        /// Recipient ID
        id: i64,
    },

    /// Pause mails to a recipient
    Disable {
        /// Recipient ID
        id: i64,
    },

    /// Remove a recipient
    Delete {
        /// Recipient ID
        id: i64,
    },
}

/// Recipient fields
#[derive(Debug, Args)]
pub struct RecipientForm {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Subscribed events (Reservations, ContactForms, All or 1-3)
    #[arg(long = "type", default_value = "All")]
    kind: NotificationType,

    /// Keep mails paused
    #[arg(long)]
    inactive: bool,
}

impl From<RecipientForm> for NotificationReceiverInput {
    fn from(form: RecipientForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            kind: form.kind,
            is_active: !form.inactive,
        }
    }
}

pub async fn run(ctx: &Context, command: NotificationsCommand) -> anyhow::Result<()> {
    ctx.enter(Route::Notifications).await?;
    let notifications = ctx.client.notifications();

    match command {
        NotificationsCommand::List { kind, status } => {
            let filter = NotificationFilter {
                kind,
                activity: status.into(),
            };
            let list = notifications.list_filtered(&filter).await?;
            output::emit(ctx.output, list.as_slice(), recipients_table)
        }
        NotificationsCommand::Add(form) => {
            let input = NotificationReceiverInput::from(form);
            notifications.create(&input).await?;
            output::done(ctx.output, &format!("{} will receive {} notifications.", input.email, input.kind))
        }
        NotificationsCommand::Update { id, form } => {
            notifications.update(id, &form.into()).await?;
            output::done(ctx.output, &format!("Recipient {id} updated."))
        }
        NotificationsCommand::Enable { id } => toggle(ctx, id, true).await,
        NotificationsCommand::Disable { id } => toggle(ctx, id, false).await,
        NotificationsCommand::Delete { id } => {
            notifications.delete(id).await?;
            output::done(ctx.output, &format!("Recipient {id} removed."))
        }
    }
}

async fn toggle(ctx: &Context, id: i64, active: bool) -> anyhow::Result<()> {
    let notifications = ctx.client.notifications();
    let receiver = notifications
        .list()
        .await?
        .into_iter()
        .find(|r| r.id == id)
        .with_context(|| format!("No notification recipient with ID {id}"))?;
    notifications.set_active(&receiver, active).await?;
    let state = if active { "resumed" } else { "paused" };
    output::done(ctx.output, &format!("Mails to {} {state}.", receiver.email))
}

fn recipients_table(receivers: &[NotificationReceiver]) -> Table {
    let mut table = Table::new(["ID", "NAME", "EMAIL", "TYPE", "ACTIVE", "ADDED"]);
    for r in receivers {
        table.push([
            r.id.to_string(),
            r.name.clone(),
            r.email.clone(),
            r.kind.to_string(),
            yes_no(r.is_active).to_string(),
            output::date_time(r.created_at),
        ]);
    }
    table
}
