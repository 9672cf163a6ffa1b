//! contact-forms list / show / mark-read

use clap::{Subcommand, ValueEnum};

use temizyuva_client::Route;
use temizyuva_core::filter::{ContactFormFilter, SortOrder};
use temizyuva_core::types::ContactForm;

use super::Context;
use crate::output::{self, Table, truncate, yes_no};

/// Listing order on submission time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    #[default]
    Newest,
    Oldest,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Newest => Self::Desc,
            OrderArg::Oldest => Self::Asc,
        }
    }
}

/// Inbox commands
#[derive(Debug, Subcommand)]
pub enum ContactFormsCommand {
    /// List submitted forms
    List {
        /// Name, email, phone or subject fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Only read (true) or unread (false) forms
        #[arg(long)]
        read: Option<bool>,

        /// Sort order
        #[arg(long, value_enum, default_value_t)]
        order: OrderArg,
    },

    /// Show one form
    Show {
        /// Form ID
        id: i64,
    },

    /// Mark a form as read
    MarkRead {
        /// Form ID
        id: i64,
    },
}

pub async fn run(ctx: &Context, command: ContactFormsCommand) -> anyhow::Result<()> {
    let forms = ctx.client.contact_forms();

    match command {
        ContactFormsCommand::List {
            search,
            read,
            order,
        } => {
            ctx.enter(Route::ContactForms).await?;
            let filter = ContactFormFilter {
                search,
                read,
                order: order.into(),
            };
            let list = forms.list_filtered(&filter).await?;
            output::emit(ctx.output, list.as_slice(), forms_table)
        }
        ContactFormsCommand::Show { id } => {
            ctx.enter(Route::ContactFormDetail(id)).await?;
            let form = forms.get(id).await?;
            output::emit(ctx.output, &form, form_table)
        }
        ContactFormsCommand::MarkRead { id } => {
            ctx.enter(Route::ContactFormDetail(id)).await?;
            forms.mark_as_read(id).await?;
            output::done(ctx.output, &format!("Contact form {id} marked as read."))
        }
    }
}

fn forms_table(forms: &[ContactForm]) -> Table {
    let mut table = Table::new(["ID", "RECEIVED", "NAME", "EMAIL", "SUBJECT", "READ"]);
    for c in forms {
        table.push([
            c.id.to_string(),
            output::date_time(c.created_at),
            c.full_name.clone(),
            c.email.clone(),
            truncate(&c.subject, 40),
            yes_no(c.is_read).to_string(),
        ]);
    }
    let unread = forms.iter().filter(|c| !c.is_read).count();
    table.with_footer(format!("{} forms, {unread} unread", forms.len()))
}

fn form_table(c: &ContactForm) -> Table {
    Table::fields([
        ("ID", c.id.to_string()),
        ("From", c.full_name.clone()),
        ("Email", c.email.clone()),
        ("Phone", c.phone.clone()),
        ("Subject", c.subject.clone()),
        ("Received", output::date_time(c.created_at)),
        (
            "Read",
            c.read_at
                .map_or_else(|| yes_no(c.is_read).to_string(), output::date_time),
        ),
        ("Message", c.message.clone()),
    ])
}
