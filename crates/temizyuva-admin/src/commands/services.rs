//! services list / show / create / update / enable / disable / delete

use clap::{Args, Subcommand, ValueEnum};

use temizyuva_client::Route;
use temizyuva_core::filter::{Activity, ServiceFilter};
use temizyuva_core::types::{Service, ServiceInput};

use super::Context;
use crate::output::{self, Table, money, truncate, yes_no};

/// Active-state selector on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ActivityArg {
    #[default]
    All,
    Active,
    Inactive,
}

impl From<ActivityArg> for Activity {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::All => Self::All,
            ActivityArg::Active => Self::Active,
            ActivityArg::Inactive => Self::Inactive,
        }
    }
}

/// Service catalogue commands
#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    List {
        /// Title or description fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Filter on active state
        #[arg(long, value_enum, default_value_t)]
        status: ActivityArg,
    },

    /// Show one service
    Show {
        /// Service ID
        id: i64,
    },

    /// Add a service
    Create(ServiceForm),

    /// Edit a service; omitted fields keep their current value
    Update {
        /// Service ID
        id: i64,

        #[command(flatten)]
        changes: ServiceChanges,
    },

    /// Let customers book a service
    Enable {
        /// Service ID
        id: i64,
    },

    /// Stop customers from booking a service
    Disable {
        /// Service ID
        id: i64,
    },

    /// Remove a service
    Delete {
        /// Service ID
        id: i64,
    },
}

/// Fields of a new service
#[derive(Debug, Args)]
pub struct ServiceForm {
    /// Title
    #[arg(long)]
    title: String,

    /// Base price
    #[arg(long)]
    price: f64,

    /// One-line description
    #[arg(long, default_value = "")]
    short_description: String,

    /// Long description
    #[arg(long, default_value = "")]
    description: String,

    /// Cover image URL
    #[arg(long, default_value = "")]
    image_url: String,

    /// Create it switched off
    #[arg(long)]
    inactive: bool,
}

impl From<ServiceForm> for ServiceInput {
    fn from(form: ServiceForm) -> Self {
        Self {
            title: form.title,
            short_description: form.short_description,
            description: form.description,
            price: form.price,
            image_url: form.image_url,
            is_active: !form.inactive,
        }
    }
}

/// Optional field overrides for an existing service
#[derive(Debug, Args)]
pub struct ServiceChanges {
    /// Title
    #[arg(long)]
    title: Option<String>,

    /// Base price
    #[arg(long)]
    price: Option<f64>,

    /// One-line description
    #[arg(long)]
    short_description: Option<String>,

    /// Long description
    #[arg(long)]
    description: Option<String>,

    /// Cover image URL
    #[arg(long)]
    image_url: Option<String>,
}

impl ServiceChanges {
    fn apply(self, mut input: ServiceInput) -> ServiceInput {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(price) = self.price {
            input.price = price;
        }
        if let Some(short) = self.short_description {
            input.short_description = short;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(url) = self.image_url {
            input.image_url = url;
        }
        input
    }
}

pub async fn run(ctx: &Context, command: ServicesCommand) -> anyhow::Result<()> {
    let services = ctx.client.services();

    match command {
        ServicesCommand::List { search, status } => {
            ctx.enter(Route::Services).await?;
            let filter = ServiceFilter {
                search,
                activity: status.into(),
            };
            let list = services.list_filtered(&filter).await?;
            output::emit(ctx.output, list.as_slice(), services_table)
        }
        ServicesCommand::Show { id } => {
            ctx.enter(Route::ServiceEdit(id)).await?;
            let service = services.get(id).await?;
            output::emit(ctx.output, &service, service_table)
        }
        ServicesCommand::Create(form) => {
            ctx.enter(Route::ServiceNew).await?;
            let input = ServiceInput::from(form);
            match services.create(&input).await? {
                Some(service) => output::emit(ctx.output, &service, service_table),
                None => output::done(ctx.output, &format!("Service '{}' created.", input.title)),
            }
        }
        ServicesCommand::Update { id, changes } => {
            ctx.enter(Route::ServiceEdit(id)).await?;
            let current = services.get(id).await?;
            let input = changes.apply(ServiceInput::from(&current));
            services.update(id, &input).await?;
            output::done(ctx.output, &format!("Service {id} updated."))
        }
        ServicesCommand::Enable { id } => toggle(ctx, id, true).await,
        ServicesCommand::Disable { id } => toggle(ctx, id, false).await,
        ServicesCommand::Delete { id } => {
            ctx.enter(Route::Services).await?;
            services.delete(id).await?;
            output::done(ctx.output, &format!("Service {id} deleted."))
        }
    }
}

async fn toggle(ctx: &Context, id: i64, active: bool) -> anyhow::Result<()> {
    ctx.enter(Route::Services).await?;
    ctx.client.services().set_active(id, active).await?;
    let state = if active { "active" } else { "inactive" };
    output::done(ctx.output, &format!("Service {id} is now {state}."))
}

fn services_table(services: &[Service]) -> Table {
    let mut table = Table::new(["ID", "TITLE", "PRICE", "ACTIVE", "DESCRIPTION"]);
    for s in services {
        table.push([
            s.id.to_string(),
            s.title.clone(),
            money(s.price),
            yes_no(s.is_active).to_string(),
            truncate(&s.short_description, 48),
        ]);
    }
    table
}

fn service_table(s: &Service) -> Table {
    Table::fields([
        ("ID", s.id.to_string()),
        ("Title", s.title.clone()),
        ("Price", money(s.price)),
        ("Active", yes_no(s.is_active).to_string()),
        ("Summary", s.short_description.clone()),
        ("Description", s.description.clone().unwrap_or_default()),
        ("Image", s.image_url.clone()),
    ])
}
