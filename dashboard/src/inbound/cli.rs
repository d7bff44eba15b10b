//! Command-line driving adapter.
//!
//! Each subcommand builds the domain services over the configured HTTP
//! adapter, runs one operation, and renders the outcome to stdout.

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use super::render;
use crate::config::{DashboardSettings, SettingsError};
use crate::domain::view_state::{
    DOMAIN_KEY, PAGE_KEY, SEARCH_KEY, SORT_BY_KEY, SORT_ORDER_KEY, VIEW_KEY,
};
use crate::domain::ports::QueryLocation;
use crate::domain::{
    ApiFailure, AuthService, CredentialsValidationError, FetchError, LoginCredentials,
    Registration, SessionContext, UserDraft, UserId, UserLookup, UserValidationError,
    UsersDashboard,
};
use crate::outbound::location::MemoryLocation;
use crate::outbound::reqres::ReqresClient;

/// Users dashboard on the command line.
#[derive(Debug, Parser)]
#[command(name = "users-cli", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of users with client-side search, filter, and sort.
    List(ListArgs),
    /// Show one user.
    Show {
        /// User id.
        id: u64,
    },
    /// Create a user.
    Create {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Job title.
        #[arg(long)]
        job: String,
    },
    /// Replace a user's name and job.
    Update {
        /// User id.
        id: u64,
        /// Display name.
        #[arg(long)]
        name: String,
        /// Job title.
        #[arg(long)]
        job: String,
    },
    /// Delete a user.
    Delete {
        /// User id.
        id: u64,
    },
    /// Log in and print the session token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Register an account and print its id.
    Register {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
        /// Password confirmation.
        #[arg(long)]
        confirm: String,
    },
}

/// Arguments for [`Command::List`].
///
/// `--query` seeds the state the way a bookmarked URL would; the individual
/// flags are applied on top of it.
#[derive(Debug, Default, clap::Args)]
pub struct ListArgs {
    /// Query string to start from, e.g. `search=jan&page=2`.
    #[arg(long, default_value = "")]
    pub query: String,
    /// Case-insensitive search over names and email.
    #[arg(long)]
    pub search: Option<String>,
    /// Email domain substring.
    #[arg(long)]
    pub domain: Option<String>,
    /// Sort field: `id`, `first_name`, `last_name`, or `email`.
    #[arg(long)]
    pub sort_by: Option<String>,
    /// Sort order: `asc` or `desc`.
    #[arg(long)]
    pub sort_order: Option<String>,
    /// Page number.
    #[arg(long)]
    pub page: Option<String>,
    /// Layout: `card` or `table`.
    #[arg(long)]
    pub view: Option<String>,
}

impl ListArgs {
    fn overrides(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (SEARCH_KEY, &self.search),
            (DOMAIN_KEY, &self.domain),
            (SORT_BY_KEY, &self.sort_by),
            (SORT_ORDER_KEY, &self.sort_order),
            (PAGE_KEY, &self.page),
            (VIEW_KEY, &self.view),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }
}

/// Failures surfaced to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A remote call failed.
    #[error("{}", .0.message())]
    Api(#[from] ApiFailure),
    /// The list page could not be loaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A user draft was rejected locally.
    #[error(transparent)]
    InvalidUser(#[from] UserValidationError),
    /// Credentials were rejected locally.
    #[error(transparent)]
    InvalidCredentials(#[from] CredentialsValidationError),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Run `cli` against the API described by `settings`, writing to `out`.
///
/// # Errors
///
/// Returns [`CliError`] for configuration, validation, remote, and output
/// failures.
pub async fn run(
    cli: Cli,
    settings: &DashboardSettings,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let client = Arc::new(ReqresClient::new(
        settings.api_base_url()?,
        settings.api_key(),
        settings.request_timeout(),
    )?);

    match cli.command {
        Command::List(args) => list(client, &args, out).await,
        Command::Show { id } => {
            let dashboard = UsersDashboard::new(client, Arc::new(MemoryLocation::default()));
            match dashboard.lookup(UserId::new(id)).await? {
                UserLookup::Found(detail) => render::write_detail(out, &detail)?,
                UserLookup::NotFound(id) => writeln!(out, "user {id} not found")?,
            }
            Ok(())
        }
        Command::Create { name, job } => {
            let draft = UserDraft::new(&name, &job)?;
            let dashboard = UsersDashboard::new(client, Arc::new(MemoryLocation::default()));
            let created = dashboard.mutations().create(&draft).await?;
            render::write_created(out, &created)?;
            Ok(())
        }
        Command::Update { id, name, job } => {
            let draft = UserDraft::new(&name, &job)?;
            let dashboard = UsersDashboard::new(client, Arc::new(MemoryLocation::default()));
            let updated = dashboard.mutations().update(UserId::new(id), &draft).await?;
            render::write_updated(out, &updated)?;
            Ok(())
        }
        Command::Delete { id } => {
            let dashboard = UsersDashboard::new(client, Arc::new(MemoryLocation::default()));
            dashboard.mutations().delete(UserId::new(id)).await?;
            writeln!(out, "deleted user {id}")?;
            Ok(())
        }
        Command::Login { email, password } => {
            let credentials = LoginCredentials::try_from_parts(&email, &password)?;
            let mut session = SessionContext::new();
            AuthService::new(client)
                .login(&mut session, &credentials)
                .await?;
            if let Some(token) = session.token() {
                writeln!(out, "{}", token.expose())?;
            }
            Ok(())
        }
        Command::Register {
            email,
            password,
            confirm,
        } => {
            let registration = Registration::try_from_parts(&email, &password, &confirm)?;
            let mut session = SessionContext::new();
            let id = AuthService::new(client)
                .register(&mut session, &registration)
                .await?;
            writeln!(out, "registered user {id}")?;
            Ok(())
        }
    }
}

async fn list(
    client: Arc<ReqresClient>,
    args: &ListArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let location = Arc::new(MemoryLocation::new(args.query.as_str()));
    let dashboard = UsersDashboard::new(client, Arc::clone(&location));
    for (key, value) in args.overrides() {
        dashboard.update_from_pair(key, value);
    }

    let shown = dashboard.load().await?;
    let view = dashboard.view_state();
    render::write_users(out, &shown, view.view())?;
    render::write_page_links(out, &dashboard.page_links(), view.page())?;
    if let Some(stats) = dashboard.page_stats() {
        render::write_stats(out, &stats)?;
    }
    if let Some(distribution) = dashboard.domain_distribution() {
        render::write_domains(out, &distribution)?;
    }
    info!(query = %location.query(), "list rendered");
    Ok(())
}
