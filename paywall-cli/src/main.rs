//! Paywall dashboard command-line client
//!
//! Talks to the same backend as the web dashboard and keeps its session in
//! a local file between runs.
//!
//! Usage:
//!   paywall login --email creator@example.com --password ...
//!   paywall dashboard --period 7d
//!   paywall customers export --out ./exports

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use paywall_analytics::{format_compact, format_currency, format_currency_in, format_percentage};
use paywall_client::config::API_URL_ENV;
use paywall_client::{
    load_dashboard, save_export, ApiError, ClientConfig, DashboardLoad, DashboardSnapshot,
    ExportResource, FileTokenStore, PaywallApi, SessionObserver, WidgetState, DEFAULT_SLOW_AFTER,
};
use paywall_types::{
    AnalyticsPeriod, CommunicationStatus, CustomerFilters, CustomerStatus, PaywallStatus,
    TicketFilters, TicketStatus,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "paywall")]
#[command(about = "Paywall dashboard command-line client")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Session file holding the access and refresh tokens
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Backend base URL (overrides VITE_API_URL / PAYWALL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// One-time code, when the account has MFA enabled
        #[arg(long)]
        mfa_code: Option<String>,
    },
    /// End the session and remove stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Revenue, sales and traffic overview
    Dashboard {
        #[arg(long, default_value = "30d")]
        period: AnalyticsPeriod,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    Customers {
        #[command(subcommand)]
        command: CustomerCommand,
    },
    Tickets {
        #[command(subcommand)]
        command: TicketCommand,
    },
    Comms {
        #[command(subcommand)]
        command: CommsCommand,
    },
    Paywalls {
        #[command(subcommand)]
        command: PaywallCommand,
    },
    Access {
        #[command(subcommand)]
        command: AccessCommand,
    },
    /// Offline formatting helpers
    Format {
        #[command(subcommand)]
        command: FormatCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    List {
        #[arg(long)]
        status: Option<CustomerStatus>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Save the customer list as CSV
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long)]
        status: Option<CustomerStatus>,
    },
}

#[derive(Subcommand, Debug)]
enum TicketCommand {
    List {
        #[arg(long)]
        status: Option<TicketStatus>,
    },
    Stats,
}

#[derive(Subcommand, Debug)]
enum CommsCommand {
    List {
        #[arg(long)]
        status: Option<CommunicationStatus>,
    },
}

#[derive(Subcommand, Debug)]
enum PaywallCommand {
    List {
        #[arg(long)]
        status: Option<PaywallStatus>,
    },
}

#[derive(Subcommand, Debug)]
enum AccessCommand {
    Check { paywall_id: String },
}

#[derive(Subcommand, Debug)]
enum FormatCommand {
    Currency {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        code: String,
        #[arg(long, default_value = "en-US")]
        locale: String,
    },
}

/// Builds the client configuration from the environment, with `--api-url`
/// taking priority over the URL variables.
fn client_config<F>(api_url: Option<&str>, lookup: F) -> Result<ClientConfig, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    ClientConfig::from_lookup(|key| match api_url {
        Some(url) if key == API_URL_ENV => Some(url.to_string()),
        _ => lookup(key),
    })
}

/// Prints a hint when the stored session could not be refreshed.
struct ReloginHint;

impl SessionObserver for ReloginHint {
    fn session_expired(&self) {
        eprintln!("Your session has expired. Run `paywall login` to sign in again.");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Command::Format { command } = &args.command {
        run_format(command);
        return Ok(());
    }

    let config = client_config(args.api_url.as_deref(), |key| std::env::var(key).ok())
        .context("invalid client configuration")?;
    let session_file = match &args.session_file {
        Some(path) => path.clone(),
        None => FileTokenStore::default_path()?,
    };
    debug!("Using session file {}", session_file.display());

    let api = PaywallApi::connect(
        config,
        Arc::new(FileTokenStore::new(session_file)),
        Arc::new(ReloginHint),
    )?;

    // Ctrl-C cancels whatever is in flight.
    let cancel = CancellationToken::new();
    let api = api.scoped(cancel.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    run(&api, args.command).await
}

fn init_logging(verbose: bool) {
    // RUST_LOG takes precedence over --verbose when set.
    if std::env::var_os("RUST_LOG").is_some() {
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        let log_level = if verbose { Level::DEBUG } else { Level::WARN };
        FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

async fn run(api: &PaywallApi, command: Command) -> Result<()> {
    match command {
        Command::Login {
            email,
            password,
            mfa_code,
        } => {
            let auth = api.auth();
            let mut response = auth.login(&email, &password).await.context("login failed")?;
            if response.mfa_required {
                let code = mfa_code.context("this account requires --mfa-code")?;
                let mfa_token = response
                    .mfa_token
                    .clone()
                    .context("backend asked for MFA without an MFA token")?;
                response = auth
                    .verify_mfa(&mfa_token, &code)
                    .await
                    .context("MFA verification failed")?;
            }
            let who = response.user.map_or(email, |u| u.email);
            println!("Signed in as {who}");
        }
        Command::Logout => {
            api.auth().logout().await?;
            println!("Signed out");
        }
        Command::Whoami => {
            let user = api.auth().current_user().await?;
            match &user.name {
                Some(name) => println!("{name} <{}>", user.email),
                None => println!("{}", user.email),
            }
        }
        Command::Dashboard { period, json } => {
            let snapshot = match load_dashboard(&api.analytics(), period, DEFAULT_SLOW_AFTER).await {
                DashboardLoad::Ready(snapshot) => snapshot,
                load @ DashboardLoad::Slow { .. } => {
                    eprintln!("Dashboard is taking longer than usual, still loading...");
                    load.resolve().await
                }
            };
            if json {
                print_json(&snapshot)?;
            } else {
                print_dashboard(&snapshot);
            }
        }
        Command::Customers { command } => run_customers(api, command).await?,
        Command::Tickets { command } => match command {
            TicketCommand::List { status } => {
                let filters = TicketFilters {
                    status,
                    ..Default::default()
                };
                for ticket in api.support().list_tickets(&filters).await? {
                    println!(
                        "{:<12} {:<12} {:<8} {}",
                        ticket.id, ticket.status, ticket.priority, ticket.subject
                    );
                }
            }
            TicketCommand::Stats => print_json(&api.support().statistics().await?)?,
        },
        Command::Comms {
            command: CommsCommand::List { status },
        } => {
            for comm in api.communications().list(status).await? {
                println!(
                    "{:<12} {:<12} {:<8} {:>4} recipient(s)  {}",
                    comm.id,
                    comm.kind,
                    comm.status,
                    comm.recipients.len(),
                    comm.subject
                );
            }
        }
        Command::Paywalls {
            command: PaywallCommand::List { status },
        } => {
            for paywall in api.paywalls().list(status).await? {
                println!(
                    "{:<12} {:<9} {:>12} {:>6} sales  {}",
                    paywall.id,
                    paywall.status,
                    format_currency(paywall.price, &paywall.currency),
                    paywall.sales,
                    paywall.title
                );
            }
        }
        Command::Access {
            command: AccessCommand::Check { paywall_id },
        } => print_json(&api.access().check_access(&paywall_id).await?)?,
        Command::Format { command } => run_format(&command),
    }
    Ok(())
}

async fn run_customers(api: &PaywallApi, command: CustomerCommand) -> Result<()> {
    match command {
        CustomerCommand::List {
            status,
            search,
            page,
        } => {
            let filters = CustomerFilters {
                status,
                search,
                page,
                ..Default::default()
            };
            for customer in api.customers().list(&filters).await? {
                println!(
                    "{:<12} {:<24} {:<32} {:>12} {}",
                    customer.id,
                    customer.name,
                    customer.email,
                    format_currency(customer.total_spent, "USD"),
                    customer.status
                );
            }
        }
        CustomerCommand::Export { out, status } => {
            let filters = CustomerFilters {
                status,
                ..Default::default()
            };
            let bytes = api.customers().export(&filters).await?;
            let path = save_export(
                &bytes,
                &out,
                ExportResource::Customers.file_prefix(),
                Local::now().date_naive(),
            )
            .await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn run_format(command: &FormatCommand) {
    match command {
        FormatCommand::Currency {
            value,
            code,
            locale,
        } => println!("{}", format_currency_in(*value, code, locale)),
    }
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!("Period: {}", snapshot.period);
    match &snapshot.overview {
        WidgetState::Loaded(overview) => {
            println!("Revenue:     {}", format_currency(overview.total_revenue, "USD"));
            println!("Sales:       {}", format_compact(overview.total_sales as f64));
            println!("Views:       {}", format_compact(overview.total_views as f64));
            println!("Conversion:  {}", format_percentage(overview.conversion_rate, 1));
            if let Some(peak) = &overview.revenue_summary.peak {
                println!(
                    "Best period: {} ({})",
                    peak.name,
                    format_currency(peak.value, "USD")
                );
            }
        }
        WidgetState::Failed(e) => println!("Overview unavailable: {}", e.message),
    }

    match &snapshot.top_paywalls {
        WidgetState::Loaded(top) if top.is_empty() => println!("No paywall sales yet"),
        WidgetState::Loaded(top) => {
            println!("Top paywalls:");
            for (rank, paywall) in top.iter().enumerate() {
                println!(
                    "  {}. {} {}",
                    rank + 1,
                    paywall.title,
                    format_currency(paywall.revenue, "USD")
                );
            }
        }
        WidgetState::Failed(e) => println!("Top paywalls unavailable: {}", e.message),
    }

    match &snapshot.traffic {
        WidgetState::Loaded(sources) => {
            for source in sources {
                println!("  {:<16} {}", source.name, format_compact(source.value));
            }
        }
        WidgetState::Failed(e) => println!("Traffic unavailable: {}", e.message),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
