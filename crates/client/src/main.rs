//! `stockdesk` command-line front-end.
//!
//! Each invocation restores the persisted session, performs one operation,
//! and prints the resulting screen.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;

use stockdesk_api::{
    ApiClient, CheckPartStatusRequest, DEFAULT_API_URL, DeliverToProductionRequest,
    PlanLogisticsRequest, ProcureMissingPartsRequest,
};
use stockdesk_client::{
    App, ClientConfig, ScreenMode, Section, SessionState, StockUpdateInput,
    SubmitOutcome, TokenStore,
};
use stockdesk_core::{MovementType, PartId, WarehouseId};
use stockdesk_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "stockdesk", version, about = "Inventory and production front-end")]
struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "STOCKDESK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Directory holding the persisted session token.
    #[arg(long, global = true, env = "STOCKDESK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log output format on stderr: text or json.
    #[arg(long, global = true, env = "STOCKDESK_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and show the stock list.
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "STOCKDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the startup screen for the persisted session.
    Status,
    /// Render a section (stock, supply, logistics, reports, stock-update, required-parts).
    View { section: String },
    /// Submit a stock movement.
    UpdateStock {
        #[arg(long)]
        part: PartId,
        #[arg(long)]
        movement: MovementType,
        /// Kept as text; validated like the form field.
        #[arg(long)]
        quantity: String,
    },
    /// Check whether stock covers a required quantity.
    CheckPart {
        #[arg(long)]
        part: PartId,
        #[arg(long)]
        quantity: u64,
    },
    /// Order missing parts.
    Procure {
        #[arg(long)]
        part: PartId,
        #[arg(long)]
        quantity: u64,
    },
    /// Submit a logistics plan.
    PlanLogistics {
        #[arg(long)]
        product: PartId,
        #[arg(long)]
        quantity: u64,
        /// Delivery date as YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show the upcoming-products report.
    Upcoming,
    /// Move parts from a warehouse to production.
    Deliver {
        #[arg(long)]
        part: PartId,
        #[arg(long)]
        quantity: u64,
        #[arg(long, default_value_t = WarehouseId::DEFAULT)]
        warehouse: WarehouseId,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = ClientConfig {
        api_url: cli.api_url,
        data_dir: cli.data_dir,
        log_format: cli.log_format,
    };
    stockdesk_observability::init_with(config.log_format);

    let store = config
        .token_store()
        .context("failed to locate the session token store")?;
    tracing::debug!(api_url = %config.api_url, token = ?store.path(), "starting");

    let mut app = App::new(ApiClient::new(config.api_url.as_str()), store);
    let ok = run(&mut app, cli.command).await;

    print!("{}", app.screen().render(std::io::stdout().is_terminal()));

    if ok && !app.screen().has_errors() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one command. Returns `false` when the command could not complete.
async fn run<S: TokenStore>(app: &mut App<S>, command: Command) -> bool {
    match command {
        Command::Login { username, password } => {
            app.login(&username, &password).await == SessionState::LoggedIn
        }
        Command::Logout => {
            app.restore_session();
            app.logout();
            true
        }
        Command::Status => app.start().await == SessionState::LoggedIn,
        command => {
            if app.restore_session() != SessionState::LoggedIn {
                return false;
            }
            let ok = authenticated(app, command).await;
            ok && app.screen().mode() == ScreenMode::Main
        }
    }
}

/// Run a command that needs a session. Returns `false` when the operation
/// itself failed; a section whose fetch failed still counts as shown.
async fn authenticated<S: TokenStore>(app: &mut App<S>, command: Command) -> bool {
    match command {
        Command::View { section } => {
            app.navigate(&section).await;
            app.state().active.is_some()
        }
        Command::UpdateStock {
            part,
            movement,
            quantity,
        } => {
            // the form validates against the freshly fetched stock list
            app.open(Section::StockUpdate).await;
            if app.screen().mode() != ScreenMode::Main {
                return false;
            }
            let input = StockUpdateInput {
                part: Some(part),
                movement,
                quantity,
            };
            matches!(
                app.submit_stock_update(input).await,
                SubmitOutcome::Applied { .. }
            )
        }
        Command::CheckPart { part, quantity } => {
            let req = CheckPartStatusRequest {
                product_id: part,
                required_quantity: quantity,
            };
            app.check_part_status(&req).await.is_ok()
        }
        Command::Procure { part, quantity } => {
            let req = ProcureMissingPartsRequest {
                product_id: part,
                missing_quantity: quantity,
            };
            app.procure_missing_parts(&req).await.is_ok()
        }
        Command::PlanLogistics {
            product,
            quantity,
            date,
        } => {
            let req = PlanLogisticsRequest {
                product_id: product,
                quantity,
                delivery_date: date,
            };
            app.plan_logistics(&req).await.is_ok()
        }
        Command::Upcoming => app.upcoming_products_report().await.is_ok(),
        Command::Deliver {
            part,
            quantity,
            warehouse,
        } => {
            let req = DeliverToProductionRequest {
                product_id: part,
                warehouse_id: warehouse,
                quantity,
            };
            app.deliver_to_production(&req).await.is_ok()
        }
        Command::Login { .. } | Command::Logout | Command::Status => true,
    }
}
