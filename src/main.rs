//! EcoFinance CLI
//!
//! Terminal client for the EcoFinance backend:
//! - Show the dashboard or a single panel
//! - Link a bank account
//! - Talk to the assistant
//!
//! # Configuration
//!
//! Settings come from `config.toml` (see `ecofinance config`) and the
//! `ECOFINANCE_*` environment variables. `RUST_LOG` overrides the log level.

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecofinance::chat::ChatSession;
use ecofinance::config::{generate_default_config, Config, LoggingConfig};
use ecofinance::link::{LinkFlow, LinkStep, LinkWidget, WidgetError};
use ecofinance::panels::{
    AccountSummaryCards, AiInsights, CarbonFootprint, FinancialOverview, PanelRender,
    TransactionList,
};
use ecofinance::{
    Dashboard, FinanceApi, HttpFinanceClient, Notifications, ResourcePanel, Role, Session,
};

#[derive(Parser)]
#[command(name = "ecofinance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal finance and carbon footprint dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Client identifier that scopes backend requests
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every panel
    Dashboard,

    /// Show the account summary cards
    Summary,

    /// Show monthly spending, saving and income
    Overview,

    /// Show the carbon footprint by category
    Carbon,

    /// Show transactions
    Transactions {
        /// List every transaction instead of the most recent ones
        #[arg(short, long)]
        all: bool,
    },

    /// Show AI-generated insights
    Insights,

    /// Ask the assistant; without a message, start an interactive chat
    Chat {
        message: Vec<String>,
    },

    /// Link a bank account
    Link,

    /// Print or write a default config file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Reads the public token from the terminal once the user has finished
/// the provider's consent flow elsewhere.
struct TerminalWidget;

#[async_trait]
impl LinkWidget for TerminalWidget {
    async fn open(&self, link_token: &str) -> Result<Option<String>, WidgetError> {
        println!("Link token: {}", link_token);
        println!("Complete the bank consent flow with this token, then paste the public token.");
        let line = prompt("Public token (empty to cancel): ").await?;
        let token = line.trim();

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(client_id) = cli.client_id {
        config.session.client_id = client_id;
    }

    init_tracing(&config.logging);
    tracing::debug!(base_url = %config.api.base_url, "EcoFinance v{}", env!("CARGO_PKG_VERSION"));

    let api: Arc<dyn FinanceApi> = Arc::new(
        HttpFinanceClient::new(&config.api).context("Failed to build the HTTP client")?,
    );
    let session = Arc::new(Session::new(config.session.client_id.clone()));
    let notifications = Arc::new(Notifications::new());

    match cli.command {
        Commands::Dashboard => {
            let dashboard = Dashboard::new(
                api,
                session,
                notifications.clone(),
                &config.dashboard,
            );
            dashboard.mount().await;
            println!("{}", dashboard.render().await);
            dashboard.unmount().await;
        }
        Commands::Summary => show_panel(AccountSummaryCards, api, session).await,
        Commands::Overview => show_panel(FinancialOverview, api, session).await,
        Commands::Carbon => show_panel(CarbonFootprint, api, session).await,
        Commands::Transactions { all } => {
            let list = if all {
                TransactionList::all()
            } else {
                TransactionList::recent(config.dashboard.recent_transactions)
            };
            show_panel(list, api, session).await;
        }
        Commands::Insights => show_panel(AiInsights, api, session).await,
        Commands::Chat { message } => {
            let mut chat = ChatSession::with_greeting(config.session.resolved_user_id());
            if message.is_empty() {
                run_chat(&mut chat, api.as_ref()).await?;
            } else {
                chat.send(api.as_ref(), &message.join(" ")).await?;
                println!("{}", chat.render());
            }
        }
        Commands::Link => {
            session.probe_connection(api.as_ref()).await;
            if session.is_connected() {
                println!("A bank account is already connected.");
            } else {
                let flow = LinkFlow::new(api, session, notifications.clone());
                let widget = TerminalWidget;
                // The first press fetches the link token; the second opens the widget
                if flow.connect(&widget).await == LinkStep::TokenReady {
                    let step = flow.connect(&widget).await;
                    if step == LinkStep::Exited {
                        println!("Linking cancelled.");
                    }
                }
            }
        }
        Commands::Config { .. } => {}
    }

    for notification in notifications.drain() {
        eprintln!("{}", notification);
    }

    Ok(())
}

/// Load a single panel and print it
async fn show_panel<R: PanelRender>(resource: R, api: Arc<dyn FinanceApi>, session: Arc<Session>) {
    session.probe_connection(api.as_ref()).await;
    let panel = ResourcePanel::new(resource, api, session);
    panel.refresh().await;
    println!("{}", panel.render().await);
}

async fn run_chat(chat: &mut ChatSession, api: &dyn FinanceApi) -> anyhow::Result<()> {
    println!("{}", chat.render());

    loop {
        let line = prompt("› ").await?;
        let input = line.trim();
        if input.is_empty() || input == "exit" || input == "quit" {
            return Ok(());
        }

        chat.send(api, input).await?;
        if let Some(reply) = chat.transcript().last() {
            if reply.role == Role::Assistant {
                println!("assistant › {}", reply.content);
            }
        }
    }
}

/// Print a prompt and read one line from stdin off the runtime threads
async fn prompt(label: &str) -> std::io::Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })
    .await
    .map_err(std::io::Error::other)?
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ecofinance={}", logging.level).into());
    let json = logging.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
