//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use bulletin_content::{ContentClient, DataSource};
use bulletin_shared::{ALL_CATEGORY_ID, AppConfig, DataMode, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Bulletin, the association website content client.
#[derive(Parser)]
#[command(
    name = "bulletin",
    version,
    about = "Fetch and normalize announcement and member content from the association CMS.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Serve the bundled fixture data without touching the network.
    #[arg(long, global = true)]
    pub fixture: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Announcement operations.
    News {
        /// News subcommand.
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Print the member roster in display order.
    Members {
        /// Emit JSON instead of formatted lines.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Announcement subcommands.
#[derive(Subcommand)]
pub(crate) enum NewsAction {
    /// Print the ranked announcement snapshot.
    List {
        /// Only show announcements in this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Emit JSON instead of formatted lines.
        #[arg(long)]
        json: bool,
    },

    /// Show a single announcement by its rank id (e.g. 003).
    Show {
        /// Rank id within the current snapshot.
        id: String,

        /// Emit JSON instead of formatted lines.
        #[arg(long)]
        json: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "bulletin_cli=info,bulletin_content=info,bulletin_shared=info",
        1 => "bulletin_cli=debug,bulletin_content=debug,bulletin_shared=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::News { action } => {
            let client = build_client(cli.fixture)?;
            match action {
                NewsAction::List { category, json } => {
                    cmd_news_list(&client, category.as_deref(), json).await
                }
                NewsAction::Show { id, json } => cmd_news_show(&client, &id, json).await,
            }
        }
        Command::Members { json } => {
            let client = build_client(cli.fixture)?;
            cmd_members(&client, json).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// Build the content client, honoring the `--fixture` override.
fn build_client(fixture: bool) -> Result<ContentClient> {
    let mut config = load_config()?;
    if fixture {
        config.mode = DataMode::Fixture;
    }

    info!(mode = ?config.mode, base_url = %config.api.base_url, "content client ready");
    Ok(ContentClient::new(&config)?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_news_list(client: &ContentClient, category: Option<&str>, json: bool) -> Result<()> {
    let spinner = fetch_spinner("Fetching announcements");
    let result = client.fetch_announcements().await;
    spinner.finish_and_clear();

    let snapshot = result.data;
    let selected: Vec<_> = snapshot
        .announcements
        .iter()
        .filter(|record| match category {
            Some(wanted) => wanted == ALL_CATEGORY_ID || record.category == wanted,
            None => true,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for record in &selected {
            println!(
                "  {}  {}  [{}]  {}",
                record.id, record.date, record.category, record.title
            );
        }
        println!();
        println!(
            "  {} announcements across {} categories",
            selected.len(),
            snapshot.categories.len().saturating_sub(1)
        );
    }

    note_fallback(result.source);
    Ok(())
}

async fn cmd_news_show(client: &ContentClient, id: &str, json: bool) -> Result<()> {
    let spinner = fetch_spinner("Fetching announcement");
    let result = client.fetch_announcement_by_id(id).await;
    spinner.finish_and_clear();

    match result.data {
        Some(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!();
                println!("  {}  {}  [{}]", record.id, record.date, record.category);
                println!("  {}", record.title);
                println!();
                println!("{}", record.content);
            }
        }
        None => {
            // A normal negative result, not an error.
            println!("no announcement with id '{id}' in the current snapshot");
        }
    }

    note_fallback(result.source);
    Ok(())
}

async fn cmd_members(client: &ContentClient, json: bool) -> Result<()> {
    let spinner = fetch_spinner("Fetching members");
    let result = client.fetch_members().await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&result.data)?);
    } else {
        for member in &result.data {
            println!("  {} ({})  {}", member.name_en, member.name_jp, member.role);
            if !member.description.is_empty() {
                println!("      {}", member.description);
            }
        }
    }

    note_fallback(result.source);
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Spinner shown while a fetch is in flight.
fn fetch_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

/// Tell the operator when bundled fallback content was served.
fn note_fallback(source: DataSource) {
    if source == DataSource::Fixture {
        println!();
        println!("  note: showing bundled fallback content, not live CMS data");
    }
}
