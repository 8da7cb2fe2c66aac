//! Xeno CLI
//!
//! Command-line interface for the Xeno CRM backend.
//!
//! # Usage
//!
//! ```bash
//! xeno login --email ana@example.com
//! xeno audience list --customers
//! xeno audience create --name "Big spenders" -c "totalSpending>10000" -c "visits>=3"
//! xeno audience size --combinator or -c "lastVisit<30"
//! xeno campaign create --segment 1 --message "Hi [Name], 10% off" --scheduled-at 2025-03-01T10:00
//! xeno orders list --format json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use xeno_crm::{Combinator, Condition};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "xeno")]
#[command(author = "Xeno")]
#[command(version)]
#[command(about = "Xeno CRM Command Line Interface", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, global = true, env = "XENO_BACKEND_URL")]
    backend_url: Option<String>,

    /// Output format
    #[arg(long, short, global = true)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short, global = true)]
    profile: Option<String>,

    /// Log requests and page events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Backend(BackendCommands),
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

// Commands that talk to the backend
#[derive(Subcommand)]
enum BackendCommands {
    /// Sign in and save the session
    Login {
        #[arg(long)]
        email: String,
        /// Display name; defaults to the name the backend has on file
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the saved session
    Whoami,
    /// Manage audience segments
    Audience {
        #[command(subcommand)]
        action: AudienceCommands,
    },
    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignCommands,
    },
    /// Manage your orders
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// View your message log
    Messages {
        #[command(subcommand)]
        action: MessageCommands,
    },
}

#[derive(Subcommand)]
enum AudienceCommands {
    /// List all segments
    List {
        /// Also list each segment's customers
        #[arg(long)]
        customers: bool,
    },
    /// Create a segment
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "AND")]
        combinator: Combinator,
        /// Condition such as `totalSpending>=500`; repeatable
        #[arg(long = "condition", short = 'c', required = true)]
        conditions: Vec<Condition>,
    },
    /// Estimate how many customers match the conditions
    Size {
        #[arg(long, default_value = "AND")]
        combinator: Combinator,
        #[arg(long = "condition", short = 'c', required = true)]
        conditions: Vec<Condition>,
    },
    /// Show the fields and operators conditions may use
    Fields,
}

#[derive(Subcommand)]
enum CampaignCommands {
    /// List segments a campaign can target
    Segments,
    /// List campaigns for a segment
    List { segment_id: u64 },
    /// Schedule a campaign
    Create {
        #[arg(long)]
        segment: u64,
        /// Message text; must contain [Name]
        #[arg(long)]
        message: String,
        /// Local date-time, e.g. 2025-03-01T10:00
        #[arg(long)]
        scheduled_at: String,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// List orders
    List,
    /// Record an order
    Create {
        /// Order date, YYYY-MM-DD
        #[arg(long)]
        date: chrono::NaiveDate,
        #[arg(long)]
        revenue: rust_decimal::Decimal,
        #[arg(long)]
        cost: rust_decimal::Decimal,
    },
}

#[derive(Subcommand)]
enum MessageCommands {
    /// List messages sent to you
    List,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = xeno_crm::validate_operator_table() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    let profile = cli.profile.as_deref();
    let config = config::Config::load(profile).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable config file");
        config::Config::default()
    });
    let format = cli.format.unwrap_or_else(|| config.format());
    let backend_url = cli
        .backend_url
        .clone()
        .unwrap_or_else(|| config.backend_url());

    let result = match cli.command {
        Commands::Config { action } => commands::config::handle(action, profile).await,
        Commands::Backend(command) => match xeno_sdk::Client::new(&backend_url) {
            Ok(client) => {
                let ctx = commands::Context { client, config, profile, format };
                run(command, ctx).await
            }
            Err(e) => Err(e.to_string()),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(command: BackendCommands, mut ctx: commands::Context<'_>) -> Result<(), String> {
    match command {
        BackendCommands::Login { email, name } => commands::session::login(&mut ctx, email, name).await,
        BackendCommands::Logout => commands::session::logout(&mut ctx),
        BackendCommands::Whoami => commands::session::whoami(&ctx),
        BackendCommands::Audience { action } => commands::audience::handle(action, &ctx).await,
        BackendCommands::Campaign { action } => commands::campaign::handle(action, &ctx).await,
        BackendCommands::Orders { action } => commands::orders::handle(action, &ctx).await,
        BackendCommands::Messages { action } => commands::messages::handle(action, &ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_conditions() {
        let cli = Cli::parse_from([
            "xeno",
            "audience",
            "create",
            "--name",
            "Loyal",
            "--combinator",
            "or",
            "-c",
            "visits>=10",
            "-c",
            "lastVisit<30",
        ]);
        let Commands::Backend(BackendCommands::Audience {
            action: AudienceCommands::Create { name, combinator, conditions },
        }) = cli.command
        else {
            panic!("expected audience create");
        };
        assert_eq!(name, "Loyal");
        assert_eq!(combinator, Combinator::Or);
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[1].format(), "Last Visit Less than 30");
    }

    #[test]
    fn test_config_and_backend_commands_share_top_level() {
        let cli = Cli::parse_from(["xeno", "config", "list"]);
        assert!(matches!(cli.command, Commands::Config { action: ConfigCommands::List }));

        let cli = Cli::parse_from(["xeno", "whoami"]);
        assert!(matches!(cli.command, Commands::Backend(BackendCommands::Whoami)));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let result = Cli::try_parse_from(["xeno", "audience", "size", "-c", "age>30"]);
        assert!(result.is_err());
    }
}
