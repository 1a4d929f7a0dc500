use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use buddy_bot::application::errors::BotError;
use buddy_bot::application::messaging::{CommandDispatcher, MessageParser};
use buddy_bot::application::services::{CommandService, MessageService};
use buddy_bot::domain::traits::Bot;
use buddy_bot::infrastructure::adapters::telegram::{polling, TelegramAdapter};
use buddy_bot::infrastructure::config::Config;
use buddy_bot::infrastructure::vendors::VendorClient;
use buddy_bot::strings::help;

#[derive(Parser)]
#[command(name = "buddy-bot")]
#[command(about = "A Telegram assistant for crypto, gaming and news", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Print the default config
    InitConfig,
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config, cli.token) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("buddy-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => match Config::default_yaml() {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Failed to render config: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = Arc::new(Config::load(config_path, token_override)?);
    tracing::info!(keys = ?config.keys, "Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async {
        // Long polling requests must outlive the poll timeout
        let poll_timeout = config.telegram.poll_timeout_seconds;
        let request_timeout = Duration::from_secs(poll_timeout) + config.request_timeout();

        let mut bot = TelegramAdapter::new(config.bot_token(), config.telegram.api_base.as_str(), request_timeout)?;
        bot.fetch_bot_info().await?;

        let info = bot.bot_info();
        tracing::info!("Bot started: @{}", info.username);

        if config.telegram.register_commands {
            let commands = CommandService::new(help::default_commands());
            if let Err(e) = bot.register_commands(&commands.menu()).await {
                tracing::warn!("Failed to register commands: {}", e);
            }
        }

        let vendors = VendorClient::new(config.clone())?;
        let service = Arc::new(MessageService::new(
            bot,
            MessageParser::new(Some(info.username)),
            CommandDispatcher::new(config.clone(), vendors),
        ));

        polling::run(service, poll_timeout, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
        })
        .await;

        Ok::<(), BotError>(())
    })
}
