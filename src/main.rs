use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

use devzone_bot::application::errors::BotError;
use devzone_bot::application::messaging::MessageDispatcher;
use devzone_bot::domain::traits::{ActivitySource, Bot};
use devzone_bot::infrastructure::activities::ActivitiesClient;
use devzone_bot::infrastructure::adapters::console::{run_console, ConsoleAdapter};
use devzone_bot::infrastructure::adapters::spark::SparkAdapter;
use devzone_bot::infrastructure::config::Config;
use devzone_bot::infrastructure::server::{self, WebhookState};

#[derive(Parser)]
#[command(name = "devzone-bot")]
#[command(about = "Spark bot listing current and upcoming DevNet Zone activities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Spark token (overrides config and SPARK_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("devzone-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// File (if present) then environment, then the command-line token
fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::info!("No config file at {}, using defaults", config_path);
        Config::default()
    };
    config.apply_env()?;

    if let Some(token) = token_override {
        config.spark.token = Some(token);
    }

    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let mut config = load_config(config_path, token_override)?;

    tracing::info!("Starting {} (activities API: {})", config.bot.name, config.activities.api);

    let activities: Arc<dyn ActivitySource> = Arc::new(ActivitiesClient::new(&config.activities)?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    let token = config.token().map(str::to_string);
    match token {
        Some(token) => rt.block_on(async {
            let mut spark = SparkAdapter::new(token, &config.spark, &config.bot)?;

            if config.bot.id.is_empty() {
                spark.fetch_bot_info().await?;
                config.bot.id = spark.bot_info().id;
                tracing::info!("Resolved bot id from Spark: {}", config.bot.id);
            }

            let spark = Arc::new(spark);
            let bot: Arc<dyn Bot> = spark.clone();
            let dispatcher = Arc::new(MessageDispatcher::new(&config, activities, bot));
            let state = WebhookState::new(dispatcher, spark, &config.bot.id, &config.server.webhook_path);

            server::serve(config.server.port, state).await
        }),
        None => {
            // Run console bot (dev mode)
            tracing::warn!("No Spark token configured, running console bot");
            rt.block_on(async {
                let bot: Arc<dyn Bot> = Arc::new(ConsoleAdapter::new());
                let dispatcher = MessageDispatcher::new(&config, activities, bot);
                run_console(&dispatcher).await
            })
        }
    }
}

fn init_config(config_path: &str) -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;

    if Path::new(config_path).exists() {
        println!("{}", yaml);
        println!("\n{} already exists, not overwriting. Adjust it from the above as needed.", config_path);
        return Ok(());
    }

    std::fs::write(config_path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", config_path, e)))?;
    println!("Wrote default config to {}", config_path);
    Ok(())
}
