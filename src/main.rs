use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use triangular_arbitrage::{
    config::ArbitrageConfig,
    strategy::ArbitrageScanner,
    trading::SimulatedExecutor,
    utils::{logger, metrics},
    Result,
};

#[derive(Parser)]
#[command(name = "tri-arb")]
#[command(about = "Triangular arbitrage opportunity scanner")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/tri-arb.toml")]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file path; console-only when omitted
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scan loop with simulated execution
    Scan {
        /// Run a single scan cycle and exit
        #[arg(long)]
        once: bool,
    },
    /// Validate configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(&cli.log_level, cli.log_file.as_deref())?;
    metrics::register();

    info!(
        "Starting {} v{}",
        triangular_arbitrage::APP_NAME,
        triangular_arbitrage::VERSION
    );

    let config = if cli.config.exists() {
        let config = ArbitrageConfig::from_file(&cli.config)?;
        info!("Configuration loaded from: {}", cli.config.display());
        config
    } else {
        info!("No config file at {}; using defaults", cli.config.display());
        ArbitrageConfig::default()
    };

    config.validate()?;

    match cli.command {
        Commands::Scan { once } => run_scan(config, once).await,
        Commands::Validate => {
            println!("Configuration validation passed!");
            Ok(())
        }
    }
}

async fn run_scan(config: ArbitrageConfig, once: bool) -> Result<()> {
    let mut scanner = ArbitrageScanner::new(config)?;
    let mut executor = SimulatedExecutor::new();

    let handle = scanner.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested; finishing current cycle");
            handle.stop().await;
        }
    });

    if once {
        scanner.scan_cycle(&mut executor).await?;
    } else {
        scanner.run_with_executor(&mut executor).await?;
    }

    let stats = scanner.get_statistics().await;
    info!(
        scans = stats.scans_completed,
        detected = stats.opportunities_detected,
        executed = stats.opportunities_executed,
        "scanner summary"
    );

    let results = executor.get_results();
    info!(
        trades = results.total_trades,
        profit = results.total_profit,
        "simulated execution results"
    );

    Ok(())
}
