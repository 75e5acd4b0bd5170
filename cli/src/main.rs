use bloomex_api::{start_server, ApiState};
use bloomex_cli::config::{expand_path, load_config, load_genesis, Config};
use bloomex_cli::display::display_genesis;
use clap::Parser;
use owo_colors::OwoColorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bloomexd")]
#[command(about = "Bloomex vesting ledger node")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the API listen address
    #[arg(short, long, value_name = "ADDR")]
    listen: Option<String>,

    /// Show version
    #[arg(short, long)]
    version: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!(
            "bloomexd {} ({}@{})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_BRANCH"),
            env!("GIT_HASH")
        );
        return;
    }

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(expand_path("$HOME/bloomex-node/config/bloomexd.toml")));

    let (config, config_error) = match load_config(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("{}", format!("Bloomex Node v{}", env!("CARGO_PKG_VERSION")).cyan().bold());
    println!("Config file: {:?}\n", config_path);
    if let Some(e) = config_error {
        tracing::warn!("Could not load config, using defaults: {}", e);
    }

    let genesis = match load_genesis(&config.node) {
        Ok(genesis) => genesis,
        Err(e) => {
            eprintln!("{} Genesis: {}", "✗".red(), e);
            std::process::exit(1);
        }
    };
    display_genesis(&genesis);

    let engine = match genesis.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} Genesis rejected: {}", "✗".red(), e);
            std::process::exit(1);
        }
    };
    println!("{}", "✓ Genesis distribution verified".green());

    let listen = cli.listen.unwrap_or(config.node.listen_addr);
    let addr: SocketAddr = match listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("{} Invalid listen address {}: {}", "✗".red(), listen, e);
            std::process::exit(1);
        }
    };

    if config.node.admin_token.is_none() {
        tracing::warn!("No admin token configured; admin endpoints are open");
    }

    println!("{}", "🚀 Starting Bloomex API...".green().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());

    let state = ApiState::new(Arc::new(engine), config.node.admin_token);
    if let Err(e) = start_server(addr, state).await {
        eprintln!("{} API server: {}", "✗".red(), e);
        std::process::exit(1);
    }
}
