use card_service::app::build_server;
use card_service::utils::{logger, validation::Validate};
use card_service::{CardError, CliConfig, ConfigProvider, TomlConfig};
use clap::Parser;

enum LoadedConfig {
    Cli(CliConfig),
    Toml(TomlConfig),
}

impl LoadedConfig {
    fn provider(&self) -> &dyn ConfigProvider {
        match self {
            Self::Cli(config) => config,
            Self::Toml(config) => config,
        }
    }

    fn validate(&self) -> card_service::Result<()> {
        match self {
            Self::Cli(config) => config.validate(),
            Self::Toml(config) => config.validate(),
        }
    }
}

fn fail(e: &CardError) -> ! {
    tracing::error!("❌ Card service failed: {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let loaded = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => LoadedConfig::Toml(config),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(e.exit_code());
            }
        },
        None => LoadedConfig::Cli(cli.clone()),
    };

    let (verbose, json_logs) = match &loaded {
        LoadedConfig::Cli(config) => (config.verbose, config.json_logs),
        LoadedConfig::Toml(config) => (
            cli.verbose || config.verbose(),
            cli.json_logs || config.json_logs(),
        ),
    };
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_logger(verbose);
    }

    tracing::info!("Starting card-service {}", env!("CARGO_PKG_VERSION"));
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = loaded.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    // A store that cannot be reached at startup is fatal.
    let server = match build_server(loaded.provider()).await {
        Ok(server) => server,
        Err(e) => fail(&e),
    };

    if let Err(e) = server.run().await {
        fail(&e);
    }

    Ok(())
}
