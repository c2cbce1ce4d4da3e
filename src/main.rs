use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use qmlantom_lsp::Backend;
use qmlantom_lsp::catalog::Catalog;
use qmlantom_lsp::config::Config;

/// Environment variable that overrides the configured log filter.
const LOG_ENV: &str = "QMLANTOM_LOG";

/// QML language server speaking LSP over stdio.
#[derive(Debug, Parser)]
#[command(name = "qmlantom_lsp", version, about)]
struct Cli {
    /// Config file (default: <config dir>/qmlantom/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Additional directory of catalog descriptor files (*.json).
    /// May be given more than once.
    #[arg(long = "catalog-dir", value_name = "DIR")]
    catalog_dirs: Vec<PathBuf>,

    /// Do not load the descriptors compiled into the binary.
    #[arg(long)]
    no_bundled: bool,

    /// tracing filter directive, e.g. `qmlantom_lsp=debug`.
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        config.catalog_dirs.extend(self.catalog_dirs);
        if self.no_bundled {
            config.bundled_catalog = false;
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = filter;
        }
    }
}

fn init_tracing(config: &Config) {
    // stdout carries the protocol, so logs go to stderr.
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(qmlantom_lsp::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("qmlantom_lsp: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);
    init_tracing(&config);

    let catalog = match config.descriptor_sources().and_then(Catalog::load) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!("failed to load symbol catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        modules = catalog.modules().len(),
        components = catalog.component_count(),
        "starting qmlantom"
    );

    let (service, socket) = LspService::new(|client| Backend::new(client, catalog));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;

    ExitCode::SUCCESS
}
