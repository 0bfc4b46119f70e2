#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Mail dispatch server

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use mail_dispatch::{
    domain::{config::ConfigStore, dispatcher::MailDispatcherImpl, settings::SettingsService},
    infrastructure::{
        config::InMemoryConfigStore,
        database::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::smtp::{SmtpConnector, SmtpConnectorConfig},
        http::{AppState, HttpServer, HttpServerConfig},
        templates::TeraRenderer,
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Dispatcher settings
#[derive(Debug, Clone, Parser)]
pub struct DispatcherConfig {
    /// Host name used in generated Message-IDs; defaults to the machine hostname
    #[arg(long, env = "SERVER_NAME")]
    pub server_name: Option<String>,

    /// Directory inline images may be read from; image variables resolve to "" without it
    #[arg(long, env = "MAIL_IMAGE_DIR")]
    pub image_dir: Option<PathBuf>,
}

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// The SMTP connector configuration
    #[clap(flatten)]
    pub smtp: SmtpConnectorConfig,

    /// The dispatcher configuration
    #[clap(flatten)]
    pub dispatcher: DispatcherConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.db.connection_string.as_deref() {
        Some(connection_string) => {
            let postgres = PostgresDatabase::new(connection_string).await?;
            postgres.migrate().await?;

            info!("using Postgres configuration store");

            serve(postgres, args).await
        }
        None => {
            warn!("DATABASE_URL is not set, mail settings are kept in memory");

            serve(InMemoryConfigStore::new(), args).await
        }
    }
}

#[mutants::skip]
async fn serve<S: ConfigStore>(store: S, args: Args) -> Result<()> {
    let store = Arc::new(store);

    let dispatcher = MailDispatcherImpl::new(
        store.clone(),
        Arc::new(SmtpConnector::new(args.smtp)),
        args.dispatcher.server_name,
    );

    if args.dispatcher.image_dir.is_none() {
        warn!("MAIL_IMAGE_DIR is not set, inline images are disabled");
    }

    let state = AppState::new(
        dispatcher,
        SettingsService::new(store),
        TeraRenderer::new(),
        args.dispatcher.image_dir,
    );

    HttpServer::new(state, &args.server)?.run().await
}
