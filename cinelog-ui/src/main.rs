//! cinelog-ui - movie catalog web service
//!
//! Administrators curate the catalog; signed-in users keep and rate a
//! personal list of movies. Serves the JSON API plus the static pages.

use anyhow::Result;
use cinelog_common::config;
use cinelog_common::db::init::init_database;
use cinelog_ui::{build_router, AppState};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "cinelog-ui", version, about = "Cinelog movie catalog web service")]
struct Args {
    /// Root folder holding cinelog.db (overrides CINELOG_ROOT and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, env = "CINELOG_PORT", default_value_t = 5720)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting cinelog-ui v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "CINELOG_ROOT")?;
    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("cinelog-ui listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
