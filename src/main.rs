use clap::Parser;
use quizdesk::{db::Db, documents::DocumentStore, names, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// libSQL database url. `file:` urls open a local database file.
    #[arg(long, env, default_value = names::DEFAULT_DATABASE_URL)]
    database_url: String,

    /// libSQL authentication token, for remote databases.
    #[arg(long, env)]
    database_auth_token: Option<String>,

    /// The address to bind to.
    #[arg(short, long, env, default_value = names::DEFAULT_ADDRESS)]
    address: String,

    /// Directory that receives uploaded documents.
    #[arg(long, env, default_value = names::DEFAULT_UPLOAD_DIR)]
    upload_dir: String,

    /// Origins allowed to call the API from a browser.
    #[arg(long, env, value_delimiter = ',', default_values_t = names::DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()))]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tower_http=info,quizdesk=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.database_url, args.database_auth_token).await?;
    let documents = DocumentStore::new(args.upload_dir);
    documents.prepare().await?;

    let app = quizdesk::router(AppState {
        db: db.clone(),
        documents,
        cors_origins: args.cors_origins,
    });

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close();
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
