//! gamelink CLI: serve the read-state API or seed demo data.
//! Config from env (DATABASE_URL, BIND_ADDR, LOG_FILE) and optional CLI args.

use anyhow::Result;
use clap::{Parser, Subcommand};
use storage::{ConversationRepository, ReadMarkerRepository, SessionRepository};
use tower_http::trace::TraceLayer;
use tracing::info;
use unread_core::LastMessage;
use uuid::Uuid;

use gamelink_server::config::ServerConfig;
use gamelink_server::logger::init_tracing;
use gamelink_server::routes::router;
use gamelink_server::state::AppState;

#[derive(Parser)]
#[command(name = "gamelink")]
#[command(about = "GameLink read-state service: serve, seed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (config from env; port overrides BIND_ADDR).
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Seed a demo conversation with a welcome message and a session token
    /// for the first user.
    Seed {
        #[arg(long)]
        user_a: String,
        #[arg(long)]
        user_b: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::from_env();
    init_tracing(config.log_file.as_deref())?;

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Seed { user_a, user_b } => seed(config, &user_a, &user_b).await,
    }
}

async fn serve(config: ServerConfig, port: Option<u16>) -> Result<()> {
    let conversations = ConversationRepository::new(&config.database_url).await?;
    let markers = ReadMarkerRepository::new(&config.database_url).await?;
    let sessions = SessionRepository::new(&config.database_url).await?;
    let state = AppState::new(conversations, markers, sessions);

    let bind_addr = match port {
        Some(port) => format!("0.0.0.0:{}", port),
        None => config.bind_addr.clone(),
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed(config: ServerConfig, user_a: &str, user_b: &str) -> Result<()> {
    let conversations = ConversationRepository::new(&config.database_url).await?;
    let sessions = SessionRepository::new(&config.database_url).await?;

    let conversation = conversations.create_conversation(user_a, user_b).await?;
    conversations
        .record_latest(&LastMessage::new(
            &conversation.id,
            user_b,
            "Welcome to GameLink!",
        ))
        .await?;

    let token = Uuid::new_v4().to_string();
    sessions.insert_session(&token, user_a).await?;

    println!("conversation: {}", conversation.id);
    println!("session token for {}: {}", user_a, token);
    Ok(())
}
