/// VibeQueue Organizer - terminal console for running a live event
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_core::EventId;
use vibe_organizer::{config::OrganizerConfig, console, token::TokenStore};
use vibe_queue_hub::WsQueueHub;
use vibe_server_client::{ClientConfig, VibeServerClient};
use vibe_session::{EventSession, RequestAuthority};

#[derive(Parser)]
#[command(name = "vibe-organizer")]
#[command(about = "VibeQueue organizer console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the access token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the saved access token
    Logout,
    /// List your events
    Events,
    /// Open an event and manage its queue interactively
    Open {
        /// Event id
        event_id: String,
    },
    /// Show earnings overview and payout history
    Earnings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibe_organizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = OrganizerConfig::load()?;
    config.validate()?;

    match cli.command {
        Commands::Login { username, password } => {
            login(&config, &username, &password).await?;
        }
        Commands::Logout => {
            TokenStore::new(config.auth.token_path.clone()).clear().await?;
            println!("Logged out.");
        }
        Commands::Events => {
            list_events(&config).await?;
        }
        Commands::Open { event_id } => {
            open_event(&config, &event_id).await?;
        }
        Commands::Earnings => {
            show_earnings(&config).await?;
        }
    }

    Ok(())
}

async fn login(config: &OrganizerConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let client = VibeServerClient::new(ClientConfig::new(&config.api.base_url))?;
    let response = client.login(username, password).await?;

    let token = client
        .token()
        .await
        .context("login succeeded but no token was issued")?;
    TokenStore::new(config.auth.token_path.clone())
        .save(&token)
        .await?;

    println!(
        "Logged in as {}.",
        response.username.as_deref().unwrap_or(username)
    );
    Ok(())
}

/// Build a client carrying the saved token.
async fn authenticated_client(config: &OrganizerConfig) -> anyhow::Result<VibeServerClient> {
    let token = TokenStore::new(config.auth.token_path.clone())
        .load()
        .await
        .context("not logged in (run `vibe-organizer login` first)")?;
    let client = VibeServerClient::new(ClientConfig::new(&config.api.base_url))?;
    client.set_token(token).await;
    Ok(client)
}

async fn list_events(config: &OrganizerConfig) -> anyhow::Result<()> {
    let client = authenticated_client(config).await?;
    let events = client.events().await?.get_all_events().await?;

    if events.is_empty() {
        println!("No events yet.");
        return Ok(());
    }
    for event in events {
        let status = if event.is_active { "active" } else { "inactive" };
        let code = event.code.as_deref().unwrap_or("-");
        println!("{}  {} [{status}] code {code}", event.id, event.name);
    }
    Ok(())
}

async fn open_event(config: &OrganizerConfig, event_id: &str) -> anyhow::Result<()> {
    let client = authenticated_client(config).await?;
    let event_id = EventId::new(event_id);

    let details = client
        .events()
        .await?
        .get_event_details(&event_id)
        .await
        .context("failed to fetch event snapshot")?;

    let authority: Arc<dyn RequestAuthority> = Arc::new(client.requests().await?);
    let hub = WsQueueHub::new(config.hub_url());
    let session = EventSession::open(details, authority, &hub)
        .await
        .context("failed to join the queue hub")?;

    console::run(session).await
}

async fn show_earnings(config: &OrganizerConfig) -> anyhow::Result<()> {
    let client = authenticated_client(config).await?;
    let earnings = client.earnings().await?;

    let overview = earnings.get_overview().await?;
    println!(
        "Withdrawable: {:.2} (payment account {})",
        overview.withdrawable_amount,
        if overview.is_payment_connected {
            "connected"
        } else {
            "not connected"
        }
    );

    let payouts = earnings.get_payout_history().await?;
    if payouts.is_empty() {
        println!("No payouts yet.");
    }
    for payout in payouts {
        let status = if payout.success { "paid" } else { "pending" };
        println!(
            "{}  {:.2} [{status}]",
            payout.requested_at, payout.converted_amount
        );
    }
    Ok(())
}
