use leads_report::client::LeadsApiClient;
use leads_report::config::Config;
use leads_report::console;
use leads_report::report::ReportView;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Wires together:
/// - Logging and tracing (stderr; stdout belongs to the rendered report).
/// - Configuration loading.
/// - The Leads API client.
/// - The report view task and the interactive console.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok once the console exits cleanly.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leads_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the Leads API client
    let client = LeadsApiClient::new(config.leads_api_base_url.clone(), config.request_timeout())?;
    tracing::info!("✓ Leads API client initialized: {}", config.leads_api_base_url);

    // Start the report view; the initial read is scheduled through the same
    // quiet period as any filter edit.
    let (view, snapshots) = ReportView::new(client, config.debounce());
    let (commands_tx, commands_rx) = mpsc::channel(32);
    let view_task = tokio::spawn(view.run(commands_rx));

    console::run(commands_tx, snapshots).await?;

    // The console dropped its command sender; the view drains and stops.
    view_task.await?;
    Ok(())
}
