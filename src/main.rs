use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dockwire::cli::{parse_args, run_cli_command, run_local_command};
use dockwire::{ClientConfig, DockerClient};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(result) = run_local_command(&command, &mut std::io::stdout()) {
        return result;
    }

    // Logs go to stderr so stdout stays a clean event feed.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "dockwire=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let client = DockerClient::new(ClientConfig::from_env())?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_cli_command(&command, &client, &mut std::io::stdout(), shutdown).await
}
