use anyhow::Result;
use overbook::config::Settings;
use overbook::{Application, Phase};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    // RUST_LOG wins; the configured level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();

    info!("Starting overbook");

    let phase: Phase = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "run".to_string())
        .parse()?;
    let app = Application::from_settings(settings)?;

    let report = match phase {
        Phase::Provision => {
            app.provision().await?;
            return Ok(());
        }
        Phase::Simulate => app.simulate().await?,
        Phase::Full => app.run().await?,
    };

    if !report.is_clean() {
        anyhow::bail!(
            "{} seats were granted to more than one actor",
            report.double_claimed_seats().len()
        );
    }
    Ok(())
}
