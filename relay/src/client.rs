use crate::{config::Config, error::Run, gateway::Handler};

/// Loads `.env` and the environment, installs logging, then runs the bot until a shutdown signal.
///
/// # Errors
/// when the configuration is incomplete, or the bot fails to start or shut down.
#[tracing::instrument(err, skip_all)]
pub async fn run(handler: impl Handler) -> Result<(), Run> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(crate::error::InstallDefaultCryptoProvider)?;

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(super::runner::start(config, handler).await?)
}
