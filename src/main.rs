use anyhow::Context;
use log::{error, info};
use neural_interface::{
    config::{get_config, initialize_config},
    logging::init_logging,
    tui::run_ui,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    initialize_config().context("failed to load configuration")?;
    let config = get_config();
    let _logger = init_logging(&config).context("failed to start logging")?;

    info!(
        "Starting neural-interface (response delay {}ms, seed {:?})",
        config.response_delay_ms, config.template_seed
    );

    if let Err(e) = run_ui(&config).await {
        error!("UI loop failed: {}", e);
        return Err(e).context("terminal session ended with an error");
    }

    info!("Session closed");
    Ok(())
}
