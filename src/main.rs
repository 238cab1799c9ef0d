use color_eyre::{eyre::eyre, Result};
use handtrigger::action::executor_for;
use handtrigger::config::AppConfig;
use handtrigger::monitor::{GestureMonitor, JsonLinesSource, LogOverlay, SystemClock};
use handtrigger::trigger::TriggerStateMachine;
use std::io::BufReader;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const CONFIG_PATH_ENV: &str = "HANDTRIGGER_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| AppConfig::default_path());
    info!("Loading config from {}", config_path.display());
    let config = AppConfig::load_or_create(&config_path).await?;

    let executor =
        executor_for(&config.action).map_err(|e| eyre!("Failed to set up executor: {}", e))?;
    let trigger =
        TriggerStateMachine::new(config.trigger.arming_delay(), config.trigger.release_policy);

    // Ctrl-C stops the loop at the next frame boundary, or within one poll
    // interval when the landmark stream is stalled
    let exit = CancellationToken::new();
    let ctrl_c_exit = exit.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping");
                ctrl_c_exit.cancel();
            }
            Err(e) => error!("Unable to listen for Ctrl-C: {}", e),
        }
    });

    info!("Reading hand landmarks from stdin");
    let source =
        JsonLinesSource::spawn(BufReader::new(std::io::stdin()), config.detection.clone())?;

    let monitor = GestureMonitor::create(
        Box::new(source),
        Box::new(LogOverlay::new()),
        executor,
        Box::new(SystemClock),
        trigger,
        exit,
    )
    .start();

    let stopped = tokio::task::spawn_blocking(move || monitor.run())
        .await
        .map_err(|e| eyre!("Frame loop task failed: {}", e))?;

    if let Some(reason) = stopped.stop_reason() {
        info!("Exiting: {}", reason);
    }
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    let filter = log_filter(&std::env::var("RUST_LOG").unwrap_or_default());

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

// RUST_LOG takes full directives, e.g. `handtrigger=debug`
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_accepts_target_directives() {
        let filter = log_filter("handtrigger=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_falls_back_to_info() {
        let filter = log_filter("handtrigger=loud");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
