mod autopilot;
mod session;

use tracing_subscriber::EnvFilter;

use blobby_platformer::config::BlobbyConfig;

use session::RunOptions;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = BlobbyConfig::load();
    let options = RunOptions::from_env();
    tracing::info!(?options, "Blobby runner starting");

    match session::run(config, &options, |line| println!("{line}")) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to encode summary: {e}"),
        },
        Err(e) => {
            tracing::error!("Could not start level: {e}");
            std::process::exit(1);
        },
    }
}
