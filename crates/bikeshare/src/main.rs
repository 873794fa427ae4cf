mod bootstrap;

use anyhow::{Context as _, Result};
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), settings.catalog());

    session.run().context("interactive session failed")?;

    tracing::info!("Session finished after {} run(s)", session.runs());
    Ok(())
}
