use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{add_log, start_server, LogBook};

/// Load configuration, install logging and serve the HTTP API until shutdown
pub fn run() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let logs = Arc::new(LogBook::new(config.log_capacity));
    let config = Arc::new(config);

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting csvwerk HTTP API"
    );
    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "Listening on http://{}:{}",
            config.server.host, config.server.port
        ),
    );

    actix_web::rt::System::new().block_on(async move {
        let server = start_server(config, logs)?;
        server.await
    })?;

    Ok(())
}
