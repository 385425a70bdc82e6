use anyhow::Context;
use clap::Parser;
use objectskipper::cli::Cli;
use objectskipper::{
    init_logging, InterceptionMode, ObjectFilter, SocketInterceptConnection, BUILD_DATE, VERSION,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.resolve_settings()?;

    // Initialize logging
    init_logging(settings.log_format)?;
    info!(version = VERSION, build_date = BUILD_DATE, "Starting objectskipper");

    let mut connection =
        SocketInterceptConnection::connect(&settings.socket_path, InterceptionMode::Pre)
            .with_context(|| {
                format!(
                    "Failed to connect to {}",
                    settings.socket_path.display()
                )
            })?;
    let shutdown = connection.shutdown_handle()?;

    let codes = settings.control_codes();
    info!(
        idpattern = codes.manage_identifier_pattern,
        objectid = codes.manage_object_ids,
        currentid = codes.current_object_id,
        disable = codes.disable,
        "Filtering codes"
    );
    let mut filter = ObjectFilter::new(codes);
    let mut worker = tokio::task::spawn_blocking(move || filter.run(&mut connection));

    tokio::select! {
        result = &mut worker => {
            result
                .context("Filter loop panicked")?
                .context("Interception connection failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, closing interception connection");
            if let Err(e) = shutdown.shutdown() {
                warn!(error = %e, "Failed to close interception connection");
            }
            match worker.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Filter loop failed during shutdown"),
                Err(e) => warn!(error = %e, "Filter loop panicked during shutdown"),
            }
        }
    }

    Ok(())
}
