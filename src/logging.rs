use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `account_client=debug`).
pub const LOG_ENV: &str = "ACCOUNT_CLIENT_LOG";

/// Install the stderr subscriber for the CLI.
///
/// Defaults to `warn` so command output stays readable; swallowed storage
/// and sign-out failures still show up.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}
