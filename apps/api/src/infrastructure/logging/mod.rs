pub mod traits;
pub mod tracing_logger;

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// Uses `RUST_LOG` when set, otherwise `default_directives`, and finally
/// plain `info` if the directives fail to parse.
pub fn init_tracing(default_directives: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
