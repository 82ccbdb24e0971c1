// crates/convert_assignment/src/logging.rs

use env_logger::Env;

/// Initialises `env_logger` at `warn` (`info` with `verbose`). `RUST_LOG`
/// takes precedence when set. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
