use super::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global logger (tracing subscriber)
///
/// The filter is taken from the `RUST_LOG` environment variable if set; otherwise,
/// `info` messages (or `debug` messages, if `verbose`) from this crate are shown.
///
/// Calling this function more than once has no effect.
pub fn init_logger(verbose: bool) {
    let fallback = if verbose { VERBOSE_LOG_FILTER } else { DEFAULT_LOG_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
