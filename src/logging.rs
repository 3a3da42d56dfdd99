//! Logging init: structured diagnostics to stderr.
//!
//! stdout is reserved for the report (table or JSON), so everything tracing
//! emits goes to stderr. `RUST_LOG` wins over the built-in filter.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,url_sentinel=info";
const VERBOSE_FILTER: &str = "warn,url_sentinel=debug";

pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
