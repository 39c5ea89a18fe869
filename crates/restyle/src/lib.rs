//! restyle driver.
//!
//! Everything the `restyle` binary does lives here so integration tests and
//! benchmarks can call it directly:
//!
//! - [`rules`]: the bundled rule set and its id side table.
//! - [`rewrite`]: a reference host that applies rule outcomes to CSS text.
//! - [`commands`]: one handler per CLI command.

use std::sync::Once;

pub mod commands;
pub mod rewrite;
pub mod rules;

/// Environment variable checked first for a tracing filter.
pub const LOG_ENV: &str = "RESTYLE_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads the filter from `RESTYLE_LOG`, falling back to `RUST_LOG`. Does
/// nothing when neither is set, so an untraced run pays only for the
/// disabled-callsite checks. Safe to call more than once.
///
/// ```text
/// RESTYLE_LOG=restyle_scan=trace restyle scan style.css
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Some(directives) = std::env::var(LOG_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };

        tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .init();
    });
}
