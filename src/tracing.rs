//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Set to `json` for one JSON object per log line.
pub const LOG_FORMAT_ENV: &str = "ROBESON_DIRECTORY_LOG_FORMAT";

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times.
///
/// Logs always go to stderr: stdout is reserved for the MCP transport.
/// Under a test runner the level defaults to debug and output is captured
/// per test.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let filter = EnvFilter::from_default_env().add_directive(level.into());
        let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true);

        let result = match (json, is_test) {
            (true, true) => builder.json().with_test_writer().try_init(),
            (true, false) => builder.json().with_writer(std::io::stderr).try_init(),
            (false, true) => builder.compact().with_test_writer().try_init(),
            (false, false) => builder.compact().with_writer(std::io::stderr).try_init(),
        };
        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
