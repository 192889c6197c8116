use chrono::Utc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "customer_feedback=info";

/// RFC 3339 UTC timestamps.
struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

/// JSON logs on a non-blocking stdout writer. Keep the guard alive until shutdown
/// or buffered lines are lost.
pub fn init_tracing() -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    // RUST_LOG=customer_feedback=debug,tower_http=debug
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .json()
        .with_timer(UtcTimer)
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .init();

    guard
}
