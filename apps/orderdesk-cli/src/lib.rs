//! # Orderdesk CLI Library
//!
//! Demo driver for `orderdesk-core`. `main.rs` only calls [`run`]; the
//! setup lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! orderdesk_cli/
//! ├── lib.rs      ◄─── You are here (logging setup & run)
//! ├── config.rs   ◄─── AppConfig: defaults, orderdesk.toml, ORDERDESK_* env
//! ├── demo.rs     ◄─── The three demo scenarios
//! └── error.rs    ◄─── AppError
//! ```

pub mod config;
pub mod demo;
pub mod error;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, ReportFormat};
pub use error::{AppError, AppResult};

/// Runs the demo.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          CLI Startup                                    │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,orderdesk=debug, overridden with RUST_LOG           │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → orderdesk.toml → ORDERDESK_* environment               │
/// │     • rejected here if any rate is out of range                         │
/// │                                                                         │
/// │  3. Run Scenarios ────────────────────────────────────────────────────► │
/// │     • confirmations and report printed to stdout                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Orderdesk demo");

    let config = AppConfig::load()?;
    info!(
        tax_rate = %config.pricing.tax_rate,
        max_discount = %config.pricing.max_discount,
        report_format = %config.report_format,
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run(&config, &mut out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderdesk=trace` - Show trace for orderdesk crates only
/// - Default: INFO, DEBUG for orderdesk crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderdesk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
