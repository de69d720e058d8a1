//! Structured logging facility for GridQ
//!
//! One-shot wiring of the tracing subscriber. Reconciliation code emits
//! `tracing` events marked with the event names from
//! `gridq_core_types::telemetry`; this module only selects the sink and
//! the filter.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Filter directives used when `RUST_LOG` is unset
const DEV_DIRECTIVES: &str = "gridq_core=debug,gridq_core_types=debug";
const PROD_DIRECTIVES: &str = "gridq_core=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// No-op subscriber for tests
    Test,
}

static INIT_ONCE: Once = Once::new();

/// `RUST_LOG` when set, the profile's default directives otherwise
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Initialize the logging facility
///
/// Call once at application startup; later calls are no-ops.
///
/// # Example
///
/// ```
/// use gridq_core::logging::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(DEV_DIRECTIVES))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_target(false)
                .with_env_filter(env_filter(PROD_DIRECTIVES))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
