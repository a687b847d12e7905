//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

// Target prefixes: `markundo` covers the `markundo` binary and every
// `markundo_*` library crate.
const DEV_FILTER: &str = "markundo=debug";
const PROD_FILTER: &str = "markundo=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Development),
            "prod" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown logging profile '{}'", other)),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup. `RUST_LOG` takes precedence over the
/// profile's default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs on stderr with debug level
/// - **Production**: JSON structured logs on stderr with info level
/// - **Test**: Bare registry; tests attach the capture layer instead
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEV_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(PROD_FILTER)),
                )
                .init();
        }
        Profile::Test => {
            // a capture layer may already own the global slot
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
