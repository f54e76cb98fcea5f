//! Subscriber installation

use std::sync::OnceLock;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile for the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, `telic_core=debug`
    Development,
    /// One JSON object per event, `telic_core=info`
    Production,
    /// Bare registry; pair with `init_test_capture()` for assertions
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is unset or unparsable
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "telic_core=debug",
            Profile::Production => "telic_core=info",
            Profile::Test => "off",
        }
    }

    fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call does anything. Returns `true` if that first call
/// installed a subscriber, `false` if another global subscriber was already
/// in place (for example one set up by the embedding application).
///
/// # Example
///
/// ```
/// use telic_core::logging_facility::{init, Profile};
///
/// let first = init(Profile::Development);
/// assert_eq!(init(Profile::Production), first);
/// ```
pub fn init(profile: Profile) -> bool {
    *INSTALLED.get_or_init(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.env_filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if installed {
            tracing::debug!(?profile, "logging initialized");
        }
        installed
    })
}
