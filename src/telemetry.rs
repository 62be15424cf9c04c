// src/telemetry.rs
//! Tracing setup and log-safety helpers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "ANALYZER_DEV_LOG";

const DEFAULT_FILTER: &str = "analyzer=info,warn";

// Dev gate: ANALYZER_DEV_LOG=1 AND dev env (debug build or SHUTTLE_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Install the global subscriber: compact output in development, JSON otherwise.
///
/// A subscriber installed earlier (e.g. by the Shuttle runtime) is left in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let res = if dev_logging_enabled() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!(target: "analyzer", "tracing subscriber already installed");
    }
}

/// Short stable id for a text: first 6 bytes of its SHA-256, hex encoded.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;

    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
