//! Tracing setup for binaries and tests embedding the SDK

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to the MORPHO
/// crates (e.g. `"info"` or `"debug"`). Fails if a global subscriber is
/// already installed.
pub fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let fallback = format!(
        "morpho_sdk={level},morpho_runtime={level},morpho_core={level}",
        level = default_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_only_once() {
        assert!(init_tracing("debug").is_ok());
        tracing::debug!("subscriber installed");

        let err = init_tracing("info").unwrap_err();
        assert!(err.to_string().contains("Failed to initialize tracing"));
    }
}
