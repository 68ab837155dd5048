//! Subscriber setup for binaries that want to see extras' events
//!
//! File reads and writes log at debug, decode fallbacks at warn.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact stderr subscriber for tools built on extras.
///
/// The level comes from `RUST_LOG`, defaulting to "info". Fails if a global
/// subscriber is already set.
///
/// ```no_run
/// use extras_fs::{Files, logging};
///
/// logging::init().ok();
/// let files = Files::new()?;
/// let config = files.read_document("~/.toolrc.yml")?;
/// # Ok::<(), extras_fs::Error>(())
/// ```
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_without_panicking() {
        let _ = init();
        assert!(init().is_err());

        tracing::warn!("logged after init");
    }
}
