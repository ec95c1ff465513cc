//! Logger initialisation for binaries and tests.
//!
//! The default filter only raises this crate's own level. Dependencies stay
//! at `warn` so per-tick steering decisions are not buried.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset.
///
/// # Examples
///
/// ```
/// use cashrun::logging::default_filter;
/// assert_eq!(default_filter(true), "warn,cashrun=debug");
/// assert_eq!(default_filter(false), "warn,cashrun=info");
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!(
        "warn,{}={}",
        env!("CARGO_CRATE_NAME"),
        level.as_str().to_ascii_lowercase()
    )
}

/// Installs the global logger once.
///
/// `verbose` selects debug output for this crate. `RUST_LOG` replaces the
/// default filter entirely. Later calls are ignored, so every test may call
/// this.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    if Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_the_level_to_this_crate() {
        assert_eq!(default_filter(false), "warn,cashrun=info");
        assert_eq!(default_filter(true), "warn,cashrun=debug");
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
        log::info!("logger still usable");
    }
}
