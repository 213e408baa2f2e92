mod display_btree_set;
mod dyn_err;
mod err_with_sources;

pub use display_btree_set::DisplayBTreeSet;
pub use dyn_err::{anyhow_dyn_err, std_dyn_err};
pub use err_with_sources::{ErrorWithSources, err_with_src};

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{Subscriber, subscriber::DefaultGuard};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::ParseError, fmt, layer::SubscriberExt as _, reload,
    util::SubscriberInitExt as _,
};

/// Registers a global subscriber that logs to stdout, honouring `RUST_LOG`-style directives.
///
/// Returns a [`FilterReloadHandle`] so a control endpoint can change the active filter at runtime
/// without restarting the process.
pub fn setup_global_subscriber(directives: &str) -> Result<FilterReloadHandle> {
    let (filter, reload_handle) =
        try_filter(directives).context("Failed to parse directives")?;

    let subscriber = Registry::default().with(fmt::layer().with_filter(filter));

    init(subscriber)?;

    Ok(reload_handle)
}

#[expect(
    clippy::disallowed_methods,
    reason = "This is the alternative function."
)]
pub fn init(subscriber: impl Subscriber + Send + Sync + 'static) -> Result<()> {
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default")?;

    Ok(())
}

/// Constructs a reloadable [`EnvFilter`] from the given directives, defaulting to `info`.
pub fn try_filter<S>(
    directives: &str,
) -> Result<(reload::Layer<EnvFilter, S>, FilterReloadHandle), ParseError>
where
    S: 'static,
{
    let env_filter = parse_filter(directives)?;

    let (layer, reload_handle) = reload::Layer::new(env_filter);
    let handle = FilterReloadHandle {
        inner: Arc::new(reload_handle),
    };

    Ok((layer, handle))
}

fn parse_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    if directives.is_empty() {
        EnvFilter::try_new("info")
    } else {
        EnvFilter::try_new(directives)
    }
}

#[derive(Clone)]
pub struct FilterReloadHandle {
    inner: Arc<dyn Reload + Send + Sync>,
}

impl std::fmt::Debug for FilterReloadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FilterReloadHandle").finish_non_exhaustive()
    }
}

impl FilterReloadHandle {
    pub fn reload(&self, new_filter: &str) -> Result<()> {
        self.inner.reload(new_filter)?;

        Ok(())
    }
}

trait Reload {
    fn reload(&self, new_filter: &str) -> Result<()>;
}

impl<S> Reload for tracing_subscriber::reload::Handle<EnvFilter, S>
where
    S: 'static,
{
    fn reload(&self, new_filter: &str) -> Result<()> {
        let filter = parse_filter(new_filter).context("Failed to parse new filter")?;

        self.reload(filter).context("Failed to reload filter")?;

        Ok(())
    }
}

/// Initialises a logger to be used in tests.
pub fn test(directives: &str) -> DefaultGuard {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(directives)
        .set_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_directives() {
        let result = parse_filter("not a valid directive!!");

        assert!(result.is_err());
    }

    #[test]
    fn empty_directives_default_to_info() {
        let result = parse_filter("");

        assert!(result.is_ok());
    }
}
