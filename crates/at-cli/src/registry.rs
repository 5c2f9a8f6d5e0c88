//! Static registry of the process plugins this binary can run.

use at_core::{AutoTune, ProcessPlugin};

type Factory = fn() -> Box<dyn ProcessPlugin>;

fn autotune() -> Box<dyn ProcessPlugin> {
    Box::new(AutoTune::new())
}

static PLUGINS: &[(&str, Factory)] = &[("autotune", autotune)];

/// Names of all registered plugins, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PLUGINS.iter().map(|(name, _)| *name)
}

/// Creates a fresh instance of the plugin registered as `name`.
pub fn create(name: &str) -> Option<Box<dyn ProcessPlugin>> {
    PLUGINS
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, factory)| factory())
}
