//! Command name to route mapping.
//!
//! Names are case-folded to lower case on the way in and on lookup, so
//! `"Ping"` and `"PING"` address the same entry. The map sits behind a
//! readers-shared, writer-exclusive lock: routes may be bound while events
//! are already being dispatched from other connections.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::route::Route;

/// Canonical form of a command name.
#[inline]
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// Registry of bound routes.
#[derive(Default)]
pub struct Registry {
    routes: RwLock<HashMap<String, Arc<Route>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route` under `name`, returning the route it replaced.
    pub(crate) fn insert(&self, name: &str, route: Route) -> Option<Arc<Route>> {
        self.routes.write().insert(normalize(name), Arc::new(route))
    }

    pub(crate) fn remove(&self, name: &str) -> Option<Arc<Route>> {
        self.routes.write().remove(&normalize(name))
    }

    /// Route bound under `name`, if any. Absence is not an error.
    pub fn lookup(&self, name: &str) -> Option<Arc<Route>> {
        self.routes.read().get(&normalize(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.read().contains_key(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Bound command names (normalized), sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.routes.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Invocation counts for every command used at least once, busiest first.
    pub fn command_stats(&self) -> Vec<(String, u64)> {
        let mut stats: Vec<_> = self
            .routes
            .read()
            .iter()
            .map(|(name, route)| (name.clone(), route.invocations()))
            .filter(|(_, count)| *count > 0)
            .collect();

        // Ties broken by name so the listing is stable
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{CommandRoute, RunnerFn};

    fn route() -> Route {
        let cmd = CommandRoute::new(Arc::new(RunnerFn::new(|_, _| Ok(()))));
        Route::validate("test", cmd).unwrap()
    }

    #[test]
    fn names_are_stored_lower_case() {
        let registry = Registry::new();
        registry.insert("TEst", route());

        assert!(registry.contains("test"));
        assert!(registry.lookup("TEST").is_some());
        assert_eq!(registry.names(), ["test"]);
    }

    #[test]
    fn insert_replaces() {
        let registry = Registry::new();
        assert!(registry.insert("a", route()).is_none());
        assert!(registry.insert("A", route()).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_and_miss() {
        let registry = Registry::new();
        registry.insert("a", route());

        assert!(registry.remove("A").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.lookup("a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn stats_skip_unused_and_sort_by_count() {
        let registry = Registry::new();
        for name in ["alpha", "beta", "gamma", "idle"] {
            registry.insert(name, route());
        }
        let bump = |name: &str, times: usize| {
            let route = registry.lookup(name).unwrap();
            for _ in 0..times {
                route.record_invocation();
            }
        };
        bump("alpha", 1);
        bump("beta", 3);
        bump("gamma", 1);

        assert_eq!(
            registry.command_stats(),
            [
                ("beta".to_string(), 3),
                ("alpha".to_string(), 1),
                ("gamma".to_string(), 1),
            ]
        );
    }
}
