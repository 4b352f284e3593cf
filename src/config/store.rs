//! Reader-writer guarded configuration.
//!
//! Every field lives behind one `RwLock`: emissions take the read side and
//! may run concurrently, setters take the write side. Getters hand out
//! values, never references into the lock, and the sink list is shared as
//! an immutable `Arc` snapshot so a caller holding it cannot observe a
//! later `set_sinks` half-applied.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::format::FormatMask;
use crate::level::Level;
use crate::sink::{Sink, SinkList};

/// A complete configuration value.
#[derive(Debug, Clone)]
pub struct Config {
    /// Calls below this severity are suppressed.
    pub threshold: Level,
    /// Fields included in each rendered line.
    pub format: FormatMask,
    /// Destinations in write order. `None` means "use the default sink".
    pub sinks: Option<SinkList>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: Level::ERROR,
            format: FormatMask::ALL,
            sinks: None,
        }
    }
}

/// What an admitted emission needs after the lock is released.
#[derive(Debug, Clone)]
pub struct Route {
    /// Format mask at the time of the check.
    pub format: FormatMask,
    /// Sink list at the time of the check; `None` selects stderr.
    pub sinks: Option<SinkList>,
}

/// Concurrency-safe configuration store.
#[derive(Debug, Default)]
pub struct ConfigStore {
    inner: RwLock<Config>,
}

impl ConfigStore {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Returns the current threshold.
    #[must_use]
    pub fn threshold(&self) -> Level {
        self.read().threshold
    }

    /// Replaces the threshold. Any value is accepted.
    pub fn set_threshold(&self, threshold: Level) {
        self.write().threshold = threshold;
    }

    /// Returns the current format mask.
    #[must_use]
    pub fn format(&self) -> FormatMask {
        self.read().format
    }

    /// Replaces the format mask. Unknown bits are kept.
    pub fn set_format(&self, format: FormatMask) {
        self.write().format = format;
    }

    /// Returns a snapshot of the sink list, or `None` when unset.
    #[must_use]
    pub fn sinks(&self) -> Option<SinkList> {
        self.read().sinks.clone()
    }

    /// Replaces the sink list. An empty list is a valid configuration that
    /// writes nowhere; use [`clear_sinks`](Self::clear_sinks) to fall back
    /// to the default sink.
    pub fn set_sinks<I>(&self, sinks: I)
    where
        I: IntoIterator<Item = Arc<Sink>>,
    {
        let list: SinkList = sinks.into_iter().collect();
        self.write().sinks = Some(list);
    }

    /// Unsets the sink list.
    pub fn clear_sinks(&self) {
        self.write().sinks = None;
    }

    /// Returns a copy of the whole configuration, read atomically.
    #[must_use]
    pub fn snapshot(&self) -> Config {
        self.read().clone()
    }

    /// Replaces the whole configuration atomically.
    pub fn replace(&self, config: Config) {
        *self.write() = config;
    }

    /// Checks `level` against the threshold and, if it passes, captures the
    /// format mask and sink list under the same read lock.
    ///
    /// Returns `None` for suppressed levels without cloning anything.
    #[must_use]
    pub fn route(&self, level: Level) -> Option<Route> {
        let config = self.read();
        if level < config.threshold {
            return None;
        }
        Some(Route {
            format: config.format,
            sinks: config.sinks.clone(),
        })
    }

    // A poisoned lock still holds a whole `Config`: every write is a single
    // field store or whole-value replacement.
    fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Config> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let store = ConfigStore::default();
        assert_eq!(store.threshold(), Level::ERROR);
        assert_eq!(store.format(), FormatMask::ALL);
        assert!(store.sinks().is_none());
    }

    #[test]
    fn set_then_get_returns_the_new_value() {
        let store = ConfigStore::default();
        store.set_threshold(Level::DEBUG);
        store.set_format(FormatMask::TAG | FormatMask::MESSAGE);
        assert_eq!(store.threshold(), Level::DEBUG);
        assert_eq!(store.threshold(), Level::DEBUG);
        assert_eq!(store.format(), FormatMask::TAG | FormatMask::MESSAGE);
    }

    #[test]
    fn out_of_range_values_are_stored_verbatim() {
        let store = ConfigStore::default();
        store.set_threshold(Level::from_raw(1234));
        store.set_format(FormatMask::from_bits_retain(0xff00));
        assert_eq!(store.threshold().raw(), 1234);
        assert_eq!(store.format().bits(), 0xff00);
    }

    #[test]
    fn sink_snapshot_survives_replacement() {
        let store = ConfigStore::default();
        let a = Arc::new(Sink::noop());
        let b = Arc::new(Sink::noop());
        store.set_sinks([Arc::clone(&a), Arc::clone(&b)]);

        let snapshot = store.sinks().unwrap();
        store.set_sinks([Arc::new(Sink::noop())]);

        assert_eq!(snapshot.len(), 2);
        assert!(Arc::ptr_eq(&snapshot[0], &a));
        assert!(Arc::ptr_eq(&snapshot[1], &b));
        assert_eq!(store.sinks().unwrap().len(), 1);
    }

    #[test]
    fn empty_list_differs_from_unset() {
        let store = ConfigStore::default();
        store.set_sinks(Vec::new());
        assert_eq!(store.sinks().map(|s| s.len()), Some(0));
        store.clear_sinks();
        assert!(store.sinks().is_none());
    }

    #[test]
    fn route_gates_on_threshold() {
        let store = ConfigStore::default();
        store.set_threshold(Level::INFO);
        assert!(store.route(Level::DEBUG).is_none());
        assert!(store.route(Level::INFO).is_some());
        assert!(store.route(Level::FATAL).is_some());
    }

    #[test]
    fn replace_and_snapshot() {
        let store = ConfigStore::default();
        store.replace(Config {
            threshold: Level::ALL,
            format: FormatMask::NONE,
            sinks: Some(Arc::from(vec![Arc::new(Sink::noop())])),
        });
        let snap = store.snapshot();
        assert_eq!(snap.threshold, Level::ALL);
        assert_eq!(snap.format, FormatMask::NONE);
        assert_eq!(snap.sinks.unwrap().len(), 1);
    }
}
