use crate::any_value::AnyValue;
use crate::id::{AnnotationId, AnnotationKey};
use crate::owner::AnnotationOwner;
use crate::symbol::{CliSymbol, SymbolId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type EntryKey = (SymbolId, AnnotationKey);

/// A thread-safe store of annotation values keyed by symbol and slot
///
/// Cloning an `AnnotationStore` is cheap and yields a handle to the same
/// entries, so a store can be shared between a subsystem and the accessors it
/// hands out.
///
/// # Examples
///
/// ```
/// use symbol_annotations::{AnnotationId, AnnotationOwner, AnnotationStore, CliOption};
///
/// let store = AnnotationStore::new();
/// let hidden = AnnotationId::<bool>::new("hidden");
/// let debug = CliOption::<bool>::new("--debug");
///
/// store.set_annotation(&debug, &hidden, true);
/// assert_eq!(store.try_get_annotation(&debug, &hidden), Some(true));
/// ```
#[derive(Clone, Default)]
pub struct AnnotationStore {
    entries: Arc<RwLock<HashMap<EntryKey, AnyValue>>>,
}

impl AnnotationStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` entries before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::with_capacity(capacity))),
        }
    }

    /// Returns true if a value is recorded for `(symbol, id)`
    pub fn contains<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> bool {
        self.entries.read().contains_key(&(symbol.id(), id.key()))
    }

    /// Returns the number of recorded entries across all symbols and slots
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no values are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if both handles refer to the same entries
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl AnnotationOwner for AnnotationStore {
    fn set_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>, value: V)
    where
        V: Send + Sync + 'static,
    {
        let replaced = self
            .entries
            .write()
            .insert((symbol.id(), id.key()), AnyValue::new(value))
            .is_some();

        tracing::trace!(
            symbol = symbol.name(),
            annotation = %id,
            replaced,
            "annotation set"
        );
    }

    fn try_get_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        let entries = self.entries.read();
        entries.get(&(symbol.id(), id.key()))?.cloned::<V>()
    }
}

impl PartialEq for AnnotationStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for AnnotationStore {}

impl fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("entries", &self.len())
            .finish()
    }
}
