use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// The untyped identity of an annotation slot, as used for storage keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationKey(u64);

impl AnnotationKey {
    fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric key
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identifies one annotation slot whose values have type `V`.
///
/// Identity is per instance: two ids created for the same `V` never compare
/// equal. Copies of an id share its identity.
///
/// # Examples
///
/// ```
/// use symbol_annotations::AnnotationId;
///
/// let description = AnnotationId::<String>::new("description");
/// let summary = AnnotationId::<String>::new("summary");
///
/// assert_ne!(description, summary);
/// assert_eq!(description, description.clone());
/// assert_eq!(description.name(), "description");
/// ```
pub struct AnnotationId<V> {
    key: AnnotationKey,
    name: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> AnnotationId<V> {
    /// Creates a fresh, process-unique annotation id
    pub fn new(name: &'static str) -> Self {
        Self {
            key: AnnotationKey::next(),
            name,
            _value: PhantomData,
        }
    }

    /// Returns the untyped key used to store values for this slot
    pub fn key(&self) -> AnnotationKey {
        self.key
    }

    /// Returns the diagnostic name given when the slot was defined
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<V> Clone for AnnotationId<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for AnnotationId<V> {}

impl<V> PartialEq for AnnotationId<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<V> Eq for AnnotationId<V> {}

impl<V> Hash for AnnotationId<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<V> fmt::Debug for AnnotationId<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationId")
            .field("name", &self.name)
            .field("key", &self.key.0)
            .field("value", &std::any::type_name::<V>())
            .finish()
    }
}

impl<V> fmt::Display for AnnotationId<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.key.0)
    }
}
