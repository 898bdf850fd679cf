use crate::accessor::{AnnotationAccessor, ValueFn, ValueFuncAnnotationAccessor};
use crate::id::AnnotationId;
use crate::owner::AnnotationOwner;
use crate::store::AnnotationStore;
use crate::symbol::CliSymbol;
use std::sync::Arc;

/// A named extension component that owns annotations on symbols.
///
/// A subsystem mints one accessor per annotation slot it wants to expose and
/// hands those accessors to callers. Cloning a subsystem yields another handle
/// to the same annotations.
///
/// # Examples
///
/// ```
/// use symbol_annotations::{CliOption, Subsystem};
///
/// let help = Subsystem::new("help");
/// let verbose = CliOption::<bool>::new("--verbose");
/// let count = CliOption::<u32>::new("--count");
///
/// let hidden = help.accessor::<bool>("hidden");
/// hidden.set(&verbose, false);
///
/// let default_value = help.value_func_accessor::<u32>("default_value");
/// default_value.set(&count, || 1);
///
/// assert_eq!(hidden.try_get(&verbose), Some(false));
/// assert_eq!(default_value.try_get_value(&count), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subsystem {
    name: Arc<str>,
    store: AnnotationStore,
}

impl Subsystem {
    /// Creates a new subsystem with its own, empty store
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_store(name, AnnotationStore::new())
    }

    /// Creates a subsystem that keeps its annotations in `store`
    pub fn with_store(name: impl Into<Arc<str>>, store: AnnotationStore) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// Returns the subsystem's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the store holding this subsystem's annotations
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Defines a new annotation slot holding values of type `V`
    pub fn annotation_id<V>(&self, name: &'static str) -> AnnotationId<V> {
        let id = AnnotationId::new(name);
        tracing::debug!(
            subsystem = %self.name,
            annotation = %id,
            value = std::any::type_name::<V>(),
            "defined annotation"
        );
        id
    }

    /// Defines a new slot and returns an accessor for it bound to this subsystem
    pub fn accessor<V>(&self, name: &'static str) -> AnnotationAccessor<Subsystem, V>
    where
        V: Clone + Send + Sync + 'static,
    {
        AnnotationAccessor::new(self.clone(), self.annotation_id(name))
    }

    /// Defines a new slot for lazily computed values and returns its accessor
    pub fn value_func_accessor<V>(
        &self,
        name: &'static str,
    ) -> ValueFuncAnnotationAccessor<Subsystem, V>
    where
        V: 'static,
    {
        ValueFuncAnnotationAccessor::new(self.clone(), self.annotation_id::<ValueFn<V>>(name))
    }
}

impl AnnotationOwner for Subsystem {
    fn set_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>, value: V)
    where
        V: Send + Sync + 'static,
    {
        let _span = tracing::trace_span!("annotations", subsystem = %self.name).entered();
        self.store.set_annotation(symbol, id, value);
    }

    fn try_get_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        self.store.try_get_annotation(symbol, id)
    }
}
