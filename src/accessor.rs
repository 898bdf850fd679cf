use crate::error::{AnnotationError, Result};
use crate::id::AnnotationId;
use crate::owner::AnnotationOwner;
use crate::symbol::{AssignableTo, CliSymbol, ValueSymbol, ValueType};
use std::fmt;
use std::sync::Arc;

/// A lazily evaluated annotation value.
pub type ValueFn<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Checks a caller-asserted value type `S` against a symbol that has a value
/// stored in a slot of type `V`.
///
/// `S` is accepted when it is the symbol's declared value type or the slot's
/// value type itself.
fn check_asserted_type<S: 'static, V: 'static>(symbol: &CliSymbol) -> Result<()> {
    let declared = symbol.value_type();
    if declared.is::<S>() || ValueType::of::<V>().is::<S>() {
        return Ok(());
    }

    tracing::debug!(
        symbol = symbol.name(),
        asserted = std::any::type_name::<S>(),
        actual = declared.name(),
        "rejected annotation lookup with mismatched value type"
    );
    Err(AnnotationError::TypeMismatch {
        symbol: symbol.name().to_string(),
        asserted: std::any::type_name::<S>(),
        actual: declared.name(),
    })
}

/// Reads and writes one annotation slot of type `V` on options and arguments.
///
/// The accessor is bound to the owner that stores the values and to the id of
/// the slot. A value can only be attached to a symbol whose own value type is
/// assignable to `V`; anything else fails to compile.
///
/// # Examples
///
/// ```
/// use symbol_annotations::{
///     AnnotationAccessor, AnnotationId, AnnotationStore, CliArgument, CliOption,
/// };
///
/// let store = AnnotationStore::new();
/// let description = AnnotationAccessor::new(&store, AnnotationId::<String>::new("description"));
///
/// let name = CliOption::<String>::new("--name");
/// description.set(&name, "Who to greet".to_string());
///
/// assert_eq!(description.try_get(&name).as_deref(), Some("Who to greet"));
/// assert_eq!(description.try_get(&CliArgument::<String>::new("rest")), None);
/// ```
///
/// A symbol with an incompatible value type is rejected at compile time:
///
/// ```compile_fail
/// use symbol_annotations::{AnnotationAccessor, AnnotationId, AnnotationStore, CliOption};
///
/// let store = AnnotationStore::new();
/// let description = AnnotationAccessor::new(&store, AnnotationId::<String>::new("description"));
///
/// description.set(&CliOption::<u16>::new("--port"), "Port".to_string());
/// ```
pub struct AnnotationAccessor<O, V> {
    owner: O,
    id: AnnotationId<V>,
}

impl<O, V> AnnotationAccessor<O, V>
where
    O: AnnotationOwner,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an accessor for slot `id` whose values are kept by `owner`
    pub fn new(owner: O, id: AnnotationId<V>) -> Self {
        Self { owner, id }
    }

    /// Returns the id of the slot this accessor reads and writes
    pub fn id(&self) -> &AnnotationId<V> {
        &self.id
    }

    /// Returns the owner that stores the values
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Attaches `value` to `symbol`, replacing any earlier value for this slot
    pub fn set<S>(&self, symbol: &S, value: V)
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
    {
        self.owner.set_annotation(symbol.symbol(), &self.id, value);
    }

    /// Returns the value attached to `symbol`, or `None` if nothing was set
    pub fn try_get<S>(&self, symbol: &S) -> Option<V>
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
    {
        self.owner.try_get_annotation(symbol.symbol(), &self.id)
    }

    /// Returns the value attached to an untyped `symbol`, asserting that the
    /// stored value is usable as an `S`.
    ///
    /// Absence is `Ok(None)` whatever `S` is.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::TypeMismatch` if a value is stored and `S` is
    /// neither the symbol's declared value type nor `V`.
    pub fn try_get_as<S>(&self, symbol: &CliSymbol) -> Result<Option<V>>
    where
        S: AssignableTo<V> + 'static,
    {
        let Some(value) = self.owner.try_get_annotation(symbol, &self.id) else {
            return Ok(None);
        };
        check_asserted_type::<S, V>(symbol)?;
        Ok(Some(value))
    }
}

impl<O: Clone, V> Clone for AnnotationAccessor<O, V> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            id: self.id,
        }
    }
}

impl<O: PartialEq, V> PartialEq for AnnotationAccessor<O, V> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.id == other.id
    }
}

impl<O: fmt::Debug, V> fmt::Debug for AnnotationAccessor<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationAccessor")
            .field("owner", &self.owner)
            .field("id", &self.id)
            .finish()
    }
}

/// Attaches lazily computed values of type `V` to options and arguments.
///
/// The slot stores a factory rather than a value, so an expensive or
/// context-dependent value is only produced when a reader calls it. Setting a
/// factory never invokes it.
///
/// # Examples
///
/// ```
/// use symbol_annotations::{AnnotationId, AnnotationStore, CliOption, ValueFuncAnnotationAccessor};
///
/// let store = AnnotationStore::new();
/// let default_value =
///     ValueFuncAnnotationAccessor::<_, u16>::new(&store, AnnotationId::new("default_value"));
///
/// let port = CliOption::<u16>::new("--port");
/// default_value.set(&port, || 8080);
///
/// let factory = default_value.try_get(&port).expect("default was set");
/// assert_eq!(factory(), 8080);
/// assert_eq!(default_value.try_get_value(&port), Some(8080));
/// ```
pub struct ValueFuncAnnotationAccessor<O, V> {
    owner: O,
    id: AnnotationId<ValueFn<V>>,
}

impl<O, V> ValueFuncAnnotationAccessor<O, V>
where
    O: AnnotationOwner,
    V: 'static,
{
    /// Creates an accessor for slot `id` whose factories are kept by `owner`
    pub fn new(owner: O, id: AnnotationId<ValueFn<V>>) -> Self {
        Self { owner, id }
    }

    /// Returns the id of the slot this accessor reads and writes
    pub fn id(&self) -> &AnnotationId<ValueFn<V>> {
        &self.id
    }

    /// Returns the owner that stores the factories
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Attaches `factory` to `symbol` without calling it
    pub fn set<S, F>(&self, symbol: &S, factory: F)
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.set_fn(symbol, Arc::new(factory));
    }

    /// Attaches an already shared factory to `symbol`
    pub fn set_fn<S>(&self, symbol: &S, factory: ValueFn<V>)
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
    {
        self.owner.set_annotation(symbol.symbol(), &self.id, factory);
    }

    /// Returns the factory attached to `symbol`, or `None` if nothing was set
    pub fn try_get<S>(&self, symbol: &S) -> Option<ValueFn<V>>
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
    {
        self.owner.try_get_annotation(symbol.symbol(), &self.id)
    }

    /// Calls the factory attached to `symbol` once and returns what it produced
    pub fn try_get_value<S>(&self, symbol: &S) -> Option<V>
    where
        S: ValueSymbol,
        S::Value: AssignableTo<V>,
    {
        self.try_get(symbol).map(|factory| factory())
    }

    /// Returns the factory attached to an untyped `symbol`, asserting that
    /// what it produces is usable as an `S`.
    ///
    /// Absence is `Ok(None)` whatever `S` is.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::TypeMismatch` if a factory is stored and `S`
    /// is neither the symbol's declared value type nor `V`.
    pub fn try_get_as<S>(&self, symbol: &CliSymbol) -> Result<Option<ValueFn<V>>>
    where
        S: AssignableTo<V> + 'static,
    {
        let Some(factory) = self.owner.try_get_annotation(symbol, &self.id) else {
            return Ok(None);
        };
        check_asserted_type::<S, V>(symbol)?;
        Ok(Some(factory))
    }
}

impl<O: Clone, V> Clone for ValueFuncAnnotationAccessor<O, V> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            id: self.id,
        }
    }
}

impl<O: PartialEq, V> PartialEq for ValueFuncAnnotationAccessor<O, V> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.id == other.id
    }
}

impl<O: fmt::Debug, V> fmt::Debug for ValueFuncAnnotationAccessor<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFuncAnnotationAccessor")
            .field("owner", &self.owner)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnnotationStore;
    use crate::symbol::{CliArgument, CliOption};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_round_trip_on_options_and_arguments() {
        let store = AnnotationStore::new();
        let label = AnnotationAccessor::new(&store, AnnotationId::<String>::new("label"));

        let option = CliOption::<String>::new("--name");
        let argument = CliArgument::<String>::new("name");

        label.set(&option, "option".to_string());
        label.set(&argument, "argument".to_string());

        assert_eq!(label.try_get(&option).as_deref(), Some("option"));
        assert_eq!(label.try_get(&argument).as_deref(), Some("argument"));
    }

    struct Meters;
    struct Feet;

    impl AssignableTo<f64> for Meters {}
    impl AssignableTo<f64> for Feet {}

    #[test]
    fn test_try_get_as_accepts_declared_and_slot_type() -> Result<()> {
        let store = AnnotationStore::new();
        let length = AnnotationAccessor::new(&store, AnnotationId::<f64>::new("length"));
        let option = CliOption::<Meters>::new("--length");
        length.set(&option, 1.5);

        let untyped: &CliSymbol = &option;
        assert_eq!(length.try_get_as::<Meters>(untyped)?, Some(1.5));
        assert_eq!(length.try_get_as::<f64>(untyped)?, Some(1.5));
        Ok(())
    }

    #[test]
    fn test_try_get_as_rejects_incompatible_type() {
        let store = AnnotationStore::new();
        let length = AnnotationAccessor::new(&store, AnnotationId::<f64>::new("length"));
        let option = CliOption::<Meters>::new("--length");
        length.set(&option, 1.5);

        match length.try_get_as::<Feet>(&option) {
            Err(AnnotationError::TypeMismatch {
                symbol,
                asserted,
                actual,
            }) => {
                assert_eq!(symbol, "--length");
                assert_eq!(asserted, std::any::type_name::<Feet>());
                assert_eq!(actual, std::any::type_name::<Meters>());
            }
            other => panic!("expected a type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_try_get_as_absent_is_not_an_error() -> Result<()> {
        let store = AnnotationStore::new();
        let hidden = AnnotationAccessor::new(&store, AnnotationId::<bool>::new("hidden"));
        let depth = CliOption::<u8>::new("--depth");
        let length = CliOption::<Meters>::new("--length");
        let default_value =
            ValueFuncAnnotationAccessor::<_, f64>::new(&store, AnnotationId::new("default"));

        assert_eq!(hidden.try_get_as::<bool>(&depth)?, None);
        assert!(default_value.try_get_as::<Feet>(&length)?.is_none());
        Ok(())
    }

    #[test]
    fn test_factory_is_not_called_on_set() {
        let store = AnnotationStore::new();
        let default_value =
            ValueFuncAnnotationAccessor::<_, u32>::new(&store, AnnotationId::new("default"));
        let calls = Arc::new(AtomicUsize::new(0));
        let option = CliOption::<u32>::new("--retries");

        let counter = Arc::clone(&calls);
        default_value.set(&option, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            3
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let factory = default_value.try_get(&option).expect("factory was set");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(factory(), 3);
        assert_eq!(factory(), 3);
        assert_eq!(default_value.try_get_value(&option), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_accessor_equality_is_owner_and_id() {
        let store = AnnotationStore::new();
        let id = AnnotationId::<bool>::new("hidden");

        let first = AnnotationAccessor::new(store.clone(), id);
        let second = AnnotationAccessor::new(store.clone(), id);
        let other_id = AnnotationAccessor::new(store, AnnotationId::<bool>::new("hidden"));
        let other_owner = AnnotationAccessor::new(AnnotationStore::new(), id);

        assert_eq!(first, second);
        assert_eq!(first, first.clone());
        assert_ne!(first, other_id);
        assert_ne!(first, other_owner);
    }
}
