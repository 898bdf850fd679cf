use crate::id::AnnotationId;
use crate::symbol::CliSymbol;
use std::sync::Arc;

/// Something that physically holds annotation values for symbols.
///
/// Accessors delegate to these two primitives after checking the symbol's
/// value type against the slot's value type. Implementations decide how the
/// entries are stored and how concurrent writers are ordered.
pub trait AnnotationOwner {
    /// Records `value` for `(symbol, id)`, replacing any previous value
    fn set_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>, value: V)
    where
        V: Send + Sync + 'static;

    /// Returns a copy of the value recorded for `(symbol, id)`, if any
    fn try_get_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> Option<V>
    where
        V: Clone + Send + Sync + 'static;
}

impl<O: AnnotationOwner> AnnotationOwner for &O {
    fn set_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>, value: V)
    where
        V: Send + Sync + 'static,
    {
        (**self).set_annotation(symbol, id, value)
    }

    fn try_get_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        (**self).try_get_annotation(symbol, id)
    }
}

impl<O: AnnotationOwner> AnnotationOwner for Arc<O> {
    fn set_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>, value: V)
    where
        V: Send + Sync + 'static,
    {
        (**self).set_annotation(symbol, id, value)
    }

    fn try_get_annotation<V>(&self, symbol: &CliSymbol, id: &AnnotationId<V>) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        (**self).try_get_annotation(symbol, id)
    }
}
