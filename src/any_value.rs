use std::any::{Any, TypeId};

/// A type-erased annotation value that remembers the type it was stored as
#[derive(Debug)]
pub(crate) struct AnyValue {
    type_id: TypeId,
    value: Box<dyn Any + Send + Sync>,
}

impl AnyValue {
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        }
    }

    pub(crate) fn is_type<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Clone the contained value out if it is a `T`
    pub(crate) fn cloned<T: Clone + 'static>(&self) -> Option<T> {
        if !self.is_type::<T>() {
            return None;
        }
        self.value.downcast_ref::<T>().cloned()
    }
}
