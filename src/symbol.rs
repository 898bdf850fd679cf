use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// Identity of a symbol. Clones of a symbol share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u64);

impl SymbolId {
    fn next() -> Self {
        Self(NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed))
    }
}

/// Runtime tag for the value type a symbol declares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Returns the tag for `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns true if this tag was created for `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns the type's name, for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Whether a symbol is a named option or a positional argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Option,
    Argument,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Option => f.pad("option"),
            SymbolKind::Argument => f.pad("argument"),
        }
    }
}

/// The common, untyped view of an option or argument.
///
/// Used when the concrete value type is not known at the call site, for
/// example while walking a heterogeneous list of symbols.
#[derive(Clone, Debug)]
pub struct CliSymbol {
    id: SymbolId,
    name: Arc<str>,
    kind: SymbolKind,
    value_type: ValueType,
}

impl CliSymbol {
    fn new<T: 'static>(name: impl Into<Arc<str>>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId::next(),
            name: name.into(),
            kind,
            value_type: ValueType::of::<T>(),
        }
    }

    /// Returns the identity shared by this symbol and its clones
    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// Returns the name the symbol was created with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is an option or an argument
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the runtime tag of the declared value type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl PartialEq for CliSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CliSymbol {}

impl fmt::Display for CliSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.name)
    }
}

/// A symbol that statically declares the type of value it binds.
pub trait ValueSymbol {
    /// The declared value type
    type Value: 'static;

    /// The untyped symbol underneath
    fn symbol(&self) -> &CliSymbol;
}

/// Marks `Self` as usable wherever a `V` is expected.
///
/// Every type is assignable to itself. Narrower-to-wider relations are
/// declared by implementing this trait, for example a concrete type that may
/// sit behind an `Arc<dyn Trait>` slot:
///
/// ```
/// use std::sync::Arc;
/// use symbol_annotations::AssignableTo;
///
/// trait Shape: Send + Sync {}
/// struct Circle;
/// impl Shape for Circle {}
///
/// impl AssignableTo<Arc<dyn Shape>> for Circle {}
/// ```
pub trait AssignableTo<V> {}

impl<T> AssignableTo<T> for T {}

macro_rules! typed_symbol {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        pub struct $name<T> {
            symbol: CliSymbol,
            _value: PhantomData<fn() -> T>,
        }

        impl<T: 'static> $name<T> {
            /// Creates a new symbol with its own identity
            pub fn new(name: impl Into<Arc<str>>) -> Self {
                Self {
                    symbol: CliSymbol::new::<T>(name, $kind),
                    _value: PhantomData,
                }
            }
        }

        impl<T: 'static> ValueSymbol for $name<T> {
            type Value = T;

            fn symbol(&self) -> &CliSymbol {
                &self.symbol
            }
        }

        impl<T> Deref for $name<T> {
            type Target = CliSymbol;

            fn deref(&self) -> &CliSymbol {
                &self.symbol
            }
        }

        impl<T> AsRef<CliSymbol> for $name<T> {
            fn as_ref(&self) -> &CliSymbol {
                &self.symbol
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    symbol: self.symbol.clone(),
                    _value: PhantomData,
                }
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.symbol).finish()
            }
        }
    };
}

typed_symbol!(
    /// A named option such as `--port` binding a value of type `T`
    CliOption,
    SymbolKind::Option
);

typed_symbol!(
    /// A positional argument binding a value of type `T`
    CliArgument,
    SymbolKind::Argument
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_carry_declared_type() {
        let port = CliOption::<u16>::new("--port");
        let files = CliArgument::<Vec<String>>::new("files");

        assert_eq!(port.kind(), SymbolKind::Option);
        assert_eq!(files.kind(), SymbolKind::Argument);
        assert!(port.value_type().is::<u16>());
        assert!(!port.value_type().is::<u32>());
        assert!(files.value_type().is::<Vec<String>>());
        assert_eq!(port.to_string(), "option `--port`");
    }

    #[test]
    fn test_identity_survives_clone_not_name() {
        let first = CliOption::<bool>::new("--verbose");
        let same_name = CliOption::<bool>::new("--verbose");
        let clone = first.clone();

        assert_eq!(first.id(), clone.id());
        assert_eq!(*first, *clone);
        assert_ne!(first.id(), same_name.id());
        assert_eq!(first.symbol(), clone.as_ref());
    }
}
