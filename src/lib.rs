//! # symbol-annotations
//!
//! Type-safe annotations that independent subsystems attach to command-line
//! symbols.
//!
//! A subsystem (help, completion, defaults, ...) often needs to remember a
//! little extra data about an option or argument: a description, whether it is
//! hidden, how to compute its default. `symbol-annotations` lets it do that
//! without the symbols knowing the data exists, what type it has, or who owns
//! it.
//!
//! ## Key Features
//!
//! - **Typed slots**: every annotation slot is an [`AnnotationId<V>`] with its own value type
//! - **Checked at compile time**: values only attach to symbols whose type fits the slot
//! - **Deferred values**: [`ValueFuncAnnotationAccessor`] stores factories run on read
//! - **Thread-safe**: [`AnnotationStore`] is built on `Arc<RwLock<_>>` and cheap to clone
//! - **Escape hatch**: `try_get_as` reads through an untyped [`CliSymbol`]
//!
//! ## Usage Examples
//!
//! ### Defining and Using Slots
//!
//! ```rust
//! use symbol_annotations::{CliArgument, CliOption, Subsystem};
//!
//! let help = Subsystem::new("help");
//! let description = help.accessor::<String>("description");
//! let default_value = help.value_func_accessor::<String>("default_value");
//!
//! let name = CliOption::<String>::new("--name");
//! let target = CliArgument::<String>::new("target");
//!
//! description.set(&name, "Who to greet".to_string());
//! default_value.set(&name, || std::env::var("USER").unwrap_or_else(|_| "world".to_string()));
//!
//! assert_eq!(description.try_get(&name).as_deref(), Some("Who to greet"));
//! assert!(description.try_get(&target).is_none());
//! assert!(default_value.try_get_value(&name).is_some());
//! ```
//!
//! ### Wider Slot Types
//!
//! A slot may hold a wider type than the symbols it annotates, as long as the
//! relation is declared with [`AssignableTo`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use symbol_annotations::{AssignableTo, CliOption, Subsystem};
//!
//! trait Validator: Send + Sync {
//!     fn check(&self, input: &str) -> bool;
//! }
//!
//! #[derive(Clone)]
//! struct Port(u16);
//!
//! impl AssignableTo<Arc<dyn Validator>> for Port {}
//!
//! struct NonEmpty;
//!
//! impl Validator for NonEmpty {
//!     fn check(&self, input: &str) -> bool {
//!         !input.is_empty()
//!     }
//! }
//!
//! let validation = Subsystem::new("validation");
//! let validator = validation.accessor::<Arc<dyn Validator>>("validator");
//!
//! let port = CliOption::<Port>::new("--port");
//! validator.set(&port, Arc::new(NonEmpty));
//!
//! let check = validator.try_get(&port).expect("validator was set");
//! assert!(check.check("8080"));
//! ```
//!
//! ### Walking Untyped Symbols
//!
//! ```rust
//! use symbol_annotations::{AnnotationError, AssignableTo, CliOption, CliSymbol, Subsystem};
//!
//! struct Seconds;
//! struct Bytes;
//!
//! impl AssignableTo<u64> for Seconds {}
//! impl AssignableTo<u64> for Bytes {}
//!
//! let limits = Subsystem::new("limits");
//! let maximum = limits.accessor::<u64>("maximum");
//!
//! let timeout = CliOption::<Seconds>::new("--timeout");
//! let size = CliOption::<Bytes>::new("--size");
//! let depth = CliOption::<u8>::new("--depth");
//! maximum.set(&timeout, 3600);
//! maximum.set(&size, 1 << 20);
//!
//! let symbols: Vec<&CliSymbol> = vec![&*timeout, &*size, &*depth];
//!
//! // The slot type is always an acceptable assertion, and absence is not an error
//! let found: Vec<Option<u64>> = symbols
//!     .iter()
//!     .map(|symbol| maximum.try_get_as::<u64>(symbol))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(found, vec![Some(3600), Some(1 << 20), None]);
//!
//! // Asserting the wrong symbol type for a stored value is reported
//! match maximum.try_get_as::<Seconds>(symbols[1]) {
//!     Err(AnnotationError::TypeMismatch { symbol, .. }) => assert_eq!(symbol, "--size"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! # Ok::<(), AnnotationError>(())
//! ```

mod accessor;
mod any_value;
mod error;
mod id;
mod owner;
mod store;
mod subsystem;
mod symbol;

pub use accessor::{AnnotationAccessor, ValueFn, ValueFuncAnnotationAccessor};
pub use error::{AnnotationError, Result};
pub use id::{AnnotationId, AnnotationKey};
pub use owner::AnnotationOwner;
pub use store::AnnotationStore;
pub use subsystem::Subsystem;
pub use symbol::{
    AssignableTo, CliArgument, CliOption, CliSymbol, SymbolId, SymbolKind, ValueSymbol, ValueType,
};
