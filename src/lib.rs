//! Remodel - composable, declarative transformations for semi-structured data
//!
//! This crate reshapes nested key/value records and sequences of them between
//! incompatible schemas (database rows to domain objects and back). Callers
//! build immutable, curried transformation handles from a namespaced function
//! registry, compose them sequentially, and apply them once to an in-memory
//! value tree.
//!
//! # Main Components
//!
//! - **Value Model**: `serde_json::Value` trees with insertion-ordered
//!   records (`preserve_order`)
//! - **Function Registry**: namespaced name-to-implementation mapping,
//!   populated once at startup
//! - **Transformation Handles**: resolved once at construction, composable,
//!   usable as arguments to higher-order transforms
//! - **Structural Transforms**: `nest`/`wrap`, `group`/`ungroup`, and the
//!   recursive equality join `combine`
//!
//! # Example
//!
//! ```
//! use remodel::{Arg, Registry};
//! use serde_json::json;
//!
//! fn example() -> remodel::Result<()> {
//!     let registry = Registry::core();
//!
//!     let group = registry.handle("group", vec![Arg::from("tasks"), Arg::keys(["title"])])?;
//!     let output = group.apply(&json!([
//!         {"name": "Jane", "title": "One"},
//!         {"name": "Jane", "title": "Two"},
//!     ]))?;
//!     assert_eq!(
//!         output,
//!         json!([{"name": "Jane", "tasks": [{"title": "One"}, {"title": "Two"}]}])
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Atomic transforms from the surrounding application register through
//! [`Registry::register`] and compose with the built-ins:
//!
//! ```
//! use remodel::{Arg, Error, Registry, Result};
//! use serde_json::{json, Value};
//!
//! fn upcase(_args: &[Arg], input: &Value) -> Result<Value> {
//!     match input {
//!         Value::String(s) => Ok(Value::String(s.to_uppercase())),
//!         _ => Err(Error::transform("upcase expects a string")),
//!     }
//! }
//!
//! fn example() -> Result<()> {
//!     let mut registry = Registry::core();
//!     registry.register("string", "upcase", &[], upcase)?;
//!
//!     let per_element = registry.handle(
//!         "map_each",
//!         vec![Arg::from(registry.handle("upcase", vec![])?)],
//!     )?;
//!     assert_eq!(per_element.apply(&json!(["a", "b"]))?, json!(["A", "B"]));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod function;
pub mod registry;
pub mod transform;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use function::{Arg, Handle};
pub use registry::{ArgKind, FunctionEntry, InPlaceFn, PureFn, Registry};
pub use transform::CombineSpec;
pub use value::{Record, Sequence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_core_registry_resolves_builtins() {
        let registry = Registry::core();
        for name in [
            "sequence.map_each",
            "sequence.wrap",
            "sequence.group",
            "sequence.ungroup",
            "sequence.combine",
            "record.nest",
            "record.map_value",
            "record.map_key",
            "record.map_keys",
        ] {
            assert!(registry.resolve(name).is_ok(), "missing builtin {}", name);
        }
    }
}
