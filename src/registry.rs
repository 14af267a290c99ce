//! Function registry
//!
//! Maps namespaced names to transformation implementations. Registration is a
//! startup-time, `&mut self` operation; resolution and handle construction
//! are read-only, so a fully populated registry can be shared freely across
//! threads.
//!
//! Each entry declares the kinds of bound arguments it accepts. The
//! declaration is checked once, when a handle is constructed, keeping
//! repeated application free of both lookups and argument validation.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::function::{Arg, Handle};
use crate::transform;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A non-mutating transformation implementation: bound arguments plus a
/// borrowed input value, producing a fresh output value
pub type PureFn = fn(&[Arg], &Value) -> Result<Value>;

/// An in-place transformation implementation, permitted to rewrite the
/// input's top-level container. Must produce output value-identical to the
/// pure form.
pub type InPlaceFn = fn(&[Arg], &mut Value) -> Result<()>;

/// Kind of bound argument an atomic transform accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A single field key
    Key,
    /// An ordered list of field keys
    KeyList,
    /// Another transformation handle
    Handle,
    /// An ordered list of combine specs
    Specs,
    /// Any plain value
    Value,
}

impl ArgKind {
    fn admits(self, arg: &Arg) -> bool {
        match (self, arg) {
            (ArgKind::Key, Arg::Value(Value::String(_))) => true,
            (ArgKind::KeyList, Arg::Value(Value::Array(items))) => {
                items.iter().all(Value::is_string)
            }
            (ArgKind::Handle, Arg::Handle(_)) => true,
            (ArgKind::Specs, Arg::Specs(_)) => true,
            (ArgKind::Value, Arg::Value(_)) => true,
            _ => false,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ArgKind::Key => "a field key",
            ArgKind::KeyList => "a list of field keys",
            ArgKind::Handle => "a transformation handle",
            ArgKind::Specs => "a list of combine specs",
            ArgKind::Value => "a value",
        }
    }
}

/// A registered transformation implementation and its declared signature
#[derive(Debug)]
pub struct FunctionEntry {
    namespace: String,
    name: String,
    signature: Vec<ArgKind>,
    pure: PureFn,
    in_place: Option<InPlaceFn>,
}

impl FunctionEntry {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified name, e.g. `"sequence.group"`
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn signature(&self) -> &[ArgKind] {
        &self.signature
    }

    pub(crate) fn pure_fn(&self) -> PureFn {
        self.pure
    }

    pub(crate) fn in_place_fn(&self) -> Option<InPlaceFn> {
        self.in_place
    }

    fn check_args(&self, args: &[Arg]) -> Result<()> {
        if args.len() != self.signature.len() {
            return Err(Error::Signature {
                function: self.qualified(),
                message: format!(
                    "expected {} bound arguments, found {}",
                    self.signature.len(),
                    args.len()
                ),
            });
        }
        for (index, (kind, arg)) in self.signature.iter().zip(args).enumerate() {
            if !kind.admits(arg) {
                return Err(Error::Signature {
                    function: self.qualified(),
                    message: format!(
                        "argument {} must be {}, found {}",
                        index + 1,
                        kind.describe(),
                        arg.describe()
                    ),
                });
            }
        }
        Ok(())
    }
}

// Equality ignores the function pointers; two entries are the same
// registration if namespace, name and signature agree.
impl PartialEq for FunctionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.signature == other.signature
    }
}

/// Namespaced registry of transformation implementations
///
/// Unqualified names resolve against the namespaces in registration order;
/// a name registered in more than one namespace must be qualified as
/// `"namespace.name"`.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<(String, String), Arc<FunctionEntry>>,
    active: Vec<String>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `sequence` and `record` transforms
    /// registered
    pub fn core() -> Self {
        let mut registry = Self::new();
        transform::install(&mut registry);
        registry
    }

    /// Register a transformation with only a non-mutating form
    pub fn register(
        &mut self,
        namespace: &str,
        name: &str,
        signature: &[ArgKind],
        pure: PureFn,
    ) -> Result<()> {
        self.insert(namespace, name, signature, pure, None)
    }

    /// Register a transformation with both forms
    pub fn register_with_in_place(
        &mut self,
        namespace: &str,
        name: &str,
        signature: &[ArgKind],
        pure: PureFn,
        in_place: InPlaceFn,
    ) -> Result<()> {
        self.insert(namespace, name, signature, pure, Some(in_place))
    }

    fn insert(
        &mut self,
        namespace: &str,
        name: &str,
        signature: &[ArgKind],
        pure: PureFn,
        in_place: Option<InPlaceFn>,
    ) -> Result<()> {
        let key = (namespace.to_string(), name.to_string());
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateRegistration {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        if !self.active.iter().any(|active| active == namespace) {
            self.active.push(namespace.to_string());
        }
        log::debug!("registered transformation '{}.{}'", namespace, name);
        self.entries.insert(
            key,
            Arc::new(FunctionEntry {
                namespace: namespace.to_string(),
                name: name.to_string(),
                signature: signature.to_vec(),
                pure,
                in_place,
            }),
        );
        Ok(())
    }

    /// Built-in registration path. Built-in names are distinct literals, so
    /// the duplicate check cannot fire.
    pub(crate) fn builtin(
        &mut self,
        namespace: &str,
        name: &str,
        signature: &[ArgKind],
        pure: PureFn,
        in_place: InPlaceFn,
    ) {
        let registered = self.insert(namespace, name, signature, pure, Some(in_place));
        debug_assert!(registered.is_ok(), "built-in '{}.{}' collided", namespace, name);
    }

    /// Resolve a name to its registered entry.
    ///
    /// A qualified `"namespace.name"` resolves exactly; a bare name searches
    /// the active namespaces in registration order.
    pub fn resolve(&self, name: &str) -> Result<Arc<FunctionEntry>> {
        if let Some((namespace, bare)) = name.split_once('.') {
            return self
                .entries
                .get(&(namespace.to_string(), bare.to_string()))
                .cloned()
                .ok_or_else(|| Error::UnknownFunction {
                    name: name.to_string(),
                });
        }

        let mut hits: Vec<Arc<FunctionEntry>> = Vec::new();
        for namespace in &self.active {
            if let Some(entry) = self.entries.get(&(namespace.clone(), name.to_string())) {
                hits.push(Arc::clone(entry));
            }
        }
        match hits.len() {
            0 => Err(Error::UnknownFunction {
                name: name.to_string(),
            }),
            1 => Ok(hits.remove(0)),
            _ => Err(Error::AmbiguousFunction {
                name: name.to_string(),
                namespaces: hits
                    .iter()
                    .map(|entry| entry.namespace().to_string())
                    .collect(),
            }),
        }
    }

    /// Construct a handle: resolve the name and check the bound arguments
    /// against the entry's declared signature.
    pub fn handle(&self, name: &str, args: Vec<Arg>) -> Result<Handle> {
        let entry = self.resolve(name)?;
        entry.check_args(&args)?;
        Ok(Handle::new(entry, args))
    }

    /// Namespaces available for unqualified resolution, in registration order
    pub fn namespaces(&self) -> &[String] {
        &self.active
    }

    /// Number of registered transformations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
