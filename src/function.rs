//! Transformation handles
//!
//! A [`Handle`] is an immutable, curried reference to a registered
//! transformation: the function is resolved once at construction and the
//! bound arguments travel with it, so repeated application performs no
//! registry lookups. Handles compose sequentially and are themselves values
//! that can be bound as arguments to higher-order transforms such as
//! `map_each`.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::registry::FunctionEntry;
use crate::transform::CombineSpec;
use crate::value;
use serde_json::Value;
use std::sync::Arc;

/// A bound argument of a transformation handle
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A plain value: a field key, a list of field keys, or any other value
    Value(Value),
    /// Another handle, invoked by the receiving combinator
    Handle(Handle),
    /// An ordered list of combine specs
    Specs(Vec<CombineSpec>),
}

impl Arg {
    /// Build a key-list argument from anything iterable over strings.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arg::Value(Value::Array(
            keys.into_iter()
                .map(|key| Value::String(key.into()))
                .collect(),
        ))
    }

    /// Shape name used in diagnostics
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Arg::Value(value) => value::kind(value),
            Arg::Handle(_) => "handle",
            Arg::Specs(_) => "combine specs",
        }
    }

    pub(crate) fn as_key(&self) -> Result<&str> {
        match self {
            Arg::Value(Value::String(key)) => Ok(key),
            other => Err(Error::UnexpectedValue {
                expected: "field key",
                found: other.describe(),
            }),
        }
    }

    pub(crate) fn as_key_list(&self) -> Result<Vec<String>> {
        match self {
            Arg::Value(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(key) => Ok(key.clone()),
                    other => Err(Error::UnexpectedValue {
                        expected: "field key",
                        found: value::kind(other),
                    }),
                })
                .collect(),
            other => Err(Error::UnexpectedValue {
                expected: "list of field keys",
                found: other.describe(),
            }),
        }
    }

    pub(crate) fn as_handle(&self) -> Result<&Handle> {
        match self {
            Arg::Handle(handle) => Ok(handle),
            other => Err(Error::UnexpectedValue {
                expected: "handle",
                found: other.describe(),
            }),
        }
    }

    pub(crate) fn as_specs(&self) -> Result<&[CombineSpec]> {
        match self {
            Arg::Specs(specs) => Ok(specs),
            other => Err(Error::UnexpectedValue {
                expected: "combine specs",
                found: other.describe(),
            }),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(key: &str) -> Self {
        Arg::Value(Value::String(key.to_string()))
    }
}

impl From<String> for Arg {
    fn from(key: String) -> Self {
        Arg::Value(Value::String(key))
    }
}

impl From<Handle> for Arg {
    fn from(handle: Handle) -> Self {
        Arg::Handle(handle)
    }
}

impl From<CombineSpec> for Arg {
    fn from(spec: CombineSpec) -> Self {
        Arg::Specs(vec![spec])
    }
}

impl From<Vec<CombineSpec>> for Arg {
    fn from(specs: Vec<CombineSpec>) -> Self {
        Arg::Specs(specs)
    }
}

/// Fetch a bound argument by position.
///
/// Signatures are checked at handle construction, so a miss here is an
/// internal inconsistency, surfaced as an error rather than a panic.
pub(crate) fn arg(args: &[Arg], index: usize) -> Result<&Arg> {
    args.get(index).ok_or_else(|| Error::Transform {
        message: format!("bound argument {} is missing", index + 1),
    })
}

/// One resolved step of a handle's composition chain
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step {
    entry: Arc<FunctionEntry>,
    args: Vec<Arg>,
}

impl Step {
    fn call_pure(&self, input: &Value) -> Result<Value> {
        log::trace!("applying {}", self.entry.qualified());
        (self.entry.pure_fn())(&self.args, input).map_err(|source| self.annotate(source))
    }

    fn call_in_place(&self, input: &mut Value) -> Result<()> {
        log::trace!("applying {} in place", self.entry.qualified());
        match self.entry.in_place_fn() {
            Some(in_place) => {
                in_place(&self.args, input).map_err(|source| self.annotate(source))
            }
            None => {
                *input = (self.entry.pure_fn())(&self.args, input)
                    .map_err(|source| self.annotate(source))?;
                Ok(())
            }
        }
    }

    fn annotate(&self, source: Error) -> Error {
        Error::Application {
            function: self.entry.qualified(),
            args: args_summary(&self.args),
            source: Box::new(source),
        }
    }
}

fn args_summary(args: &[Arg]) -> String {
    let parts: Vec<String> = args
        .iter()
        .map(|arg| match arg {
            Arg::Value(value) => value.to_string(),
            Arg::Handle(handle) => format!("<{}>", handle.name()),
            Arg::Specs(specs) => format!("<{} combine specs>", specs.len()),
        })
        .collect();
    format!("({})", parts.join(", "))
}

/// An immutable, composable, curried reference to a registered transformation
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    steps: Vec<Step>,
}

impl Handle {
    pub(crate) fn new(entry: Arc<FunctionEntry>, args: Vec<Arg>) -> Self {
        Handle {
            steps: vec![Step { entry, args }],
        }
    }

    /// Qualified name of the handle's step chain, e.g.
    /// `"record.nest >> sequence.group"`
    pub fn name(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.entry.qualified())
            .collect::<Vec<_>>()
            .join(" >> ")
    }

    /// Apply the handle, returning a fresh value and leaving the input
    /// untouched.
    pub fn apply(&self, input: &Value) -> Result<Value> {
        match self.steps.split_first() {
            None => Ok(input.clone()),
            Some((first, rest)) => {
                let mut current = first.call_pure(input)?;
                // Later steps own the intermediate, so the in-place forms can
                // be used without changing the observable result.
                for step in rest {
                    step.call_in_place(&mut current)?;
                }
                Ok(current)
            }
        }
    }

    /// Apply the handle in place. Entries without a registered in-place form
    /// fall back to the pure form and replace the container.
    pub fn apply_in_place(&self, input: &mut Value) -> Result<()> {
        for step in &self.steps {
            step.call_in_place(input)?;
        }
        Ok(())
    }

    /// Sequential composition: `a.compose(&b).apply(x)` equals
    /// `b.apply(&a.apply(x)?)`. Construction has no side effects and the
    /// result invokes each side exactly once per application.
    pub fn compose(&self, other: &Handle) -> Handle {
        let mut steps = self.steps.clone();
        steps.extend(other.steps.iter().cloned());
        Handle { steps }
    }
}
