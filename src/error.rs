//! Error types for the remodel library
//!
//! This module defines the error handling system for remodel, using thiserror
//! for ergonomic error definitions. Registry-time failures (unknown, ambiguous
//! or duplicate function names, bad bound-argument signatures) are separated
//! from application-time failures (structural mismatches in the data being
//! transformed). Errors raised inside an atomic transform are wrapped in
//! [`Error::Application`] with the failing handle's name and arguments.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for remodel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No function registered under the given name
    #[error("Unknown function: no function registered under '{name}'")]
    UnknownFunction { name: String },

    /// An unqualified name matched functions in more than one namespace
    #[error("Ambiguous function: '{name}' is registered in namespaces {namespaces:?}; qualify the name")]
    AmbiguousFunction {
        name: String,
        namespaces: Vec<String>,
    },

    /// The (namespace, name) pair is already registered
    #[error("Duplicate registration: '{namespace}.{name}' is already registered")]
    DuplicateRegistration { namespace: String, name: String },

    /// Bound arguments do not match the function's declared signature
    #[error("Invalid arguments for '{function}': {message}")]
    Signature { function: String, message: String },

    /// A record is missing an addressed key
    #[error("Missing key: record has no key '{key}'")]
    MissingKey { key: String },

    /// Renaming a key would collide with an existing key
    #[error("Key collision: renaming '{from}' to '{to}' collides with an existing key")]
    KeyCollision { from: String, to: String },

    /// Combine input does not match the shape implied by the spec tree
    #[error("Malformed combine input: {message}")]
    MalformedCombineSpec { message: String },

    /// A value did not have the shape a transform requires
    #[error("Unexpected value: expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },

    /// Failure raised by an atomic transform implementation
    #[error("Transform failed: {message}")]
    Transform { message: String },

    /// An error propagated out of a handle, annotated for diagnosability
    #[error("'{function}' failed with arguments {args}: {source}")]
    Application {
        function: String,
        args: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Build a [`Error::Transform`] from any displayable message.
    ///
    /// Atomic transform implementations registered from outside the crate use
    /// this to surface their own failures; the engine never swallows them.
    pub fn transform(message: impl Into<String>) -> Self {
        Error::Transform {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_chains_source() {
        let err = Error::Application {
            function: "record.map_value".to_string(),
            args: "(\"age\", <string.upcase>)".to_string(),
            source: Box::new(Error::MissingKey {
                key: "age".to_string(),
            }),
        };
        let text = err.to_string();
        assert!(text.contains("record.map_value"));
        assert!(text.contains("no key 'age'"));
    }

    #[test]
    fn test_transform_constructor() {
        let err = Error::transform("not a number");
        assert_eq!(err.to_string(), "Transform failed: not a number");
    }
}
