//! # Schema Errors
//!
//! Failures while assembling element schemas or compiling a validator.
//! All of them are startup failures: the plugin that triggered them cannot
//! work, and the caller is expected to abort plugin loading.

use thiserror::Error;

/// Error while building, registering, or compiling element schemas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A shared sub-schema the builder depends on is not provided.
    #[error("shared schema fragment '{name}' is not available")]
    MissingFragment {
        /// Fragment name (e.g. `coordinate`).
        name: String,
    },

    /// A shared sub-schema exists but cannot be embedded.
    #[error("shared schema fragment '{name}' is incompatible: {reason}")]
    IncompatibleFragment {
        /// Fragment name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An element schema has no `properties.type.enum` to identify it.
    #[error("element schema has no type enum: {reason}")]
    MissingTypeEnum {
        /// What was found instead.
        reason: String,
    },

    /// An element schema declares a type already present in the registry.
    #[error("element type '{type_name}' is already registered")]
    DuplicateType {
        /// The conflicting type value.
        type_name: String,
    },

    /// The merged schema could not be compiled into a validator.
    #[error("validator build error: {reason}")]
    ValidatorBuild {
        /// Compiler message.
        reason: String,
    },

    /// A process-wide schema host has already been installed.
    #[error("a process-wide annotation schema host is already installed")]
    GlobalAlreadyInstalled,
}
