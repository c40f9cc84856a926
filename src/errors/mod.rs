// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for the embedding host.
//!
//! One enum covers the host's whole failure surface: file I/O, settings,
//! runtime availability, name resolution against managed metadata, and
//! exceptions raised by invoked managed code. Resolution failures are
//! unrecoverable for the named entity; there is no retry path anywhere.

use std::path::PathBuf;
use thiserror::Error;

/// Comprehensive error type for all host operations.
///
/// Variants fall into four kinds:
/// - I/O errors (`Io`) name the offending file.
/// - Configuration errors (`Config`) reject a malformed settings file.
/// - Dependency errors (`RuntimeUnavailable`, `DomainAlreadyInitialized`,
///   `InvalidName`, `ImageLoad`, `ClassNotFound`, `MethodNotFound`,
///   `FieldNotFound`, `Allocation`, `EmptyField`) indicate a missing or
///   incompatible managed dependency and name the entity that failed.
/// - Managed-execution errors (`ManagedException`, `NullResult`) are raised
///   by the loaded libraries themselves and are an expected outcome for bad
///   input, not a host defect.
#[derive(Error, Debug)]
pub enum HostError {
    /// File could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file exists but does not deserialize.
    #[error("Invalid settings file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// The Mono embedding library or one of its symbols is missing, or the
    /// runtime domain could not be created.
    #[error("Mono runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// A second runtime domain was requested for this process.
    #[error("Runtime domain is already initialized")]
    DomainAlreadyInitialized,

    /// A name containing an interior NUL cannot cross the managed boundary.
    #[error("Name {0:?} cannot cross the managed boundary")]
    InvalidName(String),

    /// A managed library image failed to open.
    #[error("Loading library {path} failed")]
    ImageLoad { path: String },

    /// A class was not found in the loaded image.
    #[error("Finding class {name} in namespace {namespace} failed")]
    ClassNotFound { namespace: String, name: String },

    /// No method of the given name and arity exists on the class.
    #[error("Finding method {name} ({arity} args) in class {class} failed")]
    MethodNotFound {
        class: String,
        name: String,
        arity: usize,
    },

    /// No field of the given name exists on the class.
    #[error("Finding field {name} in class {class} failed")]
    FieldNotFound { class: String, name: String },

    /// The domain refused to allocate an instance.
    #[error("Allocating an instance of {class} failed")]
    Allocation { class: String },

    /// A field resolved correctly but holds no object reference.
    #[error("Field {name} holds no value")]
    EmptyField { name: String },

    /// Managed code raised an exception during an invocation. Caught at the
    /// invoke boundary and surfaced with the marshaled exception message.
    #[error("Managed code raised an exception: {message}")]
    ManagedException { message: String },

    /// A pipeline stage method completed but returned no object to thread
    /// into the next stage.
    #[error("Method {method} returned no result")]
    NullResult { method: String },
}

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;
