// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for runtime domain, image loading, and resolution events.

use std::fmt::{Display, Formatter};

/// The embedding library was located and opened.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct RuntimeLibraryLoaded<'a> {
    pub library: &'a str,
}

impl Display for RuntimeLibraryLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Runtime library '{}' loaded", self.library)
    }
}

/// The runtime domain was created.
///
/// # Log Level
/// `info!` - Important operational event
pub struct DomainInitialized<'a> {
    pub domain: &'a str,
}

impl Display for DomainInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Runtime domain '{}' initialized", self.domain)
    }
}

/// A managed library image was opened into the domain.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ImageLoaded<'a> {
    pub path: &'a str,
}

impl Display for ImageLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Library image '{}' loaded", self.path)
    }
}

/// A managed library image failed to open.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ImageLoadFailed<'a> {
    pub path: &'a str,
    pub status: i32,
}

impl Display for ImageLoadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Library image '{}' failed to open (status {})",
            self.path, self.status
        )
    }
}

/// A class was resolved by name.
///
/// # Log Level
/// `debug!` - Resolution detail
pub struct ClassResolved<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
}

impl Display for ClassResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Class {}.{} resolved", self.namespace, self.name)
    }
}

/// A method was resolved by name and arity.
///
/// # Log Level
/// `debug!` - Resolution detail
pub struct MethodResolved<'a> {
    pub class: &'a str,
    pub name: &'a str,
    pub arity: usize,
}

impl Display for MethodResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Method {}::{} ({} args) resolved",
            self.class, self.name, self.arity
        )
    }
}

/// One method signature a class exposes, listed after a failed lookup.
///
/// # Log Level
/// `debug!` - Diagnostic detail for a drifted library version
pub struct CandidateMethod<'a> {
    pub signature: &'a str,
}

impl Display for CandidateMethod<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Available method: {}", self.signature)
    }
}

/// Managed code raised an exception during an invocation.
///
/// # Log Level
/// `warn!` - Expected for malformed input, not a host defect
pub struct ManagedExceptionRaised<'a> {
    pub message: &'a str,
}

impl Display for ManagedExceptionRaised<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Managed exception raised: {}", self.message)
    }
}
