// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lazy, cached handle resolution.
//!
//! Every class, method, and field is resolved by name at most once per
//! distinct identity; the resolved handle is reused for the remaining
//! process lifetime. Caches are read-check-then-insert with no eviction;
//! entries live exactly as long as the domain does. Eager resolution of a
//! library's whole surface is never attempted, so cost stays proportional
//! to what the host actually exercises.

use std::collections::HashMap;

use crate::errors::HostResult;
use crate::traits::bridge::ManagedRuntimeBridge;

pub struct Resolver<B: ManagedRuntimeBridge> {
    classes: HashMap<(B::Image, String, String), B::Class>,
    methods: HashMap<(B::Class, String, usize), B::Method>,
    fields: HashMap<(B::Class, String), B::Field>,
}

impl<B: ManagedRuntimeBridge> Resolver<B> {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            methods: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    /// Resolve a class, walking metadata only on the first request for
    /// this `(image, namespace, name)` identity.
    pub fn class(
        &mut self,
        backend: &mut B,
        image: B::Image,
        namespace: &str,
        name: &str,
    ) -> HostResult<B::Class> {
        let key = (image, namespace.to_string(), name.to_string());
        if let Some(found) = self.classes.get(&key) {
            return Ok(*found);
        }
        let resolved = backend.find_class(image, namespace, name)?;
        self.classes.insert(key, resolved);
        Ok(resolved)
    }

    /// Resolve a method, walking metadata only on the first request for
    /// this `(class, name, arity)` identity.
    pub fn method(
        &mut self,
        backend: &mut B,
        class: B::Class,
        name: &str,
        arity: usize,
    ) -> HostResult<B::Method> {
        let key = (class, name.to_string(), arity);
        if let Some(found) = self.methods.get(&key) {
            return Ok(*found);
        }
        let resolved = backend.find_method(class, name, arity)?;
        self.methods.insert(key, resolved);
        Ok(resolved)
    }

    /// Resolve a field, walking metadata only on the first request for
    /// this `(class, name)` identity.
    pub fn field(
        &mut self,
        backend: &mut B,
        class: B::Class,
        name: &str,
    ) -> HostResult<B::Field> {
        let key = (class, name.to_string());
        if let Some(found) = self.fields.get(&key) {
            return Ok(*found);
        }
        let resolved = backend.find_field(class, name)?;
        self.fields.insert(key, resolved);
        Ok(resolved)
    }
}

impl<B: ManagedRuntimeBridge> Default for Resolver<B> {
    fn default() -> Self {
        Self::new()
    }
}
