// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Object construction, invocation, and field access over a backend.
//!
//! `ObjectBridge` owns the backend and the resolution caches and exposes
//! the operations the pipeline composes: allocate-and-init, construct with
//! arguments, invoke by name, and field read/write. Allocation and
//! initialization are distinct ordered steps; both happen before an object
//! is handed out.

use crate::bridge::resolver::Resolver;
use crate::errors::{HostError, HostResult};
use crate::traits::bridge::{Arg, ManagedRuntimeBridge};

/// Name constructors carry in managed metadata.
const CONSTRUCTOR: &str = ".ctor";

pub struct ObjectBridge<B: ManagedRuntimeBridge> {
    backend: B,
    resolver: Resolver<B>,
}

impl<B: ManagedRuntimeBridge> ObjectBridge<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            resolver: Resolver::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn open_image(&mut self, path: &str) -> HostResult<B::Image> {
        self.backend.open_image(path)
    }

    pub fn corlib(&mut self) -> HostResult<B::Image> {
        self.backend.corlib()
    }

    pub fn resolve_class(
        &mut self,
        image: B::Image,
        namespace: &str,
        name: &str,
    ) -> HostResult<B::Class> {
        self.resolver.class(&mut self.backend, image, namespace, name)
    }

    /// Allocate an instance and run its parameterless initializer.
    pub fn new_object(&mut self, class: B::Class) -> HostResult<B::Object> {
        let object = self.backend.alloc_object(class)?;
        self.backend.init_object(object)?;
        Ok(object)
    }

    /// Allocate an instance and run the constructor whose arity matches the
    /// argument vector.
    pub fn construct(&mut self, class: B::Class, args: &[Arg<B::Object>]) -> HostResult<B::Object> {
        let constructor = self
            .resolver
            .method(&mut self.backend, class, CONSTRUCTOR, args.len())?;
        let object = self.backend.alloc_object(class)?;
        self.backend.invoke(constructor, object, args)?;
        Ok(object)
    }

    /// Invoke a method by name on a receiver of the given class. The arity
    /// used for resolution is the argument vector's length.
    pub fn invoke(
        &mut self,
        receiver: B::Object,
        class: B::Class,
        method: &str,
        args: &[Arg<B::Object>],
    ) -> HostResult<Option<B::Object>> {
        let resolved = self
            .resolver
            .method(&mut self.backend, class, method, args.len())?;
        self.backend.invoke(resolved, receiver, args)
    }

    /// Read an object-reference field by name; an empty field is an error
    /// because every field the pipeline reads is container-owned state.
    pub fn get_field(&mut self, object: B::Object, name: &str) -> HostResult<B::Object> {
        let class = self.backend.class_of(object)?;
        let field = self.resolver.field(&mut self.backend, class, name)?;
        self.backend
            .read_field(object, field)?
            .ok_or_else(|| HostError::EmptyField {
                name: name.to_string(),
            })
    }

    pub fn set_field(
        &mut self,
        object: B::Object,
        name: &str,
        value: &Arg<B::Object>,
    ) -> HostResult<()> {
        let class = self.backend.class_of(object)?;
        let field = self.resolver.field(&mut self.backend, class, name)?;
        self.backend.write_field(object, field, value)
    }

    pub fn managed_string(&mut self, value: &str) -> HostResult<B::Object> {
        self.backend.managed_string(value)
    }
}
