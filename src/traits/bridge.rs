// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The managed runtime bridge seam.
//!
//! `ManagedRuntimeBridge` is the capability boundary between the generic
//! embedding plumbing and a concrete runtime. Everything above it (handle
//! caching, object construction, the pipeline drive sequence) is
//! runtime-agnostic; everything below it is a thin adapter over one
//! embedding API. Two implementations exist: the Mono backend (production)
//! and an in-memory stub (test builds only).

use std::fmt::Debug;
use std::hash::Hash;

use crate::errors::HostResult;

/// An argument crossing the native/managed boundary.
///
/// Booleans and fixed-width integers travel by value through untyped
/// argument slots; strings are converted to the runtime's native string
/// representation; objects and collections travel as opaque handles.
#[derive(Debug, Clone)]
pub enum Arg<O> {
    Bool(bool),
    U32(u32),
    I32(i32),
    Str(String),
    Object(O),
}

/// Raw, uncached embedding primitives over one managed runtime.
///
/// Handle types are backend-defined and only meaningful while the runtime
/// domain is alive. All operations are synchronous and run on the calling
/// thread; the domain is driven by exactly one logical thread.
///
/// Method lookup is by name and argument arity only. When the managed
/// library defines several overloads of the same arity the first match
/// wins; the bridge offers no signature-based disambiguation.
pub trait ManagedRuntimeBridge {
    type Image: Copy + Eq + Hash + Debug;
    type Class: Copy + Eq + Hash + Debug;
    type Method: Copy + Debug;
    type Field: Copy + Debug;
    type Object: Copy + Debug;

    /// Open a managed library image by file path. Loads are not
    /// deduplicated; callers open each required library exactly once.
    fn open_image(&mut self, path: &str) -> HostResult<Self::Image>;

    /// The runtime's core library image.
    fn corlib(&mut self) -> HostResult<Self::Image>;

    /// Look up a class by namespace and name within an image.
    fn find_class(
        &mut self,
        image: Self::Image,
        namespace: &str,
        name: &str,
    ) -> HostResult<Self::Class>;

    /// Look up a method by name and arity on a class.
    fn find_method(
        &mut self,
        class: Self::Class,
        name: &str,
        arity: usize,
    ) -> HostResult<Self::Method>;

    /// Look up a field by name on a class.
    fn find_field(&mut self, class: Self::Class, name: &str) -> HostResult<Self::Field>;

    /// The class of a live object.
    fn class_of(&mut self, object: Self::Object) -> HostResult<Self::Class>;

    /// Allocate space for an instance. The instance is not usable until a
    /// constructor or [`init_object`](Self::init_object) has run on it.
    fn alloc_object(&mut self, class: Self::Class) -> HostResult<Self::Object>;

    /// Run the parameterless initializer on a freshly allocated instance.
    fn init_object(&mut self, object: Self::Object) -> HostResult<()>;

    /// Invoke a resolved method on a receiver with marshaled arguments.
    ///
    /// The argument vector must have exactly the arity the method was
    /// resolved with. A managed exception raised during the call is caught
    /// at this boundary and returned as a managed-execution error.
    fn invoke(
        &mut self,
        method: Self::Method,
        receiver: Self::Object,
        args: &[Arg<Self::Object>],
    ) -> HostResult<Option<Self::Object>>;

    /// Wrap native text as a managed string object.
    fn managed_string(&mut self, value: &str) -> HostResult<Self::Object>;

    /// Read an object-reference field. `None` means the field holds null.
    fn read_field(
        &mut self,
        object: Self::Object,
        field: Self::Field,
    ) -> HostResult<Option<Self::Object>>;

    /// Write a field with a raw marshaled value matching its declared
    /// storage.
    fn write_field(
        &mut self,
        object: Self::Object,
        field: Self::Field,
        value: &Arg<Self::Object>,
    ) -> HostResult<()>;
}
