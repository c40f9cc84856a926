// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generic ordered managed collections.
//!
//! Wraps one fixed, pre-resolved collection type from the runtime's core
//! library. Only monotonic append is exposed; the pipeline never removes,
//! indexes, or iterates on the managed side.

use crate::bridge::objects::ObjectBridge;
use crate::errors::HostResult;
use crate::traits::bridge::{Arg, ManagedRuntimeBridge};

pub const LIST_NAMESPACE: &str = "System.Collections";
pub const LIST_CLASS: &str = "ArrayList";
const APPEND_METHOD: &str = "Add";

pub struct CollectionAdapter<B: ManagedRuntimeBridge> {
    list_class: B::Class,
}

impl<B: ManagedRuntimeBridge> CollectionAdapter<B> {
    /// Resolve the collection class once, up front.
    pub fn new(bridge: &mut ObjectBridge<B>) -> HostResult<Self> {
        let corlib = bridge.corlib()?;
        let list_class = bridge.resolve_class(corlib, LIST_NAMESPACE, LIST_CLASS)?;
        Ok(Self { list_class })
    }

    /// Create an empty list instance.
    pub fn new_list(&self, bridge: &mut ObjectBridge<B>) -> HostResult<B::Object> {
        bridge.new_object(self.list_class)
    }

    /// Append one element. The managed `Add` returns the element's index;
    /// nothing downstream needs it.
    pub fn append(
        &self,
        bridge: &mut ObjectBridge<B>,
        list: B::Object,
        element: B::Object,
    ) -> HostResult<()> {
        bridge.invoke(list, self.list_class, APPEND_METHOD, &[Arg::Object(element)])?;
        Ok(())
    }
}
