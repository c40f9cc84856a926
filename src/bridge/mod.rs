// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runtime-agnostic plumbing layered over the bridge seam: handle
//! resolution with process-lifetime caching, object construction and
//! invocation, and generic ordered-collection building.

pub mod collection;
pub mod objects;
pub mod resolver;

pub use collection::CollectionAdapter;
pub use objects::ObjectBridge;
pub use resolver::Resolver;
