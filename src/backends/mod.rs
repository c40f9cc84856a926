// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bridge backend implementations.
//!
//! ## Mono Backend
//! The production backend: embeds the Mono runtime through its C embedding
//! API, loaded dynamically at startup. Owns the single runtime domain for
//! the process.
//!
//! ## Stub Backend (Test-Only)
//! An in-memory managed world with scripted classes and behaviors, lookup
//! counters, and an invocation log. NOT available in production builds.

pub mod mono;
#[cfg(test)]
pub mod stub;
