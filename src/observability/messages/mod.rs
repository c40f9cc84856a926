// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Usage Pattern
//!
//! ```rust
//! use sigmadsp_asm::observability::messages::bridge::ImageLoaded;
//!
//! let msg = ImageLoaded { path: "SigmaCompiler.dll" };
//! tracing::info!("{}", msg);
//! ```

pub mod bridge;
pub mod pipeline;
