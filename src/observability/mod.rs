// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Message types are structs with a `Display` implementation rather than
//! format strings scattered through the code, organized by subsystem:
//!
//! * `messages::bridge` - runtime domain, image loading, and resolution events
//! * `messages::pipeline` - source ingestion and stage lifecycle events

pub mod messages;
