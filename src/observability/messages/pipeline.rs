// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for source ingestion and pipeline stage events.

use std::fmt::{Display, Formatter};

/// A source file was fully read into native memory.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SourceLoaded<'a> {
    pub path: &'a str,
    pub lines: usize,
}

impl Display for SourceLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Source '{}' loaded: {} lines", self.path, self.lines)
    }
}

/// Input lines were handed to the managed container.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SourcePopulated {
    pub code_lines: usize,
    pub net_lines: usize,
}

impl Display for SourcePopulated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Container populated: {} code lines, {} net lines",
            self.code_lines, self.net_lines
        )
    }
}

/// A pipeline stage method is about to be invoked.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StageStarted<'a> {
    pub method: &'a str,
}

impl Display for StageStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' started", self.method)
    }
}

/// A pipeline stage method returned.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StageCompleted<'a> {
    pub method: &'a str,
}

impl Display for StageCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' completed", self.method)
    }
}

/// The whole two-stage sequence finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineCompleted<'a> {
    pub assembly: &'a str,
}

impl Display for PipelineCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Assembly of '{}' completed", self.assembly)
    }
}
