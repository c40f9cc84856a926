// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Source file ingestion.
//!
//! Reads plain-text inputs one logical record per line, stripping bare
//! `\n` and `\r\n` terminators. No other preprocessing happens here (no
//! comment stripping, no whitespace trimming); the managed side sees the
//! line exactly as written. Files are fully consumed and closed before the
//! runtime domain exists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{HostError, HostResult};
use crate::observability::messages::pipeline::SourceLoaded;

/// The native-side input to one pipeline run: assembly source lines and
/// (optionally) net-list lines.
#[derive(Debug, Default)]
pub struct AssemblySource {
    pub code: Vec<String>,
    pub nets: Vec<String>,
}

impl AssemblySource {
    pub fn read(assembly: &Path, netlist: Option<&Path>) -> HostResult<Self> {
        let code = read_lines(assembly)?;
        let nets = match netlist {
            Some(path) => read_lines(path)?,
            None => Vec::new(),
        };
        Ok(Self { code, nets })
    }
}

/// Read every line of a text file with line terminators stripped.
///
/// `BufRead::lines` removes a trailing `\n` and a `\r` preceding it, which
/// is exactly the normalization the managed side expects; a final line
/// without a terminator is returned as-is.
pub fn read_lines(path: &Path) -> HostResult<Vec<String>> {
    let file = File::open(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?);
    }

    tracing::info!(
        "{}",
        SourceLoaded {
            path: &path.display().to_string(),
            lines: lines.len(),
        }
    );
    Ok(lines)
}
