// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The domain-specific drive sequence.
//!
//! Everything below this module is generic over any managed library; this
//! module alone knows the SigmaDSP assembler's class names, field names,
//! constructor signature, and two-stage method sequence.

pub mod driver;

pub use driver::PipelineDriver;
