// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Constructor defaults for the managed assembly processor.
pub const DEFAULT_DEBUG: bool = true;
/// Target DSP profile identifier.
pub const DEFAULT_PROFILE: &str = "SIGMA100";
/// Instruction word length, in bytes.
pub const DEFAULT_WORD_LENGTH: u32 = 5;
/// Standalone-assembly mode flag.
pub const DEFAULT_STANDALONE: bool = false;
/// Directory the managed side writes its outputs into.
pub const DEFAULT_OUTPUT_DIR: &str = "output/";

/// Shared compiler library (documents container and common types).
pub const DEFAULT_COMPILER_LIBRARY: &str = "SigmaCompiler.dll";
/// Profile-specific compiler library (the processor type).
pub const DEFAULT_PROFILE_LIBRARY: &str = "Sigma100Compiler.dll";

/// Environment variable naming an optional YAML settings file.
pub const SETTINGS_ENV_VAR: &str = "SIGMA_ASM_CONFIG";
