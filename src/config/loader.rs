// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::consts::{
    DEFAULT_COMPILER_LIBRARY, DEFAULT_DEBUG, DEFAULT_OUTPUT_DIR, DEFAULT_PROFILE,
    DEFAULT_PROFILE_LIBRARY, DEFAULT_STANDALONE, DEFAULT_WORD_LENGTH, SETTINGS_ENV_VAR,
};
use crate::errors::{HostError, HostResult};

/// Host settings.
///
/// Everything has a built-in default matching the processor's stock
/// parameter vector; a YAML file can override any subset.
///
/// # Example
/// ```yaml
/// processor:
///   debug: false
///   word_length: 4
/// libraries:
///   profile_compiler: Sigma200Compiler.dll
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub processor: ProcessorSettings,
    #[serde(default)]
    pub libraries: LibrarySettings,
}

/// The managed processor's five constructor parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorSettings {
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default = "default_word_length")]
    pub word_length: u32,
    #[serde(default = "default_standalone")]
    pub standalone: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            debug: DEFAULT_DEBUG,
            profile: DEFAULT_PROFILE.to_string(),
            word_length: DEFAULT_WORD_LENGTH,
            standalone: DEFAULT_STANDALONE,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

/// File names of the two managed dependency libraries, resolved on the
/// runtime's search path.
#[derive(Debug, Clone, Deserialize)]
pub struct LibrarySettings {
    #[serde(default = "default_compiler_library")]
    pub compiler: String,
    #[serde(default = "default_profile_library")]
    pub profile_compiler: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER_LIBRARY.to_string(),
            profile_compiler: DEFAULT_PROFILE_LIBRARY.to_string(),
        }
    }
}

fn default_debug() -> bool {
    DEFAULT_DEBUG
}
fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}
fn default_word_length() -> u32 {
    DEFAULT_WORD_LENGTH
}
fn default_standalone() -> bool {
    DEFAULT_STANDALONE
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}
fn default_compiler_library() -> String {
    DEFAULT_COMPILER_LIBRARY.to_string()
}
fn default_profile_library() -> String {
    DEFAULT_PROFILE_LIBRARY.to_string()
}

/// Load settings from the file named by `SIGMA_ASM_CONFIG`, or defaults
/// when the variable is unset.
pub fn load_settings() -> HostResult<Settings> {
    match std::env::var(SETTINGS_ENV_VAR) {
        Ok(path) => load_settings_from(Path::new(&path)),
        Err(_) => Ok(Settings::default()),
    }
}

/// Load settings from a YAML file.
pub fn load_settings_from(path: &Path) -> HostResult<Settings> {
    let content = fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|error| HostError::Config {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_stock_parameter_vector() {
        let settings = Settings::default();
        assert!(settings.processor.debug);
        assert_eq!(settings.processor.profile, "SIGMA100");
        assert_eq!(settings.processor.word_length, 5);
        assert!(!settings.processor.standalone);
        assert_eq!(settings.processor.output_dir, "output/");
        assert_eq!(settings.libraries.compiler, "SigmaCompiler.dll");
        assert_eq!(settings.libraries.profile_compiler, "Sigma100Compiler.dll");
    }

    #[test]
    fn parse_full_settings() {
        let yaml = r#"
processor:
  debug: false
  profile: SIGMA200
  word_length: 4
  standalone: true
  output_dir: build/
libraries:
  compiler: SigmaCompiler.dll
  profile_compiler: Sigma200Compiler.dll
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(!settings.processor.debug);
        assert_eq!(settings.processor.profile, "SIGMA200");
        assert_eq!(settings.processor.word_length, 4);
        assert!(settings.processor.standalone);
        assert_eq!(settings.libraries.profile_compiler, "Sigma200Compiler.dll");
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let yaml = r#"
processor:
  word_length: 6
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.processor.word_length, 6);
        assert!(settings.processor.debug);
        assert_eq!(settings.processor.profile, "SIGMA100");
        assert_eq!(settings.libraries.compiler, "SigmaCompiler.dll");
    }

    #[test]
    fn load_from_file_round_trips() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"processor:\n  profile: SIGMA300\n").unwrap();

        let settings = load_settings_from(file.path()).unwrap();
        assert_eq!(settings.processor.profile, "SIGMA300");
    }

    #[test]
    fn malformed_settings_file_is_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"processor: [not, a, mapping]\n").unwrap();

        let result = load_settings_from(file.path());
        assert!(matches!(result, Err(HostError::Config { .. })));
    }

    #[test]
    fn missing_settings_file_is_an_io_error() {
        let result = load_settings_from(Path::new("/nonexistent/settings.yaml"));
        assert!(matches!(result, Err(HostError::Io { .. })));
    }
}
