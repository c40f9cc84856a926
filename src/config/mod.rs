// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
mod loader;

pub use loader::{load_settings, load_settings_from, LibrarySettings, ProcessorSettings, Settings};
