// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Raw surface of the Mono embedding API.
//!
//! The embedding library is opened with `dlopen` semantics at startup
//! rather than linked, so the host binary builds and runs usage/I-O error
//! paths on machines without Mono installed; an absent runtime surfaces as
//! an ordinary dependency error. Only the symbols the bridge actually
//! exercises are loaded.

use std::ffi::{c_char, c_int, c_void};

use libloading::Library;

use crate::errors::{HostError, HostResult};

// Opaque metadata and runtime handle types. The embedding API only ever
// hands out pointers to these.
#[repr(C)]
pub struct MonoDomain {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoAssembly {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoImage {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoClass {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoClassField {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoMethod {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoObject {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct MonoString {
    _opaque: [u8; 0],
}

/// Candidate shared-library names for the Mono runtime, tried in order.
#[cfg(target_os = "linux")]
const RUNTIME_LIBRARY_CANDIDATES: &[&str] = &[
    "libmono-2.0.so.1",
    "libmono-2.0.so",
    "libmonosgen-2.0.so.1",
    "libmonosgen-2.0.so",
];
#[cfg(target_os = "macos")]
const RUNTIME_LIBRARY_CANDIDATES: &[&str] = &[
    "libmonosgen-2.0.dylib",
    "/Library/Frameworks/Mono.framework/Versions/Current/lib/libmonosgen-2.0.dylib",
    "libmono-2.0.dylib",
];
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
const RUNTIME_LIBRARY_CANDIDATES: &[&str] = &["mono-2.0-sgen.dll", "mono-2.0.dll"];

/// Function table over the loaded embedding library.
///
/// The `Library` is held for the life of the process; the function pointers
/// are copied out of it once at load time and stay valid as long as it is
/// never unloaded.
pub struct MonoApi {
    _lib: Library,

    pub jit_init: unsafe extern "C" fn(*const c_char) -> *mut MonoDomain,
    pub get_corlib: unsafe extern "C" fn() -> *mut MonoImage,
    pub assembly_open: unsafe extern "C" fn(*const c_char, *mut c_int) -> *mut MonoAssembly,
    pub assembly_get_image: unsafe extern "C" fn(*mut MonoAssembly) -> *mut MonoImage,
    pub class_from_name:
        unsafe extern "C" fn(*mut MonoImage, *const c_char, *const c_char) -> *mut MonoClass,
    pub class_get_method_from_name:
        unsafe extern "C" fn(*mut MonoClass, *const c_char, c_int) -> *mut MonoMethod,
    pub class_get_name: unsafe extern "C" fn(*mut MonoClass) -> *const c_char,
    pub class_get_field_from_name:
        unsafe extern "C" fn(*mut MonoClass, *const c_char) -> *mut MonoClassField,
    pub class_get_methods:
        unsafe extern "C" fn(*mut MonoClass, *mut *mut c_void) -> *mut MonoMethod,
    pub method_full_name: unsafe extern "C" fn(*mut MonoMethod, c_int) -> *mut c_char,
    pub object_new: unsafe extern "C" fn(*mut MonoDomain, *mut MonoClass) -> *mut MonoObject,
    pub runtime_object_init: unsafe extern "C" fn(*mut MonoObject),
    pub runtime_invoke: unsafe extern "C" fn(
        *mut MonoMethod,
        *mut c_void,
        *mut *mut c_void,
        *mut *mut MonoObject,
    ) -> *mut MonoObject,
    pub string_new: unsafe extern "C" fn(*mut MonoDomain, *const c_char) -> *mut MonoString,
    pub string_to_utf8: unsafe extern "C" fn(*mut MonoString) -> *mut c_char,
    pub object_get_class: unsafe extern "C" fn(*mut MonoObject) -> *mut MonoClass,
    pub object_to_string:
        unsafe extern "C" fn(*mut MonoObject, *mut *mut MonoObject) -> *mut MonoString,
    pub field_get_value:
        unsafe extern "C" fn(*mut MonoObject, *mut MonoClassField, *mut c_void),
    pub field_set_value:
        unsafe extern "C" fn(*mut MonoObject, *mut MonoClassField, *mut c_void),
    pub mono_free: unsafe extern "C" fn(*mut c_void),
}

impl MonoApi {
    /// Open the runtime library and resolve the embedding surface.
    pub fn load() -> HostResult<Self> {
        let lib = open_runtime_library()?;
        Ok(Self {
            jit_init: symbol(&lib, b"mono_jit_init\0")?,
            get_corlib: symbol(&lib, b"mono_get_corlib\0")?,
            assembly_open: symbol(&lib, b"mono_assembly_open\0")?,
            assembly_get_image: symbol(&lib, b"mono_assembly_get_image\0")?,
            class_from_name: symbol(&lib, b"mono_class_from_name\0")?,
            class_get_method_from_name: symbol(&lib, b"mono_class_get_method_from_name\0")?,
            class_get_name: symbol(&lib, b"mono_class_get_name\0")?,
            class_get_field_from_name: symbol(&lib, b"mono_class_get_field_from_name\0")?,
            class_get_methods: symbol(&lib, b"mono_class_get_methods\0")?,
            method_full_name: symbol(&lib, b"mono_method_full_name\0")?,
            object_new: symbol(&lib, b"mono_object_new\0")?,
            runtime_object_init: symbol(&lib, b"mono_runtime_object_init\0")?,
            runtime_invoke: symbol(&lib, b"mono_runtime_invoke\0")?,
            string_new: symbol(&lib, b"mono_string_new\0")?,
            string_to_utf8: symbol(&lib, b"mono_string_to_utf8\0")?,
            object_get_class: symbol(&lib, b"mono_object_get_class\0")?,
            object_to_string: symbol(&lib, b"mono_object_to_string\0")?,
            field_get_value: symbol(&lib, b"mono_field_get_value\0")?,
            field_set_value: symbol(&lib, b"mono_field_set_value\0")?,
            mono_free: symbol(&lib, b"mono_free\0")?,
            _lib: lib,
        })
    }
}

fn open_runtime_library() -> HostResult<Library> {
    let mut last_error = None;
    for candidate in RUNTIME_LIBRARY_CANDIDATES {
        match unsafe { Library::new(candidate) } {
            Ok(lib) => {
                tracing::debug!(
                    "{}",
                    crate::observability::messages::bridge::RuntimeLibraryLoaded {
                        library: candidate,
                    }
                );
                return Ok(lib);
            }
            Err(error) => last_error = Some(error),
        }
    }
    Err(HostError::RuntimeUnavailable(format!(
        "none of {} could be opened: {}",
        RUNTIME_LIBRARY_CANDIDATES.join(", "),
        last_error.map_or_else(|| "no candidates".to_string(), |e| e.to_string()),
    )))
}

fn symbol<T: Copy>(lib: &Library, name: &'static [u8]) -> HostResult<T> {
    unsafe {
        lib.get::<T>(name).map(|found| *found).map_err(|error| {
            HostError::RuntimeUnavailable(format!(
                "symbol {} missing from runtime library: {}",
                String::from_utf8_lossy(&name[..name.len() - 1]),
                error
            ))
        })
    }
}
