// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Mono embedding backend.
//!
//! Thin adapter between [`ManagedRuntimeBridge`] and the raw embedding API
//! in [`api`]. Owns the single runtime domain for the process. Handles are
//! opaque pointers into the domain and stay valid for the remaining process
//! lifetime; the domain itself is abandoned at exit rather than torn down.

pub mod api;

use std::ffi::{c_int, c_void, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::{HostError, HostResult};
use crate::observability::messages::bridge as messages;
use crate::traits::bridge::{Arg, ManagedRuntimeBridge};

use self::api::{MonoApi, MonoClass, MonoClassField, MonoDomain, MonoImage, MonoMethod, MonoObject};

/// Name the runtime domain is registered under.
const DOMAIN_NAME: &str = "sigmadsp-asm";

/// One domain per process.
static DOMAIN_INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ImageRef(*mut MonoImage);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClassRef(*mut MonoClass);

#[derive(Clone, Copy, Debug)]
pub struct MethodRef(*mut MonoMethod);

#[derive(Clone, Copy, Debug)]
pub struct FieldRef(*mut MonoClassField);

#[derive(Clone, Copy, Debug)]
pub struct ObjectRef(*mut MonoObject);

/// Native storage for one marshaled argument slot. Primitive slots must
/// outlive the invoke call they are passed to.
enum Slot {
    Bool(u8),
    Word(u32),
    Reference(*mut c_void),
}

impl Slot {
    fn as_raw(&mut self) -> *mut c_void {
        match self {
            Slot::Bool(value) => value as *mut u8 as *mut c_void,
            Slot::Word(value) => value as *mut u32 as *mut c_void,
            Slot::Reference(pointer) => *pointer,
        }
    }
}

/// The live runtime domain and the loaded embedding API.
pub struct MonoBridge {
    api: MonoApi,
    domain: *mut MonoDomain,
}

impl MonoBridge {
    /// Load the embedding library, configure the process environment, and
    /// create the runtime domain. May be called once per process.
    pub fn new() -> HostResult<Self> {
        let api = MonoApi::load()?;

        if DOMAIN_INITIALIZED.swap(true, Ordering::SeqCst) {
            return Err(HostError::DomainAlreadyInitialized);
        }

        // Permissive path casing and separator mapping for file lookups the
        // managed libraries perform. Must be set before the domain exists.
        std::env::set_var("MONO_IOMAP", "all");

        let name = native_name(DOMAIN_NAME)?;
        let domain = unsafe { (api.jit_init)(name.as_ptr()) };
        if domain.is_null() {
            DOMAIN_INITIALIZED.store(false, Ordering::SeqCst);
            return Err(HostError::RuntimeUnavailable(
                "creating the runtime domain failed".to_string(),
            ));
        }

        tracing::info!("{}", messages::DomainInitialized { domain: DOMAIN_NAME });
        Ok(Self { api, domain })
    }

    fn class_name(&self, class: ClassRef) -> String {
        let raw = unsafe { (self.api.class_get_name)(class.0) };
        if raw.is_null() {
            return "<unnamed>".to_string();
        }
        unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
    }

    /// Log every method signature the class exposes, for diagnosing a
    /// failed lookup against a drifted library version.
    fn log_available_methods(&self, class: ClassRef) {
        let mut iter: *mut c_void = ptr::null_mut();
        loop {
            let method = unsafe { (self.api.class_get_methods)(class.0, &mut iter) };
            if method.is_null() {
                break;
            }
            let full_name = unsafe { (self.api.method_full_name)(method, 1) };
            if full_name.is_null() {
                continue;
            }
            let signature = unsafe { CStr::from_ptr(full_name) }
                .to_string_lossy()
                .into_owned();
            unsafe { (self.api.mono_free)(full_name.cast()) };
            tracing::debug!(
                "{}",
                messages::CandidateMethod {
                    signature: &signature,
                }
            );
        }
    }

    fn raw_string(&mut self, value: &str) -> HostResult<*mut MonoObject> {
        let native = native_name(value)?;
        let string = unsafe { (self.api.string_new)(self.domain, native.as_ptr()) };
        if string.is_null() {
            return Err(HostError::Allocation {
                class: "System.String".to_string(),
            });
        }
        Ok(string.cast())
    }

    fn exception_message(&mut self, exception: *mut MonoObject) -> String {
        let mut nested: *mut MonoObject = ptr::null_mut();
        let rendered = unsafe { (self.api.object_to_string)(exception, &mut nested) };
        if rendered.is_null() || !nested.is_null() {
            return "unknown managed exception".to_string();
        }
        let utf8 = unsafe { (self.api.string_to_utf8)(rendered) };
        if utf8.is_null() {
            return "unknown managed exception".to_string();
        }
        let message = unsafe { CStr::from_ptr(utf8) }.to_string_lossy().into_owned();
        unsafe { (self.api.mono_free)(utf8.cast()) };
        message
    }

    fn marshal(&mut self, args: &[Arg<ObjectRef>]) -> HostResult<Vec<Slot>> {
        let mut slots = Vec::with_capacity(args.len());
        for arg in args {
            slots.push(match arg {
                Arg::Bool(value) => Slot::Bool(u8::from(*value)),
                Arg::U32(value) => Slot::Word(*value),
                Arg::I32(value) => Slot::Word(*value as u32),
                Arg::Str(value) => Slot::Reference(self.raw_string(value)?.cast()),
                Arg::Object(object) => Slot::Reference(object.0.cast()),
            });
        }
        Ok(slots)
    }
}

impl ManagedRuntimeBridge for MonoBridge {
    type Image = ImageRef;
    type Class = ClassRef;
    type Method = MethodRef;
    type Field = FieldRef;
    type Object = ObjectRef;

    fn open_image(&mut self, path: &str) -> HostResult<ImageRef> {
        let native = native_name(path)?;
        let mut status: c_int = 0;
        let assembly = unsafe { (self.api.assembly_open)(native.as_ptr(), &mut status) };
        if assembly.is_null() {
            tracing::error!("{}", messages::ImageLoadFailed { path, status });
            return Err(HostError::ImageLoad {
                path: path.to_string(),
            });
        }
        let image = unsafe { (self.api.assembly_get_image)(assembly) };
        if image.is_null() {
            return Err(HostError::ImageLoad {
                path: path.to_string(),
            });
        }
        tracing::info!("{}", messages::ImageLoaded { path });
        Ok(ImageRef(image))
    }

    fn corlib(&mut self) -> HostResult<ImageRef> {
        let image = unsafe { (self.api.get_corlib)() };
        if image.is_null() {
            return Err(HostError::ImageLoad {
                path: "corlib".to_string(),
            });
        }
        Ok(ImageRef(image))
    }

    fn find_class(
        &mut self,
        image: ImageRef,
        namespace: &str,
        name: &str,
    ) -> HostResult<ClassRef> {
        let native_namespace = native_name(namespace)?;
        let native_class = native_name(name)?;
        let class = unsafe {
            (self.api.class_from_name)(image.0, native_namespace.as_ptr(), native_class.as_ptr())
        };
        if class.is_null() {
            return Err(HostError::ClassNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        tracing::debug!("{}", messages::ClassResolved { namespace, name });
        Ok(ClassRef(class))
    }

    fn find_method(&mut self, class: ClassRef, name: &str, arity: usize) -> HostResult<MethodRef> {
        let native = native_name(name)?;
        let method = unsafe {
            (self.api.class_get_method_from_name)(class.0, native.as_ptr(), arity as c_int)
        };
        if method.is_null() {
            self.log_available_methods(class);
            return Err(HostError::MethodNotFound {
                class: self.class_name(class),
                name: name.to_string(),
                arity,
            });
        }
        tracing::debug!(
            "{}",
            messages::MethodResolved {
                class: &self.class_name(class),
                name,
                arity,
            }
        );
        Ok(MethodRef(method))
    }

    fn find_field(&mut self, class: ClassRef, name: &str) -> HostResult<FieldRef> {
        let native = native_name(name)?;
        let field = unsafe { (self.api.class_get_field_from_name)(class.0, native.as_ptr()) };
        if field.is_null() {
            return Err(HostError::FieldNotFound {
                class: self.class_name(class),
                name: name.to_string(),
            });
        }
        Ok(FieldRef(field))
    }

    fn class_of(&mut self, object: ObjectRef) -> HostResult<ClassRef> {
        let class = unsafe { (self.api.object_get_class)(object.0) };
        if class.is_null() {
            return Err(HostError::ClassNotFound {
                namespace: String::new(),
                name: "<object class>".to_string(),
            });
        }
        Ok(ClassRef(class))
    }

    fn alloc_object(&mut self, class: ClassRef) -> HostResult<ObjectRef> {
        let object = unsafe { (self.api.object_new)(self.domain, class.0) };
        if object.is_null() {
            return Err(HostError::Allocation {
                class: self.class_name(class),
            });
        }
        Ok(ObjectRef(object))
    }

    fn init_object(&mut self, object: ObjectRef) -> HostResult<()> {
        unsafe { (self.api.runtime_object_init)(object.0) };
        Ok(())
    }

    fn invoke(
        &mut self,
        method: MethodRef,
        receiver: ObjectRef,
        args: &[Arg<ObjectRef>],
    ) -> HostResult<Option<ObjectRef>> {
        let mut slots = self.marshal(args)?;
        let mut raw: Vec<*mut c_void> = slots.iter_mut().map(Slot::as_raw).collect();
        let mut exception: *mut MonoObject = ptr::null_mut();

        let result = unsafe {
            (self.api.runtime_invoke)(
                method.0,
                receiver.0.cast(),
                raw.as_mut_ptr(),
                &mut exception,
            )
        };

        if !exception.is_null() {
            let message = self.exception_message(exception);
            tracing::warn!("{}", messages::ManagedExceptionRaised { message: &message });
            return Err(HostError::ManagedException { message });
        }

        Ok(if result.is_null() {
            None
        } else {
            Some(ObjectRef(result))
        })
    }

    fn managed_string(&mut self, value: &str) -> HostResult<ObjectRef> {
        Ok(ObjectRef(self.raw_string(value)?))
    }

    fn read_field(&mut self, object: ObjectRef, field: FieldRef) -> HostResult<Option<ObjectRef>> {
        let mut value: *mut MonoObject = ptr::null_mut();
        unsafe {
            (self.api.field_get_value)(
                object.0,
                field.0,
                (&mut value as *mut *mut MonoObject).cast(),
            )
        };
        Ok(if value.is_null() {
            None
        } else {
            Some(ObjectRef(value))
        })
    }

    fn write_field(
        &mut self,
        object: ObjectRef,
        field: FieldRef,
        value: &Arg<ObjectRef>,
    ) -> HostResult<()> {
        let mut slot = match value {
            Arg::Bool(flag) => Slot::Bool(u8::from(*flag)),
            Arg::U32(word) => Slot::Word(*word),
            Arg::I32(word) => Slot::Word(*word as u32),
            Arg::Str(text) => Slot::Reference(self.raw_string(text)?.cast()),
            Arg::Object(reference) => Slot::Reference(reference.0.cast()),
        };
        unsafe { (self.api.field_set_value)(object.0, field.0, slot.as_raw()) };
        Ok(())
    }
}

fn native_name(value: &str) -> HostResult<CString> {
    CString::new(value).map_err(|_| HostError::InvalidName(value.to_string()))
}
