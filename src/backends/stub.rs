// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory bridge backend for tests.
//!
//! Models just enough of a managed world to exercise the generic layers
//! without a live runtime: images hold classes, classes declare methods
//! (with scripted behaviors) and fields, objects are arena records. Raw
//! metadata lookups are counted so tests can prove the resolver caches,
//! and every invocation is recorded so tests can prove sequencing.

use std::collections::HashMap;

use crate::errors::{HostError, HostResult};
use crate::traits::bridge::{Arg, ManagedRuntimeBridge};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StubImage(usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StubClass(usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StubMethod(usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StubField(usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StubObject(usize);

/// What a scripted method does when invoked.
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Constructor-like: mark the receiver initialized and create its
    /// declared field objects.
    Initialize,
    /// Append the single argument to the receiver's element list.
    Append,
    /// Return a fresh, initialized instance of the given class.
    Produce(StubClass),
    /// Raise a managed exception with the given message.
    Throw(String),
    /// Complete without a return value.
    ReturnNone,
}

/// One recorded argument, as seen at the invoke boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedArg {
    Bool(bool),
    U32(u32),
    I32(i32),
    Str(String),
    Object(StubObject),
}

/// One recorded invocation.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub class: StubClass,
    pub method: String,
    pub arity: usize,
    pub receiver: StubObject,
    pub args: Vec<RecordedArg>,
}

/// Raw metadata walks performed, before any caching layer.
#[derive(Default, Debug)]
pub struct LookupCounters {
    pub classes: usize,
    pub methods: usize,
    pub fields: usize,
}

struct ImageRecord {
    path: String,
}

struct ClassRecord {
    image: usize,
    namespace: String,
    name: String,
    /// (field name, class of the object its initializer creates)
    fields: Vec<(String, StubClass)>,
}

struct MethodRecord {
    class: usize,
    name: String,
    arity: usize,
    behavior: Behavior,
}

struct FieldRecord {
    name: String,
}

#[derive(Default)]
struct ObjectRecord {
    class: usize,
    initialized: bool,
    fields: HashMap<String, StubObject>,
    elements: Vec<StubObject>,
    text: Option<String>,
}

pub struct StubBridge {
    images: Vec<ImageRecord>,
    classes: Vec<ClassRecord>,
    methods: Vec<MethodRecord>,
    fields: Vec<FieldRecord>,
    objects: Vec<ObjectRecord>,
    string_class: StubClass,
    pub lookups: LookupCounters,
    pub invocations: Vec<Invocation>,
}

impl StubBridge {
    /// An empty world with a corlib image carrying `ArrayList`, `Hashtable`
    /// and a string class, like the runtime the production backend embeds.
    pub fn new() -> Self {
        let mut bridge = Self {
            images: vec![ImageRecord {
                path: "corlib".to_string(),
            }],
            classes: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            objects: Vec::new(),
            string_class: StubClass(0),
            lookups: LookupCounters::default(),
            invocations: Vec::new(),
        };
        let corlib = StubImage(0);
        let list = bridge.add_class(corlib, "System.Collections", "ArrayList");
        bridge.add_method(list, "Add", 1, Behavior::Append);
        bridge.add_class(corlib, "System.Collections", "Hashtable");
        bridge.string_class = bridge.add_class(corlib, "System", "String");
        bridge
    }

    pub fn add_image(&mut self, path: &str) -> StubImage {
        self.images.push(ImageRecord {
            path: path.to_string(),
        });
        StubImage(self.images.len() - 1)
    }

    pub fn add_class(&mut self, image: StubImage, namespace: &str, name: &str) -> StubClass {
        self.classes.push(ClassRecord {
            image: image.0,
            namespace: namespace.to_string(),
            name: name.to_string(),
            fields: Vec::new(),
        });
        StubClass(self.classes.len() - 1)
    }

    pub fn add_method(&mut self, class: StubClass, name: &str, arity: usize, behavior: Behavior) {
        self.methods.push(MethodRecord {
            class: class.0,
            name: name.to_string(),
            arity,
            behavior,
        });
    }

    /// Declare a field whose default initializer fills it with a fresh
    /// instance of `value_class`.
    pub fn add_field(&mut self, class: StubClass, name: &str, value_class: StubClass) {
        self.classes[class.0]
            .fields
            .push((name.to_string(), value_class));
    }

    pub fn is_initialized(&self, object: StubObject) -> bool {
        self.objects[object.0].initialized
    }

    pub fn elements(&self, list: StubObject) -> &[StubObject] {
        &self.objects[list.0].elements
    }

    pub fn text(&self, object: StubObject) -> Option<&str> {
        self.objects[object.0].text.as_deref()
    }

    pub fn class_of_object(&self, object: StubObject) -> StubClass {
        StubClass(self.objects[object.0].class)
    }

    /// Count of managed string objects created so far.
    pub fn string_count(&self) -> usize {
        self.objects.iter().filter(|o| o.text.is_some()).count()
    }

    fn fresh_object(&mut self, class: StubClass) -> StubObject {
        self.objects.push(ObjectRecord {
            class: class.0,
            ..ObjectRecord::default()
        });
        StubObject(self.objects.len() - 1)
    }

    fn run_initializer(&mut self, object: StubObject) {
        let declared = self.classes[self.objects[object.0].class].fields.clone();
        for (name, value_class) in declared {
            let value = self.fresh_object(value_class);
            self.objects[value.0].initialized = true;
            self.objects[object.0].fields.insert(name, value);
        }
        self.objects[object.0].initialized = true;
    }

    fn record(&mut self, method: usize, receiver: StubObject, args: &[Arg<StubObject>]) {
        let recorded = args
            .iter()
            .map(|arg| match arg {
                Arg::Bool(value) => RecordedArg::Bool(*value),
                Arg::U32(value) => RecordedArg::U32(*value),
                Arg::I32(value) => RecordedArg::I32(*value),
                Arg::Str(value) => RecordedArg::Str(value.clone()),
                Arg::Object(value) => RecordedArg::Object(*value),
            })
            .collect();
        self.invocations.push(Invocation {
            class: StubClass(self.methods[method].class),
            method: self.methods[method].name.clone(),
            arity: self.methods[method].arity,
            receiver,
            args: recorded,
        });
    }
}

impl Default for StubBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagedRuntimeBridge for StubBridge {
    type Image = StubImage;
    type Class = StubClass;
    type Method = StubMethod;
    type Field = StubField;
    type Object = StubObject;

    fn open_image(&mut self, path: &str) -> HostResult<StubImage> {
        self.images
            .iter()
            .position(|image| image.path == path)
            .map(StubImage)
            .ok_or_else(|| HostError::ImageLoad {
                path: path.to_string(),
            })
    }

    fn corlib(&mut self) -> HostResult<StubImage> {
        Ok(StubImage(0))
    }

    fn find_class(
        &mut self,
        image: StubImage,
        namespace: &str,
        name: &str,
    ) -> HostResult<StubClass> {
        self.lookups.classes += 1;
        self.classes
            .iter()
            .position(|class| {
                class.image == image.0 && class.namespace == namespace && class.name == name
            })
            .map(StubClass)
            .ok_or_else(|| HostError::ClassNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    fn find_method(&mut self, class: StubClass, name: &str, arity: usize) -> HostResult<StubMethod> {
        self.lookups.methods += 1;
        // First match wins, as the embedding API defines it.
        self.methods
            .iter()
            .position(|method| {
                method.class == class.0 && method.name == name && method.arity == arity
            })
            .map(StubMethod)
            .ok_or_else(|| HostError::MethodNotFound {
                class: self.classes[class.0].name.clone(),
                name: name.to_string(),
                arity,
            })
    }

    fn find_field(&mut self, class: StubClass, name: &str) -> HostResult<StubField> {
        self.lookups.fields += 1;
        if !self.classes[class.0].fields.iter().any(|(n, _)| n == name) {
            return Err(HostError::FieldNotFound {
                class: self.classes[class.0].name.clone(),
                name: name.to_string(),
            });
        }
        self.fields.push(FieldRecord {
            name: name.to_string(),
        });
        Ok(StubField(self.fields.len() - 1))
    }

    fn class_of(&mut self, object: StubObject) -> HostResult<StubClass> {
        Ok(StubClass(self.objects[object.0].class))
    }

    fn alloc_object(&mut self, class: StubClass) -> HostResult<StubObject> {
        Ok(self.fresh_object(class))
    }

    fn init_object(&mut self, object: StubObject) -> HostResult<()> {
        self.run_initializer(object);
        Ok(())
    }

    fn invoke(
        &mut self,
        method: StubMethod,
        receiver: StubObject,
        args: &[Arg<StubObject>],
    ) -> HostResult<Option<StubObject>> {
        self.record(method.0, receiver, args);
        let behavior = self.methods[method.0].behavior.clone();
        match behavior {
            Behavior::Initialize => {
                self.run_initializer(receiver);
                Ok(None)
            }
            Behavior::Append => {
                let element = match args.first() {
                    Some(Arg::Object(object)) => *object,
                    Some(Arg::Str(text)) => {
                        let text = text.clone();
                        self.managed_string(&text)?
                    }
                    _ => {
                        return Err(HostError::ManagedException {
                            message: "Add expects an object argument".to_string(),
                        })
                    }
                };
                self.objects[receiver.0].elements.push(element);
                Ok(None)
            }
            Behavior::Produce(class) => {
                let object = self.fresh_object(class);
                self.run_initializer(object);
                Ok(Some(object))
            }
            Behavior::Throw(message) => Err(HostError::ManagedException { message }),
            Behavior::ReturnNone => Ok(None),
        }
    }

    fn managed_string(&mut self, value: &str) -> HostResult<StubObject> {
        let class = self.string_class;
        let object = self.fresh_object(class);
        self.objects[object.0].initialized = true;
        self.objects[object.0].text = Some(value.to_string());
        Ok(object)
    }

    fn read_field(&mut self, object: StubObject, field: StubField) -> HostResult<Option<StubObject>> {
        let name = self.fields[field.0].name.clone();
        Ok(self.objects[object.0].fields.get(&name).copied())
    }

    fn write_field(
        &mut self,
        object: StubObject,
        field: StubField,
        value: &Arg<StubObject>,
    ) -> HostResult<()> {
        let name = self.fields[field.0].name.clone();
        let stored = match value {
            Arg::Object(reference) => *reference,
            Arg::Str(text) => {
                let text = text.clone();
                self.managed_string(&text)?
            }
            Arg::Bool(flag) => {
                let boxed = self.fresh_object(self.string_class);
                self.objects[boxed.0].text = Some(flag.to_string());
                boxed
            }
            Arg::U32(word) => {
                let boxed = self.fresh_object(self.string_class);
                self.objects[boxed.0].text = Some(word.to_string());
                boxed
            }
            Arg::I32(word) => {
                let boxed = self.fresh_object(self.string_class);
                self.objects[boxed.0].text = Some(word.to_string());
                boxed
            }
        };
        self.objects[object.0].fields.insert(name, stored);
        Ok(())
    }
}
