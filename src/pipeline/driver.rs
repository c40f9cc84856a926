// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-stage assemble pipeline over the bridge.
//!
//! The sequence is strictly linear: construct the processor, default-init a
//! documents container, populate its code and net lists from native input,
//! wrap the container in a one-element batch, then validate and decode with
//! the stage-1 result threaded into stage 2. Success or failure of each
//! stage is entirely the managed library's own logic; the driver only
//! sequences and threads.

use crate::bridge::collection::{CollectionAdapter, LIST_NAMESPACE};
use crate::bridge::objects::ObjectBridge;
use crate::config::{LibrarySettings, ProcessorSettings};
use crate::errors::{HostError, HostResult};
use crate::input::AssemblySource;
use crate::observability::messages::pipeline as messages;
use crate::traits::bridge::{Arg, ManagedRuntimeBridge};

pub const COMPILER_NAMESPACE: &str = "ADICtrls";
pub const DOCUMENTS_CLASS: &str = "AssemblyDocuments";
pub const PROCESSOR_NAMESPACE: &str = "Sigma100_Comp";
pub const PROCESSOR_CLASS: &str = "AssemblyProcess100";

const MAP_CLASS: &str = "Hashtable";
const VALIDATE_METHOD: &str = "DetermineValidCodeLine_opt";
const DECODE_METHOD: &str = "Decode";
const CODE_FIELD: &str = "Code";
const NETS_FIELD: &str = "Nets";
const PARAMS_FIELD: &str = "Params";

pub struct PipelineDriver<B: ManagedRuntimeBridge> {
    processor_class: B::Class,
    documents_class: B::Class,
    lists: CollectionAdapter<B>,
    settings: ProcessorSettings,
}

impl<B: ManagedRuntimeBridge> PipelineDriver<B> {
    /// Open both dependency libraries and resolve the full declared class
    /// surface up front. Any missing piece fails here, before any input
    /// line enters a managed collection.
    pub fn new(
        bridge: &mut ObjectBridge<B>,
        libraries: &LibrarySettings,
        settings: ProcessorSettings,
    ) -> HostResult<Self> {
        let lists = CollectionAdapter::new(bridge)?;
        let corlib = bridge.corlib()?;
        // The standard map type is part of the declared dependency surface
        // even though only the managed side touches it.
        bridge.resolve_class(corlib, LIST_NAMESPACE, MAP_CLASS)?;

        let compiler = bridge.open_image(&libraries.compiler)?;
        let profile = bridge.open_image(&libraries.profile_compiler)?;
        let documents_class = bridge.resolve_class(compiler, COMPILER_NAMESPACE, DOCUMENTS_CLASS)?;
        let processor_class = bridge.resolve_class(profile, PROCESSOR_NAMESPACE, PROCESSOR_CLASS)?;

        Ok(Self {
            processor_class,
            documents_class,
            lists,
            settings,
        })
    }

    /// Run the full sequence and return the stage-2 result object.
    pub fn assemble(
        &self,
        bridge: &mut ObjectBridge<B>,
        source: &AssemblySource,
    ) -> HostResult<B::Object> {
        let processor = self.construct_processor(bridge)?;

        let documents = bridge.new_object(self.documents_class)?;
        let code = bridge.get_field(documents, CODE_FIELD)?;
        let nets = bridge.get_field(documents, NETS_FIELD)?;
        // Params stays untouched; reading it verifies the container shape.
        let _params = bridge.get_field(documents, PARAMS_FIELD)?;

        for line in &source.code {
            let text = bridge.managed_string(line)?;
            self.lists.append(bridge, code, text)?;
        }
        for line in &source.nets {
            let text = bridge.managed_string(line)?;
            self.lists.append(bridge, nets, text)?;
        }
        tracing::info!(
            "{}",
            messages::SourcePopulated {
                code_lines: source.code.len(),
                net_lines: source.nets.len(),
            }
        );

        // The public pipeline methods take a batch of containers; this
        // host always submits exactly one.
        let batch = self.lists.new_list(bridge)?;
        self.lists.append(bridge, batch, documents)?;

        let validated = self.run_stage(bridge, processor, VALIDATE_METHOD, batch)?;
        self.run_stage(bridge, processor, DECODE_METHOD, validated)
    }

    fn construct_processor(&self, bridge: &mut ObjectBridge<B>) -> HostResult<B::Object> {
        let settings = &self.settings;
        bridge.construct(
            self.processor_class,
            &[
                Arg::Bool(settings.debug),
                Arg::Str(settings.profile.clone()),
                Arg::U32(settings.word_length),
                Arg::Bool(settings.standalone),
                Arg::Str(settings.output_dir.clone()),
            ],
        )
    }

    fn run_stage(
        &self,
        bridge: &mut ObjectBridge<B>,
        processor: B::Object,
        method: &str,
        input: B::Object,
    ) -> HostResult<B::Object> {
        tracing::info!("{}", messages::StageStarted { method });
        let result = bridge
            .invoke(processor, self.processor_class, method, &[Arg::Object(input)])?
            .ok_or_else(|| HostError::NullResult {
                method: method.to_string(),
            })?;
        tracing::info!("{}", messages::StageCompleted { method });
        Ok(result)
    }
}
