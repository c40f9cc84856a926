// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::path::Path;
use std::process;

use sigmadsp_asm::backends::mono::MonoBridge;
use sigmadsp_asm::bridge::ObjectBridge;
use sigmadsp_asm::config::load_settings;
use sigmadsp_asm::errors::HostResult;
use sigmadsp_asm::input::AssemblySource;
use sigmadsp_asm::observability::messages::pipeline::PipelineCompleted;
use sigmadsp_asm::pipeline::PipelineDriver;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <assembly file> [netlist file]", args[0]);
        process::exit(1);
    }

    if let Err(error) = run(Path::new(&args[1]), args.get(2).map(Path::new)) {
        println!("{error}");
        process::exit(1);
    }
}

fn run(assembly: &Path, netlist: Option<&Path>) -> HostResult<()> {
    let settings = load_settings()?;

    // Input files are fully consumed and closed before the runtime domain
    // exists.
    let source = AssemblySource::read(assembly, netlist)?;

    let mut bridge = ObjectBridge::new(MonoBridge::new()?);
    let driver = PipelineDriver::new(&mut bridge, &settings.libraries, settings.processor)?;
    let _binary = driver.assemble(&mut bridge, &source)?;

    tracing::info!(
        "{}",
        PipelineCompleted {
            assembly: &assembly.display().to_string(),
        }
    );
    Ok(())
}
