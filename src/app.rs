//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - collects the interactive description (for `run`)
//! - drives the LLM parse and the optimizer bridge
//! - prints summaries/tables
//! - handles the scripting surfaces (`optimize`, `render`, `models`)

use std::fs;
use std::io::Read;
use std::time::Duration;

use clap::Parser;

use crate::bridge::OptimizerBridge;
use crate::cli::{BridgeArgs, Command, OptimizeArgs, RenderArgs, RunArgs};
use crate::error::AppError;
use crate::llm::{GeminiClient, OpenAiClient};
use crate::report::{Assignments, format};

pub mod pipeline;

/// Entry point for the `pack` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Optimize(args) => handle_optimize(args),
        Command::Render(args) => handle_render(args),
        Command::Models => handle_models(),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let description = crate::cli::prompt::collect_description()?;

    let client = OpenAiClient::from_env()?;
    let request = client.parse_request(&description)?;

    println!("\n{}", format::run_summary(&request));
    println!(
        "Parsed request:\n{}\n",
        serde_json::to_string_pretty(&request)
            .map_err(|e| AppError::new(2, format!("Failed to encode request: {e}")))?
    );

    if args.dry_run {
        return Ok(());
    }

    let bridge = bridge_from_args(&args.bridge);
    let run = pipeline::optimize(&bridge, &request)?;

    let table = if args.llm_table {
        client.render_markdown(&run.assignments)?
    } else {
        format::markdown_table(&run.assignments)
    };
    println!("{table}");

    Ok(())
}

fn handle_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let payload = read_input(&args.file)?;

    // Parse locally first so a typo in the request file fails with a clear
    // message instead of whatever the optimizer prints.
    let request: crate::domain::OptimizationRequest = serde_json::from_str(&payload)
        .map_err(|e| AppError::new(2, format!("Request file is not a valid request: {e}")))?;
    crate::domain::validate_request(&request)?;

    let bridge = bridge_from_args(&args.bridge);
    let result = bridge.invoke_raw(&payload)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| AppError::new(2, format!("Failed to encode result: {e}")))?;
    println!("{rendered}");

    Ok(())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let input = read_input(&args.file)?;

    // Results circulate in two shapes: proper JSON from the bridge, and the
    // informal `{bin1=[1, 4]}` map from older engine logs. Try JSON first.
    let assignments = match serde_json::from_str::<serde_json::Value>(&input) {
        Ok(value) => Assignments::from_result_value(&value)?,
        Err(_) => Assignments::parse_informal(&input)?,
    };

    println!("{}", format::markdown_table(&assignments));
    Ok(())
}

fn handle_models() -> Result<(), AppError> {
    let client = GeminiClient::from_env()?;
    let models = client.list_models()?;
    if models.is_empty() {
        println!("No models supporting generateContent for this key.");
        return Ok(());
    }
    for name in models {
        println!("{name}");
    }
    Ok(())
}

/// Build the bridge from CLI flags. `--engine` overrides the jar shape.
pub fn bridge_from_args(args: &BridgeArgs) -> OptimizerBridge {
    let bridge = match &args.engine {
        Some(program) => OptimizerBridge::new(program),
        None => OptimizerBridge::for_jar(&args.jar),
    };
    let timeout = if args.timeout_secs == 0 {
        None
    } else {
        Some(Duration::from_secs(args.timeout_secs))
    };
    bridge
        .timeout(timeout)
        .require_zero_exit(!args.allow_nonzero_exit)
}

/// Read the input for file-or-stdin commands.
fn read_input(file: &Option<std::path::PathBuf>) -> Result<String, AppError> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read {}: {e}", path.display()))),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::new(2, format!("Failed to read stdin: {e}")))?;
            Ok(buf)
        }
    }
}
