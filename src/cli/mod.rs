//! Command-line parsing for the inventory optimization agent.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the bridge/LLM code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pack", version, about = "Inventory bin-packing agent (LLM + external optimizer)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive workflow: describe items/bins, LLM-parse, optimize, render.
    Run(RunArgs),
    /// Pipe a request JSON (file or stdin) straight to the optimizer.
    Optimize(OptimizeArgs),
    /// Render a result (JSON or `{bin=[...]}` map) as a Markdown table locally.
    Render(RenderArgs),
    /// List Gemini models available to the configured GOOGLE_API_KEY.
    Models,
}

/// Options shared by every command that spawns the optimizer.
#[derive(Debug, Args, Clone)]
pub struct BridgeArgs {
    /// Path to the optimizer jar (run as `java -jar <path>`).
    #[arg(long, default_value = "ga_opt/target/optimizer-1.0.jar")]
    pub jar: PathBuf,

    /// Run an arbitrary executable instead of a jar.
    #[arg(long, conflicts_with = "jar")]
    pub engine: Option<PathBuf>,

    /// Deadline for one optimizer run, in seconds (0 disables the deadline).
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Accept a result even if the optimizer exits non-zero.
    #[arg(long)]
    pub allow_nonzero_exit: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub bridge: BridgeArgs,

    /// Ask the LLM to render the result table instead of formatting locally.
    #[arg(long)]
    pub llm_table: bool,

    /// Stop after printing the parsed request (no optimizer run).
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub bridge: BridgeArgs,

    /// Request JSON file (reads stdin when omitted).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Pretty-print the result JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Result file: JSON or the informal `{bin1=[1, 4]}` syntax (stdin when
    /// omitted).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimize_defaults() {
        let cli = Cli::parse_from(["pack", "optimize"]);
        let Command::Optimize(args) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.bridge.timeout_secs, 120);
        assert!(!args.bridge.allow_nonzero_exit);
        assert!(args.file.is_none());
    }

    #[test]
    fn engine_conflicts_with_jar() {
        let parsed = Cli::try_parse_from([
            "pack", "optimize", "--jar", "a.jar", "--engine", "./engine",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from(["pack", "run", "--dry-run", "--llm-table", "--timeout-secs", "5"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.dry_run);
        assert!(args.llm_table);
        assert_eq!(args.bridge.timeout_secs, 5);
    }
}
