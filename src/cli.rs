use crate::analysis::analyze_process_with_config;
use crate::config::load_config;
use crate::ir::Position;
use crate::layout::compute_layout_with_config;
use crate::layout_dump::{LayoutDump, positions_json, write_layout_dump};
use crate::parser::parse_graph;
use crate::report::{prompt_context, render_text};
use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plangraph", version, about = "Auto-layout and completeness analysis for plan graphs")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assign every node a position from the graph topology
    Layout(LayoutArgs),
    /// Score the plan and list what it is missing
    Analyze(AnalyzeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Graph snapshot (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Anchor X
    #[arg(long = "origin-x", default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_x: f32,

    /// Anchor Y
    #[arg(long = "origin-y", default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_y: f32,

    /// Emit levels, bounds and removed edges alongside positions
    #[arg(long = "dump")]
    pub dump: bool,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ReportFormat {
    Text,
    Json,
    Prompt,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    match args.command {
        Command::Layout(layout_args) => run_layout(layout_args),
        Command::Analyze(analyze_args) => run_analyze(analyze_args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let config = load_config(args.input.config.as_deref())?;
    let input = read_input(args.input.input.as_deref())?;
    let parsed = parse_graph(&input)?;
    let graph = parsed.graph;
    let origin = Position::new(args.origin_x, args.origin_y);

    let layout = compute_layout_with_config(&graph.nodes, &graph.edges, origin, &config.layout);
    if !layout.removed_edges.is_empty() {
        tracing::info!(removed = layout.removed_edges.len(), "cycles broken for leveling");
    }
    match (args.dump, args.output.as_deref()) {
        (true, Some(path)) => write_layout_dump(path, &layout, &graph),
        (true, None) => write_output(
            &serde_json::to_string_pretty(&LayoutDump::from_layout(&layout, &graph))?,
            None,
        ),
        (false, output) => write_output(&positions_json(&layout.positions())?, output),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.input.config.as_deref())?;
    let input = read_input(args.input.input.as_deref())?;
    let graph = parse_graph(&input)?.graph;

    let analysis = analyze_process_with_config(&graph.nodes, &graph.edges, &config.analysis);
    let output = match args.format {
        ReportFormat::Text => render_text(&analysis),
        ReportFormat::Json => serde_json::to_string_pretty(&analysis)?,
        ReportFormat::Prompt => prompt_context(&analysis),
    };
    write_output(&output, None)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_layout_subcommand() {
        let args = Args::try_parse_from([
            "plangraph",
            "layout",
            "-i",
            "graph.json",
            "--origin-x",
            "-120",
            "--dump",
        ])
        .unwrap();
        let Command::Layout(layout) = args.command else {
            panic!("expected layout subcommand");
        };
        assert_eq!(layout.input.input, Some(PathBuf::from("graph.json")));
        assert_eq!(layout.origin_x, -120.0);
        assert!(layout.dump);
    }

    #[test]
    fn parses_analyze_format() {
        let args = Args::try_parse_from(["plangraph", "analyze", "-f", "prompt"]).unwrap();
        let Command::Analyze(analyze) = args.command else {
            panic!("expected analyze subcommand");
        };
        assert!(matches!(analyze.format, ReportFormat::Prompt));
        assert!(analyze.input.input.is_none());
    }
}
