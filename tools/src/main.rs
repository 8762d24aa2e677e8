use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gamedissect_tools::{
    collect_capture_files, dissect_connection, format_frame_pretty, format_table,
    parse_schema_directory, ConnectionReport, WireFormatDecoder,
};
use schema::{CommandTable, SchemaDirectory, StructuralDecoder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wire::Transport;

#[derive(Parser)]
#[command(
    name = "gamedissect",
    version,
    about = "Frame, resynchronize and decode game protocol captures"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dissect reassembled per-connection byte files.
    Dissect {
        /// A connection's bytes, or a directory of them.
        capture_path: PathBuf,
        /// Transport the bytes were carried over.
        #[arg(long, value_enum)]
        transport: TransportArg,
        /// Schema directory JSON (command enumerations and message names).
        #[arg(long)]
        schema: PathBuf,
        /// Optional glob filter when dissecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Replay each file as reads of this many bytes.
        #[arg(long)]
        chunk: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print a transport's command table.
    Table {
        /// Transport whose table to build.
        #[arg(long, value_enum)]
        transport: TransportArg,
        /// Schema directory JSON.
        #[arg(long)]
        schema: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TransportArg {
    Stream,
    Datagram,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Stream => Self::Stream,
            TransportArg::Datagram => Self::Datagram,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Dissect {
            capture_path,
            transport,
            schema,
            glob,
            chunk,
            format,
        } => {
            let transport = Transport::from(transport);
            let table = Arc::new(load_table(&schema, transport)?);
            let decoder: Arc<dyn StructuralDecoder> = Arc::new(WireFormatDecoder::default());

            let files = if capture_path.is_dir() {
                collect_capture_files(&capture_path, glob.as_deref())?
            } else {
                vec![capture_path]
            };
            info!(files = files.len(), %transport, "dissecting captures");

            for path in files {
                let bytes =
                    fs::read(&path).with_context(|| format!("read capture {}", path.display()))?;
                let report = dissect_connection(
                    path.display().to_string(),
                    Arc::clone(&table),
                    Arc::clone(&decoder),
                    &bytes,
                    chunk,
                );
                if let Some(error) = &report.error {
                    warn!(source = %report.source, %error, "connection aborted");
                }
                print_report(&report, format)?;
            }
        }
        Command::Table { transport, schema } => {
            let table = load_table(&schema, transport.into())?;
            print!("{}", format_table(&table));
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<SchemaDirectory> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
    parse_schema_directory(&contents).context("parse schema json")
}

fn load_table(path: &Path, transport: Transport) -> Result<CommandTable> {
    let directory = load_schema(path).context("load schema")?;
    directory
        .command_table(transport)
        .with_context(|| format!("build {transport} command table"))
}

fn print_report(report: &ConnectionReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => {
            println!(
                "== {} ({}, {} frames) ==",
                report.source,
                report.transport,
                report.frames.len()
            );
            for frame in &report.frames {
                println!("{}", format_frame_pretty(frame));
            }
            if report.buffered > 0 {
                println!("({} bytes left unconsumed)", report.buffered);
            }
            if let Some(error) = &report.error {
                println!("aborted: {error}");
            }
        }
    }
    Ok(())
}
