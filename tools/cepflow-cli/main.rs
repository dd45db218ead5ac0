use cepflow::prelude::*;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// This struct matches the editor's flat graph export and is only used here.

#[derive(Deserialize)]
struct FlowFile {
    nodes: Vec<FlowNode>,
    #[serde(default)]
    edges: Vec<FlowEdge>,
}

/// A graph compilation and validation engine for complex-event-pattern flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a flat flow graph and print its diagnostics
    Validate {
        /// Path to the flow graph JSON file
        flow_path: String,
    },
    /// Compile a flat flow graph into a hierarchical pattern document
    Compile {
        /// Path to the flow graph JSON file
        flow_path: String,
        /// Address nodes by their flat editor ids instead of display names
        #[arg(long)]
        id_addressing: bool,
    },
    /// Partition a flat flow graph into when-then rule clauses
    Partition {
        /// Path to the flow graph JSON file
        flow_path: String,
        /// Address nodes by their flat editor ids instead of display names
        #[arg(long)]
        id_addressing: bool,
    },
    /// Compress and base64-encode a snapshot JSON file into one envelope string
    Encode {
        /// Path to the snapshot JSON file
        snapshot_path: String,
    },
    /// Decode an envelope string file back into pretty-printed snapshot JSON
    Decode {
        /// Path to the file holding the envelope string
        envelope_path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { flow_path } => run_validate(&flow_path),
        Command::Compile {
            flow_path,
            id_addressing,
        } => run_compile(&flow_path, addressing(id_addressing)),
        Command::Partition {
            flow_path,
            id_addressing,
        } => run_partition(&flow_path, addressing(id_addressing)),
        Command::Encode { snapshot_path } => run_encode(&snapshot_path),
        Command::Decode { envelope_path } => run_decode(&envelope_path),
    }
}

fn addressing(id_addressing: bool) -> Addressing {
    if id_addressing {
        Addressing::Id
    } else {
        Addressing::Name
    }
}

fn load_flow(flow_path: &str) -> FlowFile {
    let flow_json = fs::read_to_string(flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", flow_path, e))
    });
    serde_json::from_str(&flow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow JSON: {}", e)))
}

fn run_validate(flow_path: &str) {
    let flow = load_flow(flow_path);

    let start = Instant::now();
    let report = validate(&flow.nodes, &flow.edges, false);
    let duration = start.elapsed();

    if report.is_clean() {
        println!(
            "Flow is valid: {} nodes, {} edges checked in {:?}",
            flow.nodes.len(),
            flow.edges.len(),
            duration
        );
        return;
    }

    println!("Found {} problem(s):", report.diagnostics.len());
    for diagnostic in &report.diagnostics {
        println!(
            "  [{:?}] {} ({}): {}",
            diagnostic.kind, diagnostic.node_name, diagnostic.node_id, diagnostic.message
        );
    }
    std::process::exit(1);
}

fn run_compile(flow_path: &str, addressing: Addressing) {
    let flow = load_flow(flow_path);

    let start = Instant::now();
    let document = compile_pattern(&flow.nodes, &flow.edges, addressing)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    let duration = start.elapsed();

    eprintln!(
        "Compiled {} top-level pattern node(s) in {:?}",
        document.nodes.len(),
        duration
    );
    print_json(&document);
}

fn run_partition(flow_path: &str, addressing: Addressing) {
    let flow = load_flow(flow_path);

    let start = Instant::now();
    let clauses = partition_when_then(&flow.nodes, &flow.edges, addressing)
        .unwrap_or_else(|e| exit_with_error(&format!("Partitioning failed: {}", e)));
    let duration = start.elapsed();

    eprintln!("Generated {} when-then clause(s) in {:?}", clauses.len(), duration);
    print_json(&clauses);
}

fn run_encode(snapshot_path: &str) {
    let snapshot_json = fs::read_to_string(snapshot_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read snapshot file '{}': {}",
            snapshot_path, e
        ))
    });
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse snapshot JSON: {}", e)));

    let envelope = block_on(compress_and_encode(&snapshot))
        .unwrap_or_else(|e| exit_with_error(&format!("Encoding failed: {}", e)));
    println!("{}", envelope);
}

fn run_decode(envelope_path: &str) {
    let envelope = fs::read_to_string(envelope_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read envelope file '{}': {}",
            envelope_path, e
        ))
    });

    let snapshot: serde_json::Value = block_on(decode_and_decompress(envelope.trim()))
        .unwrap_or_else(|e| exit_with_error(&format!("Decoding failed: {}", e)));
    print_json(&snapshot);
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start async runtime: {}", e)))
        .block_on(future)
}

fn print_json<T: serde::Serialize>(value: &T) {
    let rendered = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render output JSON: {}", e)));
    println!("{}", rendered);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
