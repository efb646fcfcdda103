//! sweep-run: run a strike effectiveness sweep over an entity catalog.
//!
//! Usage:
//!   sweep-run run --catalog catalog.json --config sweep.json --output summary.json
//!   sweep-run sample --output catalog.json --seed 42

use std::path::{Path, PathBuf};
use std::process;

use envelope_core::config::SweepConfig;
use envelope_core::EntityCatalog;
use envelope_procgen::generate_catalog;
use envelope_sim::{reduce, run_sweep};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "sample" => cmd_sample(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "sweep-run: strike effectiveness sweep driver\n\
         \n\
         Commands:\n\
         \n\
         run       Evaluate every scenario of a catalog and summarize\n\
         \n\
           --catalog <path>   Entity catalog JSON\n\
           --config <path>    Sweep configuration JSON (optional, default ranges)\n\
           --output <path>    Summary JSON (optional, default: stdout)\n\
           --results <path>   Per-scenario outcomes JSON (optional)\n\
         \n\
         sample    Write a generated sample catalog\n\
         \n\
           --output <path>    Output catalog JSON path\n\
           --seed <N>         Generator seed (default: 0)\n\
         \n\
         Examples:\n\
         \n\
           sweep-run sample --output catalog.json --seed 7\n\
           sweep-run run --catalog catalog.json --output summary.json\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn parse_seed(args: &[String], default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == "--seed" && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<u64>() {
                return n;
            }
        }
    }
    default
}

fn fail(message: String) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn write_json(path: &Path, json: &str) {
    if let Err(e) = std::fs::write(path, json) {
        fail(format!("writing {}: {e}", path.display()));
    }
}

// --- Run command ---

fn load_config(path: Option<&Path>) -> SweepConfig {
    let Some(path) = path else {
        return SweepConfig::default();
    };
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading {}: {e}", path.display())));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| fail(format!("parsing {}: {e}", path.display())))
}

fn cmd_run(args: &[String]) {
    let Some(catalog_path) = parse_path(args, "--catalog") else {
        fail("--catalog <path> is required".to_string());
    };

    let catalog = EntityCatalog::load(&catalog_path)
        .unwrap_or_else(|e| fail(format!("loading {}: {e}", catalog_path.display())));
    let config = load_config(parse_path(args, "--config").as_deref());

    tracing::info!("Loaded catalog from {}", catalog_path.display());

    let outcomes = match run_sweep(&catalog, &config) {
        Ok(outcomes) => outcomes,
        Err(e) => fail(format!("sweep rejected: {e}")),
    };

    if let Some(results_path) = parse_path(args, "--results") {
        let json = serde_json::to_string_pretty(&outcomes)
            .unwrap_or_else(|e| fail(format!("serializing outcomes: {e}")));
        write_json(&results_path, &json);
        tracing::info!(
            "Wrote {} outcomes to {}",
            outcomes.len(),
            results_path.display()
        );
    }

    let summary = reduce(&outcomes);
    let json = serde_json::to_string_pretty(&summary)
        .unwrap_or_else(|e| fail(format!("serializing summary: {e}")));

    match parse_path(args, "--output") {
        Some(output) => {
            write_json(&output, &json);
            tracing::info!("Wrote summary to {}", output.display());
        }
        None => println!("{json}"),
    }
}

// --- Sample command ---

fn cmd_sample(args: &[String]) {
    let output = parse_path(args, "--output").unwrap_or_else(|| PathBuf::from("catalog.json"));
    let seed = parse_seed(args, 0);

    let catalog = generate_catalog(seed);
    if let Err(e) = catalog.save(&output) {
        fail(format!("writing {}: {e}", output.display()));
    }
    tracing::info!("Wrote sample catalog (seed {seed}) to {}", output.display());
}
