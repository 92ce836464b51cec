use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use serde::Serialize;

use lox_lexer::scan;
use lox_syntax::error::{error, Error, Result};

#[derive(Parser, Debug)]
#[command(name = "lox-bench", about = "Measure Lox scanning throughput")]
struct Cli {
    /// Specific script(s) to run, by file stem (e.g. fibonacci). Runs everything when omitted.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per script (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also pick up scripts from demos/
    #[arg(long = "include-demos", default_value_t = false)]
    include_demos: bool,

    /// List discovered scripts and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    bytes: usize,
    tokens: usize,
    errors: usize,
    avg_scan_ms: f64,
    min_scan_ms: f64,
    max_scan_ms: f64,
    bytes_per_sec: f64,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    lox_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

fn workspace_root() -> PathBuf {
    // crates/lox-bench -> crates -> root
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn discover_scripts(dirs: &[PathBuf]) -> Vec<ScriptCase> {
    let mut out = Vec::new();
    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("lox") {
                let name = p
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string();
                out.push(ScriptCase { name, path: p });
            }
        }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn read_script(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| Error::new(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn measure_script(src: &str, iterations: u32, warmup: u32) -> Vec<f64> {
    for _ in 0..warmup {
        let _ = scan(src);
    }

    let mut timings = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let t = Instant::now();
        let result = scan(src);
        timings.push(dur_ms(t.elapsed()));
        std::hint::black_box(result);
    }
    timings
}

fn dur_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = vals.iter().sum::<f64>() / (vals.len() as f64);
    (avg, min, max)
}

fn throughput(bytes: usize, avg_ms: f64) -> f64 {
    if avg_ms > 0.0 {
        bytes as f64 / (avg_ms / 1000.0)
    } else {
        0.0
    }
}

fn bench_case(case: &ScriptCase, iterations: u32, warmup: u32) -> Result<BenchResult> {
    let src = read_script(&case.path)?;
    let sample = scan(&src);
    let timings = measure_script(&src, iterations, warmup);
    let (avg, min, max) = stats(&timings);

    Ok(BenchResult {
        name: case.name.clone(),
        iterations,
        bytes: src.len(),
        tokens: sample.tokens().len(),
        errors: sample.errors().len(),
        avg_scan_ms: avg,
        min_scan_ms: min,
        max_scan_ms: max,
        bytes_per_sec: throughput(src.len(), avg),
    })
}

fn write_report(out_path: &Path, doc: &OutputDoc) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::new(format!("Failed to create {}: {}", parent.display(), e)))?;
    }
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| Error::new(format!("Failed to serialize results: {}", e)))?;
    fs::write(out_path, json)
        .map_err(|e| Error::new(format!("Failed to write {}: {}", out_path.display(), e)))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = workspace_root();
    let mut dirs = vec![root.join("benchmark/scripts")];
    if cli.include_demos {
        dirs.push(root.join("demos"));
    }
    let mut scripts = discover_scripts(&dirs);

    if cli.list {
        println!("Discovered scripts:");
        for s in &scripts {
            println!("- {} ({})", s.name, s.path.display());
        }
        return Ok(());
    }

    if !cli.tests.is_empty() {
        let wanted: HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            return error("No matching scripts. Use --list to see available.");
        }
    }

    if scripts.is_empty() {
        return error("No .lox scripts found in benchmark/scripts or demos.");
    }

    let mut results = Vec::new();
    for case in &scripts {
        let r = bench_case(case, cli.iterations, cli.warmup)?;
        tracing::debug!(name = %r.name, tokens = r.tokens, errors = r.errors, "benchmarked script");
        println!(
            "{:>12}: scan avg={:.4}ms min={:.4}ms max={:.4}ms | {} tokens, {} errors | {:.1} MB/s",
            r.name,
            r.avg_scan_ms,
            r.min_scan_ms,
            r.max_scan_ms,
            r.tokens,
            r.errors,
            r.bytes_per_sec / 1_000_000.0
        );
        results.push(r);
    }

    let out_path = match cli.output {
        Some(p) => p,
        None => {
            // Windows-safe filename timestamp
            let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
            root.join("benchmark/results").join(format!("{}.json", ts_file))
        }
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        lox_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };
    write_report(&out_path, &doc)?;

    println!("\nSaved results to {}", out_path.display());
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(2);
    }
}
