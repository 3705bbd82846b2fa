use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use circuit_api::HttpServerConfig;
use circuit_core::report::{render_text, write_report_text};
use circuit_core::{CircuitData, EngineConfig, SimulationStore};

/// Behavioral simulator for maker-board circuits
#[derive(Parser)]
#[command(name = "circuit-sim", version)]
struct Cli {
    /// Base seed for sensor noise
    #[arg(long, global = true, env = "CIRCUIT_SIM_SEED")]
    seed: Option<u64>,

    /// Engine tunables as JSON (see EngineConfig); unset fields keep defaults
    #[arg(long, global = true, env = "CIRCUIT_SIM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a circuit file and print the analysis
    Run {
        /// Circuit JSON: {"components": [...], "connections": [...]}
        circuit: PathBuf,

        /// Number of steps to run
        #[arg(short = 'n', long, default_value_t = 10)]
        steps: u32,

        /// Step size in milliseconds
        #[arg(short = 't', long, default_value_t = 100)]
        step_ms: u64,

        /// Print the analysis as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the text report to this path
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,
    },
    /// List the component catalog
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "CIRCUIT_SIM_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let engine = match load_engine_config(cli.config.as_deref(), cli.seed) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Command::Run {
            circuit,
            steps,
            step_ms,
            json,
            report,
        } => run_circuit(engine, &circuit, steps, step_ms, json, report),
        Command::Catalog { json } => print_catalog(json),
        Command::Serve { bind } => serve(HttpServerConfig {
            bind_addr: bind,
            engine,
        }),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn load_engine_config(path: Option<&Path>, seed: Option<u64>) -> Result<EngineConfig, String> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| format!("reading {}: {}", path.display(), err))?;
            serde_json::from_str::<EngineConfig>(&text)
                .map_err(|err| format!("parsing {}: {}", path.display(), err))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run_circuit(
    engine: EngineConfig,
    path: &Path,
    steps: u32,
    step_ms: u64,
    json: bool,
    report: Option<PathBuf>,
) -> Result<(), String> {
    let input = std::fs::read_to_string(path)
        .map_err(|err| format!("reading {}: {}", path.display(), err))?;
    let circuit: CircuitData =
        serde_json::from_str(&input).map_err(|err| format!("parsing {}: {}", path.display(), err))?;

    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "circuit".to_string());

    let store = SimulationStore::new(engine);
    store.start(&id, circuit).map_err(|err| err.to_string())?;
    for _ in 0..steps {
        store.step(&id, step_ms).map_err(|err| err.to_string())?;
    }
    let analysis = store.analysis(&id).map_err(|err| err.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&analysis).map_err(|err| err.to_string())?;
        println!("{}", text);
    } else {
        print!("{}", render_text(&analysis));
    }

    if let Some(path) = report {
        write_report_text(&analysis, &path)
            .map_err(|err| format!("writing {}: {}", path.display(), err))?;
        eprintln!("report written: {}", path.display());
    }

    store.cleanup(&id).map_err(|err| err.to_string())
}

fn print_catalog(json: bool) -> Result<(), String> {
    let catalog = circuit_parts::catalog();
    if json {
        let text = serde_json::to_string_pretty(catalog).map_err(|err| err.to_string())?;
        println!("{}", text);
        return Ok(());
    }
    for spec in catalog {
        println!(
            "{:<20} {:<16} {:>4.1}V {:>8.3}mA  {}",
            spec.type_name,
            spec.category().as_str(),
            spec.voltage,
            spec.current_draw,
            spec.display_name
        );
    }
    Ok(())
}

fn serve(config: HttpServerConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Runtime::new().map_err(|err| err.to_string())?;
    runtime.block_on(circuit_api::run(config))
}
