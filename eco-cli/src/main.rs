use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use eco_config::{default_world_config, load_world_config_from_path, WorldConfig};
use eco_core::{Simulation, SimulationPhase};
use eco_types::{Census, DeathCause, StepReport, TickMetrics, WorldSnapshot};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "eco-cli")]
#[command(about = "Lagoon ecosystem simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs until the step budget is spent or the ecosystem stops being viable.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 500)]
        steps: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        depth: Option<i32>,
        #[arg(long)]
        width: Option<i32>,
        /// Sleep `step_delay_ms` from the config between steps and log every census.
        #[arg(long, default_value_t = false)]
        paced: bool,
        #[arg(long, default_value_t = false)]
        show_grid: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Forces single steps regardless of viability.
    Step {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        steps: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = false)]
        print_state: bool,
    },
    Benchmark {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 200)]
        steps: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        depth: Option<i32>,
        #[arg(long)]
        width: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    requested_steps: u32,
    steps_run: u64,
    seed: u64,
    phase: SimulationPhase,
    hour: u8,
    clock: String,
    weather: String,
    census: Census,
    totals: TickMetrics,
}

#[derive(Debug, Serialize)]
struct StepSummary {
    steps: u32,
    final_step: u64,
    viable: bool,
    last_metrics: TickMetrics,
}

#[derive(Debug, Serialize)]
struct BenchmarkSummary {
    steps_run: usize,
    cells: i64,
    elapsed_ms: u128,
    avg_ms_per_step: f64,
    avg_agents_per_step: f64,
    final_census: Census,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "eco_cli=info,eco_core=info".to_owned()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            depth,
            width,
            paced,
            show_grid,
            format,
            out,
        } => run_command(
            config, steps, seed, depth, width, paced, show_grid, format, out,
        ),
        Commands::Step {
            config,
            steps,
            seed,
            print_state,
        } => step_command(config, steps, seed, print_state),
        Commands::Benchmark {
            config,
            steps,
            seed,
            depth,
            width,
        } => benchmark_command(config, steps, seed, depth, width),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_command(
    config_path: Option<PathBuf>,
    steps: u32,
    seed: u64,
    depth: Option<i32>,
    width: Option<i32>,
    paced: bool,
    show_grid: bool,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = with_dimensions(load_config(config_path)?, depth, width);
    let delay = Duration::from_millis(cfg.step_delay_ms);
    let mut sim = Simulation::new(cfg, seed)?;

    let reports = if paced {
        let mut reports = Vec::new();
        for _ in 0..steps {
            let Some(report) = sim.run_for(1).pop() else {
                break;
            };
            info!(
                step = report.step,
                clock = %eco_core::clock_label(report.hour),
                census = %report.census,
                "step",
            );
            reports.push(report);
            thread::sleep(delay);
        }
        reports
    } else {
        sim.run_for(steps)
    };

    let snapshot = sim.snapshot();
    let summary = RunSummary {
        requested_steps: steps,
        steps_run: sim.step_count(),
        seed,
        phase: sim.phase(),
        hour: snapshot.hour,
        clock: snapshot.clock_label.clone(),
        weather: snapshot.weather_label.clone(),
        census: snapshot.census.clone(),
        totals: total_metrics(&reports),
    };

    let mut text = match format {
        OutputFormat::Pretty => format!(
            "steps={}/{} seed={} phase={:?} clock={} weather={} births={} deaths={} \
             evictions={}\ncensus: {}",
            summary.steps_run,
            summary.requested_steps,
            summary.seed,
            summary.phase,
            summary.clock,
            summary.weather,
            summary.totals.births,
            summary.totals.total_deaths(),
            summary.totals.evictions,
            summary.census,
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
    };
    if show_grid {
        text.push('\n');
        text.push_str(&render_grid(&snapshot));
    }
    write_output(text, out)
}

fn step_command(
    config_path: Option<PathBuf>,
    steps: u32,
    seed: u64,
    print_state: bool,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let mut sim = Simulation::new(cfg, seed)?;
    let mut last = None;
    for _ in 0..steps.max(1) {
        last = Some(sim.step());
    }
    let last = last.context("no step was taken")?;

    let summary = StepSummary {
        steps: steps.max(1),
        final_step: last.step,
        viable: last.viable,
        last_metrics: last.metrics,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if print_state {
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    }

    Ok(())
}

fn benchmark_command(
    config_path: Option<PathBuf>,
    steps: u32,
    seed: u64,
    depth: Option<i32>,
    width: Option<i32>,
) -> Result<()> {
    let cfg = with_dimensions(load_config(config_path)?, depth, width);
    let mut sim = Simulation::new(cfg, seed)?;
    let cells = i64::from(sim.grid().depth()) * i64::from(sim.grid().width());

    let start = Instant::now();
    let reports = sim.run_for(steps.max(1));
    let elapsed = start.elapsed();

    let steps_run = reports.len();
    let visited: u64 = reports.iter().map(|report| report.metrics.visited).sum();
    let summary = BenchmarkSummary {
        steps_run,
        cells,
        elapsed_ms: elapsed.as_millis(),
        avg_ms_per_step: elapsed.as_secs_f64() * 1000.0 / steps_run.max(1) as f64,
        avg_agents_per_step: visited as f64 / steps_run.max(1) as f64,
        final_census: sim.census(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<WorldConfig> {
    match path {
        Some(path) => load_world_config_from_path(&path),
        None => Ok(default_world_config()),
    }
}

fn with_dimensions(mut cfg: WorldConfig, depth: Option<i32>, width: Option<i32>) -> WorldConfig {
    if let Some(depth) = depth {
        cfg.depth = depth;
    }
    if let Some(width) = width {
        cfg.width = width;
    }
    cfg
}

fn total_metrics(reports: &[StepReport]) -> TickMetrics {
    let mut totals = TickMetrics::default();
    for metrics in reports.iter().map(|report| &report.metrics) {
        totals.visited += metrics.visited;
        totals.births += metrics.births;
        totals.plants_bitten += metrics.plants_bitten;
        totals.evictions += metrics.evictions;
        for cause in DeathCause::ALL {
            let count = metrics.deaths_by(cause);
            if count > 0 {
                *totals.deaths.entry(cause).or_insert(0) += count;
            }
        }
    }
    totals
}

/// One character per cell, `.` for empty water.
fn render_grid(snapshot: &WorldSnapshot) -> String {
    let depth = usize::try_from(snapshot.depth).unwrap_or(0);
    let width = usize::try_from(snapshot.width).unwrap_or(0);
    let mut rows = vec![vec!['.'; width]; depth];
    for cell in &snapshot.cells {
        if let (Ok(row), Ok(col)) = (
            usize::try_from(cell.location.row),
            usize::try_from(cell.location.col),
        ) {
            if let Some(slot) = rows.get_mut(row).and_then(|row| row.get_mut(col)) {
                *slot = cell.species.glyph();
            }
        }
    }
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_output(text: String, out: Option<PathBuf>) -> Result<()> {
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating output directory {}", parent.display())
            })?;
        }
        fs::write(&path, text).with_context(|| format!("failed writing {}", path.display()))?;
        info!("wrote output to {}", path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}
