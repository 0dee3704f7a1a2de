use planetsim::{ScenarioConfig, Scenario, UpdateOrdering};
use planetsim::{run_2d, run_headless};

use anyhow::{bail, Context, Result};
use bevy::app::AppExit;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Sun and planets under pairwise Newtonian gravity")]
struct Args {
    /// Scenario YAML; bare file names are also looked up in `scenarios/`.
    /// Defaults to the built-in solar system
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Run without a window and log the final state
    #[arg(long)]
    headless: bool,

    /// Number of steps for a headless run
    #[arg(long, default_value_t = 365)]
    steps: u64,

    /// Override the scenario's update ordering
    #[arg(long, value_enum)]
    ordering: Option<UpdateOrdering>,

    /// Override the scenario's trail cap (points per body)
    #[arg(long)]
    trail_limit: Option<usize>,
}

fn resolve(path: PathBuf) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let Some(file) = args.file.clone() else {
        return Ok(ScenarioConfig::solar_system());
    };

    let config_path = resolve(file);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut scenario_cfg = load_scenario(&args)?;

    if let Some(ordering) = args.ordering {
        scenario_cfg.parameters.ordering = ordering;
    }
    if args.trail_limit.is_some() {
        scenario_cfg.parameters.trail_limit = args.trail_limit;
    }

    let display = scenario_cfg.display.clone();
    if !args.headless {
        display.validate().context("invalid display settings")?;
    }
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if args.headless {
        run_headless(scenario, args.steps).context("simulation halted")?;
        return Ok(());
    }

    if let AppExit::Error(code) = run_2d(scenario, display) {
        bail!("viewer exited with error code {code}");
    }

    Ok(())
}
