use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use frontier_control::{ActionSource, AutopilotController};
use frontier_core::{Event, EventEnvelope, GameContent, GameState, SimContext, Subsystem};
use frontier_world::{build_initial_state, load_content};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "frontier_cli", about = "Frontier expedition runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an expedition with the autopilot for up to a fixed number of turns.
    Run {
        #[arg(long)]
        turns: u64,
        /// Generate the expedition with this seed. Mutually exclusive with --state.
        #[arg(long, conflicts_with = "state_file")]
        seed: Option<u64>,
        /// Resume from a saved GameState JSON file. Mutually exclusive with --seed.
        #[arg(long = "state", conflicts_with = "seed")]
        state_file: Option<String>,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        #[arg(long, default_value_t = 10)]
        print_every: u64,
        /// Every random gate fires (events, hazards) for reproducing edge cases.
        #[arg(long)]
        deterministic: bool,
        /// Skip writing the runs/ directory.
        #[arg(long)]
        no_summary: bool,
    },
}

struct RunArgs {
    turns: u64,
    seed: Option<u64>,
    state_file: Option<String>,
    content_dir: String,
    print_every: u64,
    deterministic: bool,
    no_summary: bool,
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize)]
struct EventTally {
    sectors_entered: u32,
    probes_launched: u32,
    probes_lost: u32,
    scans_blocked: u32,
    malfunctions: u32,
    distress_signals: u32,
    repairs: u32,
    items_used: u32,
    rejected_actions: u32,
}

impl EventTally {
    fn record(&mut self, envelope: &EventEnvelope) {
        match &envelope.event {
            Event::SectorEntered { .. } => self.sectors_entered += 1,
            Event::ProbeResolved { outcome, .. } => {
                self.probes_launched += 1;
                if !outcome.success {
                    self.probes_lost += 1;
                }
            }
            Event::ScanBlocked { .. } => self.scans_blocked += 1,
            Event::Malfunction { .. } => self.malfunctions += 1,
            Event::DistressSignal { .. } => self.distress_signals += 1,
            Event::SubsystemRepaired { .. } => self.repairs += 1,
            Event::ItemUsed { .. } => self.items_used += 1,
            Event::ActionRejected { .. } => self.rejected_actions += 1,
            Event::Warped { .. }
            | Event::RemoteScanned { .. }
            | Event::DeepScanned { .. }
            | Event::Rested { .. } => {}
        }
    }
}

#[derive(Serialize)]
struct RunSummary<'a> {
    run_id: &'a str,
    seed: u64,
    content_version: &'a str,
    deterministic: bool,
    turns_played: u64,
    final_sector: u8,
    energy: u32,
    metals: u32,
    rations: u32,
    probe_integrity: u32,
    cargo: Vec<String>,
    damaged_systems: Vec<Subsystem>,
    tally: &'a EventTally,
    log_tail: Vec<String>,
}

const LOG_TAIL: usize = 20;

fn generate_run_id(seed: u64) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{timestamp}_seed{seed}")
}

fn create_run_dir(run_id: &str) -> Result<std::path::PathBuf> {
    let dir = std::path::PathBuf::from("runs").join(run_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating run directory: {}", dir.display()))?;
    Ok(dir)
}

fn write_json(dir: &std::path::Path, name: &str, value: &impl Serialize) -> Result<()> {
    let path = dir.join(name);
    let file =
        std::fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn damaged_systems(state: &GameState) -> Vec<Subsystem> {
    Subsystem::ALL
        .iter()
        .copied()
        .filter(|subsystem| state.is_damaged(*subsystem))
        .collect()
}

fn write_summary(
    state: &GameState,
    content: &GameContent,
    ctx: &SimContext,
    tally: &EventTally,
) -> Result<()> {
    let run_id = generate_run_id(state.meta.seed);
    let dir = create_run_dir(&run_id)?;
    let summary = RunSummary {
        run_id: &run_id,
        seed: state.meta.seed,
        content_version: &content.content_version,
        deterministic: ctx.force_deterministic,
        turns_played: state.meta.turn,
        final_sector: state.sector.index,
        energy: state.resources.energy.current,
        metals: state.resources.metals.current,
        rations: state.resources.rations.current,
        probe_integrity: state.probe_integrity,
        cargo: state.cargo.iter().map(ToString::to_string).collect(),
        damaged_systems: damaged_systems(state),
        tally,
        log_tail: state
            .log
            .iter()
            .rev()
            .take(LOG_TAIL)
            .rev()
            .map(|entry| format!("[{:04}] {}", entry.turn, entry.text))
            .collect(),
    };
    write_json(&dir, "summary.json", &summary)?;
    write_json(&dir, "state.json", state)?;
    println!("Run directory: {}", dir.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn load_or_build_state(
    args: &RunArgs,
    content: &GameContent,
    ctx: &SimContext,
) -> Result<(GameState, ChaCha8Rng)> {
    if let Some(path) = &args.state_file {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading state file: {path}"))?;
        let loaded: GameState =
            serde_json::from_str(&json).with_context(|| format!("parsing state file: {path}"))?;
        // Offset by the turn so a resumed run does not replay the original stream.
        let rng = ChaCha8Rng::seed_from_u64(loaded.meta.seed.wrapping_add(loaded.meta.turn));
        return Ok((loaded, rng));
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let state = build_initial_state(content, seed, ctx, &mut rng);
    Ok((state, rng))
}

fn run(args: &RunArgs) -> Result<()> {
    let content = load_content(&args.content_dir)?;
    let ctx = SimContext {
        force_deterministic: args.deterministic,
    };
    let (mut state, mut rng) = load_or_build_state(args, &content, &ctx)?;

    let mut autopilot = AutopilotController::new();
    let mut tally = EventTally::default();
    let print_every = args.print_every.max(1);

    println!(
        "Starting expedition: turns={} seed={} planets={} content_version={}",
        args.turns,
        state.meta.seed,
        state.sector.planets.len(),
        content.content_version,
    );
    println!("{}", "-".repeat(80));

    let last_turn = state.meta.turn + args.turns;
    while state.meta.turn < last_turn {
        let Some(action) = autopilot.next_action(&state, &content) else {
            info!(turn = state.meta.turn, "autopilot has nothing left to do");
            break;
        };
        let events = frontier_core::step(&mut state, &action, &content, &ctx, &mut rng);

        // Print notable events regardless of print_every.
        for envelope in &events {
            tally.record(envelope);
            print_notable(envelope);
        }

        if state.meta.turn % print_every == 0 {
            print_status(&state);
        }
    }

    println!("{}", "-".repeat(80));
    println!("Done. Final state at turn {}:", state.meta.turn);
    print_status(&state);

    if !args.no_summary {
        write_summary(&state, &content, &ctx, &tally)?;
    }
    Ok(())
}

fn print_notable(envelope: &EventEnvelope) {
    let turn = envelope.turn;
    match &envelope.event {
        Event::SectorEntered {
            index,
            planet_count,
        } => println!("*** SECTOR {index} at turn={turn:04}: {planet_count} planets ***"),
        Event::Malfunction { outcome } => {
            println!("!!! {} at turn={turn:04}: {}", outcome.title, outcome.summary);
        }
        Event::DistressSignal { planet, outcome } => {
            println!(
                "~~~ distress at {planet} turn={turn:04}: {} ({})",
                outcome.title, outcome.summary
            );
        }
        Event::ProbeResolved { outcome, .. } if !outcome.success => {
            println!("xxx {}", outcome.message);
        }
        _ => {}
    }
}

fn print_status(state: &GameState) {
    let planet = state
        .sector
        .current_planet
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let damaged: Vec<String> = damaged_systems(state)
        .iter()
        .map(ToString::to_string)
        .collect();
    let stress: u32 = state.living_crew().map(|m| u32::from(m.stress)).sum();

    println!(
        "[turn={turn:04}  sector={sector}  at={planet:<14}]  \
         energy={energy:3}  metals={metals:3}  rations={rations:3}  \
         probe={probe:3}  cargo={cargo:2}  crew={crew}  stress={stress}  damaged=[{damaged}]",
        turn = state.meta.turn,
        sector = state.sector.index,
        energy = state.resources.energy.current,
        metals = state.resources.metals.current,
        rations = state.resources.rations.current,
        probe = state.probe_integrity,
        cargo = state.cargo.len(),
        crew = state.living_crew().count(),
        damaged = damaged.join(", "),
    );
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            turns,
            seed,
            state_file,
            content_dir,
            print_every,
            deterministic,
            no_summary,
        } => run(&RunArgs {
            turns,
            seed,
            state_file,
            content_dir,
            print_every,
            deterministic,
            no_summary,
        })?,
    }
    Ok(())
}
