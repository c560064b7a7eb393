//! CLI command implementations.

use std::path::{Path, PathBuf};
use std::time::Instant;

use vexil_debug::SceneSnapshot;
use vexil_math::Vec3;
use vexil_scene::{InputEvent, SceneConfig, SimulationContext};
use vexil_telemetry::{TracingSink, VecSink};
use vexil_types::VexilError;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Options of `vexil simulate`.
pub struct SimulateArgs {
    pub config: Option<PathBuf>,
    pub frames: u64,
    pub frame_ms: f64,
    pub toggles: Vec<u64>,
    pub clicks: Vec<u64>,
    pub overrides: Vec<String>,
    pub snapshot: Option<PathBuf>,
    pub verbose: bool,
}

/// Splits `name=value`.
fn parse_override(raw: &str) -> Result<(&str, f32), VexilError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| VexilError::InvalidConfig(format!("expected NAME=VALUE, got '{raw}'")))?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| VexilError::InvalidConfig(format!("bad value for {name}: {e}")))?;
    Ok((name.trim(), value))
}

/// Run the scene headless.
pub fn simulate(args: &SimulateArgs) -> CliResult {
    println!("Vexil Simulation");
    println!("════════════════");

    let config = match &args.config {
        Some(path) => {
            println!("Config:   {}", path.display());
            SceneConfig::load(path)?
        }
        None => {
            println!("Config:   defaults");
            SceneConfig::default()
        }
    };

    let mut ctx = SimulationContext::new(config)?;
    let sink = VecSink::new();
    let log = sink.log();
    ctx.bus_mut().add_sink(Box::new(sink));
    if args.verbose {
        ctx.bus_mut().add_sink(Box::new(TracingSink::default()));
    }

    for raw in &args.overrides {
        let (name, value) = parse_override(raw)?;
        ctx.set_param(name, value)?;
        println!("Override: {name} = {value}");
    }

    println!(
        "Grid:     {}x{} segments, {} particles, {} constraints",
        ctx.network().cols(),
        ctx.network().rows(),
        ctx.network().len(),
        ctx.network().constraints().len(),
    );
    println!("Frames:   {} @ {:.1}ms", args.frames, args.frame_ms);
    println!();

    let start = Instant::now();
    for frame in 0..args.frames {
        if args.toggles.contains(&frame) {
            if ctx.controller().is_rigid() {
                ctx.toggle_to_deformable();
            } else {
                ctx.toggle_to_rigid();
            }
            println!("[{frame:>5}] toggle → {}", ctx.controller().state());
        }
        if args.clicks.contains(&frame) {
            ctx.handle_input(InputEvent::Click {
                flag_hit: Some(Vec3::ZERO),
                element_hit: ctx.element_pose(0).map(|p| p.position),
                time_ms: frame as f64 * args.frame_ms,
            });
            println!("[{frame:>5}] click  → {}", ctx.controller().state());
        }
        ctx.tick(frame as f64 * args.frame_ms);
    }
    ctx.finish();
    let wall = start.elapsed().as_secs_f64();

    println!();
    println!("Final state:      {}", ctx.controller().state());
    println!("Progress:         {:.3}", ctx.controller().progress());
    println!("Physics steps:    {}", ctx.physics_steps());
    println!("Max displacement: {:.4}", ctx.network().max_displacement());
    println!("Live impulses:    {}", ctx.impulses().len());
    println!(
        "Pivot:            ({:.3}, {:.3}, {:.3})",
        ctx.pivot().position.x,
        ctx.pivot().position.y,
        ctx.pivot().position.z,
    );
    println!("Events:           {}", log.len());
    for name in [
        "physics_step",
        "impulse_added",
        "impulses_pruned",
        "transition_started",
        "transition_finished",
        "pivot_kicked",
        "param_changed",
    ] {
        let count = log.count(name);
        if count > 0 {
            println!("  {name:<20} {count}");
        }
    }
    println!(
        "Wall time:        {:.3}s ({:.3}ms/frame)",
        wall,
        wall * 1000.0 / args.frames.max(1) as f64
    );

    if let Some(path) = &args.snapshot {
        ctx.snapshot().save(path)?;
        println!("Snapshot written to: {}", path.display());
    }

    Ok(())
}

/// Inspect a scene snapshot.
pub fn inspect(path: &Path, against: Option<&Path>) -> CliResult {
    println!("Vexil Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = SceneSnapshot::load(path)?;

    println!("Tick:         {}", snapshot.tick);
    println!("Clock:        {:.1}ms", snapshot.clock_ms);
    println!("State:        {}", snapshot.state);
    println!("Progress:     {:.3}", snapshot.progress);
    println!("Particles:    {}", snapshot.particle_count());
    println!("Impulses:     {}", snapshot.active_impulses);
    println!("Elements:     {}", snapshot.elements.len());
    let p = snapshot.pivot.position;
    println!("Pivot:        ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);

    if !snapshot.positions.is_empty() {
        let (min_z, max_z) = snapshot
            .positions
            .iter()
            .skip(2)
            .step_by(3)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            });
        println!("Z range:      [{min_z:.4}, {max_z:.4}]");
    }

    if let Some(other_path) = against {
        let other = SceneSnapshot::load(other_path)?;
        let delta = snapshot.max_particle_delta(&other)?;
        println!();
        println!("Against:      {}", other_path.display());
        println!("Max particle delta: {delta:.6}");
    }

    Ok(())
}

/// Validate a scene config file.
pub fn validate(path: &Path) -> CliResult {
    println!("Validating: {}", path.display());
    let config = SceneConfig::load(path)?;
    let ctx = SimulationContext::new(config)?;
    println!(
        "  OK: {} particles, {} constraints, {} elements",
        ctx.network().len(),
        ctx.network().constraints().len(),
        ctx.elements().len(),
    );
    Ok(())
}

/// Print the default scene config.
pub fn params() -> CliResult {
    print!("{}", SceneConfig::default().to_toml_string()?);
    Ok(())
}
