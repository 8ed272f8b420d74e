//! Support Eraser command line entry point
//!
//! Generates one blocker for the given pick point(s) and writes it as STL.

use std::path::PathBuf;
use std::process::exit;

use eraser_core::{
    AngleStep, ConfigError, IgnoreReason, MemoryPreferences, PickEvent, PickHit, PickOutcome,
    PlacementController, PreferenceError, PreferenceStore, RonPreferences, Scene, SceneError,
    SceneNode, ShapeKind, StlError, save_stl,
};
use glam::Vec3;

const USAGE: &str = "\
Usage:
  eraser <cube|cylinder|custom> <size> <x> <y> <z> [<x2> <y2> <z2>] [options]

Options:
  --on-build-plate   Extend the blocker down to the build plate
  --step <degrees>   Cylinder angular increment (must divide 360)
  --prefs <file>     Read and store settings in a RON preferences file
  -o <file>          Output STL path (default: blocker.stl)";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
struct Args {
    shape: ShapeKind,
    size: String,
    points: Vec<Vec3>,
    on_build_plate: bool,
    step: Option<AngleStep>,
    prefs: Option<PathBuf>,
    output: PathBuf,
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eraser_core=debug,eraser_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(CliError::Usage(message)) => {
            eprintln!("Error: {message}\n\n{USAGE}");
            exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        exit(1);
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, CliError> {
    let mut positional = Vec::new();
    let mut on_build_plate = false;
    let mut step = None;
    let mut prefs = None;
    let mut output = PathBuf::from("blocker.stl");

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--on-build-plate" => on_build_plate = true,
            "--step" => {
                let value = next_value(&mut args, "--step")?;
                let degrees: u32 = value
                    .parse()
                    .map_err(|_| CliError::Usage(format!("Invalid step: {value}")))?;
                step = Some(AngleStep::new(degrees)?);
            }
            "--prefs" => prefs = Some(PathBuf::from(next_value(&mut args, "--prefs")?)),
            "-o" | "--output" => output = PathBuf::from(next_value(&mut args, "-o")?),
            "-h" | "--help" => return Err(CliError::Usage("Help requested".to_string())),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let shape: ShapeKind = positional
        .next()
        .ok_or_else(|| CliError::Usage("Missing shape".to_string()))?
        .parse()?;
    let size = positional
        .next()
        .ok_or_else(|| CliError::Usage("Missing size".to_string()))?;

    let coords = positional
        .map(|c| {
            c.parse::<f32>()
                .map_err(|_| CliError::Usage(format!("Invalid coordinate: {c}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let expected = if shape.requires_two_picks() { 6 } else { 3 };
    if coords.len() != expected {
        return Err(CliError::Usage(format!(
            "{shape} needs {expected} coordinates, got {}",
            coords.len()
        )));
    }
    let points = coords
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect();

    Ok(Args {
        shape,
        size,
        points,
        on_build_plate,
        step,
        prefs,
        output,
    })
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} expects a value")))
}

/// Place the blocker on a single model and export it
fn run(args: &Args) -> Result<PathBuf, CliError> {
    let preferences: Box<dyn PreferenceStore> = match &args.prefs {
        Some(path) => Box::new(RonPreferences::open(path)?),
        None => Box::new(MemoryPreferences::new()),
    };
    let mut controller = PlacementController::new(preferences);
    controller.set_shape_kind(args.shape);
    controller.set_size_str(&args.size)?;
    controller.set_anchor_to_build_plate(args.on_build_plate);
    if let Some(step) = args.step {
        controller.set_cylinder_step(step);
    }

    let mut scene = Scene::new();
    let model = scene.add_model(SceneNode::empty("model"))?;

    let mut outcome = PickOutcome::Ignored(IgnoreReason::NoTarget);
    for (i, point) in args.points.iter().enumerate() {
        let position = *point;
        let picker = move |_: f32, _: f32| Some(PickHit { position, node: model });
        outcome = controller.handle_pick(&mut scene, &picker, PickEvent::new(i as f32, 0.0))?;
        tracing::debug!("Pick {} at {}: {:?}", i + 1, position, outcome);
    }

    let PickOutcome::Created { node, .. } = outcome else {
        return Err(CliError::NotCreated(format!("{outcome:?}")));
    };
    let node = scene.node(node).ok_or(SceneError::NodeNotFound(node))?;
    let Some(mesh) = &node.mesh else {
        return Err(CliError::NotCreated(format!("{} has no mesh", node.name)));
    };

    save_stl(mesh, node.transform(), &args.output)?;
    tracing::info!(
        "Wrote {} ({} triangles) to {}",
        node.name,
        mesh.triangle_count(),
        args.output.display()
    );
    println!("{}", args.output.display());
    Ok(args.output.clone())
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Preferences(#[from] PreferenceError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("STL export failed: {0}")]
    Stl(#[from] StlError),
    #[error("No blocker was created: {0}")]
    NotCreated(String),
}
