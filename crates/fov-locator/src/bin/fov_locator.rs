use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fov_locator::session::{run_session_file, SessionReport};
use fov_locator::core::{bearing_deg, FrustumSnapshot};
use fov_locator::{CameraProfile, FrustumFootprint, ViewFrustum};
use log::info;
use nalgebra::Point2;
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(name = "fov-locator", version, about = "Camera view geometry on an overhead field map")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frustum for a robot at ORIGIN looking at a point.
    Frustum {
        #[arg(long, value_parser = parse_point)]
        origin: Point2<f64>,
        #[arg(long, value_parser = parse_point)]
        look_at: Point2<f64>,
        #[arg(long, default_value = "nao")]
        camera: CameraProfile,
    },
    /// Recover the robot position from the two frustum corners.
    Solve {
        #[arg(long, value_parser = parse_point)]
        edge_a: Point2<f64>,
        #[arg(long, value_parser = parse_point)]
        edge_b: Point2<f64>,
        /// Prefer the candidate closest to this point (default: corner midpoint).
        #[arg(long, value_parser = parse_point)]
        near: Option<Point2<f64>>,
        #[arg(long, default_value = "nao")]
        camera: CameraProfile,
    },
    /// Replay a JSON session script and report the final placement.
    Replay {
        script: PathBuf,
        /// Write the report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct FrustumOutput {
    frustum: FrustumSnapshot,
    footprint: FrustumFootprint,
    distance_to_visible_ground: f64,
}

#[derive(Serialize)]
struct SolveOutput {
    candidates: [Point2<f64>; 2],
    chosen: Point2<f64>,
    gaze_deg: f64,
}

fn parse_point(s: &str) -> Result<Point2<f64>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y (got `{s}`)"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Point2::new(x, y))
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    {
        let _ = verbose;
        fov_locator::core::init_tracing(false);
        let _ = LogTracer::init();
        Ok(())
    }
    #[cfg(not(feature = "tracing"))]
    {
        use fov_locator::core::{init_with_level, level_from_verbosity};
        init_with_level(level_from_verbosity(verbose))?;
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Frustum {
            origin,
            look_at,
            camera,
        } => {
            let mut frustum = ViewFrustum::new(origin, camera.model());
            frustum.look_at(look_at);
            info!(
                "frustum at ({:.1}, {:.1}) gaze {:.2}",
                origin.x,
                origin.y,
                frustum.gaze_deg()
            );
            print_json(&FrustumOutput {
                frustum: frustum.snapshot(),
                footprint: frustum.footprint(),
                distance_to_visible_ground: frustum.distance_to_visible_ground(),
            })?;
        }
        Command::Solve {
            edge_a,
            edge_b,
            near,
            camera,
        } => {
            let near = near.unwrap_or_else(|| nalgebra::center(&edge_a, &edge_b));
            let frustum = ViewFrustum::new(near, camera.model());
            let candidates = frustum.origin_candidates(edge_a, edge_b)?;
            let chosen = frustum.origin_from_targets(edge_a, edge_b)?;
            let primary = nalgebra::center(&edge_a, &edge_b);
            print_json(&SolveOutput {
                candidates,
                chosen,
                gaze_deg: bearing_deg(chosen, primary),
            })?;
        }
        Command::Replay { script, out } => {
            let report: SessionReport = run_session_file(&script)?;
            info!("{}", report.display);
            match out {
                Some(path) => {
                    report.write_json(&path)?;
                    println!("wrote session report to {}", path.display());
                }
                None => print_json(&report)?,
            }
        }
    }

    Ok(())
}
