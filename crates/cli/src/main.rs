mod scenario;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use liveness_core::capture::infrastructure::synthetic_frame_source::SyntheticFrameSource;
use liveness_core::challenge::sequencer::ChallengeSequencer;
use liveness_core::detection::infrastructure::scripted_detector::ScriptedLandmarkDetector;
use liveness_core::session::controller::{FrameEvent, SessionController};
use liveness_core::session::result::LivenessResult;
use liveness_core::shared::clock::ManualClock;
use liveness_core::shared::constants::DEFAULT_SETTLE_MS;
use liveness_core::shared::frame::Frame;

use scenario::Scenario;

/// Replays a scripted landmark scenario through the liveness pipeline.
#[derive(Parser)]
#[command(name = "liveness")]
struct Cli {
    /// Scenario JSON file: {"frames": [{"angle": 88.0}, {"no_face": true}, ...]}.
    scenario: PathBuf,

    /// Settle delay override in milliseconds.
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Simulated time between frames in milliseconds. Frames arriving
    /// inside a settle window are ignored, so a settle delay longer than
    /// this interval eats the frames that follow a match.
    #[arg(long, default_value = "33")]
    frame_interval_ms: u64,

    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
}

enum ReplayOutcome {
    Passed(LivenessResult),
    Stalled { step_label: Option<String> },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let scenario = scenario::load(&cli.scenario)?;
    let settle_ms = cli
        .settle_ms
        .or(scenario.settle_ms)
        .unwrap_or(DEFAULT_SETTLE_MS);
    let total = scenario.frames.len();

    match replay(&scenario, settle_ms, cli.frame_interval_ms)? {
        ReplayOutcome::Passed(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Liveness check passed ({} steps):", result.steps.len());
                for step in &result.steps {
                    println!("  {:10} captured at {} ms", step.step_id, step.captured_at_ms);
                }
            }
        }
        ReplayOutcome::Stalled { step_label } => {
            let stalled_at = step_label.unwrap_or_else(|| "(not started)".to_string());
            println!("Liveness check did not complete after {total} frames; stalled at '{stalled_at}'");
            process::exit(2);
        }
    }

    Ok(())
}

/// Feeds every scenario frame through a fresh controller, advancing the
/// simulated clock between frames, then lets any scheduled settle capture
/// fire after the stream ends.
fn replay(
    scenario: &Scenario,
    settle_ms: u64,
    frame_interval_ms: u64,
) -> Result<ReplayOutcome, Box<dyn std::error::Error>> {
    let observations = scenario.frames.iter().map(|f| f.to_observation()).collect();
    let clock = ManualClock::new(0);
    let mut controller = SessionController::new(
        Box::new(ScriptedLandmarkDetector::new(observations)),
        Box::new(SyntheticFrameSource::default()),
        Box::new(clock.clone()),
        ChallengeSequencer::standard(),
        settle_ms,
    );
    let verdicts = controller.subscribe();
    controller.start();

    for index in 0..scenario.frames.len() {
        let frame = Frame::new(Vec::new(), 0, 0, index);
        let report = controller.process_frame(&frame)?;
        log::debug!("frame {index}: {:?}", report.event);
        clock.advance(frame_interval_ms);
    }

    loop {
        clock.advance(settle_ms.max(1));
        match controller.poll()? {
            Some(report) if report.event == FrameEvent::Completed => break,
            Some(_) => continue,
            None => break,
        }
    }

    match verdicts.try_recv() {
        Ok(result) => Ok(ReplayOutcome::Passed(result)),
        Err(_) => Ok(ReplayOutcome::Stalled {
            step_label: controller.active_step().map(|s| s.label.clone()),
        }),
    }
}
