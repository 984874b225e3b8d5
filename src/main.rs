//! Voidfighter headless runner
//!
//! Drives the full scene loop without a window. An autopilot holds the keys,
//! sprites and audio are in-memory stand-ins, and the outcome is logged.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use voidfighter::audio::SilentAudio;
use voidfighter::platform::{DrawTally, HeadlessSprites, Key, KeyboardSnapshot};
use voidfighter::scene::HighScoreScreen;
use voidfighter::sim::Side;
use voidfighter::{App, Scene, Tuning, seconds_to_frames};

/// Two minutes of play
const DEFAULT_FRAMES: u64 = seconds_to_frames(120) as u64;

/// Vertical dead zone before the autopilot steers
const STEER_SLACK: f32 = 4.0;

/// Name the autopilot signs its high scores with
const AUTOPILOT_NAME: &str = "AUTO";

#[derive(Parser, Debug)]
#[command(name = "voidfighter")]
#[command(about = "Run the Voidfighter scene loop headless under an autopilot")]
struct Cli {
    /// Frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    /// JSON tuning file; defaults apply to missing fields
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Override the tuning seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Chase the nearest enemy vertically and keep the trigger down.
/// In the menus, tap fire so each press is seen as fresh.
fn autopilot(app: &App, frame: u64) -> KeyboardSnapshot {
    let mut keys = KeyboardSnapshot::new();
    let stage = match &app.scene {
        Scene::Playing(stage) => stage,
        Scene::HighScores(HighScoreScreen::EnteringName { index, .. }) => {
            let named = app
                .high_scores
                .entries
                .get(*index)
                .is_some_and(|entry| !entry.name.is_empty());
            if named {
                keys.set(Key::Return, true);
            } else {
                keys.push_text(AUTOPILOT_NAME);
            }
            return keys;
        }
        _ => {
            keys.set(Key::Fire, frame % 20 < 10);
            return keys;
        }
    };
    let Some(player) = stage.player() else {
        return keys;
    };

    let nearest = stage
        .fighters
        .values()
        .filter(|e| e.side == Side::Enemy && !e.is_dead())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
    if let Some(enemy) = nearest {
        let dy = enemy.center().y - player.center().y;
        if dy < -STEER_SLACK {
            keys.set(Key::Up, true);
        } else if dy > STEER_SLACK {
            keys.set(Key::Down, true);
        }
    }
    keys.set(Key::Fire, true);
    keys
}

fn run(frames: u64, tuning: Tuning) {
    let mut app = App::new(&mut HeadlessSprites::new(), tuning);
    let mut audio = SilentAudio;
    let mut tally = DrawTally::default();

    for frame in 0..frames {
        let keys = autopilot(&app, frame);
        app.update(&keys, &mut audio);
        app.render(&mut tally);
    }

    log::info!(
        "Ran {} frames over {} episodes ({} draw calls), ending in the {} scene",
        frames,
        app.episodes,
        tally.total(),
        app.scene.name()
    );
    if let Some(stage) = app.stage() {
        log::info!("Current stage: score {}, frame {}", stage.score, stage.frame);
    }
    for (i, entry) in app.high_scores.entries.iter().enumerate() {
        let marker = if entry.recent { " <" } else { "" };
        println!("#{}. {:<15} {:03}{}", i + 1, entry.name, entry.score, marker);
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let cli = Cli::parse();
    let mut tuning = match &cli.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    if let Some(seed) = cli.seed {
        tuning = tuning.with_seed(seed);
    }

    log::info!("Voidfighter (headless) starting, {} frames", cli.frames);
    run(cli.frames, tuning);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["voidfighter"]).unwrap();
        assert_eq!(cli.frames, DEFAULT_FRAMES);
        assert!(cli.tuning.is_none());
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "voidfighter",
            "--frames",
            "300",
            "--tuning",
            "hard.json",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.frames, 300);
        assert_eq!(cli.tuning, Some(PathBuf::from("hard.json")));
        assert_eq!(cli.seed, Some(9));

        assert!(Cli::try_parse_from(["voidfighter", "--frames", "many"]).is_err());
    }

    #[test]
    fn test_autopilot_signs_new_high_score() {
        let mut app = App::new(&mut HeadlessSprites::new(), Tuning::default());
        app.high_scores.add_score("", 50);
        app.scene = Scene::HighScores(HighScoreScreen::EnteringName {
            index: 0,
            cursor_blink: 0,
        });

        let mut audio = SilentAudio;
        app.update(&autopilot(&app, 0), &mut audio);
        assert_eq!(app.high_scores.entries[0].name, AUTOPILOT_NAME);
        app.update(&autopilot(&app, 1), &mut audio);
        assert!(matches!(app.scene, Scene::HighScores(HighScoreScreen::Table)));
    }
}
