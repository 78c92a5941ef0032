//! Unicycle Odyssey entry point
//!
//! Runs a headless session: a logging scene stands in for the renderer and
//! input comes from the autopilot or a key script.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use unicycle_odyssey::Settings;
use unicycle_odyssey::clock::FrameClock;
use unicycle_odyssey::consts::*;
use unicycle_odyssey::scene::{self, LogScene, Scene};
use unicycle_odyssey::script::InputScript;
use unicycle_odyssey::sim::{GameState, InputSnapshot, SessionPhase, tick};

const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "unicycle-odyssey")]
#[command(about = "Headless Unicycle Odyssey session driven by the autopilot or a key script")]
struct Cli {
    /// JSON settings file (tuning, key bindings, assets)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Key script to play instead of the autopilot
    #[arg(long)]
    script: Option<PathBuf>,
    /// Stop after this many frames
    #[arg(long = "ticks", default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,
    /// Run seed; overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    input: InputSnapshot,
    script: Option<InputScript>,
    scene: LogScene,
    clock: FrameClock,
    accumulator: f32,
}

impl Game {
    fn new(settings: Settings, seed: u64, script: Option<InputScript>) -> Self {
        let state = GameState::new(seed, settings.tuning.clone());
        let mut scene = LogScene::default();
        scene::prepare(&mut scene, &state, &settings.assets);
        Self {
            state,
            settings,
            input: InputSnapshot::new(),
            script,
            scene,
            clock: FrameClock::new(0),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for one engine frame
    fn update(&mut self, now_ms: u32) {
        let dt = self.clock.frame(now_ms).min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(script) = self.script.as_mut() {
                for event in script.next_tick() {
                    let bindings = &self.settings.bindings;
                    self.input.apply(&event, |key| bindings.resolve(key));
                }
            }
            let mut input = self.input.tick_input();
            input.autopilot = self.script.is_none() && self.settings.autopilot;
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        scene::present(&mut self.state, &mut self.scene, &self.settings.assets);
        if let Some(caption) = self.clock.caption_update(&self.settings.window.title, "headless") {
            self.scene.set_caption(&caption);
        }
    }

    fn finished(&self) -> bool {
        self.state.quit_requested || self.state.phase == SessionPhase::GameOver
    }
}

fn run() -> ExitCode {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Unicycle Odyssey (headless) starting...");

    let mut settings = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let script = match &cli.script {
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|text| InputScript::parse(&text).map_err(|e| e.to_string()));
            match parsed {
                Ok(script) => Some(script),
                Err(e) => {
                    log::error!("{}: {e}", path.display());
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            // Nothing would press any key otherwise
            settings.autopilot = true;
            None
        }
    };

    let seed = cli.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!("Game initialized with seed: {}", seed);

    let max_ticks = cli.max_ticks;
    let mut game = Game::new(settings, seed, script);
    let mut frame: u64 = 0;
    while !game.finished() && frame < max_ticks {
        frame += 1;
        let now_ms = (frame as f64 * 1000.0 / 60.0).round() as u32;
        game.update(now_ms);
    }

    log::info!(
        "Session ended: {:?}, score {}, {} cycles, speed {:.1}",
        game.state.phase,
        game.state.score.value(),
        game.state.cycle.cycle_index,
        game.state.speed.value()
    );
    println!("{}", game.state.score.value());
    ExitCode::SUCCESS
}


fn main() -> ExitCode {
    run()
}
