use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::EngineConfig;
use grid_snake::engine::{Engine, EngineObserver};
use grid_snake::food::FoodPlacer;
use grid_snake::game::GameSession;
use grid_snake::input::GameInput;
use grid_snake::logging::init_file_logging;
use grid_snake::renderer;
use grid_snake::score::{JsonFileStore, ScoreStore};
use grid_snake::terminal_input::{HostEvent, InputHandler};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use grid_snake::ui::hud::HudInfo;
use tracing::info;

/// Longest the loop blocks on input, so resizes and ticks stay responsive.
const MAX_POLL_WAIT: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with engine settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per grid side.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Tick interval of a fresh game in milliseconds.
    #[arg(long = "initial-speed")]
    initial_speed: Option<u64>,

    /// Interval reduction per food in milliseconds.
    #[arg(long = "speed-step")]
    speed_step: Option<u64>,

    /// Fastest tick interval in milliseconds.
    #[arg(long = "min-speed")]
    min_speed: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable mouse swipes.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Key-value store file holding the best score.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Append logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn engine_config(&self) -> io::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_from_path(path).map_err(invalid_input)?,
            None => EngineConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(initial_speed) = self.initial_speed {
            config.initial_speed_ms = initial_speed;
        }
        if let Some(speed_step) = self.speed_step {
            config.speed_step_ms = speed_step;
        }
        if let Some(min_speed) = self.min_speed {
            config.min_speed_ms = min_speed;
        }

        config.validate().map_err(invalid_input)?;
        Ok(config)
    }
}

/// Tracks whether the engine changed anything worth redrawing.
#[derive(Debug, Default)]
struct RedrawFlag {
    dirty: bool,
}

impl EngineObserver for RedrawFlag {
    fn on_tick(&mut self, _session: &GameSession) {
        self.dirty = true;
    }

    fn on_game_over(&mut self, _final_score: u32) {
        self.dirty = true;
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = cli.engine_config()?;

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let placer = match cli.seed {
        Some(seed) => FoodPlacer::from_seed(seed),
        None => FoodPlacer::from_entropy(),
    };
    let store = match &cli.scores {
        Some(path) => JsonFileStore::new(path.clone()),
        None => JsonFileStore::at_default_path(),
    };
    info!(store = %store.path().display(), "using score store");

    let mut engine =
        Engine::new(config, placer, ScoreStore::new(store), Instant::now()).map_err(invalid_input)?;

    install_panic_hook();
    run(&mut engine, !cli.no_mouse)
}

fn run(engine: &mut Engine<JsonFileStore>, mouse_enabled: bool) -> io::Result<()> {
    let mut session = TerminalSession::enter(mouse_enabled)?;
    let mut input = InputHandler::new(mouse_enabled, engine.config().cell_size_px);
    let mut redraw = RedrawFlag { dirty: true };

    // Paused before the first step is what the renderer shows as the start screen.
    engine.set_paused(true, Instant::now());

    loop {
        if redraw.dirty {
            let hud_info = HudInfo {
                best_score: engine.best_score(),
                best_at_session_start: engine.best_at_session_start(),
                mouse_enabled,
            };
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, engine.session(), &hud_info))?;
            redraw.dirty = false;
        }

        let wait = engine
            .time_until_next_tick(Instant::now())
            .map_or(MAX_POLL_WAIT, |due| due.min(MAX_POLL_WAIT));

        match input.poll_input(wait)? {
            Some(HostEvent::Input(GameInput::Quit)) => break,
            Some(HostEvent::Input(game_input)) => {
                let starting = engine.session().is_start_screen();
                if starting {
                    engine.set_paused(false, Instant::now());
                }
                if !(starting && game_input == GameInput::Pause) {
                    handle_input(engine, game_input);
                }
                redraw.dirty = true;
            }
            Some(HostEvent::Swipe { start, end }) => {
                engine.submit_gesture(start, end);
            }
            Some(HostEvent::Resize) => redraw.dirty = true,
            None => {}
        }

        engine.poll(Instant::now(), &mut redraw);
    }

    info!(score = engine.session().score, "quit");
    Ok(())
}

fn handle_input(engine: &mut Engine<JsonFileStore>, input: GameInput) {
    let now = Instant::now();
    match input {
        GameInput::Direction(direction) => engine.queue_direction(direction),
        GameInput::Pause => engine.toggle_pause(now),
        GameInput::Reset => engine.reset(now),
        GameInput::Quit => {}
    }
}

fn invalid_input(error: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
