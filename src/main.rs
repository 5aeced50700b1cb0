mod app;
mod config;
mod error;
mod input;
mod maze;
mod navigation;
mod prize;
mod render;
mod session;

use app::App;
use clap::Parser;
use config::Config;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use error::{Error, Result};
use input::KeyMap;
use prize::PrizeGate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::Renderer;
use session::MazeSession;
use std::io::{self, Stdout};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

fn main() -> ExitCode {
    let cfg = Config::parse();

    // Bad sizes are reported before the terminal goes raw.
    let app = match build_app(&cfg) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("maze-prize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match play(app, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("maze-prize: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_app(cfg: &Config) -> Result<App<StdRng>> {
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = match &cfg.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let grid = maze::load_layout(&text)?;
            info!(path = %path.display(), width = grid.width(), height = grid.height(), "layout loaded");
            MazeSession::from_grid(grid, rng)
        }
        None => {
            let session = MazeSession::new(cfg.width, cfg.height, rng)?;
            info!(width = cfg.width, height = cfg.height, seed = ?cfg.seed, "session started");
            session
        }
    };
    Ok(App::new(session, PrizeGate::new(&cfg.phrase, &cfg.reward)))
}

fn play(mut app: App<StdRng>, cfg: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    let result = enter_screen(&mut stdout)
        .map_err(Error::from)
        .and_then(|()| run(&mut stdout, &mut app, cfg));

    let restored = restore_terminal(&mut stdout);
    result?;
    restored?;
    Ok(())
}

fn enter_screen(stdout: &mut Stdout) -> io::Result<()> {
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

/// Runs every restore step even when an earlier one fails.
fn restore_terminal(stdout: &mut Stdout) -> io::Result<()> {
    let shown = stdout.execute(Show).map(|_| ());
    let left = stdout.execute(LeaveAlternateScreen).map(|_| ());
    let raw_off = terminal::disable_raw_mode();
    first_error([shown, left, raw_off])
}

fn first_error(steps: [io::Result<()>; 3]) -> io::Result<()> {
    steps.into_iter().collect()
}

fn run(stdout: &mut Stdout, app: &mut App<StdRng>, cfg: &Config) -> Result<()> {
    let keymap = KeyMap::new(cfg.dash_steps);
    let grid = app.session.grid();
    let mut renderer = Renderer::new(grid.width(), grid.height());
    let frame_time = Duration::from_micros(1_000_000 / cfg.fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(cmd) = keymap.command_for(key, app.dialog_open()) {
                        app.handle(cmd)?;
                    }
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
            if app.should_quit() {
                return Ok(());
            }
        }

        render::render(stdout, app, &mut renderer, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
