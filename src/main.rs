//! Terminal Mahjong Solitaire runner (default binary).
//!
//! Crossterm for keyboard and mouse input, the framebuffer renderer for
//! output, and a fixed-rate tick for the clock. Logs go to a file so they do
//! not scribble over the alternate screen.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use flexi_logger::{FileSpec, Logger, WriteMode};

use mahjong_solitaire::core::GameSnapshot;
use mahjong_solitaire::input::{handle_key_event, handle_mouse_event, should_quit};
use mahjong_solitaire::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use mahjong_solitaire::types::TICK_MS;
use mahjong_solitaire::{Session, SessionConfig};

/// Mahjong Solitaire in the terminal
#[derive(Debug, Parser)]
#[command(name = "mahjong", version)]
struct Cli {
    /// Name shown in the side panel
    #[arg(short, long)]
    player_name: Option<String>,

    /// Editor mode: `s` overwrites the level file with the live board
    #[arg(short, long, default_value_t = false)]
    editor: bool,

    /// Layout file (`kind,x,y,z` per line) to play instead of a generated deal
    #[arg(long)]
    level: Option<PathBuf>,

    /// Index of the first generated layout (past the last template: winnable deal)
    #[arg(long)]
    layout: Option<usize>,

    /// Deal seed (default: MAHJONG_SEED, else the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Best-time file (default: MAHJONG_BEST_TIME_PATH, else best_time.txt)
    #[arg(long)]
    best_time_file: Option<PathBuf>,

    /// Log level or filter spec (default: MAHJONG_LOG, else info)
    #[arg(short, long)]
    log_level: Option<String>,
}

impl Cli {
    /// Layer command-line flags over the environment-derived config
    fn apply_to(self, mut config: SessionConfig) -> SessionConfig {
        if let Some(name) = self.player_name {
            config.player_name = name;
        }
        config.editor = self.editor;
        if self.level.is_some() {
            config.level_file = self.level;
        }
        if let Some(layout) = self.layout {
            config.layout_index = layout;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(path) = self.best_time_file {
            config.best_time_path = path;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().apply_to(SessionConfig::from_env());

    let _logger = Logger::try_with_env_or_str(config.log_level.as_str())?
        .log_to_file(FileSpec::default().basename("mahjong").suppress_timestamp())
        .write_mode(WriteMode::BufferAndFlush)
        .start()?;

    if config.editor && config.level_file.is_none() {
        log::warn!("editor mode without --level: saving is disabled");
    }

    let view = GameView::new()
        .with_player_name(config.player_name.clone())
        .with_editor(config.editor);
    let mut session = Session::new(config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &view);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("fatal error: {}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session, view: &GameView) -> Result<()> {
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action);
                    }
                }
                Event::Mouse(mouse) => {
                    // Map against the frame the player is looking at
                    let layout = view.layout(&snap, viewport);
                    let action = handle_mouse_event(mouse, |col, row| {
                        layout.and_then(|l| l.board_point(col, row))
                    });
                    if let Some(action) = action {
                        session.apply(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick();
        }
    }
}
