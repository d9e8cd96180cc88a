//! Session: the I/O-owning shell around the pure game state.
//!
//! The core never touches the filesystem. A session wires it to the two
//! stores:
//!
//! - the attached layout file (editor): loaded at start and on every
//!   restart / layout change, written on `SaveLayout`;
//! - the best-time record: loaded at start, written when a win sets a new
//!   best.
//!
//! Every file operation is best-effort. Failures are logged and play goes on
//! (a failed load falls back to a generated deal).

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::core::{next_layout_index, Board, GameSnapshot, GameState};
use crate::store::{load_layout, save_layout, BestTimeRecord, DEFAULT_BEST_TIME_FILE};
use crate::types::{CoreEvent, GameAction};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub player_name: String,
    /// Editor mode: the attached layout file may be overwritten
    pub editor: bool,
    /// Layout file played instead of a generated deal
    pub level_file: Option<PathBuf>,
    /// Generator index of the first deal
    pub layout_index: usize,
    /// Deal seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub best_time_path: PathBuf,
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            editor: false,
            level_file: None,
            layout_index: 0,
            seed: None,
            best_time_path: PathBuf::from(DEFAULT_BEST_TIME_FILE),
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let best_time_path = env::var("MAHJONG_BEST_TIME_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.best_time_path);

        let log_level = env::var("MAHJONG_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_level);

        let seed = env::var("MAHJONG_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            best_time_path,
            log_level,
            seed,
            ..defaults
        }
    }

    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// One player's run of games
pub struct Session {
    config: SessionConfig,
    game: GameState,
    record: BestTimeRecord,
    last_event: Option<CoreEvent>,
}

impl Session {
    /// Start a session: load the best time, then deal or load the first board
    pub fn new(config: SessionConfig) -> Self {
        Self::new_at(config, Instant::now())
    }

    pub fn new_at(config: SessionConfig, now: Instant) -> Self {
        let seed = config.seed_or_clock();
        let record = BestTimeRecord::new(config.best_time_path.clone());
        log::info!(
            "starting session (player {:?}, seed {}, editor {})",
            config.player_name,
            seed,
            config.editor
        );

        let mut session = Self {
            game: GameState::with_layout_at(seed, config.layout_index, now),
            config,
            record,
            last_event: None,
        };
        session.game.set_best_time(session.record.load_or_default());
        if let Some(board) = session.load_attached() {
            session.game.reset_with_board(board, now);
        }
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Last game event seen by the session
    pub fn take_last_event(&mut self) -> Option<CoreEvent> {
        self.last_event.take()
    }

    pub fn apply(&mut self, action: GameAction) -> bool {
        self.apply_at(action, Instant::now())
    }

    /// Apply a semantic action, performing any file I/O it implies.
    ///
    /// With a layout file attached, restarting (or switching layouts) reloads
    /// the file; a generated deal is used only if the reload fails.
    pub fn apply_at(&mut self, action: GameAction, now: Instant) -> bool {
        let changed = match action {
            GameAction::SaveLayout => return self.save_attached(),
            GameAction::Restart | GameAction::NextLayout if self.has_attached_file() => {
                let mut index = self.game.layout_index();
                if action == GameAction::NextLayout {
                    index = next_layout_index(index);
                }
                match self.load_attached() {
                    Some(board) => {
                        self.game.reset_with_board(board, now);
                        self.game.set_layout_index(index);
                    }
                    None => self.game.reset_at(index, now),
                }
                true
            }
            _ => self.game.apply_action_at(action, now),
        };

        if let Some(event) = self.game.take_last_event() {
            self.observe(event);
        }
        changed
    }

    pub fn tick(&mut self) {
        self.game.tick();
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.game.tick_at(now);
    }

    fn observe(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::Won {
                elapsed,
                new_best: true,
            } => {
                if let Err(e) = self.record.save(elapsed) {
                    log::error!(
                        "failed to save best time to {}: {}",
                        self.record.path().display(),
                        e
                    );
                }
            }
            CoreEvent::Lost => log::info!("{} lost the game", self.player_label()),
            _ => {}
        }
        self.last_event = Some(event);
    }

    fn player_label(&self) -> &str {
        if self.config.player_name.is_empty() {
            "player"
        } else {
            &self.config.player_name
        }
    }

    fn has_attached_file(&self) -> bool {
        self.config.level_file.is_some()
    }

    /// Load the attached layout file, logging why when it cannot be used
    fn load_attached(&self) -> Option<Board> {
        let path = self.config.level_file.as_deref()?;
        match load_layout(path) {
            Ok(placements) => Some(Board::from_placements(placements)),
            Err(e) => {
                log::warn!(
                    "cannot load layout {}: {}; dealing a generated layout",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Write every tile of the live board (removed ones included) to the
    /// attached file. Only allowed in editor mode.
    fn save_attached(&self) -> bool {
        let Some(path) = self.attached_for_save() else {
            log::debug!("save ignored: not editing a layout file");
            return false;
        };
        match save_layout(path, &self.game.board().placements()) {
            Ok(()) => {
                log::info!(
                    "saved {} tiles to {}",
                    self.game.board().len(),
                    path.display()
                );
                true
            }
            Err(e) => {
                log::error!("failed to save layout to {}: {}", path.display(), e);
                false
            }
        }
    }

    fn attached_for_save(&self) -> Option<&Path> {
        if !self.config.editor {
            return None;
        }
        self.config.level_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LayoutSource;
    use crate::types::{GameStatus, TILE_WIDTH};
    use std::fs;
    use std::time::Duration;

    fn temp_path(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!(
            "mahjong-session-{}-{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    fn config(name: &str) -> SessionConfig {
        SessionConfig {
            seed: Some(7),
            best_time_path: temp_path(&format!("{name}-best")),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_generated_deal_without_file() {
        let session = Session::new(config("generated"));
        assert_eq!(session.game().layout_source(), LayoutSource::Template(0));
        assert_eq!(session.game().best_time(), Duration::ZERO);
    }

    #[test]
    fn test_unreadable_level_falls_back_to_generation() {
        let mut cfg = config("fallback");
        cfg.level_file = Some(temp_path("fallback-missing-level"));
        cfg.layout_index = 2;
        let mut session = Session::new(cfg);
        assert_eq!(session.game().layout_source(), LayoutSource::Template(2));

        assert!(session.apply(GameAction::Restart));
        assert_eq!(session.game().layout_source(), LayoutSource::Template(2));
    }

    #[test]
    fn test_timer_starts_at_given_instant() {
        let t0 = Instant::now();
        let mut session = Session::new_at(config("clock"), t0);
        session.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(session.game().elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn test_next_layout_with_file_skips_generated_deal() {
        let mut cfg = config("next-reload");
        let level = temp_path("next-reload-level");
        fs::write(&level, "4,0,0,0\n4,100,0,0\n").unwrap();
        cfg.level_file = Some(level.clone());

        let t0 = Instant::now();
        let mut session = Session::new_at(cfg, t0);
        assert!(session.apply_at(GameAction::NextLayout, t0));
        assert_eq!(session.game().layout_index(), 1);
        assert_eq!(session.game().board().len(), 2);

        // The fallback deal comes straight after the initial one in the RNG
        // stream, so no deal was spent on the reload
        fs::remove_file(&level).unwrap();
        assert!(session.apply_at(GameAction::Restart, t0));
        let mut expected = GameState::with_layout_at(7, 0, t0);
        expected.reset_at(1, t0);
        assert_eq!(session.game().layout_index(), 1);
        assert_eq!(
            session.game().board().placements(),
            expected.board().placements()
        );
    }

    #[test]
    fn test_win_persists_new_best() {
        let mut cfg = config("win");
        let level = temp_path("win-level");
        fs::write(&level, format!("5,0,0,0\n5,{},0,0\n", TILE_WIDTH)).unwrap();
        cfg.level_file = Some(level.clone());
        let best_path = cfg.best_time_path.clone();

        let t0 = Instant::now();
        let mut session = Session::new_at(cfg, t0);
        assert_eq!(session.game().layout_source(), LayoutSource::Custom);

        session.apply_at(GameAction::Select { x: 10, y: 10 }, t0);
        session.apply_at(
            GameAction::Select {
                x: TILE_WIDTH + 10,
                y: 10,
            },
            t0 + Duration::from_secs(30),
        );

        assert_eq!(session.game().status(), GameStatus::GameOver { win: true });
        assert_eq!(
            session.take_last_event(),
            Some(CoreEvent::Won {
                elapsed: Duration::from_secs(30),
                new_best: true
            })
        );
        let saved = BestTimeRecord::new(&best_path).load().unwrap();
        assert_eq!(saved, Some(Duration::from_secs(30)));

        let _ = fs::remove_file(level);
        let _ = fs::remove_file(best_path);
    }

    #[test]
    fn test_save_requires_editor_mode() {
        let mut cfg = config("save");
        let level = temp_path("save-level");
        fs::write(&level, "3,0,0,0\n3,200,0,0\n").unwrap();
        cfg.level_file = Some(level.clone());

        let mut session = Session::new(cfg.clone());
        assert!(!session.apply(GameAction::SaveLayout));

        cfg.editor = true;
        let mut session = Session::new(cfg);
        session.apply(GameAction::Select { x: 10, y: 10 });
        session.apply(GameAction::Select { x: 210, y: 10 });
        assert!(session.apply(GameAction::SaveLayout));

        // Removed tiles are written too
        assert_eq!(fs::read_to_string(&level).unwrap(), "3,0,0,0\n3,200,0,0\n");
        let _ = fs::remove_file(level);
    }

    #[test]
    fn test_restart_reloads_attached_file() {
        let mut cfg = config("reload");
        let level = temp_path("reload-level");
        fs::write(&level, "1,0,0,0\n1,100,0,0\n").unwrap();
        cfg.level_file = Some(level.clone());
        let mut session = Session::new(cfg);
        assert_eq!(session.game().board().len(), 2);

        fs::write(&level, "1,0,0,0\n1,100,0,0\n2,200,0,0\n2,300,0,0\n").unwrap();
        session.apply(GameAction::Restart);
        assert_eq!(session.game().board().len(), 4);

        let before = session.game().layout_index();
        session.apply(GameAction::NextLayout);
        assert_eq!(session.game().layout_index(), before + 1);
        assert_eq!(session.game().layout_source(), LayoutSource::Custom);
        let _ = fs::remove_file(level);
    }
}
