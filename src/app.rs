use crate::error::Result;
use crate::input::Command;
use crate::navigation::MoveResult;
use crate::prize::{PrizeGate, Reveal};
use crate::session::MazeSession;
use rand::Rng;

pub const STATUS_START: &str = "Find the heart.";
pub const STATUS_MOVING: &str = "Keep going…";
pub const STATUS_ARRIVED: &str = "You did it! Open your prize 🎁";
pub const STATUS_NEW_MAZE: &str = "New maze! Find the heart.";
const MAX_GUESS_LEN: usize = 64;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WinDialog {
    pub guess: String,
    pub reveal: Option<Reveal>,
}

pub struct App<R: Rng> {
    pub session: MazeSession<R>,
    gate: PrizeGate,
    status: &'static str,
    dialog: Option<WinDialog>,
    quit: bool,
}

impl<R: Rng> App<R> {
    pub fn new(session: MazeSession<R>, gate: PrizeGate) -> Self {
        Self {
            session,
            gate,
            status: STATUS_START,
            dialog: None,
            quit: false,
        }
    }

    pub fn status(&self) -> &str {
        self.status
    }

    pub fn dialog(&self) -> Option<&WinDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Quit => self.quit = true,
            Command::Move { dir, steps } => {
                if self.dialog_open() {
                    return Ok(());
                }
                match self.session.attempt_move(dir, steps) {
                    MoveResult::Blocked => {}
                    MoveResult::Moved => self.status = STATUS_MOVING,
                    MoveResult::Arrived => {
                        self.status = STATUS_ARRIVED;
                        self.dialog = Some(WinDialog::default());
                    }
                }
            }
            Command::Regenerate => {
                if self.dialog_open() {
                    return Ok(());
                }
                self.session.regenerate()?;
                self.status = STATUS_NEW_MAZE;
            }
            Command::PhraseChar(c) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    if !c.is_control() && dialog.guess.chars().count() < MAX_GUESS_LEN {
                        dialog.guess.push(c);
                    }
                }
            }
            Command::PhraseBackspace => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.guess.pop();
                }
            }
            Command::Reveal => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.reveal = Some(self.gate.reveal(&dialog.guess));
                }
            }
            Command::CloseDialog => self.dialog = None,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Dir, Grid, Pos};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> App<StdRng> {
        let grid = Grid::parse(&["#####", "#.#.#", "#...#", "#.#.#", "#####"]).unwrap();
        let session = MazeSession::from_grid(grid, StdRng::seed_from_u64(1));
        App::new(session, PrizeGate::new("i choose you", "CODE-1"))
    }

    fn mv(dir: Dir) -> Command {
        Command::Move { dir, steps: 1 }
    }

    fn reach_goal(app: &mut App<StdRng>) {
        for cmd in [mv(Dir::Down), mv(Dir::Right), mv(Dir::Right), mv(Dir::Down)] {
            app.handle(cmd).unwrap();
        }
    }

    #[test]
    fn blocked_move_keeps_status() {
        let mut app = app();
        app.handle(mv(Dir::Right)).unwrap();
        assert_eq!(app.status(), STATUS_START);
        assert_eq!(app.session.player(), Pos::new(1, 1));

        app.handle(mv(Dir::Down)).unwrap();
        assert_eq!(app.status(), STATUS_MOVING);
        assert_eq!(app.session.player(), Pos::new(1, 2));
    }

    #[test]
    fn arrival_opens_dialog_and_freezes_movement() {
        let mut app = app();
        reach_goal(&mut app);
        assert_eq!(app.session.player(), Pos::new(3, 3));
        assert_eq!(app.status(), STATUS_ARRIVED);
        assert!(app.dialog_open());

        app.handle(mv(Dir::Up)).unwrap();
        assert_eq!(app.session.player(), Pos::new(3, 3));
        app.handle(Command::Regenerate).unwrap();
        assert_eq!(app.session.generation(), 0);
    }

    #[test]
    fn phrase_entry_and_reveal() {
        let mut app = app();
        reach_goal(&mut app);
        for c in "I Choose Yoo".chars() {
            app.handle(Command::PhraseChar(c)).unwrap();
        }
        app.handle(Command::Reveal).unwrap();
        assert_eq!(app.dialog().unwrap().reveal, Some(Reveal::Denied));

        app.handle(Command::PhraseBackspace).unwrap();
        app.handle(Command::PhraseChar('u')).unwrap();
        app.handle(Command::Reveal).unwrap();
        assert_eq!(
            app.dialog().unwrap().reveal,
            Some(Reveal::Granted("CODE-1".to_string()))
        );
    }

    #[test]
    fn reopening_dialog_starts_clean() {
        let mut app = app();
        reach_goal(&mut app);
        app.handle(Command::PhraseChar('x')).unwrap();
        app.handle(Command::Reveal).unwrap();
        app.handle(Command::CloseDialog).unwrap();
        assert!(!app.dialog_open());

        app.handle(mv(Dir::Up)).unwrap();
        assert_eq!(app.status(), STATUS_MOVING);
        app.handle(mv(Dir::Down)).unwrap();
        assert_eq!(app.dialog(), Some(&WinDialog::default()));
    }

    #[test]
    fn regenerate_and_quit() {
        let grid = Grid::parse(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let session = MazeSession::from_grid(grid, StdRng::seed_from_u64(3));
        let mut app = App::new(session, PrizeGate::default());
        app.handle(mv(Dir::Right)).unwrap();
        app.handle(Command::Regenerate).unwrap();
        assert_eq!(app.status(), STATUS_NEW_MAZE);
        assert_eq!(app.session.player(), Pos::new(1, 1));
        assert_eq!(app.session.generation(), 1);
        assert_eq!(app.session.grid().path_count(), 7);

        assert!(!app.should_quit());
        app.handle(Command::Quit).unwrap();
        assert!(app.should_quit());
    }
}
