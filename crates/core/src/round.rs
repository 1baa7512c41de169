//! Round module - the round controller
//!
//! Owns the board, the bag, the hold slot and the active piece, and turns player
//! commands into piece movement, locking, line clears and respawns.
//!
//! ```text
//! Spawning --spawn fits--> Active --hard drop--> lock + clear --> Spawning
//!     |                      |  \--hold--> Spawning (held kind or bag)
//!     \--spawn overlaps--> GameOver (terminal until restart)
//! ```
//!
//! Nothing here is timed: gravity, soft-drop repeat and lock delay belong to the caller,
//! which injects `SoftDrop` commands on its own schedule.

use arrayvec::ArrayVec;

use crate::bag::{Bag, MAX_PEEK};
use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Command, CommandOutcome, PieceKind};

/// Where the round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No active piece yet; `start_round` has not run.
    Spawning,
    /// A piece is in play and commands are accepted.
    Active,
    /// A spawn collided with locked cells. Only a restart leaves this phase.
    GameOver,
}

/// One round of play.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    bag: Bag,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    phase: Phase,
    lines: u32,
    pieces_locked: u32,
}

impl Round {
    /// New round with an entropy-seeded bag. Call [`Round::start_round`] to spawn.
    pub fn new() -> Self {
        Self::from_bag(Bag::from_entropy())
    }

    /// New round whose piece sequence is determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_bag(Bag::new(seed))
    }

    fn from_bag(bag: Bag) -> Self {
        Self {
            board: Board::new(),
            bag,
            active: None,
            hold: None,
            can_hold: true,
            phase: Phase::Spawning,
            lines: 0,
            pieces_locked: 0,
        }
    }

    /// Spawn the first piece. No-op unless the round is still in `Spawning`.
    pub fn start_round(&mut self) -> Phase {
        if self.phase == Phase::Spawning {
            log::info!("round start (seed {})", self.bag.seed());
            let kind = self.bag.draw();
            self.spawn(kind);
        }
        self.phase
    }

    /// Throw the round away and start a fresh one with a new entropy seed.
    pub fn restart_round(&mut self) -> Phase {
        *self = Self::new();
        self.start_round()
    }

    /// Throw the round away and start a fresh one with a fixed seed.
    pub fn restart_round_with_seed(&mut self, seed: u64) -> Phase {
        *self = Self::with_seed(seed);
        self.start_round()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Landing preview of the active piece.
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|p| p.ghost(&self.board))
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Whether the hold command is available for the current piece.
    pub fn can_hold(&self) -> bool {
        self.can_hold && self.phase == Phase::Active
    }

    /// Next `n` kinds the bag will deal.
    pub fn peek(&self, n: usize) -> ArrayVec<PieceKind, MAX_PEEK> {
        self.bag.peek(n)
    }

    pub fn seed(&self) -> u64 {
        self.bag.seed()
    }

    /// Total rows cleared this round.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Place a new piece of `kind` at the spawn anchor, or end the round if it overlaps.
    fn spawn(&mut self, kind: PieceKind) {
        let piece = Piece::spawn(kind);
        if piece.overlaps(&self.board) {
            log::info!(
                "game over: {kind} blocked at spawn after {} pieces, {} lines",
                self.pieces_locked,
                self.lines
            );
            self.active = None;
            self.phase = Phase::GameOver;
            return;
        }
        self.active = Some(piece);
        self.phase = Phase::Active;
    }

    /// Apply one command.
    pub fn command(&mut self, cmd: Command) -> CommandOutcome {
        let Some(mut piece) = self.active.filter(|_| self.phase == Phase::Active) else {
            return CommandOutcome::rejected(self.is_game_over());
        };

        let outcome = match cmd {
            Command::MoveLeft => self.accept_if(piece.try_move(0, -1, &self.board), piece),
            Command::MoveRight => self.accept_if(piece.try_move(0, 1, &self.board), piece),
            Command::SoftDrop => self.accept_if(piece.try_move(1, 0, &self.board), piece),
            Command::RotateCw => self.accept_if(piece.try_rotate(true, &self.board), piece),
            Command::RotateCcw => self.accept_if(piece.try_rotate(false, &self.board), piece),
            Command::HardDrop => {
                piece.drop_to_rest(&self.board);
                let lines_cleared = self.lock(piece);
                CommandOutcome {
                    accepted: true,
                    lines_cleared,
                    game_over: self.is_game_over(),
                }
            }
            Command::Hold => self.hold_swap(piece),
        };

        if !outcome.accepted {
            log::trace!("{} rejected", cmd.as_str());
        }
        outcome
    }

    fn accept_if(&mut self, accepted: bool, piece: Piece) -> CommandOutcome {
        if accepted {
            self.active = Some(piece);
        }
        CommandOutcome {
            accepted,
            lines_cleared: 0,
            game_over: false,
        }
    }

    /// Commit the piece's cells, clear full rows and spawn the next piece.
    fn lock(&mut self, piece: Piece) -> u32 {
        for (row, col) in piece.cells() {
            self.board.set(row, col, piece.kind());
        }
        self.active = None;
        self.pieces_locked += 1;

        let cleared = self.board.clear_full_rows() as u32;
        self.lines += cleared;
        log::debug!(
            "locked {} at {:?}, cleared {cleared} (total {})",
            piece.kind(),
            piece.anchor(),
            self.lines
        );

        self.can_hold = true;
        let kind = self.bag.draw();
        self.spawn(kind);
        cleared
    }

    /// Stash the active kind. An empty slot deals a new piece from the bag, an occupied
    /// slot respawns the stashed kind. Once per spawned piece.
    fn hold_swap(&mut self, piece: Piece) -> CommandOutcome {
        if !self.can_hold {
            return CommandOutcome::rejected(false);
        }

        let next = match self.hold.replace(piece.kind()) {
            Some(held) => held,
            None => self.bag.draw(),
        };
        log::debug!("hold {}, spawning {next}", piece.kind());

        self.active = None;
        self.can_hold = false;
        self.spawn(next);

        CommandOutcome {
            accepted: true,
            lines_cleared: 0,
            game_over: self.is_game_over(),
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
