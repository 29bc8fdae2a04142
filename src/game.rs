use alloc::vec::Vec;
use rand::Rng;

use crate::{
    board::Board,
    bot::BotTargeting,
    common::{GameError, ShotOutcome, Side},
    fleet::generate_random_fleet,
    placement::{check_placement, try_place_on_board},
    ship::{fleet_destroyed, Ship},
    shot::resolve_shot,
};

/// Phase of a game. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum GameStatus {
    /// Bot fleet is placed, waiting for the player's fleet.
    Setup,
    Playing,
    Finished,
}

/// The bot's retaliatory shot of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BotMove {
    pub row: usize,
    pub col: usize,
    pub hit: bool,
    pub sunk: bool,
}

/// Result of one player move and the bot reply it triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player_shot: ShotOutcome,
    pub game_over: bool,
    /// `None` when the player's shot ended the game.
    pub bot_move: Option<BotMove>,
}

/// Authoritative state of one game: both boards, both fleets, turn and phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub player_board: Board,
    pub bot_board: Board,
    pub player_ships: Vec<Ship>,
    pub bot_ships: Vec<Ship>,
    pub current_player: Side,
    pub status: GameStatus,
    pub winner: Option<Side>,
}

impl GameState {
    /// Fresh game in [`GameStatus::Setup`] with the bot fleet already placed.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let bot_ships = generate_random_fleet(rng)?;
        let mut bot_board = Board::new();
        for ship in &bot_ships {
            try_place_on_board(&mut bot_board, ship)?;
        }
        Ok(Self {
            player_board: Board::new(),
            bot_board,
            player_ships: Vec::new(),
            bot_ships,
            current_player: Side::Player,
            status: GameStatus::Setup,
            winner: None,
        })
    }

    /// Bot board as the player may see it: ships hidden until hit.
    pub fn opponent_view(&self) -> Board {
        self.bot_board.masked()
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Place the player's fleet and start play. Nothing changes on error.
    pub fn place_fleet(&mut self, ships: Vec<Ship>) -> Result<(), GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::InvalidState("ships can only be placed during setup"));
        }
        check_placement(&ships)?;

        let mut board = Board::new();
        for ship in &ships {
            try_place_on_board(&mut board, ship)?;
        }
        self.player_board = board;
        self.player_ships = ships;
        self.status = GameStatus::Playing;
        self.current_player = Side::Player;
        Ok(())
    }

    /// Place a randomly generated fleet for the player.
    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::InvalidState("ships can only be placed during setup"));
        }
        let ships = generate_random_fleet(rng)?;
        self.place_fleet(ships)
    }

    /// Fire the player's shot at (`row`, `col`) and, unless that wins the
    /// game, answer with exactly one bot shot.
    ///
    /// The turn is computed on a copy and committed only if every step
    /// succeeds.
    pub fn play_turn<R: Rng + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        targeting: &mut BotTargeting,
        rng: &mut R,
    ) -> Result<TurnOutcome, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::InvalidState("game is not in progress"));
        }
        if self.current_player != Side::Player {
            return Err(GameError::InvalidState("it is not the player's turn"));
        }
        match self.bot_board.get(row, col) {
            None => return Err(GameError::OutOfBounds { row, col }),
            Some(cell) if cell.is_resolved() => return Err(GameError::AlreadyAttacked { row, col }),
            Some(_) => {}
        }

        let mut next = self.clone();
        let player_shot = resolve_shot(&mut next.bot_board, &mut next.bot_ships, row, col)?;
        if fleet_destroyed(&next.bot_ships) {
            next.finish(Side::Player);
            *self = next;
            return Ok(TurnOutcome {
                player_shot,
                game_over: true,
                bot_move: None,
            });
        }

        next.current_player = Side::Bot;
        let (bot_row, bot_col) = targeting
            .next_shot(&next.player_board, rng)
            .ok_or(GameError::NoTargetAvailable)?;
        let bot_shot = resolve_shot(&mut next.player_board, &mut next.player_ships, bot_row, bot_col)?;
        let bot_move = BotMove {
            row: bot_row,
            col: bot_col,
            hit: bot_shot.hit,
            sunk: bot_shot.is_sunk(),
        };

        let game_over = fleet_destroyed(&next.player_ships);
        if game_over {
            next.finish(Side::Bot);
        } else {
            next.current_player = Side::Player;
        }
        *self = next;
        Ok(TurnOutcome {
            player_shot,
            game_over,
            bot_move: Some(bot_move),
        })
    }

    fn finish(&mut self, winner: Side) {
        self.status = GameStatus::Finished;
        self.winner = Some(winner);
    }
}
