#![cfg(feature = "std")]

//! Game service: loads a game, applies one transition and persists the
//! result. Every mutating call takes `&mut self`; share a service between
//! tasks by wrapping it in a `tokio::sync::Mutex`.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::{
    bot::{BotTargeting, Difficulty},
    codec::{decode_state, encode_state},
    common::{GameError, Side},
    game::{BotMove, GameState},
    ship::Ship,
    stats::{Stats, StatsSink},
    store::{GameId, GameRecord, GameStore, NewGameRecord},
};

/// A game as returned to callers: identity, owner, settings and full state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub user_id: String,
    pub state: GameState,
    pub difficulty: Difficulty,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Game {
    fn from_record(record: GameRecord) -> anyhow::Result<Self> {
        let state = decode_state(&record.state)?;
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            state,
            difficulty: record.difficulty,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    fn to_record(&self) -> anyhow::Result<GameRecord> {
        Ok(GameRecord {
            id: self.id,
            user_id: self.user_id.clone(),
            state: encode_state(&self.state)?,
            difficulty: self.difficulty,
            status: self.state.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Outcome of [`GameService::make_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub game: Game,
    pub hit: bool,
    pub sunk: bool,
    pub game_over: bool,
    pub bot_move: Option<BotMove>,
}

pub struct GameService<S, T> {
    store: S,
    stats: T,
    rng: SmallRng,
}

impl<S: GameStore, T: StatsSink> GameService<S, T> {
    pub fn new(store: S, stats: T) -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(store, stats, SmallRng::from_rng(&mut seed_rng))
    }

    /// Service with a fixed RNG seed, for reproducible games.
    pub fn with_seed(store: S, stats: T, seed: u64) -> Self {
        Self::with_rng(store, stats, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, stats: T, rng: SmallRng) -> Self {
        Self { store, stats, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats_sink(&self) -> &T {
        &self.stats
    }

    /// Start a new game: the bot fleet is placed, the player's is not.
    pub async fn create_game(&mut self, user_id: &str, difficulty: Difficulty) -> anyhow::Result<Game> {
        let state = GameState::new(&mut self.rng)?;
        let record = self
            .store
            .insert(NewGameRecord {
                user_id: user_id.to_string(),
                state: encode_state(&state)?,
                difficulty,
                status: state.status,
                created_at: now_millis(),
            })
            .await?;
        info!("created game {} for user {} ({})", record.id, user_id, difficulty);
        Game::from_record(record)
    }

    pub async fn get_game(&self, id: GameId) -> anyhow::Result<Game> {
        let record = self.store.load(id).await?.ok_or(GameError::NotFound(id))?;
        Game::from_record(record)
    }

    /// Most recently updated unfinished game of `user_id`, if any.
    pub async fn get_active_game(&self, user_id: &str) -> anyhow::Result<Option<Game>> {
        match self.store.find_active_by_user(user_id).await? {
            Some(record) => Ok(Some(Game::from_record(record)?)),
            None => Ok(None),
        }
    }

    /// Place the player's fleet and start play.
    pub async fn place_ships(&mut self, id: GameId, ships: Vec<Ship>) -> anyhow::Result<Game> {
        let mut game = self.get_game(id).await?;
        if let Err(e) = game.state.place_fleet(ships) {
            warn!("rejected placement for game {}: {}", id, e);
            return Err(e.into());
        }
        self.commit(&mut game).await?;
        debug!("game {} started", id);
        Ok(game)
    }

    /// Place a random fleet for the player and start play.
    pub async fn auto_place(&mut self, id: GameId) -> anyhow::Result<Game> {
        let mut game = self.get_game(id).await?;
        if let Err(e) = game.state.auto_place(&mut self.rng) {
            warn!("rejected auto placement for game {}: {}", id, e);
            return Err(e.into());
        }
        self.commit(&mut game).await?;
        debug!("game {} started with random fleet", id);
        Ok(game)
    }

    /// Fire at (`row`, `col`) on the bot's board and let the bot answer.
    ///
    /// The bot's hunt queue is not stored; a fresh one is derived from the
    /// player's board on every move.
    pub async fn make_move(&mut self, id: GameId, row: usize, col: usize) -> anyhow::Result<MoveResult> {
        let mut game = self.get_game(id).await?;
        let mut targeting = BotTargeting::new(game.difficulty);
        let outcome = match game.state.play_turn(row, col, &mut targeting, &mut self.rng) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("rejected move ({}, {}) on game {}: {}", row, col, id, e);
                return Err(e.into());
            }
        };
        debug!(
            "game {}: player ({}, {}) hit={} bot={:?}",
            id, row, col, outcome.player_shot.hit, outcome.bot_move
        );

        // Stats before save: a failed stats write leaves the stored game untouched.
        if outcome.game_over {
            let won = game.state.winner == Some(Side::Player);
            self.stats.record_result(&game.user_id, won).await?;
            info!(
                "game {} finished, {} wins",
                id,
                if won { "player" } else { "bot" }
            );
        }

        self.commit(&mut game).await?;

        Ok(MoveResult {
            hit: outcome.player_shot.hit,
            sunk: outcome.player_shot.is_sunk(),
            game_over: outcome.game_over,
            bot_move: outcome.bot_move,
            game,
        })
    }

    pub async fn stats(&self, user_id: &str) -> anyhow::Result<Stats> {
        self.stats.stats(user_id).await
    }

    async fn commit(&self, game: &mut Game) -> anyhow::Result<()> {
        game.updated_at = now_millis().max(game.updated_at);
        self.store.save(&game.to_record()?).await
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
