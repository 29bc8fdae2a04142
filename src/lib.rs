#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod bot;
mod common;
mod config;
mod fleet;
mod game;
mod placement;
mod ship;
mod shot;
#[cfg(feature = "std")]
mod codec;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod stats;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod ui;

pub use board::*;
pub use bot::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use placement::*;
pub use ship::*;
pub use shot::*;
#[cfg(feature = "std")]
pub use codec::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
#[cfg(feature = "std")]
pub use service::{Game, GameService, MoveResult};
#[cfg(feature = "std")]
pub use stats::{MemoryStats, Stats, StatsSink};
#[cfg(feature = "std")]
pub use store::{FileStore, GameId, GameRecord, GameStore, MemoryStore, NewGameRecord};
