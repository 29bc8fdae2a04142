#![cfg(feature = "std")]

//! Versioned binary encoding of [`GameState`] for storage.

use anyhow::{bail, Context};

use crate::game::GameState;

/// Version tag written in front of every encoded state.
pub const STATE_VERSION: u16 = 1;

/// Encode the whole state as one blob: boards, fleets with hit counters,
/// turn, phase and winner.
pub fn encode_state(state: &GameState) -> anyhow::Result<Vec<u8>> {
    bincode::serialize(&(STATE_VERSION, state)).context("failed to encode game state")
}

/// Decode a blob produced by [`encode_state`].
pub fn decode_state(bytes: &[u8]) -> anyhow::Result<GameState> {
    let (version, state): (u16, GameState) =
        bincode::deserialize(bytes).context("failed to decode game state")?;
    if version != STATE_VERSION {
        bail!(
            "unsupported game state version: expected {}, got {}",
            STATE_VERSION,
            version
        );
    }
    Ok(state)
}
