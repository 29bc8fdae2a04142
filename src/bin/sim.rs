use clap::{Parser, ValueEnum};
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{BotTargeting, Difficulty, GameService, MemoryStats, MemoryStore, Side};
use serde_json::json;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Play one automated game and print a JSON summary.
#[derive(Parser)]
struct Args {
    /// Strength of the bot opponent.
    #[arg(long, value_enum, default_value_t = Level::Medium)]
    bot: Level,
    /// Strategy used to pick the player's shots.
    #[arg(long, value_enum, default_value_t = Level::Easy)]
    player: Level,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    seabattle::init_logging_with(log::LevelFilter::Warn);
    let args = Args::parse();

    let mut service = GameService::with_seed(MemoryStore::new(), MemoryStats::new(), args.seed);
    let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));
    let mut shooter = BotTargeting::new(args.player.into());

    let game = service.create_game("sim", args.bot.into()).await?;
    let mut game = service.auto_place(game.id).await?;

    let mut player_shots = 0usize;
    while !game.state.is_finished() {
        let (row, col) = shooter
            .next_shot(&game.state.opponent_view(), &mut rng)
            .ok_or_else(|| anyhow::anyhow!("no target left for the player"))?;
        let result = service.make_move(game.id, row, col).await?;
        player_shots += 1;
        game = result.game;
    }

    let winner = match game.state.winner {
        Some(Side::Player) => "player",
        Some(Side::Bot) => "bot",
        None => "none",
    };
    let result = json!({
        "game": game.id,
        "bot": Difficulty::from(args.bot).name(),
        "player": Difficulty::from(args.player).name(),
        "player_shots": player_shots,
        "winner": winner,
        "stats": service.stats("sim").await?,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
