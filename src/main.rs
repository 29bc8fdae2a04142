#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, Write};
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use seabattle::{
    ui::{coord_to_string, parse_coord, parse_ship, render_board, render_player_view},
    Difficulty, FileStore, GameError, GameService, GameStatus, GameStore, MemoryStats, MemoryStore,
    Side, StatsSink, FLEET_ORDER,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Level {
    Easy,
    Medium,
    Hard,
}

#[cfg(feature = "std")]
impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the bot in the terminal, resuming an unfinished game if there is one.
    Play {
        #[arg(long, default_value = "local")]
        user: String,
        #[arg(long, value_enum, default_value_t = Level::Medium)]
        difficulty: Level,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Directory for saved games and statistics; in-memory if omitted")]
        data_dir: Option<PathBuf>,
    },
    /// Show win/loss statistics stored in a data directory.
    Stats {
        #[arg(long, default_value = "local")]
        user: String,
        #[arg(long)]
        data_dir: PathBuf,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    seabattle::init_logging_with(log::LevelFilter::Warn);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            user,
            difficulty,
            seed,
            data_dir,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            match data_dir {
                Some(dir) => {
                    let store = Arc::new(FileStore::open(dir).await?);
                    let service = build_service(store.clone(), store, seed);
                    play(service, &user, difficulty.into()).await?;
                }
                None => {
                    let service = build_service(MemoryStore::new(), MemoryStats::new(), seed);
                    play(service, &user, difficulty.into()).await?;
                }
            }
        }
        Commands::Stats { user, data_dir } => {
            let store = FileStore::open(data_dir).await?;
            let stats = store.stats(&user).await?;
            println!(
                "{}: {} games, {} wins, {} losses",
                user, stats.total_games, stats.wins, stats.losses
            );
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn build_service<S: GameStore, T: StatsSink>(store: S, stats: T, seed: Option<u64>) -> GameService<S, T> {
    match seed {
        Some(s) => GameService::with_seed(store, stats, s),
        None => GameService::new(store, stats),
    }
}

#[cfg(feature = "std")]
fn prompt(text: &str) -> anyhow::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

#[cfg(feature = "std")]
async fn play<S: GameStore, T: StatsSink>(
    mut service: GameService<S, T>,
    user: &str,
    difficulty: Difficulty,
) -> anyhow::Result<()> {
    let mut game = match service.get_active_game(user).await? {
        Some(game) => {
            println!("Resuming game {} ({} bot).", game.id, game.difficulty);
            game
        }
        None => {
            let game = service.create_game(user, difficulty).await?;
            println!("New game {} against the {} bot.", game.id, game.difficulty);
            game
        }
    };

    while game.state.status == GameStatus::Setup {
        let Some(answer) = prompt("Place ships yourself? [y/N]: ")? else {
            return Ok(());
        };
        if !answer.eq_ignore_ascii_case("y") {
            game = service.auto_place(game.id).await?;
            break;
        }
        let mut ships = Vec::new();
        for ship_type in FLEET_ORDER {
            loop {
                let Some(line) = prompt(&format!(
                    "{} (length {}), e.g. 'B3 h' or 'B3 v': ",
                    ship_type,
                    ship_type.length()
                ))?
                else {
                    return Ok(());
                };
                match parse_ship(ship_type, &line) {
                    Some(ship) => {
                        ships.push(ship);
                        break;
                    }
                    None => println!("Could not read '{}'.", line),
                }
            }
        }
        match service.place_ships(game.id, ships).await {
            Ok(placed) => game = placed,
            Err(e) if e.is::<GameError>() => println!("{}. Try again.", e),
            Err(e) => return Err(e),
        }
    }

    while game.state.status == GameStatus::Playing {
        println!("\n{}", render_player_view(&game.state));
        let Some(line) = prompt("Your target (e.g. B7, or 'quit'): ")? else {
            return Ok(());
        };
        if line.eq_ignore_ascii_case("quit") {
            println!("Game {} saved.", game.id);
            return Ok(());
        }
        let Some((row, col)) = parse_coord(&line) else {
            println!("Could not read '{}'.", line);
            continue;
        };
        match service.make_move(game.id, row, col).await {
            Ok(result) => {
                println!(
                    "You fire at {}: {}",
                    coord_to_string(row, col),
                    verdict(result.hit, result.sunk)
                );
                if let Some(bot) = result.bot_move {
                    println!(
                        "Bot fires at {}: {}",
                        coord_to_string(bot.row, bot.col),
                        verdict(bot.hit, bot.sunk)
                    );
                }
                game = result.game;
            }
            Err(e) => match e.downcast_ref::<GameError>() {
                Some(GameError::AlreadyAttacked { .. }) => println!("You already fired there."),
                Some(err) => println!("{}", err),
                None => return Err(e),
            },
        }
    }

    println!("\nFinal boards:\n{}", render_board(&game.state.bot_board, true));
    println!("{}", render_board(&game.state.player_board, true));
    match game.state.winner {
        Some(Side::Player) => println!("VICTORY! You have sunk all enemy ships."),
        Some(Side::Bot) => println!("DEFEAT. All your ships have been destroyed."),
        None => {}
    }
    let stats = service.stats(user).await?;
    println!(
        "Record: {} wins, {} losses in {} games.",
        stats.wins, stats.losses, stats.total_games
    );
    Ok(())
}

#[cfg(feature = "std")]
fn verdict(hit: bool, sunk: bool) -> &'static str {
    match (hit, sunk) {
        (_, true) => "hit and sunk!",
        (true, false) => "hit.",
        _ => "miss.",
    }
}
