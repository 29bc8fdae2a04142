use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    resolve_shot, validate_placement, Board, BotTargeting, Cell, Difficulty, GameError, GameState, GameStatus,
    Orientation, Ship, ShipType, Side, TOTAL_SHIP_CELLS,
};

fn standard_fleet() -> Vec<Ship> {
    vec![
        Ship::new(ShipType::Carrier, 0, 0, Orientation::Horizontal),
        Ship::new(ShipType::Battleship, 2, 0, Orientation::Horizontal),
        Ship::new(ShipType::Cruiser, 4, 0, Orientation::Horizontal),
        Ship::new(ShipType::Cruiser, 6, 0, Orientation::Horizontal),
        Ship::new(ShipType::Destroyer, 8, 0, Orientation::Horizontal),
    ]
}

fn playing_game(seed: u64) -> (GameState, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = GameState::new(&mut rng).unwrap();
    state.place_fleet(standard_fleet()).unwrap();
    (state, rng)
}

#[test]
fn test_new_game_is_in_setup() {
    let mut rng = SmallRng::seed_from_u64(1);
    let state = GameState::new(&mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Setup);
    assert_eq!(state.current_player, Side::Player);
    assert_eq!(state.winner, None);
    assert!(state.player_ships.is_empty());
    assert_eq!(state.player_board, Board::new());
    assert!(validate_placement(&state.bot_ships));
    assert_eq!(state.bot_board.count(Cell::Ship), TOTAL_SHIP_CELLS);
    assert_eq!(state.opponent_view(), Board::new());
}

#[test]
fn test_place_fleet_starts_play() {
    let (state, _) = playing_game(2);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.current_player, Side::Player);
    assert_eq!(state.player_ships, standard_fleet());
    assert_eq!(state.player_board.count(Cell::Ship), TOTAL_SHIP_CELLS);
}

#[test]
fn test_invalid_fleet_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut state = GameState::new(&mut rng).unwrap();
    let before = state.clone();

    let mut fleet = standard_fleet();
    fleet[0] = Ship::new(ShipType::Destroyer, 0, 0, Orientation::Horizontal);
    let err = state.place_fleet(fleet).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlacement(_)));
    assert_eq!(state, before);
    assert_eq!(state.player_board.count(Cell::Ship), 0);
}

#[test]
fn test_placement_only_during_setup() {
    let (mut state, mut rng) = playing_game(4);
    assert!(matches!(
        state.place_fleet(standard_fleet()),
        Err(GameError::InvalidState(_))
    ));
    assert!(matches!(
        state.auto_place(&mut rng),
        Err(GameError::InvalidState(_))
    ));
}

#[test]
fn test_auto_place_starts_play() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut state = GameState::new(&mut rng).unwrap();
    state.auto_place(&mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Playing);
    assert!(validate_placement(&state.player_ships));
}

#[test]
fn test_move_before_setup_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut state = GameState::new(&mut rng).unwrap();
    let mut bot = BotTargeting::new(Difficulty::Easy);
    assert!(matches!(
        state.play_turn(0, 0, &mut bot, &mut rng),
        Err(GameError::InvalidState(_))
    ));
}

#[test]
fn test_turn_includes_one_bot_shot() {
    let (mut state, mut rng) = playing_game(7);
    let mut bot = BotTargeting::new(Difficulty::Medium);
    let outcome = state.play_turn(0, 0, &mut bot, &mut rng).unwrap();
    assert!(!outcome.game_over);

    let bot_move = outcome.bot_move.unwrap();
    let cell = state.player_board.get(bot_move.row, bot_move.col).unwrap();
    assert!(cell.is_resolved());
    assert_eq!(bot_move.hit, cell != Cell::Miss);
    let resolved = state.player_board.iter().filter(|(_, c)| c.is_resolved()).count();
    assert_eq!(resolved, 1);
    assert_eq!(state.current_player, Side::Player);
    assert_eq!(state.status, GameStatus::Playing);
}

#[test]
fn test_bad_moves_leave_state_unchanged() {
    let (mut state, mut rng) = playing_game(8);
    let mut bot = BotTargeting::new(Difficulty::Easy);
    state.play_turn(3, 3, &mut bot, &mut rng).unwrap();
    let before = state.clone();

    assert_eq!(
        state.play_turn(3, 3, &mut bot, &mut rng),
        Err(GameError::AlreadyAttacked { row: 3, col: 3 })
    );
    assert_eq!(
        state.play_turn(0, 10, &mut bot, &mut rng),
        Err(GameError::OutOfBounds { row: 0, col: 10 })
    );
    assert_eq!(state, before);
}

#[test]
fn test_game_ends_on_last_bot_ship_cell() {
    let (mut state, mut rng) = playing_game(9);
    let mut bot = BotTargeting::new(Difficulty::Easy);
    let targets: Vec<(usize, usize)> = state.bot_ships.iter().flat_map(|s| s.cells()).collect();
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);

    let (last, rest) = targets.split_last().unwrap();
    for &(r, c) in rest {
        let outcome = state.play_turn(r, c, &mut bot, &mut rng).unwrap();
        assert!(outcome.player_shot.hit);
        assert!(!outcome.game_over);
        assert!(outcome.bot_move.is_some());
    }
    // the bot had one shot fewer than there are ship cells
    assert_eq!(state.status, GameStatus::Playing);

    let outcome = state.play_turn(last.0, last.1, &mut bot, &mut rng).unwrap();
    assert!(outcome.game_over);
    assert!(outcome.player_shot.is_sunk());
    assert_eq!(outcome.bot_move, None);
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner, Some(Side::Player));
    assert_eq!(state.bot_board.count(Cell::Sunk), TOTAL_SHIP_CELLS);

    assert!(matches!(
        state.play_turn(9, 9, &mut bot, &mut rng),
        Err(GameError::InvalidState(_))
    ));
}

#[test]
fn test_bot_can_win() {
    let (mut state, mut rng) = playing_game(10);
    let mut bot = BotTargeting::new(Difficulty::Hard);

    // water on the player's side is already shot, only ships are left
    let water: Vec<(usize, usize)> = state
        .player_board
        .iter()
        .filter(|(_, c)| *c == Cell::Empty)
        .map(|(rc, _)| rc)
        .collect();
    for &(r, c) in &water {
        resolve_shot(&mut state.player_board, &mut state.player_ships, r, c).unwrap();
    }
    let misses: Vec<(usize, usize)> = state
        .bot_board
        .iter()
        .filter(|(_, c)| *c == Cell::Empty)
        .map(|(rc, _)| rc)
        .collect();

    for (turn, &(r, c)) in misses.iter().take(TOTAL_SHIP_CELLS).enumerate() {
        let outcome = state.play_turn(r, c, &mut bot, &mut rng).unwrap();
        assert!(outcome.bot_move.unwrap().hit);
        assert_eq!(outcome.game_over, turn + 1 == TOTAL_SHIP_CELLS);
    }
    assert!(state.is_finished());
    assert_eq!(state.winner, Some(Side::Bot));
    assert_eq!(state.current_player, Side::Bot);
    assert_eq!(state.player_board.count(Cell::Sunk), TOTAL_SHIP_CELLS);
}
