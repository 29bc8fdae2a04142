use proptest::prelude::*;
use seabattle::{
    check_placement, place_on_board, try_place_on_board, validate_placement, Board, Cell,
    Orientation, PlacementError, Ship, ShipType, BOARD_SIZE,
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

#[test]
fn test_place_stamps_ship_cells() {
    let mut board = Board::new();
    let ship = Ship::new(ShipType::Battleship, 1, 2, Orientation::Vertical);
    assert!(place_on_board(&mut board, &ship));
    for r in 1..5 {
        assert_eq!(board.get(r, 2), Some(Cell::Ship));
    }
    assert_eq!(board.count(Cell::Ship), 4);
}

#[test]
fn test_place_out_of_bounds() {
    let mut board = Board::new();
    let ship = Ship::new(ShipType::Carrier, 0, 6, Orientation::Horizontal);
    assert_eq!(
        try_place_on_board(&mut board, &ship),
        Err(PlacementError::OutOfBounds)
    );
    let ship = Ship::new(ShipType::Destroyer, 9, 0, Orientation::Vertical);
    assert!(!place_on_board(&mut board, &ship));
    assert_eq!(board, Board::new());

    // flush with the edge is fine
    let ship = Ship::new(ShipType::Carrier, 9, 5, Orientation::Horizontal);
    assert!(place_on_board(&mut board, &ship));
}

#[test]
fn test_place_overlap_and_touching() {
    let mut board = Board::new();
    assert!(place_on_board(
        &mut board,
        &Ship::new(ShipType::Cruiser, 4, 4, Orientation::Horizontal)
    ));
    let before = board;

    let crossing = Ship::new(ShipType::Cruiser, 3, 5, Orientation::Vertical);
    assert_eq!(
        try_place_on_board(&mut board, &crossing),
        Err(PlacementError::Touching)
    );
    let diagonal = Ship::new(ShipType::Destroyer, 5, 7, Orientation::Horizontal);
    assert_eq!(
        try_place_on_board(&mut board, &diagonal),
        Err(PlacementError::Touching)
    );
    let on_top = Ship::new(ShipType::Destroyer, 4, 4, Orientation::Vertical);
    assert_eq!(
        try_place_on_board(&mut board, &on_top),
        Err(PlacementError::Overlap)
    );
    assert_eq!(board, before);

    // one clear cell between ships
    let apart = Ship::new(ShipType::Destroyer, 6, 4, Orientation::Horizontal);
    assert!(place_on_board(&mut board, &apart));
}

#[test]
fn test_validate_standard_fleet() {
    let fleet = standard_fleet();
    assert!(validate_placement(&fleet));

    let mut reversed = fleet.clone();
    reversed.reverse();
    assert!(validate_placement(&reversed));
}

#[test]
fn test_validate_rejects_wrong_composition() {
    let mut fleet = standard_fleet();
    fleet[0] = Ship::new(ShipType::Destroyer, 0, 0, Orientation::Horizontal);
    assert_eq!(check_placement(&fleet), Err(PlacementError::Composition));

    let mut missing = standard_fleet();
    missing.pop();
    assert_eq!(check_placement(&missing), Err(PlacementError::Composition));

    let mut extra = standard_fleet();
    extra.push(Ship::new(ShipType::Destroyer, 8, 5, Orientation::Horizontal));
    assert!(!validate_placement(&extra));

    assert!(!validate_placement(&[]));
}

#[test]
fn test_validate_rejects_touching_fleet() {
    let mut fleet = standard_fleet();
    // destroyer moved directly under the second cruiser
    fleet[4] = Ship::new(ShipType::Destroyer, 7, 0, Orientation::Horizontal);
    assert_eq!(check_placement(&fleet), Err(PlacementError::Touching));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Placing a ship that overlaps or touches an existing one fails and
    /// leaves the board as it was.
    #[test]
    fn touching_placement_fails_and_keeps_board(
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE - 2,
        dr in -1i32..=1,
        dc in -1i32..=3,
        vertical in any::<bool>(),
    ) {
        let mut board = Board::new();
        let first = Ship::new(ShipType::Cruiser, row, col, Orientation::Horizontal);
        prop_assert!(place_on_board(&mut board, &first));
        let before = board;

        // anchor somewhere in the 8-neighbourhood of the first ship
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        prop_assume!(r >= 0 && c >= 0);
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let second = Ship::new(ShipType::Destroyer, r as usize, c as usize, orientation);

        prop_assert!(!place_on_board(&mut board, &second));
        prop_assert_eq!(board, before);
    }

    #[test]
    fn validation_is_order_independent(seed in any::<u64>(), rotate in 0usize..5) {
        use rand::{rngs::SmallRng, SeedableRng};
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut fleet = seabattle::generate_random_fleet(&mut rng).unwrap();
        prop_assert!(validate_placement(&fleet));
        fleet.rotate_left(rotate);
        prop_assert!(validate_placement(&fleet));
        fleet.reverse();
        prop_assert!(validate_placement(&fleet));
    }
}
