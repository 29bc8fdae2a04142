use seabattle::{
    fleet_destroyed, place_on_board, resolve_shot, Board, Cell, GameError, Orientation, Ship,
    ShipType, ShotOutcome,
};

fn setup() -> (Board, Vec<Ship>) {
    let fleet = vec![
        Ship::new(ShipType::Cruiser, 2, 2, Orientation::Horizontal),
        Ship::new(ShipType::Destroyer, 6, 6, Orientation::Vertical),
    ];
    let mut board = Board::new();
    for ship in &fleet {
        assert!(place_on_board(&mut board, ship));
    }
    (board, fleet)
}

fn hit_counts(fleet: &[Ship]) -> Vec<usize> {
    fleet.iter().map(|s| s.hits()).collect()
}

#[test]
fn test_miss_leaves_ships_alone() {
    let (mut board, mut fleet) = setup();
    let outcome = resolve_shot(&mut board, &mut fleet, 0, 0).unwrap();
    assert_eq!(outcome, ShotOutcome::MISS);
    assert_eq!(board.get(0, 0), Some(Cell::Miss));
    assert_eq!(hit_counts(&fleet), vec![0, 0]);
}

#[test]
fn test_hit_increments_exactly_one_ship() {
    let (mut board, mut fleet) = setup();
    let outcome = resolve_shot(&mut board, &mut fleet, 7, 6).unwrap();
    assert!(outcome.hit);
    assert!(!outcome.is_sunk());
    assert_eq!(board.get(7, 6), Some(Cell::Hit));
    assert_eq!(hit_counts(&fleet), vec![0, 1]);
}

#[test]
fn test_sunk_exactly_at_length() {
    let (mut board, mut fleet) = setup();
    for col in 2..4 {
        let outcome = resolve_shot(&mut board, &mut fleet, 2, col).unwrap();
        assert!(outcome.hit && outcome.sunk.is_none());
    }
    assert_eq!(board.count(Cell::Hit), 2);
    assert_eq!(board.count(Cell::Sunk), 0);

    let outcome = resolve_shot(&mut board, &mut fleet, 2, 4).unwrap();
    assert_eq!(outcome.sunk, Some(ShipType::Cruiser));
    assert_eq!(board.count(Cell::Hit), 0);
    for col in 2..5 {
        assert_eq!(board.get(2, col), Some(Cell::Sunk));
    }
    assert!(fleet[0].is_sunk());
    assert!(!fleet_destroyed(&fleet));
}

#[test]
fn test_fleet_destroyed_after_every_segment() {
    let (mut board, mut fleet) = setup();
    let cells: Vec<(usize, usize)> = fleet.iter().flat_map(|s| s.cells()).collect();
    let (last, rest) = cells.split_last().unwrap();
    for &(r, c) in rest {
        resolve_shot(&mut board, &mut fleet, r, c).unwrap();
        assert!(!fleet_destroyed(&fleet));
    }
    resolve_shot(&mut board, &mut fleet, last.0, last.1).unwrap();
    assert!(fleet_destroyed(&fleet));
}

#[test]
fn test_already_attacked_is_rejected() {
    let (mut board, mut fleet) = setup();
    resolve_shot(&mut board, &mut fleet, 2, 2).unwrap();
    resolve_shot(&mut board, &mut fleet, 9, 9).unwrap();
    let before = (board, fleet.clone());

    assert_eq!(
        resolve_shot(&mut board, &mut fleet, 2, 2),
        Err(GameError::AlreadyAttacked { row: 2, col: 2 })
    );
    assert_eq!(
        resolve_shot(&mut board, &mut fleet, 9, 9),
        Err(GameError::AlreadyAttacked { row: 9, col: 9 })
    );
    assert_eq!((board, fleet), before);
}

#[test]
fn test_sunk_cells_can_not_be_shot_again() {
    let (mut board, mut fleet) = setup();
    resolve_shot(&mut board, &mut fleet, 6, 6).unwrap();
    resolve_shot(&mut board, &mut fleet, 7, 6).unwrap();
    assert_eq!(board.get(6, 6), Some(Cell::Sunk));
    assert!(matches!(
        resolve_shot(&mut board, &mut fleet, 6, 6),
        Err(GameError::AlreadyAttacked { .. })
    ));
}

#[test]
fn test_out_of_bounds_and_unknown_ship() {
    let (mut board, mut fleet) = setup();
    assert_eq!(
        resolve_shot(&mut board, &mut fleet, 10, 0),
        Err(GameError::OutOfBounds { row: 10, col: 0 })
    );

    // board says ship, but the fleet passed in does not cover the cell
    let before = board;
    assert_eq!(
        resolve_shot(&mut board, &mut fleet[..1], 6, 6),
        Err(GameError::UnknownShipHit { row: 6, col: 6 })
    );
    assert_eq!(board, before);
}
