//! Rule-level tests for the engine: opening, captures, passing and
//! termination, driven only through the public API.

use othello_engine::{Board, Cell, Color, EngineError, GameState, Position, Winner};

// =========================================================================
// Helpers
// =========================================================================

fn pos(row: u8, col: u8) -> Position {
    Position { row, col }
}

/// Row 0 holds black at (0,0) and white at (0,1); everything else empty.
/// Black can capture by playing (0,2); white has no move at all.
fn one_sided_board() -> Board {
    let mut board = Board::empty();
    board.set(pos(0, 0), Cell::Black);
    board.set(pos(0, 1), Cell::White);
    board
}

fn assert_scores_match_board(state: &GameState) {
    let board = state.board();
    assert_eq!(state.black_score(), board.count(Color::Black));
    assert_eq!(state.white_score(), board.count(Color::White));
    assert_eq!(state.black_score() + state.white_score(), board.occupied());
    assert!(state.black_score() + state.white_score() <= 64);
}

// =========================================================================
// Opening
// =========================================================================

#[test]
fn test_new_game_matches_standard_opening() {
    let state = GameState::new();
    let board = state.board();

    assert_eq!(board.occupied(), 4);
    assert_eq!(board.get(pos(3, 3)), Some(Cell::White));
    assert_eq!(board.get(pos(3, 4)), Some(Cell::Black));
    assert_eq!(board.get(pos(4, 3)), Some(Cell::Black));
    assert_eq!(board.get(pos(4, 4)), Some(Cell::White));
    assert_eq!(state.current_player(), Color::Black);
    assert_eq!((state.black_score(), state.white_score()), (2, 2));
    assert_eq!(
        state.valid_moves(),
        &[pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
    );
}

#[test]
fn test_legal_moves_agrees_with_valid_moves() {
    let state = GameState::new();
    assert_eq!(state.legal_moves(), state.valid_moves());
    for p in state.valid_moves() {
        assert!(state.is_legal_move(*p));
    }
    assert!(!state.is_legal_move(pos(0, 0)));
}

// =========================================================================
// Captures
// =========================================================================

#[test]
fn test_black_opening_move_flips_center_piece() {
    let state = GameState::new().apply_move(pos(2, 3)).unwrap();

    assert_eq!(state.board().get(pos(2, 3)), Some(Cell::Black));
    assert_eq!(state.board().get(pos(3, 3)), Some(Cell::Black));
    assert_eq!((state.black_score(), state.white_score()), (4, 1));
    assert_eq!(state.current_player(), Color::White);
    assert_eq!(state.valid_moves(), &[pos(2, 2), pos(2, 4), pos(4, 2)]);
}

#[test]
fn test_reported_captures_are_exactly_the_changed_cells() {
    let before = GameState::new();
    let (after, captured) = before.apply_move_with_captures(pos(5, 4)).unwrap();

    let changed: Vec<Position> = Position::all()
        .filter(|&p| p != pos(5, 4))
        .filter(|&p| before.board().get(p) != after.board().get(p))
        .collect();
    assert_eq!(captured, changed);
    assert_eq!(captured, vec![pos(4, 4)]);
}

#[test]
fn test_illegal_move_returns_error_and_no_change() {
    let state = GameState::new();
    let snapshot = state.clone();

    let result = state.apply_move(pos(0, 0));

    assert_eq!(result, Err(EngineError::InvalidMove(pos(0, 0))));
    assert_eq!(state, snapshot);
}

#[test]
fn test_occupied_square_is_not_a_move() {
    let state = GameState::new();
    assert!(state.apply_move(pos(3, 4)).is_err());
}

// =========================================================================
// Skipping
// =========================================================================

#[test]
fn test_skip_refused_while_moves_exist() {
    let state = GameState::new();
    assert_eq!(
        state.skip_turn(),
        Err(EngineError::SkipNotAllowed { available: 4 })
    );
}

#[test]
fn test_one_stuck_side_passes_instead_of_ending() {
    let state = GameState::from_board(one_sided_board(), Color::White);

    assert!(state.valid_moves().is_empty());
    assert!(!state.is_game_over(), "black can still move");
    assert_eq!(state.winner(), None);

    let next = state.skip_turn().unwrap();
    assert_eq!(next.current_player(), Color::Black);
    assert_eq!(next.valid_moves(), &[pos(0, 2)]);
    assert!(!next.is_game_over());
}

#[test]
fn test_move_leaving_nobody_able_to_play_ends_game() {
    let state = GameState::from_board(one_sided_board(), Color::Black);
    let finished = state.apply_move(pos(0, 2)).unwrap();

    assert!(finished.is_game_over());
    assert_eq!((finished.black_score(), finished.white_score()), (3, 0));
    assert_eq!(finished.winner(), Some(Winner::Black));
}

// =========================================================================
// Termination
// =========================================================================

#[test]
fn test_no_moves_for_either_side_is_a_draw_on_equal_scores() {
    let mut board = Board::empty();
    board.set(pos(0, 0), Cell::Black);
    board.set(pos(7, 7), Cell::White);

    let state = GameState::from_board(board, Color::Black);

    assert!(state.is_game_over());
    assert_eq!(state.winner(), Some(Winner::Draw));
}

#[test]
fn test_no_moves_for_either_side_higher_score_wins() {
    let mut board = Board::empty();
    board.set(pos(0, 0), Cell::White);
    board.set(pos(0, 7), Cell::White);
    board.set(pos(7, 7), Cell::Black);

    let state = GameState::from_board(board, Color::Black);

    assert!(state.is_game_over());
    assert_eq!(state.winner(), Some(Winner::White));
}

#[test]
fn test_full_board_ends_game() {
    let mut board = Board::empty();
    for p in Position::all() {
        let cell = if p.row < 4 { Cell::Black } else { Cell::White };
        board.set(p, cell);
    }
    board.set(pos(7, 7), Cell::Black);

    let state = GameState::from_board(board, Color::White);

    assert!(board.is_full());
    assert!(state.is_game_over());
    assert_eq!((state.black_score(), state.white_score()), (33, 31));
    assert_eq!(state.winner(), Some(Winner::Black));
}

#[test]
fn test_surrender_awards_opponent() {
    let state = GameState::new().surrender(Color::Black);
    assert!(state.is_game_over());
    assert_eq!(state.winner(), Some(Winner::White));
    // Board and scores are untouched.
    assert_eq!((state.black_score(), state.white_score()), (2, 2));
}

#[test]
fn test_surrender_keeps_valid_moves_of_player_to_move() {
    let state = GameState::new().surrender(Color::Black);
    assert!(state.is_game_over());
    assert_eq!(state.valid_moves(), GameState::new().valid_moves());
    assert_eq!(state.valid_moves().len(), 4);
    // listed, but not playable
    assert_eq!(state.apply_move(state.valid_moves()[0]), Err(EngineError::GameFinished));
}

// =========================================================================
// Whole-game invariants
// =========================================================================

/// Plays a full game, always taking the first legal move, and checks the
/// scoring and termination invariants after every transition.
#[test]
fn test_full_playthrough_keeps_invariants() {
    let mut state = GameState::new();
    let mut transitions = 0;

    while !state.is_game_over() {
        assert!(transitions < 200, "game did not terminate");
        assert_eq!(state.valid_moves(), state.legal_moves().as_slice());

        state = match state.valid_moves().first().copied() {
            Some(mv) => state.apply_move(mv).unwrap(),
            None => state.skip_turn().unwrap(),
        };
        assert_scores_match_board(&state);
        transitions += 1;
    }

    let board = state.board();
    let nobody_moves =
        !board.has_legal_move(Color::Black) && !board.has_legal_move(Color::White);
    assert!(board.is_full() || nobody_moves);

    let expected = match state.black_score().cmp(&state.white_score()) {
        std::cmp::Ordering::Greater => Winner::Black,
        std::cmp::Ordering::Less => Winner::White,
        std::cmp::Ordering::Equal => Winner::Draw,
    };
    assert_eq!(state.winner(), Some(expected));
}
