use chess_cli::{apply_moves, self_play};
use chess_engine::Position;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn notation_replays_the_same_game(choices in prop::collection::vec(any::<usize>(), 0..30)) {
        let mut played = Position::startpos();
        let mut notation = Vec::new();
        for &choice in &choices {
            let moves = played.all_legal_moves(played.side_to_move);
            if moves.is_empty() {
                break;
            }
            let mv = moves[choice % moves.len()];
            notation.push(mv.to_uci());
            played.make_move(mv);
        }

        let mut replayed = Position::startpos();
        apply_moves(&mut replayed, &notation).unwrap();
        prop_assert_eq!(replayed.to_fen(), played.to_fen());
    }
}

#[test]
fn self_play_game_replays_from_its_start() {
    let report = self_play(Position::startpos(), 1, 12);
    let mut replayed = Position::from_fen(&report.start_fen).unwrap();
    apply_moves(&mut replayed, &report.moves).unwrap();
    assert_eq!(replayed.to_fen(), report.final_fen);
}

#[test]
fn self_play_from_stalemate_plays_nothing() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let report = self_play(position, 2, 10);
    assert!(report.moves.is_empty());
    assert_eq!(report.result.as_deref(), Some("1/2-1/2"));
}
