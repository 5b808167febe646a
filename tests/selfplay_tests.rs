//! Full games between search agents.

use nogo_mcts::agent::{Agent, MctsPlayer};
use nogo_mcts::board::{Board, Color};
use nogo_mcts::episode::play_episode;
use nogo_mcts::game::{Game, NoGo};

fn players(black_seed: u64, white_seed: u64) -> (MctsPlayer, MctsPlayer) {
    let black = MctsPlayer::from_args(&format!("name=b role=black N=40 seed={black_seed}")).unwrap();
    let white = MctsPlayer::from_args(&format!("name=w role=white N=40 seed={white_seed}")).unwrap();
    (black, white)
}

#[test]
fn test_game_is_legal_and_loser_is_stuck() {
    let (mut black, mut white) = players(1, 2);
    let record = play_episode(&mut black, &mut white, Board::new()).unwrap();

    // Replay from scratch and check every placement
    let mut board = Board::new();
    let mut side = Color::Black;
    for mv in &record.moves {
        assert_eq!(mv.color, side);
        board = mv.apply(&board).expect("recorded move must be legal");
        side = side.opponent();
    }
    assert_eq!(board, record.board);

    let loser = record.winner.opponent();
    assert_eq!(side, loser);
    assert!(NoGo.legal_moves(&board, loser).is_empty());
}

#[test]
fn test_seeded_games_repeat() {
    let (mut b1, mut w1) = players(7, 8);
    let (mut b2, mut w2) = players(7, 8);
    let first = play_episode(&mut b1, &mut w1, Board::new()).unwrap();
    let second = play_episode(&mut b2, &mut w2, Board::new()).unwrap();
    assert_eq!(first.moves, second.moves);
    assert_eq!(first.winner, second.winner);
}

#[test]
fn test_agent_names_and_roles() {
    let (black, white) = players(1, 1);
    assert_eq!(black.name(), "b");
    assert_eq!(white.role(), Color::White);
}
