//! End-to-end scenarios for the bundled games.

use strictly_boardgames::{AnyGame, Claim, GameId, Hex, NinARow};
use strictly_engine::{GameEngine, GameStatus, MoveError, MoveOptions, MoveResult, keys};

fn play<G: GameEngine>(game: &mut G, moves: &[&str]) {
    for mv in moves {
        game.move_(mv, MoveOptions::default()).unwrap();
    }
}

#[test]
fn test_rectangular_opening() {
    let mut game = NinARow::with_seed(2, &[] as &[&str], 0).unwrap();
    assert_eq!(game.moves().len(), 9);
    assert_eq!(*game.core().currplayer(), 1);

    play(&mut game, &["a1"]);
    assert_eq!(*game.core().currplayer(), 2);
    assert_eq!(game.core().stack().len(), 2);
    assert_eq!(game.moves().len(), 8);

    let render = game.render();
    assert_eq!(render.glyph(0, 2), Some('A'));
    assert_eq!(render.glyph(0, 0), Some('-'));
    assert!(render.to_text().contains('A'));
}

#[test]
fn test_reloaded_position_finishes_with_winning_move() {
    let mut game = NinARow::with_seed(2, &[] as &[&str], 5).unwrap();
    play(&mut game, &["a1", "a2", "b1", "b2"]);
    let json = game.state_json().unwrap();

    let mut restored = NinARow::from_json(&json).unwrap();
    assert_eq!(*restored.core().currplayer(), 1);
    assert_eq!(restored.moves(), game.moves());
    play(&mut restored, &["c1"]);

    assert_eq!(restored.status(), GameStatus::Complete);
    assert_eq!(restored.core().winner(), &vec![1]);
    assert!(restored.moves().is_empty());
    assert!(restored.core().results().contains(&MoveResult::Winners { players: vec![1] }));

    let err = restored.move_("c2", MoveOptions::default()).unwrap_err();
    assert!(matches!(err, MoveError::GameOver(_)));
    assert_eq!(err.user_message().unwrap().key(), keys::GAME_OVER);
}

#[test]
fn test_hex_chain_across_the_board() {
    let mut game = Hex::with_seed(2, &["size-7", "no-swap"], 0).unwrap();
    // Player 2 runs a zigzag along row 4 from a4 to g4; player 1 plays
    // along the top edge where it cannot connect.
    let moves = [
        "a7", "a4", "b7", "b4", "c7", "c4", "d7", "d4", "e7", "e4", "f7", "f4", "a6", "g4",
    ];
    play(&mut game, &moves);
    assert_eq!(game.status(), GameStatus::Complete);
    assert_eq!(game.core().winner(), &vec![2]);
    let chain = game.winning_chain(2).unwrap();
    assert_eq!(chain.first().map(String::as_str), Some("a4"));
    assert_eq!(chain.last().map(String::as_str), Some("g4"));
    assert!(game.winning_chain(1).is_none());
}

#[test]
fn test_hex_saved_position_one_stone_from_connection() {
    // Player 1 holds column d from the top edge down to row 2; player 2 has
    // an unconnected wall along columns a and b.
    let json = r#"{
        "game": "hex",
        "numplayers": 2,
        "variants": ["size-7", "no-swap"],
        "gameover": false,
        "winner": [],
        "seed": 3,
        "stack": [{
            "currplayer": 1,
            "board": {"stones": [
                ["a2", 2], ["a3", 2], ["a4", 2], ["a5", 2], ["a6", 2], ["b6", 2],
                ["d2", 1], ["d3", 1], ["d4", 1], ["d5", 1], ["d6", 1], ["d7", 1]
            ]},
            "lastmove": null,
            "results": [],
            "timestamp": "2024-05-01T12:00:00Z"
        }]
    }"#;
    let mut game = Hex::from_json(json).unwrap();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.owner("d7"), Some(1));
    assert!(game.winning_chain(1).is_none());
    assert!(game.moves().contains(&"d1".to_string()));

    play(&mut game, &["d1"]);
    assert_eq!(game.status(), GameStatus::Complete);
    assert_eq!(game.core().winner(), &vec![1]);
    assert!(game.moves().is_empty());
    let chain = game.winning_chain(1).unwrap();
    assert_eq!(chain.len(), 7);
    assert!(chain.iter().all(|cell| cell.starts_with('d')));
    assert!(game.winning_chain(2).is_none());
}

#[test]
fn test_hex_swap_takes_over_opening_stone() {
    let mut game = Hex::with_seed(2, &["size-7"], 0).unwrap();
    play(&mut game, &["d4", "swap"]);
    assert_eq!(game.owner("d4"), Some(2));
    assert_eq!(game.core().results(), &vec![MoveResult::Swap]);
    assert_eq!(game.core().stack().moves_played(), vec!["d4", "swap"]);
}

#[test]
fn test_simultaneous_round_resolution() {
    let mut game = Claim::with_seed(3, &[] as &[&str], 0).unwrap();
    assert_eq!(game.moves_for(2), game.moves_for(3));

    play(&mut game, &["a1, a1, c3"]);
    assert!(game.is_blocked("a1"));
    assert_eq!(game.owner("c3"), Some(3));
    assert_eq!(game.core().lastmove().as_deref(), Some("a1,a1,c3"));
    assert_eq!(*game.core().currplayer(), 1);

    // Nobody may pick a blocked or claimed cell next round.
    let err = game.move_("a1,b1,b2", MoveOptions::default()).unwrap_err();
    assert!(matches!(err, MoveError::Rejected(_)));
    let err = game.move_("b1,c3,b2", MoveOptions::default()).unwrap_err();
    assert!(matches!(err, MoveError::Rejected(_)));
    play(&mut game, &["b1,b2,c4"]);
    assert_eq!(game.scores(), vec![1, 1, 2]);
}

#[test]
fn test_registry_plays_every_game() {
    for id in GameId::all() {
        let mut game = AnyGame::create(id, 2, &[] as &[&str], Some(1)).unwrap();
        let first = game.moves();
        assert!(!first.is_empty(), "{id} has no opening moves");
        let mv = if id.info().has_flag(strictly_engine::GameFlag::Simultaneous) {
            format!("{},{}", first[0], first[1])
        } else {
            first[0].clone()
        };
        game.move_(&mv, MoveOptions::default()).unwrap();
        assert_eq!(game.ply(), 2);
        let restored = AnyGame::from_json(&game.state_json().unwrap()).unwrap();
        assert_eq!(restored.render(), game.render());
    }
}
