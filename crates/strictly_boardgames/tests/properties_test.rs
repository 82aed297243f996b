//! Properties every bundled game must hold, checked over scripted playouts.

use strictly_boardgames::{AnyGame, GameId};
use strictly_engine::{GameFlag, GameStatus, MoveError, MoveOptions, RenderData};

/// Picks a legal move deterministically from `step`.
fn pick(game: &AnyGame, step: usize) -> String {
    if game.info().has_flag(GameFlag::Simultaneous) {
        (1..=game.numplayers())
            .map(|p| {
                let moves = game.moves_for(p);
                moves[(step * 5 + p * 3) % moves.len()].clone()
            })
            .collect::<Vec<_>>()
            .join(",")
    } else {
        let moves = game.moves();
        moves[(step * 7 + 3) % moves.len()].clone()
    }
}

/// Plays until the game ends, returning the render after each commit.
fn playout(id: GameId, variants: &[&str], seed: u64) -> (AnyGame, Vec<RenderData>) {
    let mut game = AnyGame::create(id, 2, variants, Some(seed)).unwrap();
    let mut renders = vec![game.render()];
    let mut step = 0;
    while game.status() == GameStatus::InProgress {
        let mv = pick(&game, step);
        game.move_(&mv, MoveOptions::default()).unwrap();
        renders.push(game.render());
        step += 1;
        assert!(step < 500, "{id} did not finish");
    }
    (game, renders)
}

fn cases() -> Vec<(GameId, Vec<&'static str>)> {
    vec![
        (GameId::NinARow, vec![]),
        (GameId::NinARow, vec!["size-9", "blockers"]),
        (GameId::Hex, vec!["size-7"]),
        (GameId::Claim, vec![]),
    ]
}

/// Every label any bundled board could use, plus strings no game lists.
fn candidates() -> Vec<String> {
    let mut out: Vec<String> = ('a'..='o')
        .flat_map(|col| (1..=15).map(move |row| format!("{col}{row}")))
        .collect();
    out.extend(["swap", "pass", "z99", "a0", "1a", "xyz", "a1a1"].map(String::from));
    out
}

#[test]
fn test_listed_moves_are_exactly_the_submittable_ones() {
    let candidates = candidates();
    for (id, variants) in cases() {
        let mut game = AnyGame::create(id, 2, &variants, Some(4)).unwrap();
        for step in 0..6 {
            if game.status() == GameStatus::Complete {
                break;
            }
            if id.info().has_flag(GameFlag::Simultaneous) {
                let (first, second) = (game.moves_for(1), game.moves_for(2));
                let partners = [second[0].clone(), "z99".to_string()];
                for mv in &candidates {
                    for partner in &partners {
                        let combined = format!("{mv},{partner}");
                        let listed = first.contains(mv) && second.contains(partner);
                        assert_eq!(
                            game.validate_move(&combined).is_submittable(),
                            listed,
                            "{id} step {step}: {combined}"
                        );
                    }
                }
            } else {
                let listed = game.moves();
                for mv in &candidates {
                    assert_eq!(
                        game.validate_move(mv).is_submittable(),
                        listed.contains(mv),
                        "{id} step {step}: {mv}"
                    );
                }
            }
            let mv = pick(&game, step);
            game.move_(&mv, MoveOptions::default()).unwrap();
        }
    }
}

#[test]
fn test_round_trip_at_every_ply() {
    for (id, variants) in cases() {
        let mut game = AnyGame::create(id, 2, &variants, Some(8)).unwrap();
        let mut step = 0;
        while game.status() == GameStatus::InProgress && step < 12 {
            let json = game.state_json().unwrap();
            let restored = AnyGame::from_json(&json).unwrap();
            assert_eq!(restored.moves(), game.moves(), "{id} ply {step}");
            assert_eq!(restored.render(), game.render(), "{id} ply {step}");
            assert_eq!(restored.state_json().unwrap(), json);
            let mv = pick(&game, step);
            game.move_(&mv, MoveOptions::default()).unwrap();
            step += 1;
        }
    }
}

#[test]
fn test_playouts_are_deterministic() {
    for (id, variants) in cases() {
        let (a, renders_a) = playout(id, &variants, 21);
        let (b, renders_b) = playout(id, &variants, 21);
        assert_eq!(renders_a, renders_b, "{id}");
        assert_eq!(a.moves_played(), b.moves_played());
        assert_eq!(a.winner(), b.winner());
    }
}

#[test]
fn test_history_snapshots_never_change() {
    for (id, variants) in cases() {
        let (mut game, renders) = playout(id, &variants, 2);
        assert_eq!(game.ply(), renders.len());
        for (i, expected) in renders.iter().enumerate() {
            game.load(i as isize).unwrap();
            assert_eq!(&game.render(), expected, "{id} snapshot {i}");
        }
    }
}

#[test]
fn test_finished_games_reject_everything() {
    for (id, variants) in cases() {
        let (mut game, _) = playout(id, &variants, 13);
        assert!(!game.winner().is_empty(), "{id} ended without winners");
        assert!(game.moves().is_empty());
        let before = game.state_json().unwrap();
        for mv in ["", "a1", "swap", "a1,a2"] {
            let err = game.move_(mv, MoveOptions::default()).unwrap_err();
            assert!(matches!(err, MoveError::GameOver(_)), "{id}: {mv}");
        }
        assert_eq!(game.state_json().unwrap(), before);
    }
}

#[test]
fn test_simulate_does_not_touch_original() {
    for (id, variants) in cases() {
        let game = AnyGame::create(id, 2, &variants, Some(6)).unwrap();
        let mv = pick(&game, 0);
        let future = game.simulate(&mv).unwrap();
        assert_eq!(game.ply(), 1);
        assert_eq!(future.ply(), 2);
        assert_ne!(future.render(), game.render());
    }
}
