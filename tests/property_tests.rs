//! Property tests for turn arithmetic, history shape and resume.

use proptest::prelude::*;

use darts_engine::core::{
    Dart, GameSettings, LegState, Multiplier, Player, StartingScore, TurnInput,
};
use darts_engine::rules::{commit_turn, resume_leg};
use darts_engine::sim::simulate_match;

fn dart() -> impl Strategy<Value = Dart> {
    let face = prop_oneof![0u8..=20, Just(25u8)];
    let multiplier = prop_oneof![
        Just(Multiplier::Single),
        Just(Multiplier::Double),
        Just(Multiplier::Triple)
    ];
    (face, multiplier).prop_map(|(v, m)| Dart::new(v, m).unwrap())
}

fn turn() -> impl Strategy<Value = Vec<Dart>> {
    prop::collection::vec(dart(), 1..=3)
}

fn settings() -> impl Strategy<Value = GameSettings> {
    (
        prop::sample::select(StartingScore::ALL.to_vec()),
        any::<bool>(),
        any::<bool>(),
        1u32..=3,
    )
        .prop_map(|(score, double_in, double_out, threshold)| {
            GameSettings::default()
                .with_starting_score(score)
                .with_double_in(double_in)
                .with_double_out(double_out)
                .with_game_point_threshold(threshold)
        })
}

proptest! {
    #[test]
    fn test_remaining_never_negative(
        settings in settings(),
        turns in prop::collection::vec(turn(), 1..60),
        seats in 1usize..=4,
    ) {
        let mut players: Vec<Player> = (0..seats)
            .map(|i| Player::new(i.to_string(), format!("P{i}"), settings.start()))
            .collect();
        let mut leg = LegState::new(&players);

        for darts in &turns {
            let before = players.clone();
            let before_leg = leg.clone();
            match commit_turn(&leg, &players, darts, &settings) {
                Ok(t) => {
                    let seat = before_leg.current_player_index;
                    let thrower = &before[seat];
                    let total: u32 = darts.iter().map(|d| d.points()).sum();
                    if !t.outcome.is_checkout() {
                        let after = &t.players[seat];
                        let record = after.history.back().unwrap();
                        if t.outcome.is_bust() {
                            prop_assert!(total > thrower.score);
                            prop_assert_eq!(record.score, 0);
                            prop_assert_eq!(after.score, thrower.score);
                        } else {
                            prop_assert_eq!(after.score, thrower.score - total);
                            prop_assert_eq!(record.score, total);
                        }
                    }
                    leg = t.leg;
                    players = t.players;
                }
                Err(_) => {
                    // Rejections leave the inputs as they were
                    prop_assert_eq!(&players, &before);
                    prop_assert_eq!(&leg, &before_leg);
                }
            }
            if !leg.active {
                break;
            }
        }
    }

    #[test]
    fn test_history_rounds_are_gap_free(
        seed in any::<u64>(),
        seats in 1usize..=4,
    ) {
        let settings = GameSettings::default().with_starting_score(StartingScore::S301);
        let players: Vec<Player> = (0..seats)
            .map(|i| Player::new(i.to_string(), format!("P{i}"), settings.start()))
            .collect();
        let sim = simulate_match(players, &settings, seed, 500);

        for p in &sim.players {
            let rounds: Vec<u32> = p.history.iter().map(|t| t.round).collect();
            let expected: Vec<u32> = (1..=rounds.len() as u32).collect();
            prop_assert_eq!(rounds, expected);
            prop_assert!(p.check_history().is_ok());
        }
    }

    #[test]
    fn test_resume_matches_live_position(
        seed in any::<u64>(),
        seats in 1usize..=4,
        attempts in 1u32..80,
    ) {
        let settings = GameSettings::default()
            .with_starting_score(StartingScore::S701)
            .with_game_point_threshold(1);
        let players: Vec<Player> = (0..seats)
            .map(|i| Player::new(i.to_string(), format!("P{i}"), settings.start()))
            .collect();
        let sim = simulate_match(players, &settings, seed, attempts);
        prop_assume!(sim.leg.active);

        let resumed = resume_leg(&sim.players, Some(&sim.leg));
        prop_assert_eq!(resumed.round, sim.leg.round);
        prop_assert_eq!(resumed.current_player_index, sim.leg.current_player_index);
        prop_assert_eq!(resume_leg(&sim.players, Some(&resumed)), resumed);
    }

    #[test]
    fn test_input_errors_never_mutate(raw in "\\PC{0,4}", slot in 0usize..5) {
        let mut input = TurnInput::from_darts(&[Dart::triple(20).unwrap()]).unwrap();
        let before = input.clone();
        if input.set_value(slot, &raw).is_err() {
            prop_assert_eq!(input, before);
        }
    }
}
