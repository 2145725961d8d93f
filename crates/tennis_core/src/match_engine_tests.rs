use super::*;
use crate::probability::{FixedProbability, ServeReturnHeuristic};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine_with(p: f64) -> MatchEngine {
    MatchEngine::new(MatchConfig::default(), Box::new(FixedProbability::new(p))).unwrap()
}

fn features() -> FeatureSnapshot {
    Competitor::new("X", 1, "baseline", 0.6, 0.4)
        .unwrap()
        .features()
}

fn assert_valid_game(score: GameScore) {
    let (w, l) = if score.server_won() {
        (score.server, score.receiver)
    } else {
        (score.receiver, score.server)
    };
    if w == POINTS_TO_WIN_GAME {
        assert!(l <= 2, "4-{} is not a finished game", l);
    } else {
        assert!(w > POINTS_TO_WIN_GAME);
        assert_eq!(w - l, 2, "extended game must end on a two point lead");
    }
}

fn assert_valid_set(set: SetScore) {
    let (w, l) = if set.0 > set.1 { (set.0, set.1) } else { (set.1, set.0) };
    assert!(w >= GAMES_TO_WIN_SET);
    if w == GAMES_TO_WIN_SET {
        assert!(l <= 4, "6-{} is not a finished set", l);
    } else {
        assert_eq!(w - l, 2, "extended set must end on a two game lead");
    }
}

#[test]
fn test_config_validation() {
    assert!(MatchConfig::default().validate().is_ok());
    assert_eq!(MatchConfig::default().sets_to_win(), 3);

    for best_of in [0, 2, 4] {
        let config = MatchConfig {
            best_of,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBestOf(best_of)));
    }

    let config = MatchConfig {
        max_points_per_game: 0,
        ..Default::default()
    };
    assert!(MatchEngine::new(config, Box::new(ServeReturnHeuristic)).is_err());
}

#[test]
fn test_certain_server_holds_to_love() {
    let engine = engine_with(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let f = features();
    let score = engine.simulate_game(&f, &f, &mut rng).unwrap();
    assert_eq!(score, GameScore { server: 4, receiver: 0 });
}

#[test]
fn test_serve_alternation_with_dominant_server() {
    // Every server holds, so no side can break away until the cap trips.
    let config = MatchConfig {
        max_games_per_set: 40,
        ..Default::default()
    };
    let engine = MatchEngine::new(config, Box::new(FixedProbability::new(1.0))).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let f = features();

    let err = engine.simulate_set(&f, &f, &mut rng).unwrap_err();
    assert_eq!(
        err,
        MatchError::NonTermination {
            unit: Unit::Set,
            limit: 40
        }
    );
}

#[test]
fn test_receiver_sweeps_when_server_never_wins() {
    // Every server is broken, so the set trades breaks until the cap trips.
    let engine = engine_with(0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let f = features();

    let game = engine.simulate_game(&f, &f, &mut rng).unwrap();
    assert_eq!(game, GameScore { server: 0, receiver: 4 });

    let config = MatchConfig {
        max_games_per_set: 25,
        ..Default::default()
    };
    let engine = MatchEngine::new(config, Box::new(FixedProbability::new(0.0))).unwrap();
    assert!(engine.simulate_set(&f, &f, &mut rng).is_err());
}

#[test]
fn test_game_cap_reports_non_termination() {
    let config = MatchConfig {
        max_points_per_game: 3,
        ..Default::default()
    };
    let engine = MatchEngine::new(config, Box::new(ServeReturnHeuristic)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let f = features();

    assert_eq!(
        engine.simulate_game(&f, &f, &mut rng),
        Err(MatchError::NonTermination {
            unit: Unit::Game,
            limit: 3
        })
    );
}

struct NanModel;

impl WinProbabilityModel for NanModel {
    fn win_probability(&self, _server: &FeatureSnapshot, _receiver: &FeatureSnapshot) -> f64 {
        f64::NAN
    }

    fn name(&self) -> &str {
        "nan"
    }
}

#[test]
fn test_nan_model_plays_even_points() {
    let engine = MatchEngine::new(MatchConfig::default(), Box::new(NanModel)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let f = features();

    let server_points = (0..1000)
        .filter(|_| engine.simulate_point(&f, &f, &mut rng))
        .count();
    assert!((350..=650).contains(&server_points), "{}", server_points);

    let a = Competitor::new("A", 1, "baseline", 0.6, 0.4).unwrap();
    let b = Competitor::new("B", 2, "baseline", 0.6, 0.4).unwrap();
    assert!(engine.simulate_match(&a, &b, &mut rng).is_ok());
}

#[test]
fn test_best_of_five_match_shape() {
    let engine = MatchEngine::new(MatchConfig::default(), Box::new(ServeReturnHeuristic)).unwrap();
    let a = Competitor::new("A", 1, "baseline", 0.66, 0.42).unwrap();
    let b = Competitor::new("B", 2, "baseline", 0.61, 0.38).unwrap();

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = engine.simulate_match(&a, &b, &mut rng).unwrap();

        assert_eq!(outcome.sets_won(outcome.winner), 3);
        assert!(outcome.sets_won(outcome.winner.other()) <= 2);
        assert!((3..=5).contains(&outcome.sets.len()));
        assert_eq!(outcome.sets.last().unwrap().winner(), outcome.winner);
        for set in &outcome.sets {
            assert_valid_set(*set);
        }
        assert_eq!(
            outcome.match_length(),
            outcome.sets.iter().map(|s| s.0 + s.1).sum::<u32>()
        );
    }
}

#[test]
fn test_best_of_three_and_one() {
    let a = Competitor::new("A", 1, "baseline", 0.6, 0.4).unwrap();
    let b = Competitor::new("B", 2, "baseline", 0.6, 0.4).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let config = MatchConfig {
        best_of: 3,
        ..Default::default()
    };
    let engine = MatchEngine::new(config, Box::new(ServeReturnHeuristic)).unwrap();
    let outcome = engine.simulate_match(&a, &b, &mut rng).unwrap();
    assert_eq!(outcome.sets_won(outcome.winner), 2);

    let config = MatchConfig {
        best_of: 1,
        ..Default::default()
    };
    let engine = MatchEngine::new(config, Box::new(ServeReturnHeuristic)).unwrap();
    let outcome = engine.simulate_match(&a, &b, &mut rng).unwrap();
    assert_eq!(outcome.sets.len(), 1);
}

#[test]
fn test_match_does_not_touch_competitors() {
    let engine = MatchEngine::new(MatchConfig::default(), Box::new(ServeReturnHeuristic)).unwrap();
    let a = Competitor::new("A", 1, "baseline", 0.66, 0.42).unwrap();
    let b = Competitor::new("B", 2, "baseline", 0.61, 0.38).unwrap();
    let (a_before, b_before) = (a.clone(), b.clone());

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    engine.simulate_match(&a, &b, &mut rng).unwrap();
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn test_same_seed_same_match() {
    let engine = MatchEngine::new(MatchConfig::default(), Box::new(ServeReturnHeuristic)).unwrap();
    let a = Competitor::new("A", 1, "baseline", 0.64, 0.41).unwrap();
    let b = Competitor::new("B", 2, "baseline", 0.63, 0.40).unwrap();

    let first = engine
        .simulate_match(&a, &b, &mut ChaCha8Rng::seed_from_u64(77))
        .unwrap();
    let second = engine
        .simulate_match(&a, &b, &mut ChaCha8Rng::seed_from_u64(77))
        .unwrap();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_games_end_by_two(p in 0.01f64..0.99, seed in any::<u64>()) {
        let engine = engine_with(p);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let f = features();
        let score = engine.simulate_game(&f, &f, &mut rng).unwrap();
        assert_valid_game(score);
    }

    #[test]
    fn prop_sets_end_by_two(p in 0.3f64..0.7, seed in any::<u64>()) {
        let engine = engine_with(p);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let f = features();
        let set = engine.simulate_set(&f, &f, &mut rng).unwrap();
        assert_valid_set(set);
    }
}
