//! End-to-end behaviour of the strategy engine.

use scoring_core::{
    Bar, BookLevel, Classification, ClassificationThresholds, Direction, Horizon,
    IndicatorError, OrderBookSnapshot, PriceSeries,
};
use scoring_engine::{EngineConfig, StrategyEngine, WeightOverrides};
use scoring_orderbook::OrderBookConfig;

const DAY_MS: i64 = 86_400_000;

fn engine() -> StrategyEngine {
    StrategyEngine::new(EngineConfig::default()).unwrap()
}

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::new(
                i as i64 * DAY_MS,
                close,
                close * 1.01,
                close * 0.99,
                close,
                1_000.0 + (i % 7) as f64 * 100.0,
            )
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Deterministic pseudo-random walk.
fn random_walk(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut price = 100.0;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let step = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
            price = (price * (1.0 + step * 0.04)).max(1.0);
            price
        })
        .collect()
}

fn book(bid_size: f64, ask_size: f64) -> OrderBookSnapshot {
    let bids = (1..=10)
        .map(|i| BookLevel::new(100.0 - i as f64 * 0.05, bid_size))
        .collect();
    let asks = (1..=10)
        .map(|i| BookLevel::new(100.0 + i as f64 * 0.05, ask_size))
        .collect();
    OrderBookSnapshot::new(bids, asks).unwrap()
}

#[test]
fn scores_are_bounded_and_classified_consistently() {
    let engine = engine();
    let thresholds = ClassificationThresholds::default();

    let mut inputs: Vec<Vec<f64>> = (1..=6).map(|seed| random_walk(260, seed)).collect();
    inputs.push((0..260).map(|i| 50.0 + i as f64).collect());
    inputs.push((0..260).map(|i| 400.0 - i as f64 * 1.2).collect());
    inputs.push((0..260).map(|i| 100.0 + (i as f64 * 0.2).sin() * 15.0).collect());

    for closes in inputs {
        let series = series_from_closes(&closes);
        for order_book in [None, Some(book(3.0, 1.0)), Some(book(1.0, 5.0))] {
            let signal = engine
                .evaluate_series("TEST", &series, order_book.as_ref())
                .unwrap();

            assert!((-1.0..=1.0).contains(&signal.final_score));
            assert_eq!(signal.classification, thresholds.classify(signal.final_score));
            for score in &signal.horizon_scores {
                assert!((-1.0..=1.0).contains(&score.strength));
                assert!((0.0..=1.0).contains(&score.confidence));
                assert!(score.is_contributing());
            }
        }
    }
}

#[test]
fn strong_uptrend_is_bullish() {
    let closes: Vec<f64> = (0..260).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let signal = engine()
        .evaluate_series("UP", &series_from_closes(&closes), None)
        .unwrap();

    assert!(signal.final_score > 0.0);
    let long = signal.horizon(Horizon::Long).unwrap();
    assert_eq!(long.direction, Direction::Buy);
    let medium = signal.horizon(Horizon::Medium).unwrap();
    assert_eq!(medium.direction, Direction::Buy);
}

#[test]
fn flat_series_is_neutral_everywhere() {
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0; 200]).unwrap();
    let signal = engine().evaluate_series("FLAT", &series, None).unwrap();

    assert_eq!(signal.final_score, 0.0);
    assert_eq!(signal.classification, Classification::Neutral);
    for score in &signal.horizon_scores {
        assert_eq!(score.direction, Direction::Neutral);
        assert_eq!(score.strength, 0.0);
    }
}

#[test]
fn declining_closes_make_intraday_a_buy() {
    let mut closes = vec![100.0; 20];
    closes.extend((1..=14).map(|i| 100.0 - i as f64));
    let series = PriceSeries::from_closes(0, DAY_MS, &closes).unwrap();

    let signal = engine().evaluate_series("DIP", &series, None).unwrap();
    let intraday = signal.horizon(Horizon::Intraday).unwrap();

    assert_eq!(intraday.direction, Direction::Buy);
    assert!(intraday.strength > 0.0);
}

#[test]
fn nothing_contributing_scores_zero() {
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0]).unwrap();
    let signal = engine().evaluate_series("NEW", &series, None).unwrap();

    assert!(signal.horizon_scores.iter().all(|s| !s.is_contributing()));
    assert_eq!(signal.final_score, 0.0);
    assert_eq!(signal.classification, Classification::Neutral);
    assert!(signal.rationale.is_empty());
}

#[test]
fn full_bid_imbalance_contributes_exactly_the_cap() {
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0]).unwrap();
    let bids_only = OrderBookSnapshot::new(
        (1..=10)
            .map(|i| BookLevel::new(100.0 - i as f64 * 0.1, 2.0))
            .collect(),
        vec![],
    )
    .unwrap();

    let signal = engine()
        .evaluate_series("OB", &series, Some(&bids_only))
        .unwrap();
    assert!((signal.final_score - 0.2).abs() < 1e-12);
    assert!((signal.order_book_contribution - 0.2).abs() < 1e-12);
    assert_eq!(signal.classification, Classification::Buy);
}

#[test]
fn near_max_book_sizes_keep_the_score_finite() {
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0]).unwrap();
    let snapshot = OrderBookSnapshot::new(
        vec![BookLevel::new(99.9, 1e308), BookLevel::new(99.8, 1e308)],
        vec![BookLevel::new(100.1, 1.0)],
    )
    .unwrap();

    let signal = engine()
        .evaluate_series("HUGE", &series, Some(&snapshot))
        .unwrap();
    assert!(signal.final_score.is_finite());
    assert!((signal.final_score - 0.2).abs() < 1e-12);
    assert_eq!(signal.classification, Classification::Buy);
}

#[test]
fn three_to_one_bid_depth_contributes_a_tenth() {
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0]).unwrap();
    let signal = engine()
        .evaluate_series("OB", &series, Some(&book(3.0, 1.0)))
        .unwrap();

    assert!((signal.final_score - 0.1).abs() < 1e-12);
    assert_eq!(signal.classification, Classification::Neutral);
}

#[test]
fn order_book_contribution_never_exceeds_cap() {
    let series = series_from_closes(&random_walk(240, 42));
    let engine = engine();

    for (bid, ask) in [(1.0, 0.0), (0.0, 1.0), (5.0, 1.0), (1.0, 5.0), (2.0, 2.0), (9.0, 0.5)] {
        let snapshot = if ask == 0.0 {
            OrderBookSnapshot::new(vec![BookLevel::new(99.0, bid)], vec![]).unwrap()
        } else if bid == 0.0 {
            OrderBookSnapshot::new(vec![], vec![BookLevel::new(101.0, ask)]).unwrap()
        } else {
            book(bid, ask)
        };

        let signal = engine
            .evaluate_series("CAP", &series, Some(&snapshot))
            .unwrap();
        assert!(signal.order_book_contribution.abs() <= 0.2 + 1e-12);
    }
}

#[test]
fn strong_buy_boundary_is_inclusive() {
    let config = EngineConfig {
        order_book: OrderBookConfig {
            weight: 0.6,
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = StrategyEngine::new(config).unwrap();
    let series = PriceSeries::from_closes(0, DAY_MS, &[100.0]).unwrap();
    let bids_only =
        OrderBookSnapshot::new(vec![BookLevel::new(99.5, 1.0)], vec![]).unwrap();

    let signal = engine
        .evaluate_series("EDGE", &series, Some(&bids_only))
        .unwrap();
    assert_eq!(signal.final_score, 0.6);
    assert_eq!(signal.classification, Classification::StrongBuy);
}

#[test]
fn evaluation_is_idempotent() {
    let series = series_from_closes(&random_walk(230, 7));
    let snapshot = book(2.0, 1.5);
    let engine = engine();

    let first = engine
        .evaluate_series("SAME", &series, Some(&snapshot))
        .unwrap();
    let second = engine
        .evaluate_series("SAME", &series, Some(&snapshot))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_bar_short_degrades_only_the_affected_horizon() {
    let series = series_from_closes(&random_walk(209, 3));
    let signal = engine().evaluate_series("SHORT", &series, None).unwrap();

    let long = signal.horizon(Horizon::Long).unwrap();
    assert!(!long.is_contributing());
    let expected = IndicatorError::InsufficientData {
        indicator: "EMA slope",
        required: 210,
        available: 209,
    };
    assert_eq!(long.reasons, vec![expected.to_string()]);

    for horizon in [Horizon::Intraday, Horizon::Short, Horizon::Medium] {
        assert!(signal.horizon(horizon).unwrap().is_contributing());
    }
}

#[test]
fn weight_overrides_change_the_blend() {
    let series = series_from_closes(&(0..260).map(|i| 100.0 + i as f64 * 0.8).collect::<Vec<_>>());
    let engine = engine();

    let base = engine
        .evaluate("W", &series, &series.volumes(), None, None)
        .unwrap();
    let long_only = WeightOverrides {
        intraday: Some(0.0),
        short: Some(0.0),
        medium: Some(0.0),
        long: Some(1.0),
    };
    let overridden = engine
        .evaluate("W", &series, &series.volumes(), None, Some(&long_only))
        .unwrap();

    let long = overridden.horizon(Horizon::Long).unwrap();
    assert!((overridden.final_score - long.strength * long.confidence).abs() < 1e-12);
    assert_ne!(base.final_score, overridden.final_score);

    let invalid = WeightOverrides {
        short: Some(-1.0),
        ..Default::default()
    };
    assert!(engine
        .evaluate("W", &series, &series.volumes(), None, Some(&invalid))
        .is_err());
}

#[test]
fn signal_serializes_to_json() {
    let series = series_from_closes(&random_walk(220, 11));
    let signal = engine()
        .evaluate_series("JSON", &series, Some(&book(1.0, 1.0)))
        .unwrap();

    let json = serde_json::to_value(&signal).unwrap();
    assert_eq!(json["asset_id"], "JSON");
    assert_eq!(json["horizon_scores"].as_array().unwrap().len(), 4);
    assert!(json["classification"].is_string());
}
