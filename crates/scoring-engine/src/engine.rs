//! Strategy engine: from price series to a classified asset signal.

use scoring_core::{
    Agreement, AssetSignal, ClassificationThresholds, HorizonScore, HorizonStrategy, InputError,
    OrderBookSnapshot, PriceSeries, ScoringError,
};
use scoring_horizons::HorizonSettings;
use scoring_indicators::IndicatorParams;
use scoring_orderbook::{OrderBookAnalyzer, OrderBookConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::weights::{HorizonWeights, WeightOverrides};

/// Everything the engine needs, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub weights: HorizonWeights,
    pub order_book: OrderBookConfig,
    pub thresholds: ClassificationThresholds,
    pub indicators: IndicatorParams,
    pub horizons: HorizonSettings,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate()?;
        self.order_book.validate()?;
        self.thresholds.validate()?;
        self.indicators
            .validate()
            .map_err(|e| ScoringError::Config(e.to_string()))?;
        self.horizons.validate()?;
        Ok(())
    }
}

/// Per-call evaluation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluateOptions<'a> {
    /// Weight overrides merged over the configured base weights
    pub weights: Option<&'a WeightOverrides>,
    /// Fail with `MissingOrderBook` when no snapshot is given
    pub require_order_book: bool,
}

/// Aggregates horizon scores and the order book signal.
///
/// The engine holds no mutable state, so one instance can be shared
/// across threads and evaluate many assets in parallel.
pub struct StrategyEngine {
    config: EngineConfig,
    strategies: Vec<Box<dyn HorizonStrategy>>,
    analyzer: OrderBookAnalyzer,
}

impl StrategyEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        let strategies = config.horizons.build();
        let analyzer = OrderBookAnalyzer::new(config.order_book.clone());
        Ok(Self {
            config,
            strategies,
            analyzer,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bars needed before every indicator is available.
    pub fn warmup_period(&self) -> usize {
        self.config.indicators.max_window()
    }

    /// Evaluate one asset.
    ///
    /// Partial history never fails: horizons without enough data drop out
    /// of the weighting. Fails on mismatched volumes, and on a missing order
    /// book only when the configuration requires one.
    pub fn evaluate(
        &self,
        asset_id: &str,
        series: &PriceSeries,
        volumes: &[f64],
        order_book: Option<&OrderBookSnapshot>,
        weights: Option<&WeightOverrides>,
    ) -> Result<AssetSignal, ScoringError> {
        let options = EvaluateOptions {
            weights,
            require_order_book: false,
        };
        self.evaluate_with(asset_id, series, volumes, order_book, options)
    }

    /// Evaluate using the volumes carried by the series itself.
    pub fn evaluate_series(
        &self,
        asset_id: &str,
        series: &PriceSeries,
        order_book: Option<&OrderBookSnapshot>,
    ) -> Result<AssetSignal, ScoringError> {
        self.evaluate(asset_id, series, &series.volumes(), order_book, None)
    }

    /// Evaluate with explicit per-call options.
    pub fn evaluate_with(
        &self,
        asset_id: &str,
        series: &PriceSeries,
        volumes: &[f64],
        order_book: Option<&OrderBookSnapshot>,
        options: EvaluateOptions<'_>,
    ) -> Result<AssetSignal, ScoringError> {
        check_volumes(series, volumes)?;

        if order_book.is_none() && (options.require_order_book || self.config.order_book.required) {
            return Err(ScoringError::MissingOrderBook {
                asset_id: asset_id.to_string(),
            });
        }

        let weights = match options.weights {
            Some(overrides) => self.config.weights.merge(overrides)?,
            None => self.config.weights,
        };

        let indicators = scoring_indicators::compute(series, volumes, &self.config.indicators)?;

        let scores: Vec<HorizonScore> = self
            .strategies
            .iter()
            .map(|strategy| {
                let score = strategy.score(&indicators);
                if score.is_contributing() {
                    debug!(
                        asset = asset_id,
                        horizon = %score.horizon,
                        strength = score.strength,
                        confidence = score.confidence,
                        direction = %score.direction,
                        "Scored horizon"
                    );
                } else {
                    warn!(
                        asset = asset_id,
                        horizon = %score.horizon,
                        reason = score.reasons.first().map(String::as_str).unwrap_or(""),
                        "Horizon unavailable"
                    );
                }
                score
            })
            .collect();

        let normalized = weights.normalize(&scores);
        let indicator_component: f64 = scores
            .iter()
            .zip(&normalized)
            .map(|(s, w)| s.strength * s.confidence * w)
            .sum();

        let book_signal = order_book.map(|book| self.analyzer.analyze(book));
        let (final_score, order_book_contribution) = match &book_signal {
            Some(book) => {
                let w = self.config.order_book.weight;
                let contribution = book.signal * w;
                (indicator_component * (1.0 - w) + contribution, contribution)
            }
            None => (indicator_component, 0.0),
        };
        if !final_score.is_finite() {
            warn!(asset = asset_id, "Non-finite final score, treating as neutral");
        }
        let final_score = bound_score(final_score);
        let classification = self.config.thresholds.classify(final_score);

        let mut rationale: Vec<String> = scores
            .iter()
            .filter(|s| s.is_contributing())
            .flat_map(|s| s.reasons.iter().map(move |r| format!("{}: {}", s.horizon, r)))
            .collect();
        if let Some(book) = &book_signal {
            rationale.extend(book.reasons.iter().cloned());
        }

        let agreement = Agreement::from_scores(&scores);

        info!(
            asset = asset_id,
            final_score,
            classification = %classification,
            agreement = %agreement,
            "Evaluated asset"
        );

        Ok(AssetSignal {
            asset_id: asset_id.to_string(),
            timestamp: series.latest_time(),
            final_score,
            classification,
            horizon_scores: scores,
            order_book_contribution,
            rationale,
            agreement,
            order_book: book_signal,
        })
    }
}

/// Clamp a blended score into [-1, 1]. NaN and infinities read neutral.
fn bound_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn check_volumes(series: &PriceSeries, volumes: &[f64]) -> Result<(), InputError> {
    if volumes.len() != series.len() {
        return Err(InputError::VolumeLengthMismatch {
            prices: series.len(),
            volumes: volumes.len(),
        });
    }
    if let Some((index, &value)) = volumes
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(InputError::InvalidValue {
            index,
            field: "volume",
            value,
        });
    }
    Ok(())
}
