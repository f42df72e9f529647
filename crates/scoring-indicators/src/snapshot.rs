//! Latest-value snapshot of every indicator for one evaluation.

use scoring_core::{Indicator, IndicatorError, IndicatorResult, OhlcIndicator, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::levels::RollingExtremes;
use crate::momentum::{Macd, RateOfChange, Rsi, Stochastic};
use crate::moving_average::{Ema, Sma};
use crate::volatility::{Atr, BollingerBands};
use crate::volume::Obv;

/// Periods and multipliers for the indicator set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub stoch_k_period: usize,
    pub stoch_d_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Rate-of-change period for the momentum reading
    pub momentum_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr_period: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_trend: usize,
    /// Number of EMA values the long-trend slope spans
    pub ema_slope_lookback: usize,
    /// Window of the rolling support/resistance extremes
    pub levels_period: usize,
    pub obv_lookback: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            stoch_k_period: 14,
            stoch_d_period: 3,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            momentum_period: 10,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr_period: 14,
            sma_fast: 50,
            sma_slow: 200,
            ema_trend: 200,
            ema_slope_lookback: 10,
            levels_period: 20,
            obv_lookback: 4,
        }
    }
}

impl IndicatorParams {
    /// Reject parameters the indicator constructors cannot accept.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("stoch_k_period", self.stoch_k_period),
            ("stoch_d_period", self.stoch_d_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("momentum_period", self.momentum_period),
            ("atr_period", self.atr_period),
            ("sma_fast", self.sma_fast),
            ("sma_slow", self.sma_slow),
            ("ema_trend", self.ema_trend),
            ("ema_slope_lookback", self.ema_slope_lookback),
            ("levels_period", self.levels_period),
            ("obv_lookback", self.obv_lookback),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "{name} must be greater than 0"
            )));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.sma_fast >= self.sma_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "sma_fast ({}) must be less than sma_slow ({})",
                self.sma_fast, self.sma_slow
            )));
        }
        if self.bollinger_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "bollinger_period must be at least 2".into(),
            ));
        }
        if !(self.bollinger_std_dev.is_finite() && self.bollinger_std_dev > 0.0) {
            return Err(IndicatorError::InvalidParameter(
                "bollinger_std_dev must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Bars needed before every indicator is available.
    pub fn max_window(&self) -> usize {
        [
            self.rsi_period + 1,
            self.stoch_k_period + self.stoch_d_period - 1,
            self.macd_slow + self.macd_signal - 1,
            self.momentum_period + 1,
            self.bollinger_period,
            self.atr_period + 1,
            self.sma_slow,
            self.ema_trend + self.ema_slope_lookback,
            self.levels_period,
            2,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Compute the latest value of every indicator.
///
/// Indicators whose window is longer than the series come back as
/// [`Reading::Unavailable`](scoring_core::Reading) instead of failing the
/// whole snapshot. `volumes` feeds OBV only.
pub fn compute(
    series: &PriceSeries,
    volumes: &[f64],
    params: &IndicatorParams,
) -> Result<IndicatorResult, IndicatorError> {
    params.validate()?;

    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();

    let ema = Ema::new(params.ema_trend);

    Ok(IndicatorResult {
        close: series.last().close,
        rsi: Rsi::new(params.rsi_period).latest(&closes).into(),
        stochastic: Stochastic::with_periods(params.stoch_k_period, params.stoch_d_period)
            .latest_ohlc(&highs, &lows, &closes)
            .into(),
        macd: Macd::with_periods(params.macd_fast, params.macd_slow, params.macd_signal)
            .state(&closes)
            .into(),
        momentum_pct: RateOfChange::new(params.momentum_period)
            .latest(&closes)
            .into(),
        bollinger: BollingerBands::with_params(params.bollinger_period, params.bollinger_std_dev)
            .latest(&closes)
            .into(),
        atr: Atr::new(params.atr_period)
            .latest_ohlc(&highs, &lows, &closes)
            .into(),
        sma_fast: Sma::new(params.sma_fast).latest(&closes).into(),
        sma_slow: Sma::new(params.sma_slow).latest(&closes).into(),
        ema_trend: ema.latest(&closes).into(),
        ema_slope_pct: ema.slope_pct(&closes, params.ema_slope_lookback).into(),
        levels: RollingExtremes::new(params.levels_period)
            .latest_ohlc(&highs, &lows, &closes)
            .into(),
        obv: Obv::new(params.obv_lookback).state(&closes, volumes).into(),
    })
}
