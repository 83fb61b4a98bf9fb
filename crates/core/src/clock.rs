//! Loop clock - decides when the engine's cadence entry points fire.
//!
//! Two thresholds share one accumulator:
//!
//! - **stride**: fires on every tick where the accumulator exceeds
//!   `base_cadence * stride_ratio`. It does not reset the accumulator, so it
//!   can fire several times per fall interval.
//! - **fall**: fires when the accumulator exceeds `base_cadence` and resets it
//!   to zero.
//!
//! While the gate is closed (an overlay is up) the previous timestamp keeps
//! moving but nothing accumulates, so resuming never produces a burst.
//!
//! `base_cadence` is live: soft drop swaps it for a shorter interval.

use std::fmt;

use crate::types::{FALL_CADENCE_MS, SOFT_DROP_CADENCE_MS, STRIDE_RATIO};

/// Clock parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockConfig {
    pub fall_ms: u64,
    pub soft_drop_ms: u64,
    pub stride_ratio: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fall_ms: FALL_CADENCE_MS,
            soft_drop_ms: SOFT_DROP_CADENCE_MS,
            stride_ratio: STRIDE_RATIO,
        }
    }
}

/// A clock configuration that can never produce a sane cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockConfigError {
    /// The stride ratio must lie in `(0, 1]`.
    StrideRatio(f64),
    /// Cadences must be at least one millisecond.
    ZeroCadence,
}

impl fmt::Display for ClockConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockConfigError::StrideRatio(r) => {
                write!(f, "stride ratio {r} is outside (0, 1]")
            }
            ClockConfigError::ZeroCadence => f.write_str("cadence must be at least 1ms"),
        }
    }
}

impl std::error::Error for ClockConfigError {}

/// Which engine entry points a tick triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cadence {
    pub stride: bool,
    pub fall: bool,
}

#[derive(Debug, Clone)]
pub struct LoopClock {
    previous_tick_ms: u64,
    accumulated_ms: u64,
    base_cadence_ms: u64,
    fall_ms: u64,
    soft_drop_ms: u64,
    stride_ratio: f64,
    soft_drop: bool,
}

impl LoopClock {
    pub fn new(config: ClockConfig) -> Result<Self, ClockConfigError> {
        let r = config.stride_ratio;
        if !r.is_finite() || r <= 0.0 || r > 1.0 {
            return Err(ClockConfigError::StrideRatio(r));
        }
        if config.fall_ms == 0 || config.soft_drop_ms == 0 {
            return Err(ClockConfigError::ZeroCadence);
        }

        Ok(Self {
            previous_tick_ms: 0,
            accumulated_ms: 0,
            base_cadence_ms: config.fall_ms,
            fall_ms: config.fall_ms,
            soft_drop_ms: config.soft_drop_ms,
            stride_ratio: r,
            soft_drop: false,
        })
    }

    /// Advance to `now_ms`.
    ///
    /// With the gate closed only the timestamp moves.
    pub fn tick(&mut self, now_ms: u64, gate_open: bool) -> Cadence {
        let elapsed = now_ms.saturating_sub(self.previous_tick_ms);
        self.previous_tick_ms = now_ms;

        if !gate_open {
            return Cadence::default();
        }

        self.accumulated_ms += elapsed;

        let mut cadence = Cadence::default();
        if self.accumulated_ms as f64 > self.stride_threshold_ms() {
            cadence.stride = true;
        }
        if self.accumulated_ms > self.base_cadence_ms {
            cadence.fall = true;
            self.accumulated_ms = 0;
        }
        cadence
    }

    pub fn stride_threshold_ms(&self) -> f64 {
        self.base_cadence_ms as f64 * self.stride_ratio
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn previous_tick_ms(&self) -> u64 {
        self.previous_tick_ms
    }

    pub fn base_cadence_ms(&self) -> u64 {
        self.base_cadence_ms
    }

    pub fn stride_ratio(&self) -> f64 {
        self.stride_ratio
    }

    pub fn engage_soft_drop(&mut self) {
        self.soft_drop = true;
        self.base_cadence_ms = self.soft_drop_ms;
    }

    pub fn release_soft_drop(&mut self) {
        self.soft_drop = false;
        self.base_cadence_ms = self.fall_ms;
    }

    pub fn is_soft_drop(&self) -> bool {
        self.soft_drop
    }
}
