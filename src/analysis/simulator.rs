// src/analysis/simulator.rs
//! Simulated analysis outcomes.
//!
//! Nothing is analysed for real. Each resolution draws from an
//! [`OutcomeSource`]: one draw decides failure, one picks the confidence band
//! and one places the score inside the band. Production code uses a
//! [`RandomOutcomes`] backed by `StdRng`; tests substitute
//! [`ScriptedOutcomes`] to pin every draw.

use rand::prelude::*;
use rand_distr::{Distribution, Uniform};
use std::fmt;

use super::record::AnalysisRecord;

const BAND_WIDTH: f64 = 20.0;

/// Source of uniform draws in `[0, 1)`.
pub trait OutcomeSource: fmt::Debug {
    fn next_unit(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    /// Pick a band from a uniform draw: ~30% high, ~40% medium, ~30% low.
    pub fn from_draw(r: f64) -> Self {
        if r > 0.7 {
            ConfidenceBand::High
        } else if r > 0.3 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn of(confidence: u8) -> Self {
        match confidence {
            80..=u8::MAX => ConfidenceBand::High,
            60..=79 => ConfidenceBand::Medium,
            _ => ConfidenceBand::Low,
        }
    }

    pub fn floor(&self) -> u8 {
        match self {
            ConfidenceBand::Low => 40,
            ConfidenceBand::Medium => 60,
            ConfidenceBand::High => 80,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "Low",
            ConfidenceBand::Medium => "Medium",
            ConfidenceBand::High => "High",
        }
    }
}

#[derive(Debug)]
pub struct RandomOutcomes {
    rng: StdRng,
    unit: Uniform<f64>,
}

impl RandomOutcomes {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self {
            rng,
            unit: Uniform::new(0.0, 1.0),
        }
    }
}

impl OutcomeSource for RandomOutcomes {
    fn next_unit(&mut self) -> f64 {
        self.unit.sample(&mut self.rng)
    }
}

/// Replays a fixed sequence of draws, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedOutcomes {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, position: 0 }
    }

    /// Draws that make every resolution succeed with the given confidence.
    pub fn analyzed(confidence: u8) -> Self {
        let band = ConfidenceBand::of(confidence);
        let band_draw = match band {
            ConfidenceBand::High => 0.9,
            ConfidenceBand::Medium => 0.5,
            ConfidenceBand::Low => 0.1,
        };
        // Aim at the middle of the integer step so the floor lands on it
        let offset = (f64::from(confidence.saturating_sub(band.floor())) + 0.5) / BAND_WIDTH;
        Self::new(vec![0.99, band_draw, offset])
    }

    /// Draws that make every resolution fail.
    pub fn failing() -> Self {
        Self::new(vec![0.0])
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Draw a score from the tiered distribution. Always within `[40, 99]`.
pub fn draw_confidence(source: &mut dyn OutcomeSource) -> u8 {
    let band = ConfidenceBand::from_draw(source.next_unit());
    let offset = (source.next_unit() * BAND_WIDTH).floor() as u8;
    band.floor() + offset.min(BAND_WIDTH as u8 - 1)
}

/// Move a record out of Analyzing into its terminal state.
pub fn resolve_record(record: &mut AnalysisRecord, failure_rate: f64, source: &mut dyn OutcomeSource) {
    if source.next_unit() < failure_rate {
        record.mark_failed();
    } else {
        let confidence = draw_confidence(source);
        record.mark_analyzed(confidence);
    }
}
