//! Deadline decay policies for successful submissions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Named decay constants, injected so a deployment can tune scoring without
/// code changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Lowest multiplier the exponential policy ever awards.
    pub floor: f64,
    /// Days for the exponential multiplier to fall to 1/e.
    pub half_life_days: f64,
    /// Window over which the linear policy interpolates down to half score.
    pub late_window_days: i64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            floor: 0.3,
            half_life_days: 5.0,
            late_window_days: 7,
        }
    }
}

/// Decay policy applied once the classifier has settled on a successful
/// submission. Pure over (max score, deadline, effective time); the
/// classifier never inspects which policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayPolicy {
    /// Smooth exponential decay toward `floor * max_score`, never zero.
    Exponential,
    /// Full score before the deadline, half score a week late, linear
    /// interpolation in between.
    Linear,
}

impl DecayPolicy {
    /// Score a successful submission at `effective` against `deadline`.
    /// Submissions at or before the deadline earn the full score; the result
    /// is truncated toward zero.
    pub fn score(
        self,
        config: &DecayConfig,
        max_score: u32,
        deadline: DateTime<Utc>,
        effective: DateTime<Utc>,
    ) -> u32 {
        if effective <= deadline {
            return max_score;
        }

        match self {
            DecayPolicy::Exponential => {
                let delta_days = (effective - deadline).num_seconds() as f64 / 86_400.0;
                let multiplier = (-delta_days / config.half_life_days).exp().max(config.floor);
                (multiplier * f64::from(max_score)) as u32
            }
            DecayPolicy::Linear => {
                let window = Duration::days(config.late_window_days);
                if effective > deadline + window {
                    return max_score / 2;
                }
                let elapsed = (effective - deadline).num_seconds() as f64;
                let multiplier = 1.0 - 0.5 * elapsed / window.num_seconds() as f64;
                (multiplier * f64::from(max_score)) as u32
            }
        }
    }
}
