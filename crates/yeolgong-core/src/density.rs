//! Focus density scoring.
//!
//! A session's "focus density" is a bounded integer (40..=120 by default)
//! describing how uninterrupted it was. Pauses and app exits cost points,
//! quick returns and long sessions earn them. The score then maps onto a
//! letter tier (F .. S+) through an ascending threshold table.
//!
//! Every weight and threshold lives in [`DensityConfig`] so product tuning
//! happens in `config.toml`, not in code.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Interaction counters for one finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityInput {
    pub pause_count: u32,
    pub app_exit_count: u32,
    pub quick_return_count: u32,
    pub total_secs: u64,
    pub ultra_focus_completed: bool,
}

/// Score and tier of a finished run. Stored on completed timers and copied
/// into sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerResult {
    pub density: u32,
    pub tier: String,
}

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    pub label: String,
    /// Lowest score that still earns this tier.
    pub min: u32,
    pub color: String,
    pub message: String,
}

impl Tier {
    fn new(id: &str, min: u32, color: &str, message: &str) -> Self {
        Self {
            id: id.into(),
            label: id.into(),
            min,
            color: color.into(),
            message: message.into(),
        }
    }
}

/// Tier thresholds, sorted ascending by `min`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable(Vec<Tier>);

impl TierTable {
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, ValidationError> {
        if tiers.is_empty() {
            return Err(ValidationError::EmptyTierTable);
        }
        tiers.sort_by_key(|t| t.min);
        Ok(Self(tiers))
    }

    /// Highest tier whose minimum is at or below `score`; the lowest tier
    /// when the score is under every threshold.
    pub fn lookup(&self, score: u32) -> &Tier {
        self.0
            .iter()
            .rev()
            .find(|t| t.min <= score)
            .unwrap_or(&self.0[0]) // non-empty by construction
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = ValidationError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.0
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self(vec![
            Tier::new("F", 0, "#B2BEC3", "Next time..."),
            Tier::new("C", 60, "#FDCB6E", "Not bad"),
            Tier::new("B", 70, "#00B894", "Nice!"),
            Tier::new("A", 80, "#6C5CE7", "Amazing!"),
            Tier::new("S", 90, "#FF6B9D", "Perfect!"),
            Tier::new("S+", 95, "#FFD700", "Legendary!"),
        ])
    }
}

/// Scoring weights and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// Runs shorter than this score `baseline` untouched.
    pub min_scored_secs: u64,
    pub baseline: f64,
    pub pause_penalty: f64,
    pub app_exit_penalty: f64,
    pub quick_return_bonus: f64,
    pub ultra_focus_bonus: f64,
    /// Strictly-greater-than thresholds, each adding `long_session_bonus`.
    pub long_session_secs: Vec<u64>,
    pub long_session_bonus: f64,
    pub floor: u32,
    pub ceiling: u32,
    pub tiers: TierTable,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            min_scored_secs: 30,
            baseline: 100.0,
            pause_penalty: 3.0,
            app_exit_penalty: 6.0,
            quick_return_bonus: 8.0,
            ultra_focus_bonus: 5.0,
            long_session_secs: vec![3600, 7200],
            long_session_bonus: 3.0,
            floor: 40,
            ceiling: 120,
            tiers: TierTable::default(),
        }
    }
}

impl DensityConfig {
    /// Reject weights that are not finite and bounds that cross.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let weights = [
            ("baseline", self.baseline),
            ("pause_penalty", self.pause_penalty),
            ("app_exit_penalty", self.app_exit_penalty),
            ("quick_return_bonus", self.quick_return_bonus),
            ("ultra_focus_bonus", self.ultra_focus_bonus),
            ("long_session_bonus", self.long_session_bonus),
        ];
        if let Some((field, value)) = weights.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ValidationError::InvalidValue {
                field: format!("density.{field}"),
                message: format!("{value} is not a finite number"),
            });
        }
        if self.floor > self.ceiling {
            return Err(ValidationError::InvalidValue {
                field: "density.floor".into(),
                message: format!("floor {} is above ceiling {}", self.floor, self.ceiling),
            });
        }
        Ok(())
    }
}

/// Deterministic scorer over a [`DensityConfig`].
#[derive(Debug, Clone, Default)]
pub struct DensityScorer {
    config: DensityConfig,
}

impl DensityScorer {
    pub fn new(config: DensityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    pub fn score(&self, input: &DensityInput) -> u32 {
        let c = &self.config;
        if input.total_secs < c.min_scored_secs {
            return (c.baseline.round() as u32).max(c.floor).min(c.ceiling);
        }

        let mut score = c.baseline;
        score -= c.pause_penalty * f64::from(input.pause_count);
        score -= c.app_exit_penalty * f64::from(input.app_exit_count);
        score += c.quick_return_bonus * f64::from(input.quick_return_count);
        if input.ultra_focus_completed {
            score += c.ultra_focus_bonus;
        }
        for &threshold in &c.long_session_secs {
            if input.total_secs > threshold {
                score += c.long_session_bonus;
            }
        }

        // Crossed bounds resolve to the ceiling.
        score
            .max(f64::from(c.floor))
            .min(f64::from(c.ceiling))
            .round() as u32
    }

    pub fn tier(&self, density: u32) -> &Tier {
        self.config.tiers.lookup(density)
    }

    /// Score and tier together, in the shape stored on timers and sessions.
    pub fn evaluate(&self, input: &DensityInput) -> TimerResult {
        let density = self.score(input);
        TimerResult {
            density,
            tier: self.tier(density).id.clone(),
        }
    }
}

/// Score with the default weights.
pub fn score(input: &DensityInput) -> u32 {
    DensityScorer::default().score(input)
}

/// Rounded mean density, 0 for no sessions.
pub fn average_density<I>(densities: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = densities
        .into_iter()
        .fold((0u64, 0u64), |(sum, n), d| (sum + u64::from(d), n + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(pauses: u32, exits: u32, quick: u32, secs: u64, ultra: bool) -> DensityInput {
        DensityInput {
            pause_count: pauses,
            app_exit_count: exits,
            quick_return_count: quick,
            total_secs: secs,
            ultra_focus_completed: ultra,
        }
    }

    #[test]
    fn short_sessions_score_100() {
        assert_eq!(score(&input(10, 10, 0, 29, false)), 100);
        assert_eq!(score(&input(0, 0, 0, 0, false)), 100);
    }

    #[test]
    fn penalties_and_bonuses_combine() {
        // 100 - 2*3 - 6 + 8
        assert_eq!(score(&input(2, 1, 1, 600, false)), 96);
        assert_eq!(score(&input(0, 0, 0, 600, true)), 105);
    }

    #[test]
    fn long_session_bonuses_are_cumulative() {
        assert_eq!(score(&input(0, 0, 0, 3600, false)), 100);
        assert_eq!(score(&input(0, 0, 0, 3601, false)), 103);
        assert_eq!(score(&input(0, 0, 0, 7201, false)), 106);
    }

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(score(&input(50, 0, 0, 600, false)), 40);
        assert_eq!(score(&input(0, 0, 10, 600, true)), 120);
    }

    #[test]
    fn tier_lookup_takes_highest_reached_threshold() {
        let scorer = DensityScorer::default();
        assert_eq!(scorer.tier(96).id, "S+");
        assert_eq!(scorer.tier(95).id, "S+");
        assert_eq!(scorer.tier(94).id, "S");
        assert_eq!(scorer.tier(80).id, "A");
        assert_eq!(scorer.tier(79).id, "B");
        assert_eq!(scorer.tier(60).id, "C");
        assert_eq!(scorer.tier(59).id, "F");
        assert_eq!(scorer.tier(40).id, "F");
    }

    #[test]
    fn tier_table_sorts_and_rejects_empty() {
        assert_eq!(TierTable::new(vec![]), Err(ValidationError::EmptyTierTable));

        let table = TierTable::new(vec![
            Tier::new("hi", 90, "#fff", ""),
            Tier::new("lo", 50, "#000", ""),
        ])
        .unwrap();
        assert_eq!(table.tiers()[0].id, "lo");
        // Below every threshold falls back to the lowest tier.
        assert_eq!(table.lookup(10).id, "lo");
        assert_eq!(table.lookup(91).id, "hi");
    }

    #[test]
    fn custom_weights_are_honoured() {
        let scorer = DensityScorer::new(DensityConfig {
            pause_penalty: 10.0,
            ..DensityConfig::default()
        });
        assert_eq!(scorer.score(&input(2, 0, 0, 600, false)), 80);
    }

    #[test]
    fn validate_rejects_crossed_bounds_and_non_finite_weights() {
        assert_eq!(DensityConfig::default().validate(), Ok(()));

        let crossed = DensityConfig {
            floor: 130,
            ..DensityConfig::default()
        };
        assert!(matches!(
            crossed.validate(),
            Err(ValidationError::InvalidValue { field, .. }) if field == "density.floor"
        ));

        let nan = DensityConfig {
            pause_penalty: f64::NAN,
            ..DensityConfig::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ValidationError::InvalidValue { field, .. }) if field == "density.pause_penalty"
        ));
    }

    #[test]
    fn crossed_bounds_score_without_panicking() {
        let scorer = DensityScorer::new(DensityConfig {
            floor: 130,
            ..DensityConfig::default()
        });
        assert_eq!(scorer.score(&input(0, 0, 0, 600, false)), 120);
        assert_eq!(scorer.score(&input(0, 0, 0, 10, false)), 120);
    }

    #[test]
    fn average_rounds_and_handles_empty() {
        assert_eq!(average_density(Vec::<u32>::new()), 0);
        assert_eq!(average_density([90, 95]), 93);
        assert_eq!(average_density([100]), 100);
    }

    #[test]
    fn evaluate_reports_tier_id() {
        let result = DensityScorer::default().evaluate(&input(2, 1, 1, 600, false));
        assert_eq!(
            result,
            TimerResult {
                density: 96,
                tier: "S+".into()
            }
        );
    }

    proptest! {
        #[test]
        fn score_is_always_bounded(
            pauses in 0u32..1000,
            exits in 0u32..1000,
            quick in 0u32..1000,
            secs in 0u64..100_000,
            ultra in any::<bool>(),
        ) {
            let s = score(&input(pauses, exits, quick, secs, ultra));
            prop_assert!((40..=120).contains(&s));
        }

        #[test]
        fn clean_short_runs_score_100(secs in 0u64..30) {
            prop_assert_eq!(score(&input(0, 0, 0, secs, false)), 100);
        }
    }
}
