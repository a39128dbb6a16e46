use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable scoring constants. Defaults reproduce the classic formula:
/// `len * 100 + max(0, 1000 - tenths_elapsed) - misses * 200`, floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub letter_points: u32,
    pub max_time_bonus: u32,
    pub miss_penalty: u32,
    /// A win strictly faster than this earns the fast-solve achievement.
    pub fast_solve_secs: u64,
}

impl ScoreRules {
    pub const DEFAULT_LETTER_POINTS: u32 = 100;
    pub const DEFAULT_MAX_TIME_BONUS: u32 = 1000;
    pub const DEFAULT_MISS_PENALTY: u32 = 200;
    pub const DEFAULT_FAST_SOLVE_SECS: u64 = 30;

    pub fn fast_solve_threshold(&self) -> Duration {
        Duration::from_secs(self.fast_solve_secs)
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            letter_points: Self::DEFAULT_LETTER_POINTS,
            max_time_bonus: Self::DEFAULT_MAX_TIME_BONUS,
            miss_penalty: Self::DEFAULT_MISS_PENALTY,
            fast_solve_secs: Self::DEFAULT_FAST_SOLVE_SECS,
        }
    }
}

/// Score breakdown frozen at the winning guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub base: u64,
    pub time_bonus: u64,
    pub error_penalty: u64,
    pub total: u64,
    pub elapsed_ms: u64,
    pub incorrect_guesses: u8,
    fast_solve_threshold_ms: u64,
}

impl Score {
    pub fn compute(
        rules: &ScoreRules,
        word_len: usize,
        elapsed: Duration,
        incorrect_guesses: u8,
    ) -> Self {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let tenths = elapsed_ms / 100;

        let base = word_len as u64 * u64::from(rules.letter_points);
        let time_bonus = u64::from(rules.max_time_bonus).saturating_sub(tenths);
        let error_penalty = u64::from(incorrect_guesses) * u64::from(rules.miss_penalty);
        let total = (base + time_bonus).saturating_sub(error_penalty);

        Self {
            base,
            time_bonus,
            error_penalty,
            total,
            elapsed_ms,
            incorrect_guesses,
            fast_solve_threshold_ms: rules.fast_solve_secs.saturating_mul(1000),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Total clamped into the leaderboard's integer range.
    pub fn leaderboard_value(&self) -> u32 {
        u32::try_from(self.total).unwrap_or(u32::MAX)
    }

    pub fn achievements(&self) -> Achievements {
        Achievements {
            fast_solve: self.elapsed_ms < self.fast_solve_threshold_ms,
            perfect_solve: self.incorrect_guesses == 0,
        }
    }
}

/// Achievement predicates evaluated once over a won round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub fast_solve: bool,
    pub perfect_solve: bool,
}

impl Achievements {
    pub fn any(&self) -> bool {
        self.fast_solve || self.perfect_solve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_perfect_two_letter_word() {
        let score = Score::compute(&ScoreRules::default(), 2, Duration::from_secs(5), 0);
        assert_eq!(score.base, 200);
        assert_eq!(score.time_bonus, 950);
        assert_eq!(score.error_penalty, 0);
        assert_eq!(score.total, 1150);
        assert_eq!(
            score.achievements(),
            Achievements { fast_solve: true, perfect_solve: true }
        );
    }

    #[test]
    fn time_bonus_uses_whole_tenths() {
        let rules = ScoreRules::default();
        let score = Score::compute(&rules, 1, Duration::from_millis(1_299), 0);
        assert_eq!(score.time_bonus, 1000 - 12);
    }

    #[test]
    fn time_bonus_bottoms_out_at_zero() {
        let score = Score::compute(&ScoreRules::default(), 7, Duration::from_secs(600), 1);
        assert_eq!(score.time_bonus, 0);
        assert_eq!(score.total, 700 - 200);
        assert!(!score.achievements().any());
    }

    #[test]
    fn total_never_goes_negative() {
        let score = Score::compute(&ScoreRules::default(), 1, Duration::from_secs(200), 5);
        assert_eq!(score.total, 0);
    }

    #[test]
    fn fast_solve_threshold_is_exclusive() {
        let rules = ScoreRules::default();
        let at = Score::compute(&rules, 3, Duration::from_secs(30), 0);
        let under = Score::compute(&rules, 3, Duration::from_millis(29_999), 0);
        assert!(!at.achievements().fast_solve);
        assert!(under.achievements().fast_solve);
    }

    #[test]
    fn rules_fill_missing_fields_from_defaults() {
        let rules: ScoreRules = toml::from_str("miss_penalty = 50").unwrap();
        assert_eq!(rules.miss_penalty, 50);
        assert_eq!(rules.letter_points, ScoreRules::DEFAULT_LETTER_POINTS);
    }
}
