//! Rank tiers.

use glitchwatch_content::domain::config::{RankThreshold, StatsConfig};

/// Maps quiz statistics to a rank name. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct RankEngine<'a> {
    thresholds: &'a [RankThreshold],
    default_rank: &'a str,
}

impl<'a> RankEngine<'a> {
    /// Builds an engine over an ordered tier list.
    #[must_use]
    pub fn new(thresholds: &'a [RankThreshold], default_rank: &'a str) -> Self {
        Self {
            thresholds,
            default_rank,
        }
    }

    /// Builds an engine from the stats section of the configuration.
    #[must_use]
    pub fn from_stats(stats: &'a StatsConfig) -> Self {
        Self::new(&stats.rank_thresholds, &stats.default_rank)
    }

    /// Returns the first tier satisfied by `accuracy` and `mistakes`, or the
    /// default rank.
    #[must_use]
    pub fn rank(&self, accuracy: u32, mistakes: u32) -> &'a str {
        self.thresholds
            .iter()
            .find(|tier| accuracy >= tier.min_accuracy && mistakes <= tier.max_mistakes)
            .map_or(self.default_rank, |tier| tier.rank.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitchwatch_content::domain::config::default_rank_thresholds;

    #[test]
    fn test_perfect_run_earns_top_tier() {
        // Arrange
        let tiers = default_rank_thresholds();
        let engine = RankEngine::new(&tiers, "poor");

        // Act
        let rank = engine.rank(100, 0);

        // Assert
        assert_eq!(rank, "excellent");
    }

    #[test]
    fn test_low_accuracy_falls_to_default() {
        let tiers = default_rank_thresholds();
        let engine = RankEngine::new(&tiers, "poor");

        assert_eq!(engine.rank(40, 0), "poor");
    }

    #[test]
    fn test_mistake_cap_pushes_rank_down() {
        let tiers = default_rank_thresholds();
        let engine = RankEngine::new(&tiers, "poor");

        // 95% would be excellent, but two mistakes exceed its cap of one.
        assert_eq!(engine.rank(95, 2), "good");
        assert_eq!(engine.rank(70, 3), "good");
        assert_eq!(engine.rank(70, 4), "average");
        assert_eq!(engine.rank(60, 6), "poor");
    }

    #[test]
    fn test_tiers_are_scanned_in_configured_order() {
        let tiers = vec![
            RankThreshold {
                rank: "bronze".to_owned(),
                min_accuracy: 0,
                max_mistakes: 100,
            },
            RankThreshold {
                rank: "gold".to_owned(),
                min_accuracy: 100,
                max_mistakes: 0,
            },
        ];
        let engine = RankEngine::new(&tiers, "none");

        assert_eq!(engine.rank(100, 0), "bronze");
    }

    #[test]
    fn test_empty_table_always_returns_default() {
        let engine = RankEngine::new(&[], "unranked");

        assert_eq!(engine.rank(100, 0), "unranked");
    }

    #[test]
    fn test_from_stats_uses_configured_default() {
        let stats = StatsConfig {
            default_rank: "rookie".to_owned(),
            ..StatsConfig::default()
        };

        assert_eq!(RankEngine::from_stats(&stats).rank(10, 9), "rookie");
    }
}
