//! Credit tiers: named score bands with a representative APR.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTier {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub score_min: Option<u32>,
    #[serde(default)]
    pub score_max: Option<u32>,
    pub apr: f64,
}

impl CreditTier {
    pub fn new(id: &str, label: &str, score: (Option<u32>, Option<u32>), apr: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            score_min: score.0,
            score_max: score.1,
            apr,
        }
    }

    /// Band shown next to the tier name, e.g. `700–749` or `< 640`.
    pub fn score_band(&self) -> String {
        match (self.score_min, self.score_max) {
            (Some(min), Some(max)) => format!("{min}–{max}"),
            (None, Some(max)) => format!("< {}", max.saturating_add(1)),
            (Some(min), None) => format!("{min}+"),
            (None, None) => "Any".to_string(),
        }
    }

    pub fn defaults() -> Vec<CreditTier> {
        vec![
            CreditTier::new("rebuild", "Rebuilding", (None, Some(639)), 12.99),
            CreditTier::new("fair", "Fair", (Some(641), Some(699)), 10.49),
            CreditTier::new("good", "Good", (Some(700), Some(749)), 8.49),
            CreditTier::new("excel", "Excellent", (Some(750), Some(850)), 7.49),
        ]
    }
}

/// Look up a tier by id, case-insensitively.
pub fn find_tier<'a>(tiers: &'a [CreditTier], id: &str) -> Option<&'a CreditTier> {
    let id = id.trim();
    tiers.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_are_ordered_by_score() {
        let tiers = CreditTier::defaults();
        let ids: Vec<_> = tiers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["rebuild", "fair", "good", "excel"]);
        for pair in tiers.windows(2) {
            assert!(pair[0].apr > pair[1].apr);
        }
    }

    #[test]
    fn test_score_band_labels() {
        let tiers = CreditTier::defaults();
        assert_eq!(tiers[0].score_band(), "< 640");
        assert_eq!(tiers[2].score_band(), "700–749");
    }

    #[test]
    fn test_score_band_at_u32_max() {
        let tier = CreditTier::new("x", "X", (None, Some(u32::MAX)), 5.0);
        assert_eq!(tier.score_band(), format!("< {}", u32::MAX));
    }

    #[test]
    fn test_find_tier() {
        let tiers = CreditTier::defaults();
        assert_eq!(find_tier(&tiers, "GOOD").map(|t| t.apr), Some(8.49));
        assert!(find_tier(&tiers, "platinum").is_none());
    }
}
