//! Plain-language summary of the analysis.

use crate::seasonality::SeasonalityVerdict;
use crate::trend::TrendDirection;

/// Compose the insight paragraph for a trend and seasonality result.
pub fn insights(trend: TrendDirection, seasonality: SeasonalityVerdict) -> String {
    let mut text = String::from("The data provides a historical record of groundwater levels. ");
    text.push_str(match trend {
        TrendDirection::Upward => {
            "An increasing trend in groundwater levels is observed, which might indicate \
             higher recharge or reduced extraction."
        }
        TrendDirection::Downward => {
            "A decreasing trend is evident, suggesting potential over-extraction or reduced recharge."
        }
        TrendDirection::Stable | TrendDirection::Insufficient => {
            "Levels appear relatively stable over the period."
        }
    });
    text.push_str(match seasonality {
        SeasonalityVerdict::PossibleSeasonal => {
            " Additionally, there are indications of seasonal variations, likely influenced \
             by rainfall or irrigation cycles."
        }
        SeasonalityVerdict::NoneDetected => {
            " No prominent seasonal patterns were automatically detected."
        }
    });
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downward_seasonal() {
        let text = insights(TrendDirection::Downward, SeasonalityVerdict::PossibleSeasonal);
        assert!(text.starts_with("The data provides a historical record"));
        assert!(text.contains("over-extraction"));
        assert!(text.ends_with("irrigation cycles."));
    }

    #[test]
    fn test_insufficient_reads_as_stable() {
        let text = insights(TrendDirection::Insufficient, SeasonalityVerdict::NoneDetected);
        assert!(text.contains("relatively stable"));
        assert!(text.ends_with("automatically detected."));
    }

    #[test]
    fn test_upward_wording() {
        let text = insights(TrendDirection::Upward, SeasonalityVerdict::NoneDetected);
        assert!(text.contains("higher recharge or reduced extraction."));
        assert!(!text.contains("  "));
    }
}
