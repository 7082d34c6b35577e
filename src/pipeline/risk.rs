//! Risk tiering: a pure function of (predicted class, probability).

use crate::models::RiskTier;

/// Map a classification outcome to a discrete clinical urgency tier.
///
/// Note the asymmetry: a negative-class prediction is still tagged
/// Medium when the probability is at or above 0.60: a borderline
/// probability near the decision boundary warrants caution regardless
/// of which side of the threshold it fell on. The same probability
/// value is compared in both branches, matching the trained system's
/// behavior exactly.
pub fn risk_tier(predicted_class: u8, probability: f64) -> RiskTier {
    if predicted_class == 1 {
        if probability >= 0.85 {
            RiskTier::High
        } else if probability >= 0.6 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    } else if probability >= 0.6 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
