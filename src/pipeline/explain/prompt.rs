//! Deterministic prompt construction for the narrative service.
//!
//! Every number shown is rounded here, once, so the same prediction
//! always produces the same prompt. The service is instructed to
//! answer in HTML with the three fixed sections the care-team UI
//! renders: "Factors Increasing Risk", "Factors Decreasing Risk",
//! "Summary".

use crate::models::{Attribution, PredictionResult};
use crate::pipeline::attribution::rank_by_magnitude;

/// Detailed feature listing length.
const TOP_FEATURES: usize = 7;
/// Contributors called out per narrative section.
const NARRATIVE_CONTRIBUTORS: usize = 4;

pub fn build_explanation_prompt(result: &PredictionResult, attribution: &Attribution) -> String {
    let label = if result.predicted_class == 1 {
        "Readmitted"
    } else {
        "Not Readmitted"
    };
    let ranked = rank_by_magnitude(attribution);

    let mut prompt = String::new();
    prompt.push_str(
        "You are a medical assistant AI helping explain a hospital readmission prediction \
         made by a machine learning model.\n\n",
    );
    prompt.push_str("Here is the patient's result:\n");
    prompt.push_str(&format!("- Prediction: {label}\n"));
    prompt.push_str(&format!(
        "- Probability of Readmission: {:.2}%\n",
        result.probability * 100.0
    ));
    prompt.push_str(&format!(
        "- Model Base Value (SHAP): {:.4}\n\n",
        attribution.base_value
    ));

    prompt.push_str(
        "Here are the SHAP values for each feature. These represent the contribution \
         of each factor to the model's decision:\n",
    );
    for (feature, value) in attribution.features.iter().zip(&attribution.values) {
        prompt.push_str(&format!("- {feature}: {value:.4}\n"));
    }

    prompt.push_str("\nTop factors by absolute impact:\n");
    for (feature, value) in ranked.iter().take(TOP_FEATURES) {
        prompt.push_str(&format!("- {feature}: SHAP = {value:.3}\n"));
    }

    let increasing: Vec<&(&str, f64)> = ranked
        .iter()
        .filter(|(_, v)| *v > 0.0)
        .take(NARRATIVE_CONTRIBUTORS)
        .collect();
    let decreasing: Vec<&(&str, f64)> = ranked
        .iter()
        .filter(|(_, v)| *v < 0.0)
        .take(NARRATIVE_CONTRIBUTORS)
        .collect();

    prompt.push_str("\nRisk-increasing contributors to highlight:\n");
    if increasing.is_empty() {
        prompt.push_str("- none\n");
    }
    for (feature, value) in &increasing {
        prompt.push_str(&format!("- {feature}: {value:.3}\n"));
    }
    prompt.push_str("\nRisk-decreasing contributors to highlight:\n");
    if decreasing.is_empty() {
        prompt.push_str("- none\n");
    }
    for (feature, value) in &decreasing {
        prompt.push_str(&format!("- {feature}: {value:.3}\n"));
    }

    prompt.push_str(
        "\nNow, write a clear and medically sensitive explanation of the prediction result \
         in HTML format.\nBe sure to:\n\
         - Clearly state the probability and what it means.\n\
         - Separate the explanation into sections: \"Factors Increasing Risk\", \
         \"Factors Decreasing Risk\", \"Summary\".\n\
         - Use bullet points (<ul><li>) for listing influential features.\n\
         - Only highlight the listed top positive and negative SHAP contributors.\n\
         - Be cautious with sensitive terms like \"ICU admission\" or \"age\"; avoid strong \
         assumptions and provide balanced insights.\n\
         - Frame the explanation in a supportive, medically appropriate tone.\n\
         - End with a concise summary in <p> tags.\n\
         - Return only valid HTML, no markdown or plaintext.\n\n\
         This explanation will be shown to clinicians and care teams, so make it informative \
         and accessible.",
    );

    prompt
}
