//! Decade bucketing for the diabetes model, whose age feature was
//! trained on half-open interval labels rather than raw years.

use super::PredictError;

/// Map a raw age to its half-open decade label, e.g. 34 → "[30-40)".
/// Ages outside [0, 99] are invalid input.
pub fn age_bucket(age: i64) -> Result<String, PredictError> {
    if !(0..=99).contains(&age) {
        return Err(PredictError::Validation(
            "age must be between 0 and 99".to_string(),
        ));
    }
    let lower = (age / 10) * 10;
    Ok(format!("[{}-{})", lower, lower + 10))
}
