use validator::ValidationError;

/// Validates that an amount is a finite number. Zero and negative amounts
/// are legitimate entries; only NaN and the infinities are rejected.
pub fn validate_finite_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        let mut error = ValidationError::new("invalid_amount");
        error.message = Some("Amount must be a finite number".into());
        return Err(error);
    }
    Ok(())
}
