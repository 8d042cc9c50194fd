use crate::error::ApiError;

/// Self-access rule for user-scoped inventory reads: the email the caller
/// asks for must exactly match the email their verified token asserts.
///
/// Comparison is case-sensitive byte equality. Absent claims deny outright;
/// they never widen to a wildcard.
pub fn authorize_self_access(verified: Option<&str>, requested: &str) -> Result<(), ApiError> {
    match verified {
        Some(email) if email == requested => Ok(()),
        _ => Err(ApiError::forbidden("Forbidden access")),
    }
}
