use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

/// Ownership gate: only the user who created a quiz may read or change it.
pub fn require_owner(requester_id: &str, quiz: &Quiz) -> AppResult<()> {
    if !quiz.is_owned_by(requester_id) {
        log::warn!(
            "User '{}' denied access to quiz '{}' owned by '{}'",
            requester_id,
            quiz.id,
            quiz.user_id
        );
        return Err(AppError::Forbidden(
            "You do not have access to this quiz".to_string(),
        ));
    }
    Ok(())
}
