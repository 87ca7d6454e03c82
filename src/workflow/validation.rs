use crate::error::ValidationError;

/// A request needs a ticket number or some pasted content. Whitespace alone
/// counts as neither.
pub fn validate(ticket_id: &str, content: &str) -> Result<(), ValidationError> {
    if ticket_id.trim().is_empty() && content.trim().is_empty() {
        Err(ValidationError::MissingInput)
    } else {
        Ok(())
    }
}
