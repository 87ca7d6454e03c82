/// The ticket a generation request is about: a Jira key, pasted content, or both.
/// When both are present the key wins wherever the backend can fetch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketReference {
    pub ticket_id: String,
    pub content: String,
}

impl TicketReference {
    #[cfg(test)]
    pub fn new(ticket_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            content: content.into(),
        }
    }

    pub fn ticket_id(&self) -> Option<&str> {
        let trimmed = self.ticket_id.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
