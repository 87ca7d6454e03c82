#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraCard {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub priority: String,
    pub assignee: Option<String>,
    pub project: String,
    pub issue_type: String,
    pub created: String,
    pub team: String,
    pub description: Option<String>,
}

impl JiraCard {
    /// Case-insensitive substring match over key, summary and assignee.
    /// An empty needle matches every card.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.key.to_lowercase().contains(&needle)
            || self.summary.to_lowercase().contains(&needle)
            || self
                .assignee
                .as_deref()
                .is_some_and(|assignee| assignee.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> JiraCard {
        JiraCard {
            key: "ODCD-101".into(),
            summary: "Checkout button misaligned".into(),
            status: "To Do".into(),
            priority: "High".into(),
            assignee: Some("Priya Natarajan".into()),
            project: "ODCD".into(),
            issue_type: "Bug".into(),
            created: "2024-05-01T10:00:00.000+0000".into(),
            team: "odyssey".into(),
            description: None,
        }
    }

    #[test]
    fn matches_key_summary_and_assignee() {
        let card = card();
        assert!(card.matches_search("odcd-1"));
        assert!(card.matches_search("BUTTON"));
        assert!(card.matches_search("priya"));
        assert!(!card.matches_search("payments"));
    }

    #[test]
    fn missing_assignee_never_matches_on_assignee() {
        let mut card = card();
        card.assignee = None;
        assert!(!card.matches_search("priya"));
    }
}
