pub mod backend;
pub mod jira;
pub mod sample_cards;
