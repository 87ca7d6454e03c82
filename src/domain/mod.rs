pub mod card;
pub mod envelope;
pub mod filter;
pub mod generation;
pub mod jql;
pub mod teams;
pub mod ticket;
