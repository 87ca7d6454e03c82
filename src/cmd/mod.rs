pub mod config;
pub mod dashboard;
pub mod generate;
pub mod health;
pub mod ticket;
