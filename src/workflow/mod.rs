pub mod cards;
pub mod dashboard;
pub mod health;
pub mod panel;
pub mod validation;
pub mod workspace;
