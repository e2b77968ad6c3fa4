pub mod admin;
pub mod claim;
pub mod lifecycle;
pub mod predict;
pub mod seeding;
