pub mod generator;
pub mod language;
pub mod models;
pub mod prompts;
pub mod summary;
