// MyLabGuide Domain
// This crate contains the business logic for the MyLabGuide application

// Evaluator configuration
pub mod config;

// Domain entities
pub mod entities;

// Rule-based blood test evaluation
pub mod evaluator;

// Services that implement business logic
pub mod services;

// Health checks and system status
pub mod health;

// Re-export the database module from the data crate for convenience
pub use my_lab_guide_data::database;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
