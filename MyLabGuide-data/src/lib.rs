// MyLabGuide Data
// This crate handles persistence of analyzed blood tests

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
