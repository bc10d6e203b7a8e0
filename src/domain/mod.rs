// Market predictions and dataset statistics
pub mod market;

// Simulated model training
pub mod ml;

// Repository traits
pub mod repositories;

// Core trading domain
pub mod trading;

// Domain-specific error types
pub mod errors;

// Display formatting shared by the store and view models
pub mod formatting;
