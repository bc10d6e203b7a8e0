// Header clock
pub mod clock;

// Dashboard state store
pub mod dashboard_store;

// Simulated model training
pub mod training_simulator;

pub use dashboard_store::DashboardStore;
