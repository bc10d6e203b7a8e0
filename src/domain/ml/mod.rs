// Simulated model training domain
pub mod training;
