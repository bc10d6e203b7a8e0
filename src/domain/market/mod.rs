// Market analysis domain
pub mod prediction;
pub mod statistics;
