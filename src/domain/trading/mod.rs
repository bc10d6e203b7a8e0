// Core trading domain entities and value objects
pub mod journal;
pub mod portfolio;
pub mod types;
