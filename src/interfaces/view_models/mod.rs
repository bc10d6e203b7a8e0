pub mod dashboard_view_model;
pub mod prediction_view_model;
pub mod training_view_model;

pub use dashboard_view_model::{DashboardViewModel, Tone};
pub use prediction_view_model::PredictionViewModel;
pub use training_view_model::TrainingViewModel;
