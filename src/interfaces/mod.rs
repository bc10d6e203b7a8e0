pub mod view_models;
