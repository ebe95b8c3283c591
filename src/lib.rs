pub mod config;
pub mod datagen;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod loader;
pub mod output;
