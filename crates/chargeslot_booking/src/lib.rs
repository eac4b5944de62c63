pub mod booking;
pub mod error;
pub mod json;
pub mod screen;
pub mod service;
pub mod settings;
pub mod slot;
mod utils;
