pub mod api;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod utils;
pub mod writers;

pub use error::{Result, TravelMapError};
