pub mod api;
pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use error::{Error, Result};
