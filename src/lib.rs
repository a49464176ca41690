//! A tile grid with a player sprite walked around by the arrow keys, a status
//! line describing the last input event, and interchangeable display backends.

pub mod app;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod message;
pub mod player;
pub mod render;
pub mod scene;
pub mod sprite;
pub mod text;
pub mod tile;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
