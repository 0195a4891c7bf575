pub mod audio;
pub mod bands;
pub mod config;
pub mod error;
pub mod format;
pub mod player;
pub mod settings;
pub mod sine;
pub mod sink;
pub mod stream;
pub mod utils;

pub use error::{Result, ToneError};
