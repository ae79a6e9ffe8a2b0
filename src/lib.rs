pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use decoder::{decode_metar, decode_with_cursors};
pub use error::{DecodeError, FetchError, MetarError};
pub use models::{Cursors, ParsedMetar};
