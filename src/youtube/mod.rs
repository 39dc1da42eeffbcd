//! Channel description export via the YouTube Data API v3
//!
//! Enumerates every video a channel has published and writes one text file
//! per video with its title, id and description.

pub mod client;
pub mod error;
pub mod export;
pub mod models;

pub use client::YouTubeClient;
pub use error::{Error, Result};
pub use export::{render, sanitize_title, save_descriptions};
pub use models::VideoDescription;
