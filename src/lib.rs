//! Track search and audio-feature radar charts backed by the Spotify Web API.
//!
//! The server side ([`handlers`], [`spotify`]) brokers Client Credentials
//! tokens and proxies two read endpoints. The client side ([`analyzer`])
//! drives search and selection and renders features as a radar chart.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod radar;
pub mod spotify;

pub use error::AppError;
