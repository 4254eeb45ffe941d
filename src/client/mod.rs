//! Render API client.
//!
//! [`Client`] turns render options into signed request URLs and sends
//! GET, HEAD, DELETE and POST requests through an [`HttpClient`].
//!
//! [`HttpClient`]: crate::transport::HttpClient

mod error;
mod render;

#[cfg(test)]
mod render_tests;

pub use error::ClientError;
pub use render::Client;
