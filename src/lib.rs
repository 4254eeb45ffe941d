//! urlbox: client SDK for the Urlbox screenshot API
//!
//! Builds signed render URLs, sends render requests and verifies the
//! HMAC-signed webhooks Urlbox posts back.
//!
//! # Example
//!
//! ```
//! use urlbox::client::Client;
//! use urlbox::config::ClientSettings;
//! use urlbox::options::RenderOptions;
//!
//! let settings = ClientSettings::new("KEY").unwrap().with_api_secret("SECRET").unwrap();
//! let client = Client::from_settings(settings);
//!
//! let url = client
//!     .generate_url(RenderOptions::new().with("url", "example.com").with("full_page", true))
//!     .unwrap();
//! assert!(url.starts_with("https://api.urlbox.io/v1/KEY/"));
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod options;
pub mod signing;
pub mod time;
pub mod transport;
pub mod webhook;
