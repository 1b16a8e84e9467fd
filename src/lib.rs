//! OpenFire UserService Client Library
//!
//! This crate provides a Rust client for the UserService administrative plugin
//! of the OpenFire XMPP server. It can create, update, enable/disable and
//! delete user accounts and manage each user's contact roster by POSTing to
//! the plugin endpoint and classifying its XML-tagged text replies. Transports
//! are pluggable: a full reqwest-backed HTTP client or a minimal TCP stream
//! fallback.

// Re-export core components
pub mod client;
pub mod errors;
pub mod params;
pub mod response;
pub mod settings;
pub mod transport;
// Re-export commonly used items
pub use client::{ RosterAttributes, UserAttributes, UserServiceClient, UserServiceClientBuilder };
pub use errors::Error;
pub use params::{ Operation, RequestParameters };
pub use response::Outcome;
pub use settings::{ ClientSettings, SettingValue };
pub use transport::Transport;
pub use transport::http::HttpTransport;
pub use transport::stream::StreamTransport;
