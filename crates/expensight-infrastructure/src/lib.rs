//! Infrastructure layer for the ExpenSight client.
//!
//! Implementations of the core contracts against the outside world: the
//! HTTP authority client, the file-backed token store, client
//! configuration, and platform path resolution.

pub mod config;
pub mod http_client;
pub mod paths;
pub mod token_store;

pub use crate::config::ClientConfig;
pub use crate::http_client::HttpAuthorityClient;
pub use crate::paths::ExpensightPaths;
pub use crate::token_store::FileTokenStore;
