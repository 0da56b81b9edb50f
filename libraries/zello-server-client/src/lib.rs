//! Zello Server Client
//!
//! Async client for the Zello server administrative API.
//!
//! # Features
//!
//! - **Authentication**: token/login handshake with hashed password, session resume, logout
//! - **Users**: list, save, delete, add to and remove from channels
//! - **Channels**: list, add, delete
//! - **Channel roles**: list, save, delete, assign users
//!
//! # Results
//!
//! Every call returns `Result<ApiResponse>`:
//!
//! - `Err(ZelloClientError)` when no JSON payload was obtained (connection
//!   failure, timeout, HTTP error status, undecodable body).
//! - `Ok(ApiResponse)` otherwise. `succeeded` is true when the payload's
//!   `code` is `"200"`; on failure the payload carries the server's error
//!   `code` and `status`.
//!
//! # Example
//!
//! ```ignore
//! use zello_server_client::{ClientConfig, UserFilter, ZelloClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("acme.zellowork.com", "API_KEY");
//!     let client = ZelloClient::new(config)?;
//!
//!     let login = client.authenticate("admin", "secret").await?;
//!     if !login.succeeded {
//!         return Err(format!("login failed: {:?}", login.status()).into());
//!     }
//!
//!     let users = client.get_users(&UserFilter::default()).await?.into_result()?;
//!     println!("{}", users["users"]);
//!
//!     client.add_channel("Test channel", Some(true), None).await?;
//!     client.add_to_channel("Test channel", &["alice", "bob"]).await?;
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```

mod auth;
mod channels;
mod classify;
mod client;
mod error;
mod request;
mod session;
mod transport;
mod types;
mod users;

/// Client version, sent in the default user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types
pub use classify::{classify, ApiResponse, SUCCESS_CODE};
pub use client::ZelloClient;
pub use error::{AuthError, Result, ZelloClientError};
pub use request::{encode, ApiRequest, CommandPath, HttpMethod, Params};
pub use transport::{resolve_url, HttpTransport, Transport};
pub use types::{ChannelFilter, ClientConfig, RoleSettings, UserDetails, UserFilter};

// Password hashing, shared by the handshake and user provisioning
pub use auth::{hash_password, md5_hex, AuthClient};
