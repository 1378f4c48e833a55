//! # Qualer SDK
//!
//! Typed Rust client for the Qualer quality-management REST API.
//!
//! Remote JSON never flows through untyped: every response body passes an
//! explicit, total validation pass ([`schema`]) before it becomes an
//! entity, and every transport or HTTP failure is classified into the
//! closed [`QualerError`] taxonomy. Search-style listings paginate via
//! opaque cursors ([`cursor`]) bound to the filters that produced them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qualer_sdk::{QualerClient, QualerResult};
//!
//! #[tokio::main]
//! async fn main() -> QualerResult<()> {
//!     // Reads QUALER_BASE_URL (optional) and QUALER_TOKEN (required).
//!     let client = QualerClient::from_env()?;
//!
//!     let so = client.service_orders().get(1188722).await?;
//!     println!("{} is {}", so.number, so.status);
//!
//!     let docs = client.documents().for_service_order(so.id).await?;
//!     println!("{} documents attached", docs.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod cursor;
pub mod error;
pub mod schema;
pub mod transport;
pub mod types;

pub use api::{
    AssetFilter, AssetsApi, DocumentsApi, PageRequest, ServiceOrderFilter, ServiceOrdersApi,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use client::{QualerClient, QualerClientBuilder, SharedClient};
pub use config::ClientConfig;
pub use error::{ErrorEnvelope, QualerError, QualerResult};
pub use types::{Asset, Document, Page, ServiceOrder};
