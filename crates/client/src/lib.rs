//! Sprout Client - REST access to the Sprout API server.
//!
//! This crate provides the typed HTTP client, the error taxonomy callers
//! render to users, the session context that supplies bearer tokens, and
//! the stores that apply list mutations optimistically.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sprout_client::{SessionContext, SproutApiClient};
//!
//! let session = SessionContext::from_token(Some(token));
//! let client = SproutApiClient::new("http://localhost:8000", session)?;
//! let dashboard = client.get_dashboard().await?;
//! ```

mod categorize;
mod client;
mod endpoints;
mod error;
mod session;
mod stores;
mod traits;
mod types;


pub use categorize::CategorizationMonitor;
pub use client::{SproutApiClient, DEFAULT_API_URL};
pub use endpoints::{Endpoint, RequestKind, Timeouts};
pub use error::{ApiError, Result, SESSION_EXPIRED_MESSAGE};
pub use session::{SessionContext, SessionProvider, StaticSession};
pub use stores::{BudgetStore, GoalStore, TransactionStore};
pub use traits::{BudgetApiTrait, CategorizationApiTrait, GoalApiTrait, TransactionApiTrait};
pub use types::HealthStatus;
