//! Session access for authenticated requests.
//!
//! A single [`SessionContext`] is created at startup and handed to the
//! client; nothing else asks the auth provider for tokens.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::{ApiError, Result};

/// Source of the current bearer token.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns `None` when nobody is signed in.
    async fn access_token(&self) -> Result<Option<String>>;
}

/// Provider holding a token obtained out of band.
#[derive(Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

/// Cloneable handle to the session provider.
#[derive(Clone)]
pub struct SessionContext {
    provider: Arc<dyn SessionProvider>,
}

impl SessionContext {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    pub fn from_token(token: Option<String>) -> Self {
        Self::new(Arc::new(StaticSession::new(token)))
    }

    pub fn anonymous() -> Self {
        Self::from_token(None)
    }

    /// Token for an authenticated call. A missing session is reported the
    /// same way as a rejected one.
    pub async fn bearer_token(&self) -> Result<String> {
        self.provider
            .access_token()
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
