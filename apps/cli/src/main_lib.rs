use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use sprout_client::{ApiError, SessionContext, SproutApiClient, SESSION_EXPIRED_MESSAGE};

use crate::config::Config;

/// Exit code used when the session is missing or rejected.
pub const EXIT_LOGIN_REQUIRED: u8 = 2;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

pub fn build_client(config: &Config) -> anyhow::Result<SproutApiClient> {
    let session = SessionContext::from_token(config.access_token.clone());
    let client = SproutApiClient::with_timeouts(&config.api_url, session, config.timeouts)?;
    tracing::debug!("Using Sprout API at {}", client.base_url());
    Ok(client)
}

/// Exit code and message for a failed command. An expired or missing
/// session always reads the same so the user knows to log in again.
pub fn describe_failure(err: &anyhow::Error) -> (u8, String) {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        if api_err.requires_login() {
            return (EXIT_LOGIN_REQUIRED, SESSION_EXPIRED_MESSAGE.to_string());
        }
        return (1, api_err.user_message());
    }
    if let Some(domain_err) = err.downcast_ref::<sprout_core::Error>() {
        return (1, domain_err.user_message());
    }
    (1, err.to_string())
}
