//! HTTP client for the Sprout API server.
//!
//! Every request goes through [`SproutApiClient::request`], which attaches
//! the bearer token from the session context and the timeout of the
//! endpoint's class, and every response through `parse_response`, which maps
//! status codes onto [`ApiError`].

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use sprout_core::accounts::Account;
use sprout_core::agents::{ProcessTransactionResult, ProcessUncategorizedResult, UncategorizedCount};
use sprout_core::budgets::{Budget, BudgetPeriod, BudgetUpdate, NewBudget};
use sprout_core::categories::Category;
use sprout_core::dashboard::DashboardSummary;
use sprout_core::filters::FilterState;
use sprout_core::goals::{Goal, GoalUpdate, GoalVisibility, NewGoal};
use sprout_core::plaid::{
    ExchangeResult, LinkToken, PlaidItem, PlaidItemList, PlaidItemStatus, PublicTokenExchange,
    SyncResult,
};
use sprout_core::transactions::{
    NewTransaction, Transaction, TransactionPage, TransactionStats, TransactionUpdate,
};

use crate::endpoints::{Endpoint, Timeouts};
use crate::error::{ApiError, Result};
use crate::session::SessionContext;
use crate::traits::{BudgetApiTrait, CategorizationApiTrait, GoalApiTrait, TransactionApiTrait};
use crate::types::{ErrorBody, HealthStatus};

/// Default base URL of a locally running API server.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

type Query = [(&'static str, String)];

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a non-success response onto the error taxonomy.
pub(crate) fn status_error(endpoint: Endpoint, status: StatusCode, body: &str) -> ApiError {
    let detail = ErrorBody::parse(body);
    match status.as_u16() {
        401 => ApiError::Unauthorized,
        404 => ApiError::not_found(
            detail.unwrap_or_else(|| endpoint.not_found_message().to_string()),
        ),
        code @ (400 | 422) => {
            ApiError::validation(code, detail.unwrap_or_else(|| endpoint.fallback_message()))
        }
        code => ApiError::api(code, detail.unwrap_or_else(|| endpoint.fallback_message())),
    }
}

fn transport_error(endpoint: Endpoint, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            operation: endpoint.operation().to_string(),
        }
    } else {
        ApiError::Network(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sprout API Client
// ─────────────────────────────────────────────────────────────────────────────

/// Typed client for the Sprout REST API.
///
/// # Example
///
/// ```ignore
/// let session = SessionContext::from_token(Some(token));
/// let client = SproutApiClient::new("http://localhost:8000", session)?;
/// let budgets = client.list_budgets(None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SproutApiClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
    timeouts: Timeouts,
}

impl SproutApiClient {
    pub fn new(base_url: &str, session: SessionContext) -> Result<Self> {
        Self::with_timeouts(base_url, session, Timeouts::default())
    }

    pub fn with_timeouts(base_url: &str, session: SessionContext, timeouts: Timeouts) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            timeouts,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Create headers for a request, with the bearer token when the endpoint
    /// is authenticated.
    async fn headers(&self, endpoint: Endpoint) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if endpoint.requires_auth() {
            let token = self.session.bearer_token().await?;
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Session("Invalid access token format".to_string()))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    async fn request(&self, method: Method, endpoint: Endpoint, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[SproutApi] {} {}", method, url);

        Ok(self
            .client
            .request(method, &url)
            .headers(self.headers(endpoint).await?)
            .timeout(self.timeouts.for_kind(endpoint.kind())))
    }

    async fn execute<T: DeserializeOwned>(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        Self::parse_response(endpoint, response).await
    }

    /// Parse an HTTP response. An empty 2xx body decodes as JSON `null`.
    async fn parse_response<T: DeserializeOwned>(
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        debug!("[SproutApi] {:?} responded {}", endpoint, status);

        if !status.is_success() {
            return Err(status_error(endpoint, status, &body));
        }

        let payload = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(payload).map_err(|e| {
            error!(
                "[SproutApi] Failed to deserialize {:?} response. Body: {}, Error: {}",
                endpoint,
                body.chars().take(200).collect::<String>(),
                e
            );
            ApiError::Decode(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, path: &str, query: &Query) -> Result<T> {
        let request = self.request(Method::GET, endpoint, path).await?.query(query);
        self.execute(endpoint, request).await
    }

    async fn send_json<T, B>(&self, method: Method, endpoint: Endpoint, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, endpoint, path).await?.json(body);
        self.execute(endpoint, request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: Endpoint, path: &str, query: &Query) -> Result<T> {
        let request = self.request(Method::POST, endpoint, path).await?.query(query);
        self.execute(endpoint, request).await
    }

    async fn delete(&self, endpoint: Endpoint, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, endpoint, path).await?;
        let _ack: serde_json::Value = self.execute(endpoint, request).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Health & Dashboard
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(Endpoint::Health, "/health", &[]).await
    }

    pub async fn get_dashboard(&self) -> Result<DashboardSummary> {
        self.get(Endpoint::Dashboard, "/api/dashboard", &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_transactions(&self, filters: &FilterState) -> Result<TransactionPage> {
        self.get(
            Endpoint::ListTransactions,
            "/api/transactions",
            &filters.to_api_query(),
        )
        .await
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.get(
            Endpoint::GetTransaction,
            &format!("/api/transactions/{}", id),
            &[],
        )
        .await
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        transaction.validate()?;
        self.send_json(
            Method::POST,
            Endpoint::CreateTransaction,
            "/api/transactions",
            transaction,
        )
        .await
    }

    pub async fn update_transaction(&self, id: i64, update: &TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        self.send_json(
            Method::PUT,
            Endpoint::UpdateTransaction,
            &format!("/api/transactions/{}", id),
            update,
        )
        .await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.delete(
            Endpoint::DeleteTransaction,
            &format!("/api/transactions/{}", id),
        )
        .await
    }

    /// Totals over every page of the filter set.
    pub async fn transaction_stats(&self, filters: &FilterState) -> Result<TransactionStats> {
        let query: Vec<(&'static str, String)> = filters
            .to_api_query()
            .into_iter()
            .filter(|(key, _)| *key != "page" && *key != "limit")
            .collect();
        self.get(Endpoint::TransactionStats, "/api/transactions/stats", &query)
            .await
    }

    pub async fn uncategorized_count(&self) -> Result<UncategorizedCount> {
        self.get(
            Endpoint::UncategorizedCount,
            "/api/transactions/uncategorized/count",
            &[],
        )
        .await
    }

    /// Queues uncategorized transactions for AI categorization.
    pub async fn process_uncategorized(&self, limit: Option<u32>) -> Result<ProcessUncategorizedResult> {
        let query: Vec<(&'static str, String)> =
            limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        self.post_empty(
            Endpoint::ProcessUncategorized,
            "/api/agents/process-uncategorized",
            &query,
        )
        .await
    }

    /// Runs categorization for one transaction and waits for the outcome.
    pub async fn process_transaction(&self, id: i64) -> Result<ProcessTransactionResult> {
        self.post_empty(
            Endpoint::ProcessTransaction,
            &format!("/api/agents/process-transaction/{}", id),
            &[],
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Budgets
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_budgets(&self, period: Option<BudgetPeriod>) -> Result<Vec<Budget>> {
        let query = period.map(|p| p.query_pairs()).unwrap_or_default();
        self.get(Endpoint::ListBudgets, "/api/budgets", &query).await
    }

    pub async fn get_budget(&self, id: i64) -> Result<Budget> {
        self.get(Endpoint::GetBudget, &format!("/api/budgets/{}", id), &[])
            .await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;
        self.send_json(Method::POST, Endpoint::CreateBudget, "/api/budgets", budget)
            .await
    }

    pub async fn update_budget(&self, id: i64, update: &BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        self.send_json(
            Method::PUT,
            Endpoint::UpdateBudget,
            &format!("/api/budgets/{}", id),
            update,
        )
        .await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<()> {
        self.delete(Endpoint::DeleteBudget, &format!("/api/budgets/{}", id))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Goals
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_goals(&self, visibility: GoalVisibility) -> Result<Vec<Goal>> {
        let query: Vec<(&'static str, String)> = visibility
            .is_active_param()
            .map(|active| ("is_active", active.to_string()))
            .into_iter()
            .collect();
        self.get(Endpoint::ListGoals, "/api/goals", &query).await
    }

    pub async fn get_goal(&self, id: i64) -> Result<Goal> {
        self.get(Endpoint::GetGoal, &format!("/api/goals/{}", id), &[])
            .await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        goal.validate()?;
        self.send_json(Method::POST, Endpoint::CreateGoal, "/api/goals", goal)
            .await
    }

    pub async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal> {
        update.validate()?;
        self.send_json(
            Method::PUT,
            Endpoint::UpdateGoal,
            &format!("/api/goals/{}", id),
            update,
        )
        .await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<()> {
        self.delete(Endpoint::DeleteGoal, &format!("/api/goals/{}", id))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Data
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.get(Endpoint::ListAccounts, "/api/accounts", &[]).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get(Endpoint::ListCategories, "/api/categories", &[])
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bank Connections
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_link_token(&self) -> Result<LinkToken> {
        self.post_empty(Endpoint::CreateLinkToken, "/api/plaid/link_token/create", &[])
            .await
    }

    pub async fn exchange_public_token(&self, exchange: &PublicTokenExchange) -> Result<ExchangeResult> {
        self.send_json(
            Method::POST,
            Endpoint::ExchangePublicToken,
            "/api/plaid/item/public_token/exchange",
            exchange,
        )
        .await
    }

    pub async fn sync_plaid_item(&self, plaid_item_id: i64) -> Result<SyncResult> {
        self.post_empty(
            Endpoint::SyncPlaidItem,
            "/api/plaid/sync",
            &[("plaid_item_id", plaid_item_id.to_string())],
        )
        .await
    }

    pub async fn plaid_item_status(&self, plaid_item_id: i64) -> Result<PlaidItemStatus> {
        self.get(
            Endpoint::PlaidItemStatus,
            &format!("/api/plaid/status/{}", plaid_item_id),
            &[],
        )
        .await
    }

    pub async fn list_plaid_items(&self) -> Result<Vec<PlaidItem>> {
        let list: PlaidItemList = self
            .get(Endpoint::ListPlaidItems, "/api/plaid/items", &[])
            .await?;
        Ok(list.plaid_items)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait Implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionApiTrait for SproutApiClient {
    async fn list_transactions(&self, filters: &FilterState) -> Result<TransactionPage> {
        SproutApiClient::list_transactions(self, filters).await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        SproutApiClient::create_transaction(self, transaction).await
    }

    async fn update_transaction(&self, id: i64, update: &TransactionUpdate) -> Result<Transaction> {
        SproutApiClient::update_transaction(self, id, update).await
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        SproutApiClient::delete_transaction(self, id).await
    }
}

#[async_trait]
impl BudgetApiTrait for SproutApiClient {
    async fn list_budgets(&self, period: Option<BudgetPeriod>) -> Result<Vec<Budget>> {
        SproutApiClient::list_budgets(self, period).await
    }

    async fn create_budget(&self, budget: &NewBudget) -> Result<Budget> {
        SproutApiClient::create_budget(self, budget).await
    }

    async fn update_budget(&self, id: i64, update: &BudgetUpdate) -> Result<Budget> {
        SproutApiClient::update_budget(self, id, update).await
    }

    async fn delete_budget(&self, id: i64) -> Result<()> {
        SproutApiClient::delete_budget(self, id).await
    }
}

#[async_trait]
impl GoalApiTrait for SproutApiClient {
    async fn list_goals(&self, visibility: GoalVisibility) -> Result<Vec<Goal>> {
        SproutApiClient::list_goals(self, visibility).await
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        SproutApiClient::create_goal(self, goal).await
    }

    async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal> {
        SproutApiClient::update_goal(self, id, update).await
    }

    async fn delete_goal(&self, id: i64) -> Result<()> {
        SproutApiClient::delete_goal(self, id).await
    }
}

#[async_trait]
impl CategorizationApiTrait for SproutApiClient {
    async fn uncategorized_count(&self) -> Result<UncategorizedCount> {
        SproutApiClient::uncategorized_count(self).await
    }

    async fn process_uncategorized(&self, limit: Option<u32>) -> Result<ProcessUncategorizedResult> {
        SproutApiClient::process_uncategorized(self, limit).await
    }
}
