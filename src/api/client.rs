//! Typed HTTP client for the MIS API.
//!
//! One method per endpoint; the bearer token is attached when present. Non-2xx
//! responses are mapped to [`ApiError`], with 401 singled out as session
//! expiry. No retries, no deduplication, no cancellation.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;

use super::dto::*;
use super::error::ApiError;

const USER_AGENT: &str = concat!("mis-console/", env!("CARGO_PKG_VERSION"));

/// Shape of the API's JSON error bodies
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract a human-readable message from a non-2xx response body
fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {}", status)
    } else {
        trimmed.to_string()
    }
}

/// Fall back to the built-in catalog when the server has no source types
fn catalog_or_builtin(fetched: Vec<SourceType>) -> Vec<SourceType> {
    if fetched.is_empty() {
        SourceType::builtin_catalog()
    } else {
        fetched
    }
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the configured base URL, with the token injected
    /// from the session (if any)
    pub fn new(config: &Config, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.api_base().to_string(),
            token,
            client,
        })
    }

    /// Replace the injected token (after login or logout)
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), error_message(status.as_u16(), &body)));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::network(format!("failed to parse response: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST where the response body is irrelevant; only status is checked
    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), error_message(status.as_u16(), &body)));
        }
        Ok(())
    }

    // ─── Authentication ─────────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_json("/auth/login", &request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_unit("/auth/register", request).await
    }

    // ─── Lists and reference data ───────────────────────────────────────────

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    pub async fn branches(&self) -> Result<Vec<Branch>, ApiError> {
        self.get_json("/branches").await
    }

    pub async fn areas(&self) -> Result<Vec<Area>, ApiError> {
        self.get_json("/areas").await
    }

    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get_json("/roles").await
    }

    pub async fn daily_reports(&self) -> Result<Vec<DailyReport>, ApiError> {
        self.get_json("/daily-reports").await
    }

    /// Source types, falling back to the built-in catalog when the server
    /// returns an empty list
    pub async fn source_types(&self) -> Result<Vec<SourceType>, ApiError> {
        let fetched = self.get_json("/source-types").await?;
        Ok(catalog_or_builtin(fetched))
    }

    pub async fn branch_source_names(
        &self,
        branch_id: u32,
        source_type_id: Option<u32>,
    ) -> Result<Vec<BranchSourceName>, ApiError> {
        let path = match source_type_id {
            Some(type_id) => {
                format!("/branch/{branch_id}/source-names?sourceTypeId={type_id}")
            }
            None => format!("/branch/{branch_id}/source-names"),
        };
        self.get_json(&path).await
    }

    // ─── Mutations ──────────────────────────────────────────────────────────

    pub async fn create_source_name(
        &self,
        request: &SourceNameCreate,
    ) -> Result<CreatedSourceName, ApiError> {
        self.post_json("/source-name", request).await
    }

    pub async fn link_branch_source_name(
        &self,
        request: &BranchSourceNameLink,
    ) -> Result<(), ApiError> {
        self.post_unit("/branch-source-name", request).await
    }

    pub async fn full_create_branch(
        &self,
        request: &FullCreateRequest,
    ) -> Result<FullCreateResponse, ApiError> {
        self.post_json("/branch/full-create", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let mut config = Config::default();
        config.api.base_url = "http://mis.example.com/".to_string();
        let client = ApiClient::new(&config, None).unwrap();
        assert_eq!(client.url("/users"), "http://mis.example.com/users");
        assert_eq!(
            client.url("/branch/7/source-names"),
            "http://mis.example.com/branch/7/source-names"
        );
    }

    #[test]
    fn test_error_message_prefers_json_body() {
        let msg = error_message(500, r#"{"message": "Failed to get branches: boom"}"#);
        assert_eq!(msg, "Failed to get branches: boom");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(500, "  "), "request failed with status 500");
    }

    #[test]
    fn test_catalog_fallback_only_when_empty() {
        assert_eq!(catalog_or_builtin(Vec::new()).len(), 8);

        let fetched = vec![SourceType {
            id: 42,
            name: "Spring - Gravity".to_string(),
        }];
        let result = catalog_or_builtin(fetched.clone());
        assert_eq!(result, fetched);
    }

    #[test]
    fn test_token_injection() {
        let config = Config::default();
        let mut client = ApiClient::new(&config, None).unwrap();
        assert!(!client.has_token());

        client.set_token(Some("tok".to_string()));
        assert!(client.has_token());

        client.set_token(None);
        assert!(!client.has_token());
    }
}
