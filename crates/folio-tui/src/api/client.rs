use async_trait::async_trait;
use folio_shared::{
    api::{CreatedResponse, ErrorResponse, ProfileInput},
    Profile,
};
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use super::ProfileApi;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// HTTP client for the profile API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build URL for endpoint
    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
            }
            _ => Err(Self::error_from(status, response).await),
        }
    }

    /// Handle empty response
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(Self::error_from(status, response).await),
        }
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ApiError {
        let text = response.text().await.unwrap_or_default();

        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(error_message(&text))
            }
            _ => ApiError::Server(format!("{}: {}", status, error_message(&text))),
        }
    }
}

/// The `error` field of a JSON error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        let response = self.client.get(self.url("/users")).send().await?;
        let body: serde_json::Value = self.handle_response(response).await?;

        if !body.is_array() {
            return Err(ApiError::InvalidResponse(
                "expected a list of profiles".to_string(),
            ));
        }

        serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn get_profile(&self, id: Uuid) -> Result<Profile, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn create_profile(&self, input: &ProfileInput) -> Result<CreatedResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn update_profile(&self, id: Uuid, input: &ProfileInput) -> Result<Profile, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/users/{}", id)))
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn delete_profile(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/users"), "http://localhost:5000/api/users");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error":"Name, profession, and photo are required"}"#),
            "Name, profession, and photo are required"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
