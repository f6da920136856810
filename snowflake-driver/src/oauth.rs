//! Exchanges an OAuth refresh token for an access token.

use serde::Deserialize;
use tracing::debug;

#[derive(Clone)]
pub struct TokenRequest {
    pub token_endpoint: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
}

pub async fn refresh_access_token(
    client: &reqwest::Client,
    request: &TokenRequest,
) -> Result<String, OAuthError> {
    debug!(endpoint = %request.token_endpoint, "refreshing oauth access token");
    let response = client
        .post(&request.token_endpoint)
        .basic_auth(&request.client_id, Some(&request.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", request.refresh_token.as_str()),
            ("redirect_uri", request.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(OAuthError::Request)?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(OAuthError::Rejected { status, body });
    }
    Ok(response
        .json::<TokenResponse>()
        .await
        .map_err(OAuthError::Decode)?
        .access_token)
}

#[derive(thiserror::Error, Debug)]
pub enum OAuthError {
    #[error(transparent)]
    Request(reqwest::Error),
    #[error(transparent)]
    Decode(reqwest::Error),
    #[error("token endpoint rejected the refresh token with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(server: &MockServer) -> TokenRequest {
        TokenRequest {
            token_endpoint: format!("{}/oauth/token-request", server.uri()),
            refresh_token: "refresh".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
            redirect_uri: "https://localhost/callback".into(),
        }
    }

    #[tokio::test]
    async fn exchanges_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token-request"))
            .and(header_exists("authorization"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access",
                "token_type": "Bearer",
                "expires_in": 600
            })))
            .mount(&server)
            .await;

        let token = refresh_access_token(&reqwest::Client::new(), &request(&server))
            .await
            .unwrap();
        assert_eq!(token, "access");
    }

    #[tokio::test]
    async fn rejected_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token-request"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let error = refresh_access_token(&reqwest::Client::new(), &request(&server))
            .await
            .unwrap_err();
        assert!(matches!(error, OAuthError::Rejected { ref body, .. } if body == "invalid_grant"));
    }
}
