//! HTTP client for the storefront REST API.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Configuration for connecting to the REST API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API host, e.g. `"https://api.example.com"`. Resource paths are appended to it.
    pub base_url: String,

    /// Timeout applied to every request.
    pub timeout: Duration,
}

/// Errors that can occur when communicating with the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx response.
    #[error("unexpected response with status {status}: {body}")]
    UnexpectedResponse {
        /// Response status
        status: StatusCode,

        /// Response body, possibly empty
        body: String,
    },
}

impl ApiError {
    /// Status of a non-2xx response, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::UnexpectedResponse { status, .. } => Some(*status),
            ApiError::Http(source) => source.status(),
        }
    }

    /// Check whether the API answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// HTTP client for the REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Full URL for a resource path such as `/api/cupon`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET` a resource and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx status or an undecodable body.
    pub async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);

        debug!(%url, "fetching");

        let response = self.http.get(&url).send().await?;
        let response = check(response).await?;

        Ok(response.json().await?)
    }

    /// Send a JSON body with the given method. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx status.
    pub async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path);

        debug!(%url, %method, "sending json");

        let response = self
            .http
            .request(method, &url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        check(response).await?;

        Ok(())
    }

    /// `POST` a multipart form. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx status.
    pub async fn send_form(&self, path: &str, form: Form) -> Result<(), ApiError> {
        let url = self.url(path);

        debug!(%url, "sending form");

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await?;

        check(response).await?;

        Ok(())
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);

        debug!(%url, "deleting");

        let response = self.http.delete(&url).send().await?;

        check(response).await?;

        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    Err(ApiError::UnexpectedResponse { status, body })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;

    fn client(server: &MockServer) -> Result<ApiClient, ApiError> {
        ApiClient::new(ApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout: Duration::from_secs(5),
        })
    }

    #[test]
    fn url_joins_without_double_slashes() -> TestResult {
        let client = ApiClient::new(ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            timeout: Duration::from_secs(1),
        })?;

        assert_eq!(client.url("/api/cupon"), "https://api.example.com/api/cupon");
        assert_eq!(client.url("api/cupon/3"), "https://api.example.com/api/cupon/3");

        Ok(())
    }

    #[tokio::test]
    async fn get_json_decodes_body() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/empresa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nombre": "Ricotón" })))
            .mount(&server)
            .await;

        let body: Value = client(&server)?.get_json("/api/empresa").await?;

        assert_eq!(body["nombre"], "Ricotón");

        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_unexpected_response() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/cupon/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no existe"))
            .mount(&server)
            .await;

        let result = client(&server)?.delete("/api/cupon/9").await;

        let Err(error) = result else {
            return Err("expected an error".into());
        };

        assert!(error.is_not_found());
        assert!(matches!(
            error,
            ApiError::UnexpectedResponse { ref body, .. } if body == "no existe"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn send_json_posts_body() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/cupon/2"))
            .and(body_json(json!({ "codigo": "X10" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)?
            .send_json(Method::PUT, "/api/cupon/2", &json!({ "codigo": "X10" }))
            .await?;

        Ok(())
    }
}
