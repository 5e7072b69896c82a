mod builder;

use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use url::Url;

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    /// URL after redirects; differs from the requested one when the
    /// platform bounced us somewhere else (e.g. back to the sign-in page).
    pub final_url: String,
    pub content: String,
}

/// Cookie-holding HTTP session against a single platform instance.
pub struct Client {
    inner: RquestClient,
    base_url: String,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Joins `path` onto the base URL. Absolute URLs pass through.
    pub fn resolve(&self, path: &str) -> Result<String> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid base URL: {}", e)))?;

        let full_url = base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path: {}", e)))?;

        Ok(full_url.to_string())
    }

    pub async fn get(&self, path: &str) -> Result<ClientResponse> {
        let url = self.resolve(path)?;
        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::into_response(response).await
    }

    /// Submits an URL-encoded form and follows redirects.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<ClientResponse> {
        let url = self.resolve(path)?;
        let response = self
            .inner
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Self::into_response(response).await
    }

    async fn into_response(response: rquest::Response) -> Result<ClientResponse> {
        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let final_url = response.url().to_string();
        let content = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                message: String::new(),
            }
            .into());
        }

        Ok(ClientResponse {
            status,
            final_url,
            content,
        })
    }
}
