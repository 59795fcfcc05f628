//! HTTP implementation of the Product API.

use serde_json::json;

use shopledger_catalog::SubmissionPayload;

use crate::api::{Category, ProductApi};
use crate::error::ClientError;

/// Per-tenant request context. The backend routes tenants by subdomain
/// and expects a bearer token plus a CSRF token on every call.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub subdomain: String,
    pub base_domain: String,
    pub token: String,
    pub csrf_token: String,
}

impl TenantContext {
    fn url(&self, path: &str) -> String {
        format!("http://{}.{}/api/{}", self.subdomain, self.base_domain, path)
    }
}

/// Product API client over HTTP.
pub struct HttpProductApi {
    client: reqwest::Client,
    context: TenantContext,
}

impl HttpProductApi {
    pub fn new(context: TenantContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            context,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.context.url(path))
            .bearer_auth(&self.context.token)
            .header("X-CSRFToken", &self.context.csrf_token)
    }
}

/// Turn a non-2xx response into a typed error, pulling the backend's
/// `{"detail": ...}` message out when there is one.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api { status, detail }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::Http(e.to_string()))?;
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response)
}

#[async_trait::async_trait]
impl ProductApi for HttpProductApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = send(self.request(reqwest::Method::GET, "categories/")).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let request = self
            .request(reqwest::Method::POST, "categories/")
            .json(&json!({ "name": name }));
        let response = send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn create_product(&self, payload: &SubmissionPayload) -> Result<(), ClientError> {
        let request = self
            .request(reqwest::Method::POST, "products/")
            .json(payload);
        send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_tenant_scoped_by_subdomain() {
        let context = TenantContext {
            subdomain: "acme".into(),
            base_domain: "shopledger.test".into(),
            token: "t".into(),
            csrf_token: "c".into(),
        };
        assert_eq!(
            context.url("products/"),
            "http://acme.shopledger.test/api/products/"
        );
    }
}
