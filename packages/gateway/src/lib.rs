//! HTTP client for the template store REST API
//!
//! ```text
//! GET    /api/templates        list
//! POST   /api/templates        create  {name, components}
//! PATCH  /api/templates/{id}   update  {name?, components?}
//! DELETE /api/templates/{id}   delete
//! ```

use blockmail_editor::{NewTemplate, Template, TemplateGateway, TemplatePatch};
use blockmail_registry::ComponentInstance;
use reqwest::{Client, Response, Url};

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Invalid store URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl GatewayError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            GatewayError::Http(err) => err.status().map(|s| s.as_u16()),
            GatewayError::InvalidUrl { .. } => None,
        }
    }
}

/// Template store reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a client for the store at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let client = Client::builder().build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        let invalid = |message: String| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            message,
        };
        let url = Url::parse(base_url.trim_end_matches('/')).map_err(|err| invalid(err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn templates_url(&self) -> Url {
        self.endpoint(None)
    }

    /// The id is one percent-encoded path segment
    fn template_url(&self, id: &str) -> Url {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "templates"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

/// Turn a non-2xx response into [`GatewayError::Api`]
async fn check(resp: Response) -> Result<Response, GatewayError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    tracing::warn!(status, %message, "template store rejected request");
    Err(GatewayError::Api { status, message })
}

impl TemplateGateway for HttpGateway {
    type Error = GatewayError;

    /// GET /api/templates
    async fn list(&self) -> Result<Vec<Template>, GatewayError> {
        let url = self.templates_url();
        tracing::debug!(%url, "listing templates");
        let resp = check(self.client.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// POST /api/templates
    async fn create(
        &self,
        name: &str,
        components: &[ComponentInstance],
    ) -> Result<Template, GatewayError> {
        let url = self.templates_url();
        tracing::debug!(%url, name, components = components.len(), "creating template");
        let body = NewTemplate { name, components };
        let resp = check(self.client.post(url).json(&body).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// PATCH /api/templates/{id}
    async fn update(&self, id: &str, patch: TemplatePatch) -> Result<Template, GatewayError> {
        let url = self.template_url(id);
        tracing::debug!(%url, "updating template");
        let resp = check(self.client.patch(url).json(&patch).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// DELETE /api/templates/{id}
    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.template_url(id);
        tracing::debug!(%url, "deleting template");
        check(self.client.delete(url).send().await?).await?;
        Ok(())
    }
}
