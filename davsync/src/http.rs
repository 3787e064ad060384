// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `reqwest` transport with authentication and `ETag` handling.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::config::{AuthMethod, DavConfig};
use crate::error::DavError;
use crate::request::{Method, Request};
use crate::response::MultiStatusResponse;
use crate::sandbox::Sandbox;
use crate::transport::{Response, Transport};
use crate::types::{ETag, Href};

/// HTTP transport for `WebDAV` servers.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use davsync::{AuthMethod, DavConfig, HttpTransport, SyncOptions};
///
/// let config = DavConfig {
///     base_url: "https://dav.example.com".to_string(),
///     auth: AuthMethod::Basic {
///         username: "user".to_string(),
///         password: "pass".to_string(),
///     },
///     ..Default::default()
/// };
/// let options = SyncOptions::new(Arc::new(HttpTransport::new(config)?));
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    config: DavConfig,
}

impl HttpTransport {
    /// Creates a new HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DavConfig {
        &self.config
    }

    /// Builds a request with authentication headers.
    fn build_request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Translates a descriptor into a `reqwest` request.
    fn prepare(&self, request: &Request, url: &str) -> Result<RequestBuilder, DavError> {
        let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
            .map_err(|e| DavError::Http(format!("Invalid method: {e}")))?;
        let mut req = self.build_request(method, url);

        match request.method() {
            Method::Put => {
                req = req
                    .header("Content-Type", &self.config.content_type)
                    .body(request.body().unwrap_or_default().to_string());
            }
            Method::Delete => {}
            Method::PropFind => {
                if let Some(depth) = request.depth() {
                    req = req.header("Depth", depth.as_str());
                }
                if let Some(body) = request.xml_body()? {
                    req = req
                        .header("Content-Type", "application/xml; charset=utf-8")
                        .body(body);
                }
            }
        }

        if let Some(etag) = request.etag() {
            req = Self::if_match(req, etag);
        }

        Ok(req)
    }

    /// Executes a request and checks for HTTP errors.
    async fn execute(
        &self,
        req: RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, DavError> {
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::PRECONDITION_FAILED => Err(DavError::PreconditionFailed(
                resp.headers()
                    .get("ETag")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string(),
            )),
            StatusCode::NOT_FOUND => Err(DavError::NotFound(Href::from(url))),
            status if status.is_success() => Ok(resp),
            status => {
                let text = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response".to_string());
                Err(DavError::Http(format!("{status}: {text}")))
            }
        }
    }

    async fn roundtrip(&self, request: &Request, url: &str) -> Result<Response, DavError> {
        let req = self.prepare(request, url)?;
        let resp = self.execute(req, url).await?;

        match request.method() {
            Method::Put | Method::Delete => Ok(Response::Mutated {
                etag: Self::extract_etag(&resp),
            }),
            Method::PropFind => {
                let xml = resp.text().await?;
                let multistatus = MultiStatusResponse::from_xml(&xml)?;
                if request.merge_responses() {
                    Ok(Response::Merged(multistatus.merge()))
                } else {
                    Ok(Response::Entries(multistatus.into_entries()))
                }
            }
        }
    }

    /// Adds If-Match header for conditional updates.
    fn if_match(req: RequestBuilder, etag: &ETag) -> RequestBuilder {
        req.header("If-Match", etag.as_str())
    }

    /// Extracts `ETag` from response headers.
    fn extract_etag(resp: &reqwest::Response) -> Option<ETag> {
        resp.headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .map(|s| ETag::new(s.to_string()))
    }

    /// Builds full URL from href.
    fn full_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), href)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &Request,
        url: &str,
        sandbox: Option<&Sandbox>,
    ) -> Result<Response, DavError> {
        let url = self.full_url(url);
        tracing::debug!(method = %request.method(), url = %url, "sending request");

        match sandbox {
            Some(sandbox) if sandbox.is_aborted() => Err(DavError::Aborted),
            Some(sandbox) => {
                tokio::select! {
                    result = self.roundtrip(request, &url) => result,
                    () = sandbox.aborted() => {
                        tracing::debug!(url = %url, sandbox = %sandbox.id(), "request aborted");
                        Err(DavError::Aborted)
                    }
                }
            }
            None => self.roundtrip(request, &url).await,
        }
    }
}
