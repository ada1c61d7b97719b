//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Url;

use crate::{Body, Headers, HttpRequest, HttpResponse, Method, Transport, TransportError};

/// A [`Transport`] that talks to the backend over HTTP(S).
///
/// Cloning is cheap: `reqwest::Client` is reference-counted internally
/// and shares one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport for the given base URL, with the HTTP client's
    /// default (unbounded) timeouts.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a transport with an optional whole-request timeout.
    pub fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let base = Url::parse(base_url).map_err(|e| {
            TransportError::InvalidUrl(format!("{base_url}: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(format!(
                "{base_url}: not a base URL"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Network)?;

        tracing::debug!(base = %base, ?timeout, "HTTP transport ready");
        Ok(Self { base, client })
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends `path` to the base URL, keeping any path prefix the base
    /// already has (`https://host/api` + `/teams` → `https://host/api/teams`).
    fn url_for(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Url, TransportError> {
        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| TransportError::InvalidUrl(format!("{joined}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                query.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_header_map(
    headers: &Headers,
    skip_content_type: bool,
) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(
            |e| TransportError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            },
        )?;
        if skip_content_type && header_name == CONTENT_TYPE {
            continue;
        }
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            query,
            headers,
            body,
        } = request;

        let url = self.url_for(&path, &query)?;
        // reqwest writes its own multipart Content-Type with the boundary.
        let is_multipart = matches!(body, Body::File { .. });
        let header_map = to_header_map(&headers, is_multipart)?;

        let mut builder = self
            .client
            .request(to_reqwest_method(method), url)
            .headers(header_map);

        builder = match body {
            Body::Empty => builder,
            Body::Bytes { data, .. } => builder.body(data),
            Body::File {
                field,
                file_name,
                content_type,
                data,
            } => {
                let part = Part::bytes(data)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::InvalidHeader {
                        name: CONTENT_TYPE.to_string(),
                        reason: e.to_string(),
                    })?;
                builder.multipart(Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(TransportError::Network)?;
        let status = response.status().as_u16();

        let mut response_headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.append(name.as_str(), value);
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(TransportError::Body)?
            .to_vec();

        tracing::debug!(%method, %path, status, len = body.len(), "request completed");

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}
