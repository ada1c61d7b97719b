//! Request and response descriptors.
//!
//! These are deliberately plain data: a request is just method, path,
//! query, headers and body. Keeping them independent of any HTTP client
//! lets the authorizer and tests inspect and rewrite requests without a
//! network.

use std::fmt;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// The HTTP verbs the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// An ordered header list with case-insensitive names.
///
/// HTTP header names are case-insensitive, so `set("authorization", ..)`
/// replaces an existing `Authorization` entry instead of adding a second
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any existing entries for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }

    /// Adds an entry without touching existing ones (repeated headers
    /// such as `Set-Cookie`).
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// A request body.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// No body (GET, DELETE).
    #[default]
    Empty,

    /// Already-encoded bytes with their content type.
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },

    /// A `multipart/form-data` body with one file part.
    File {
        field: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

/// Bodies can be large (photos), so `Debug` prints sizes, not bytes.
impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes { content_type, data } => f
                .debug_struct("Bytes")
                .field("content_type", content_type)
                .field("len", &data.len())
                .finish(),
            Self::File {
                field,
                file_name,
                content_type,
                data,
            } => f
                .debug_struct("File")
                .field("field", field)
                .field("file_name", file_name)
                .field("content_type", content_type)
                .field("len", &data.len())
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpRequest
// ---------------------------------------------------------------------------

/// An outgoing request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/admin/teams/3`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Headers,
    pub body: Body,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    pub fn query(
        mut self,
        name: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a header, replacing any existing value.
    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Attaches an encoded body. Also sets `Content-Type`.
    pub fn body(mut self, content_type: &str, data: Vec<u8>) -> Self {
        self.headers.set("Content-Type", content_type);
        self.body = Body::Bytes {
            content_type: content_type.to_string(),
            data,
        };
        self
    }

    /// Attaches a single-file multipart body.
    ///
    /// `Content-Type` is left to the transport, which has to add the
    /// multipart boundary.
    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.body = Body::File {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        };
        self
    }
}

// ---------------------------------------------------------------------------
// HttpResponse
// ---------------------------------------------------------------------------

/// A response with a fully-read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` for 401 and 403, the statuses the backend uses for missing
    /// or rejected credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// The body as text, lossily decoded. Meant for logs and error
    /// messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
