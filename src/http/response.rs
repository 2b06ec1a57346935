/// HTTP status codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use chunkserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

/// The status line as it goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    Standard(StatusCode),
    /// Legacy clients saw every error page as `404 OK`.
    LegacyNotFound,
}

impl StatusLine {
    pub fn code(&self) -> u16 {
        match self {
            StatusLine::Standard(status) => status.as_u16(),
            StatusLine::LegacyNotFound => 404,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusLine::Standard(status) => status.reason_phrase(),
            StatusLine::LegacyNotFound => StatusCode::Ok.reason_phrase(),
        }
    }
}

/// A complete response with an inline body.
///
/// Headers keep insertion order so the serialized form is stable. No
/// `Content-Length` is added: the connection is closed after every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusLine,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Builder for constructing responses in a fluent style.
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusLine::Standard(StatusCode::Ok))
///     .header("Content-Type", "text/html")
///     .body(b"<h1>hi</h1>".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusLine,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusLine) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header. Headers are written in the order they were added.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Status line, headers, blank line and body in one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.body.len());

        buf.extend_from_slice(
            format!(
                "{} {} {}\r\n",
                super::HTTP_VERSION,
                self.status.code(),
                self.status.reason_phrase()
            )
            .as_bytes(),
        );

        for (k, v) in &self.headers {
            buf.extend_from_slice(k.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(v.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);
        buf
    }
}
