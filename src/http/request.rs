/// Capacity of the buffer a request is received into. Only one read is made,
/// so anything past this is never looked at.
pub const REQUEST_BUFFER_SIZE: usize = 256;

/// HTTP request methods.
///
/// Only `GET` is served; every other method (or an unrecognised token) gets
/// the unsupported-method page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses a method token. Matching is exact and case-sensitive.
    ///
    /// ```
    /// # use chunkserve::http::request::Method;
    /// assert_eq!(Method::from_bytes(b"GET"), Some(Method::GET));
    /// assert_eq!(Method::from_bytes(b"get"), None);
    /// assert_eq!(Method::from_bytes(b"GETX"), None);
    /// ```
    pub fn from_bytes(token: &[u8]) -> Option<Self> {
        match token {
            b"GET" => Some(Method::GET),
            b"POST" => Some(Method::POST),
            b"PUT" => Some(Method::PUT),
            b"DELETE" => Some(Method::DELETE),
            b"HEAD" => Some(Method::HEAD),
            b"OPTIONS" => Some(Method::OPTIONS),
            b"PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        *self == Method::GET
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was received.
    Empty,
    /// The method token is not followed by a space.
    MissingPath,
}

/// The two tokens of a request line that are ever consulted, borrowed from
/// the filled part of the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a [u8],
    pub path: &'a [u8],
}

impl RequestLine<'_> {
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.method)
    }

    /// Path token for logging.
    pub fn path_lossy(&self) -> String {
        String::from_utf8_lossy(self.path).into_owned()
    }
}

/// Splits `buf` into method and path tokens.
///
/// The method runs up to the first space. The path starts right after it and
/// ends at the next space, CR, LF or the end of `buf`; anything that follows
/// is ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine<'_>, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let method_end = buf
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MissingPath)?;
    let method = &buf[..method_end];

    Ok(RequestLine {
        method,
        path: path_token(&buf[method_end + 1..]),
    })
}

/// Legacy request-line reading: the method is the first three bytes and the
/// path token starts at byte four, whatever sits in between. `GETX /text`
/// therefore reads as method `GET`, path `/text`.
pub fn parse_legacy_request_line(buf: &[u8]) -> Result<RequestLine<'_>, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }
    if buf.len() < 3 {
        return Err(ParseError::MissingPath);
    }

    Ok(RequestLine {
        method: &buf[..3],
        path: path_token(buf.get(4..).unwrap_or_default()),
    })
}

/// Leading bytes of `rest` up to the next space, CR or LF.
fn path_token(rest: &[u8]) -> &[u8] {
    let end = rest
        .iter()
        .position(|&b| matches!(b, b' ' | b'\r' | b'\n'))
        .unwrap_or(rest.len());
    &rest[..end]
}
