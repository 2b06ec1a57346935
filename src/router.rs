//! Fixed route table and request dispatch.
//!
//! Routes are checked in table order and the first match wins. Every
//! non-root route matches as a prefix of the requested path, so `/textual`
//! is served by `/text`. File paths are relative to the base path and point
//! at sibling directories of it.

use crate::http::request::{parse_legacy_request_line, parse_request_line};
use crate::http::response::{Response, ResponseBuilder, StatusCode, StatusLine};

/// Inline HTML pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    UnsupportedMethod,
    NotFound,
}

impl Page {
    pub fn body(&self) -> &'static str {
        match self {
            Page::Index => "<h1>Hello from index.html page!</h1>",
            Page::UnsupportedMethod => "<h1>Unexpected request type</h1>",
            Page::NotFound => "<h1>Welcome to the other side... Side of 404...</h1>",
        }
    }

    pub fn status(&self, legacy: bool) -> StatusLine {
        match (self, legacy) {
            (Page::Index, _) => StatusLine::Standard(StatusCode::Ok),
            (_, true) => StatusLine::LegacyNotFound,
            (Page::UnsupportedMethod, false) => StatusLine::Standard(StatusCode::MethodNotAllowed),
            (Page::NotFound, false) => StatusLine::Standard(StatusCode::NotFound),
        }
    }

    /// The full inline response. Legacy clients also received the C string
    /// terminator after the body.
    pub fn response(&self, legacy: bool) -> Response {
        let mut body = self.body().as_bytes().to_vec();
        if legacy {
            body.push(0);
        }

        ResponseBuilder::new(self.status(legacy))
            .header("Content-Type", "text/html")
            .body(body)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The path token must equal the route.
    Exact,
    /// The path token must start with the route.
    Prefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Static(Page),
    Stream {
        content_type: &'static str,
        relative_path: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub matching: Match,
    pub action: Action,
}

impl Route {
    pub fn matches(&self, path: &[u8]) -> bool {
        let route = self.path.as_bytes();
        match self.matching {
            Match::Exact => path == route,
            Match::Prefix => path.starts_with(route),
        }
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        matching: Match::Exact,
        action: Action::Static(Page::Index),
    },
    Route {
        path: "/index.html",
        matching: Match::Prefix,
        action: Action::Static(Page::Index),
    },
    Route {
        path: "/text",
        matching: Match::Prefix,
        action: Action::Stream {
            content_type: "text/plain",
            relative_path: "../text/readme.txt",
        },
    },
    Route {
        path: "/img",
        matching: Match::Prefix,
        action: Action::Stream {
            content_type: "image/png",
            relative_path: "../img/grassland_preview.png",
        },
    },
    Route {
        path: "/book",
        matching: Match::Prefix,
        action: Action::Stream {
            content_type: "application/pdf",
            relative_path: "../book/Demidovich-Sb_Zad_po_Matanu.pdf",
        },
    },
    Route {
        path: "/json",
        matching: Match::Prefix,
        action: Action::Stream {
            content_type: "application/json",
            relative_path: "../json/data.json",
        },
    },
];

/// Decides what to send for the bytes received on a connection.
///
/// Anything that does not tokenize, or uses a method other than `GET`, gets
/// the unsupported-method page without the path being looked at. In legacy
/// mode only the first three bytes are compared against `GET`.
pub fn route(buf: &[u8], legacy: bool) -> Action {
    let parsed = if legacy {
        parse_legacy_request_line(buf)
    } else {
        parse_request_line(buf)
    };
    let line = match parsed {
        Ok(line) => line,
        Err(_) => return Action::Static(Page::UnsupportedMethod),
    };

    if !line.method().is_some_and(|m| m.is_supported()) {
        return Action::Static(Page::UnsupportedMethod);
    }

    match ROUTES.iter().find(|r| r.matches(line.path)) {
        Some(r) => r.action,
        None => {
            tracing::debug!(path = %line.path_lossy(), "no route matched");
            Action::Static(Page::NotFound)
        }
    }
}
