use std::{fmt, str::FromStr};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    HTTP_0_9,
    HTTP_1_0,
    HTTP_1_1,
    HTTP_2,
    HTTP_3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHttpVersion;

impl fmt::Display for InvalidHttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid HTTP version")
    }
}

impl std::error::Error for InvalidHttpVersion {}

impl FromStr for HttpVersion {
    type Err = InvalidHttpVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "HTTP/0.9" => Self::HTTP_0_9,
            "HTTP/1.0" => Self::HTTP_1_0,
            "HTTP/1.1" => Self::HTTP_1_1,
            "HTTP/2" => Self::HTTP_2,
            "HTTP/3" => Self::HTTP_3,
            _ => return Err(InvalidHttpVersion),
        })
    }
}

impl HttpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HTTP_0_9 => "HTTP/0.9",
            Self::HTTP_1_0 => "HTTP/1.0",
            Self::HTTP_1_1 => "HTTP/1.1",
            Self::HTTP_2 => "HTTP/2",
            Self::HTTP_3 => "HTTP/3",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP status code
/// SPEC: RFC 9110 - 15. Status Codes
/// ABNF: status-code = 3DIGIT
///
/// Only three digit codes can be represented, so there is no "unset" value
/// hiding inside the type; use `Option<StatusCode>` for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatusCode(pub u16);

impl fmt::Display for InvalidStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status code {}", self.0)
    }
}

impl std::error::Error for InvalidStatusCode {}

impl StatusCode {
    pub const CONTINUE: Self = Self(100);
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const ACCEPTED: Self = Self(202);
    pub const NO_CONTENT: Self = Self(204);
    pub const MOVED_PERMANENTLY: Self = Self(301);
    pub const FOUND: Self = Self(302);
    pub const NOT_MODIFIED: Self = Self(304);
    pub const BAD_REQUEST: Self = Self(400);
    pub const UNAUTHORIZED: Self = Self(401);
    pub const FORBIDDEN: Self = Self(403);
    pub const NOT_FOUND: Self = Self(404);
    pub const METHOD_NOT_ALLOWED: Self = Self(405);
    pub const NOT_ACCEPTABLE: Self = Self(406);
    pub const CONFLICT: Self = Self(409);
    pub const UNPROCESSABLE_CONTENT: Self = Self(422);
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    pub const NOT_IMPLEMENTED: Self = Self(501);
    pub const BAD_GATEWAY: Self = Self(502);
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    pub const fn from_u16(code: u16) -> Result<Self, InvalidStatusCode> {
        if code < 100 || code > 999 {
            return Err(InvalidStatusCode(code));
        }
        Ok(Self(code))
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Responses with these codes never carry content
    /// SPEC: RFC 9110 - 6.4.1. Content
    pub const fn forbids_body(&self) -> bool {
        matches!(self.0, 100..=199 | 204 | 304)
    }

    pub const fn canonical_reason(&self) -> Option<&'static str> {
        Some(match self.0 {
            100 => "Continue",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            409 => "Conflict",
            422 => "Unprocessable Content",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => return None,
        })
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::OK
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = InvalidStatusCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_u16(value)
    }
}

impl From<StatusCode> for u16 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
