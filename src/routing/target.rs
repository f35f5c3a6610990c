//! Target URL resolution for direct mode.
//!
//! `/example.com/a/b?x=1` resolves to domain `example.com` and remainder
//! `/a/b?x=1`, which are joined as `<scheme>://example.com/a/b?x=1`.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    /// Order in which direct mode tries schemes.
    pub const FALLBACK_ORDER: [Scheme; 2] = [Scheme::Https, Scheme::Http];

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("Missing target domain in path; expected /<domain>[/<path>]")]
    MissingDomain,
}

/// A direct-mode target, independent of scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectTarget {
    domain: String,
    remainder: String,
}

impl DirectTarget {
    /// Split an inbound path and query into domain and remainder.
    pub fn parse(path: &str, query: Option<&str>) -> Result<Self, TargetError> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (domain, rest) = match trimmed.find('/') {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };

        if domain.is_empty() {
            return Err(TargetError::MissingDomain);
        }

        let mut remainder = rest.to_string();
        if let Some(query) = query {
            remainder.push('?');
            remainder.push_str(query);
        }

        Ok(Self {
            domain: domain.to_string(),
            remainder,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Path and query after the domain, including the leading `/` if any.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Fully qualified URL for the given scheme.
    pub fn url(&self, scheme: Scheme) -> String {
        format!("{}://{}{}", scheme, self.domain, self.remainder)
    }
}
