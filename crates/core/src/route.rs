//! Client route table.
//!
//! Everything under `/start` is the authenticated area; `/` and `/register`
//! are the unauthenticated entry points.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    #[error("path must start with '/': {0}")]
    Relative(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPath {
    Login,
    Register,
    Profile,
    Topics,
    Progress,
    NotFound,
}

impl AppPath {
    /// Where unauthenticated navigation ends up.
    pub const ENTRY: AppPath = AppPath::Login;

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppPath::Login => "/",
            AppPath::Register => "/register",
            AppPath::Profile => "/start",
            AppPath::Topics => "/start/topics",
            AppPath::Progress => "/start/progress",
            AppPath::NotFound => "/404",
        }
    }

    /// Whether reaching this path requires a session token.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, AppPath::Profile | AppPath::Topics | AppPath::Progress)
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppPath {
    type Err = PathError;

    /// Query strings and fragments are ignored; a trailing slash is tolerated.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if !raw.starts_with('/') {
            return Err(PathError::Relative(raw.to_string()));
        }
        let path = raw
            .split(['?', '#'])
            .next()
            .unwrap_or(raw)
            .trim_end_matches('/');

        Ok(match path {
            "" => AppPath::Login,
            "/register" => AppPath::Register,
            "/start" => AppPath::Profile,
            "/start/topics" => AppPath::Topics,
            "/start/progress" => AppPath::Progress,
            _ => AppPath::NotFound,
        })
    }
}
