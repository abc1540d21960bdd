//! HTTP method specification parsing.

use super::entry::MethodSpec;
use super::error::ConfigError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Method tokens accepted in endpoint configuration.
pub const ALLOWED_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"];

/// Canonical HTTP method token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigError;

    /// Case-insensitive parse into a canonical token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(ConfigError::InvalidMethod(Some(other.to_string()))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty set of canonical methods a rule answers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MethodSet(BTreeSet<HttpMethod>);

impl MethodSet {
    /// Validate a configured method spec (single token or list) into a set.
    ///
    /// Tokens are upper-cased before validation, duplicates collapse. An absent
    /// or empty spec is rejected just like an unknown token.
    pub fn normalize(spec: Option<&MethodSpec>) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = match spec {
            Some(MethodSpec::One(m)) => vec![m.as_str()],
            Some(MethodSpec::Many(list)) => list.iter().map(String::as_str).collect(),
            None => Vec::new(),
        };

        if tokens.is_empty() || tokens.iter().all(|t| t.is_empty()) {
            return Err(ConfigError::InvalidMethod(None));
        }

        let methods = tokens
            .into_iter()
            .map(HttpMethod::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(MethodSet(methods))
    }

    /// Whether the request method token is in this set.
    ///
    /// Request methods are matched exactly; only configuration is case-folded.
    pub fn contains_token(&self, method: &str) -> bool {
        self.0.iter().any(|m| m.as_str() == method)
    }

    pub fn iter(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(HttpMethod::as_str).collect();
        f.write_str(&joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(m: &str) -> MethodSpec {
        MethodSpec::One(m.to_string())
    }

    fn many(ms: &[&str]) -> MethodSpec {
        MethodSpec::Many(ms.iter().map(|m| m.to_string()).collect())
    }

    #[test]
    fn test_single_method_is_uppercased() {
        let set = MethodSet::normalize(Some(&one("get"))).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![HttpMethod::Get]);
    }

    #[test]
    fn test_method_list() {
        let set = MethodSet::normalize(Some(&many(&["get", "post"]))).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains_token("GET"));
        assert!(set.contains_token("POST"));
        assert!(!set.contains_token("PUT"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = MethodSet::normalize(Some(&many(&["Get", "GET", "get"]))).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_string(), "GET");
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = MethodSet::normalize(Some(&one("FOO"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMethod(Some(ref m)) if m == "FOO"));

        let err = MethodSet::normalize(Some(&many(&["get", "fetch"]))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMethod(Some(ref m)) if m == "FETCH"));
    }

    #[test]
    fn test_missing_or_empty_method_rejected() {
        assert!(matches!(
            MethodSet::normalize(None),
            Err(ConfigError::InvalidMethod(None))
        ));
        assert!(matches!(
            MethodSet::normalize(Some(&one(""))),
            Err(ConfigError::InvalidMethod(None))
        ));
        assert!(matches!(
            MethodSet::normalize(Some(&many(&[]))),
            Err(ConfigError::InvalidMethod(None))
        ));
    }

    #[test]
    fn test_request_method_matching_is_exact() {
        let set = MethodSet::normalize(Some(&one("post"))).unwrap();
        assert!(set.contains_token("POST"));
        assert!(!set.contains_token("post"));
    }
}
