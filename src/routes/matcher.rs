//! Path matching for the route table.

use std::fmt;

use regex::Regex;

/// Parameters pulled out of a matched path, attached to the request as an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    id: Option<String>,
}

impl RouteParams {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub enum PathMatcher {
    /// Whole path must equal this string.
    Exact(&'static str),
    /// Whole path must match; the first capture group, if any, becomes the id.
    Pattern(Regex),
}

impl PathMatcher {
    pub fn exact(path: &'static str) -> Self {
        PathMatcher::Exact(path)
    }

    /// Compiles `pattern` anchored at both ends.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let anchored = format!("^(?:{pattern})$");
        Regex::new(&anchored).map(PathMatcher::Pattern)
    }

    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        match self {
            PathMatcher::Exact(expected) => (path == *expected).then(RouteParams::default),
            PathMatcher::Pattern(re) => {
                let caps = re.captures(path)?;
                Some(match caps.get(1) {
                    Some(id) => RouteParams::with_id(id.as_str()),
                    None => RouteParams::default(),
                })
            }
        }
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMatcher::Exact(path) => f.write_str(path),
            PathMatcher::Pattern(re) => f.write_str(re.as_str()),
        }
    }
}
