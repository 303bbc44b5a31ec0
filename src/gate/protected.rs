use tracing::warn;

use crate::config::GateConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    Rest,
}

/// A route pattern such as `/gallery/:id` or `/settings/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern. Returns `None` if `*` appears anywhere but last.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = split_path(raw).collect();
        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != parts.len() {
                    return None;
                }
                Segment::Rest
            } else if part.starts_with(':') && part.len() > 1 {
                Segment::Param
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }
        Some(RoutePattern {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a bare path (no query string or fragment).
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Param => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(lit) => match parts.next() {
                    Some(part) if part == lit => {}
                    _ => return false,
                },
            }
        }
        parts.next().is_none()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Drops the query string and fragment from a route.
pub fn route_path(route: &str) -> &str {
    let end = route.find(['?', '#']).unwrap_or(route.len());
    &route[..end]
}

/// The set of routes that require a session.
#[derive(Debug, Clone, Default)]
pub struct ProtectedRoutes {
    patterns: Vec<RoutePattern>,
}

impl ProtectedRoutes {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| {
                let parsed = RoutePattern::parse(p.as_ref());
                if parsed.is_none() {
                    warn!("Ignoring invalid protected route pattern '{}'", p.as_ref());
                }
                parsed
            })
            .collect();
        ProtectedRoutes { patterns }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(&config.protected_routes)
    }

    /// Returns the first pattern guarding `route`, if any.
    pub fn guarding(&self, route: &str) -> Option<&RoutePattern> {
        let path = route_path(route);
        self.patterns.iter().find(|p| p.matches(path))
    }

    pub fn is_protected(&self, route: &str) -> bool {
        self.guarding(route).is_some()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(RoutePattern::as_str)
    }
}
