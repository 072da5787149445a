//! Builtin ammonia-backed sanitization policies
//!
//! Counterparts of the stock library policies the original demo servers
//! exposed: the default allow-list, a tight tag allow-list, a UGC link
//! policy, full entity escaping, and full tag stripping.

use std::collections::HashSet;

use ammonia::Builder;

use crate::config::EngineKind;
use crate::error::Result;
use crate::sanitizer::SanitizerEngine;

/// Stock ammonia allow-list, no customization
pub struct DefaultEngine;

impl SanitizerEngine for DefaultEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Default
    }

    fn description(&self) -> &'static str {
        "ammonia::clean with the library's default allow-list"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(ammonia::clean(input))
    }
}

/// Tight allow-list: only `a[href]`, `img[src,alt]` and `strong`
pub struct RestrictedEngine {
    builder: Builder<'static>,
}

impl RestrictedEngine {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .tags(["a", "img", "strong"].into_iter().collect())
            .tag_attributes(
                [
                    ("a", ["href"].into_iter().collect()),
                    ("img", ["src", "alt"].into_iter().collect()),
                ]
                .into_iter()
                .collect(),
            )
            .generic_attributes(HashSet::new())
            .link_rel(None);
        Self { builder }
    }
}

impl Default for RestrictedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SanitizerEngine for RestrictedEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Restricted
    }

    fn description(&self) -> &'static str {
        "ammonia allowing only a[href], img[src,alt] and strong"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(self.builder.clean(input).to_string())
    }
}

/// User-generated-content policy: stock tags, http/https/mailto URLs only,
/// forced `rel="nofollow"` on links
pub struct UgcEngine {
    builder: Builder<'static>,
}

impl UgcEngine {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .url_schemes(["http", "https", "mailto"].into_iter().collect())
            .link_rel(Some("nofollow"));
        Self { builder }
    }
}

impl Default for UgcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SanitizerEngine for UgcEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Ugc
    }

    fn description(&self) -> &'static str {
        "ammonia with a user-generated-content link policy (nofollow, http/https/mailto)"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(self.builder.clean(input).to_string())
    }
}

/// HTML-entity escape of the whole input, no markup survives
pub struct EscapeEngine;

impl SanitizerEngine for EscapeEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Escape
    }

    fn description(&self) -> &'static str {
        "ammonia::clean_text entity-escaping the whole input"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(ammonia::clean_text(input))
    }
}

/// Remove all markup, keep text content
pub struct StripEngine {
    builder: Builder<'static>,
}

impl StripEngine {
    pub fn new() -> Self {
        let mut builder = Builder::empty();
        builder.link_rel(None);
        Self { builder }
    }
}

impl Default for StripEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SanitizerEngine for StripEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Strip
    }

    fn description(&self) -> &'static str {
        "ammonia::Builder::empty stripping every tag, keeping text"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(self.builder.clean(input).to_string())
    }
}
