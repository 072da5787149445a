//! Ports of Mastodon's status and oEmbed sanitizer configurations
//!
//! These reproduce the strict and oEmbed allow-lists as ammonia builder
//! configuration: explicit element and attribute lists, an extended link
//! scheme list, forced link attributes, and token-level class filtering.

use std::borrow::Cow;
use std::collections::HashSet;

use ammonia::Builder;
use regex::Regex;

use crate::config::EngineKind;
use crate::error::Result;
use crate::sanitizer::SanitizerEngine;

/// Link schemes the strict policy accepts, beyond plain http(s)
const LINK_SCHEMES: &[&str] = &[
    "http", "https", "dat", "dweb", "ipfs", "ipns", "ssb", "gopher", "xmpp", "magnet", "gemini",
];

/// Class tokens kept verbatim by the strict policy
const SEMANTIC_CLASSES: &[&str] = &["mention", "hashtag", "ellipsis", "invisible"];

/// Strict status sanitizer: the policy Mastodon applies to remote statuses
pub struct StrictEngine {
    builder: Builder<'static>,
}

impl StrictEngine {
    pub fn new() -> Self {
        // Microformats class prefixes (h-card, p-name, u-url, dt-*, e-*)
        let microformat = Regex::new(r"^(h|p|u|dt|e)-").expect("static regex");

        let mut builder = Builder::default();
        builder
            .tags(
                [
                    "p", "br", "span", "a", "del", "pre", "blockquote", "code", "b", "strong",
                    "u", "i", "em", "ul", "ol", "li",
                ]
                .into_iter()
                .collect(),
            )
            .tag_attributes(
                [
                    ("a", ["href", "class", "translate"].into_iter().collect()),
                    ("span", ["class", "translate"].into_iter().collect()),
                    ("ol", ["start", "reversed"].into_iter().collect()),
                    ("li", ["value"].into_iter().collect()),
                ]
                .into_iter()
                .collect(),
            )
            .generic_attributes(HashSet::new())
            .url_schemes(LINK_SCHEMES.iter().copied().collect())
            .link_rel(Some("nofollow noopener noreferrer"))
            .set_tag_attribute_value("a", "target", "_blank")
            .attribute_filter(move |_element, attribute, value| match attribute {
                "class" => {
                    let kept: Vec<&str> = value
                        .split(['\t', '\n', '\x0c', '\r', ' '])
                        .filter(|token| {
                            microformat.is_match(token) || SEMANTIC_CLASSES.contains(token)
                        })
                        .collect();
                    Some(Cow::Owned(kept.join(" ")))
                }
                // `translate` survives only as an explicit opt-out
                "translate" => (value == "no").then(|| Cow::Borrowed(value)),
                _ => Some(Cow::Borrowed(value)),
            });
        Self { builder }
    }
}

impl Default for StrictEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SanitizerEngine for StrictEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::MastodonStrict
    }

    fn description(&self) -> &'static str {
        "ammonia port of Mastodon's strict status sanitizer configuration"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(self.builder.clean(input).to_string())
    }
}

/// oEmbed sanitizer: the policy Mastodon applies to preview-card embeds
pub struct OembedEngine {
    builder: Builder<'static>,
}

impl OembedEngine {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .tags(
                ["audio", "embed", "iframe", "source", "video"]
                    .into_iter()
                    .collect(),
            )
            .tag_attributes(
                [
                    ("audio", ["controls"].into_iter().collect()),
                    ("embed", ["height", "src", "type", "width"].into_iter().collect()),
                    (
                        "iframe",
                        [
                            "allowfullscreen",
                            "frameborder",
                            "height",
                            "scrolling",
                            "src",
                            "width",
                        ]
                        .into_iter()
                        .collect(),
                    ),
                    ("source", ["src", "type"].into_iter().collect()),
                    (
                        "video",
                        ["controls", "height", "loop", "width"].into_iter().collect(),
                    ),
                ]
                .into_iter()
                .collect(),
            )
            .generic_attributes(HashSet::new())
            .url_schemes(["http", "https"].into_iter().collect())
            .link_rel(None)
            .set_tag_attribute_value(
                "iframe",
                "sandbox",
                "allow-scripts allow-same-origin allow-popups allow-popups-to-escape-sandbox allow-forms",
            );
        Self { builder }
    }
}

impl Default for OembedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SanitizerEngine for OembedEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::MastodonOembed
    }

    fn description(&self) -> &'static str {
        "ammonia port of Mastodon's oEmbed sanitizer configuration"
    }

    fn sanitize(&self, input: &str) -> Result<String> {
        Ok(self.builder.clean(input).to_string())
    }
}
