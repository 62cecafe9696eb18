//! Map-link grammar
//!
//! Links are checked against a fixed list of named rules, in order:
//!
//! | rule       | shape                                          |
//! |------------|------------------------------------------------|
//! | `at-view`  | `…/@<lat>,<lng>,<zoom>` in the path            |
//! | `q-param`  | `?q=<lat>,<lng>` (the whole decoded value)     |
//! | `ll-param` | `?ll=<lat>,<lng>`                              |
//! | `q-place`  | `?q=<place text> <lat>,<lng>`                  |
//!
//! The first rule that yields an in-range pair wins. Links on a known
//! shortener domain are never parsed; they need one redirect lookup first.

use netzero_core::models::Coordinates;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

/// Domains whose links carry no coordinates until expanded
pub const SHORTENER_DOMAINS: [&str; 2] = ["goo.gl", "maps.app.goo.gl"];

/// A named pattern in the link grammar
pub struct GrammarRule {
    pub name: &'static str,
    pub example: &'static str,
    matcher: fn(&Url) -> Option<(Coordinates, Option<String>)>,
}

impl GrammarRule {
    /// Apply this rule alone to a parsed link
    pub fn apply(&self, url: &Url) -> Option<CoordinateMatch> {
        (self.matcher)(url).map(|(coordinates, place)| CoordinateMatch {
            coordinates,
            rule: self.name,
            place,
        })
    }
}

/// The ordered grammar
pub static GRAMMAR: [GrammarRule; 4] = [
    GrammarRule {
        name: "at-view",
        example: "https://www.google.com/maps/place/Dhanbad/@23.7957,86.4304,13z",
        matcher: match_at_view,
    },
    GrammarRule {
        name: "q-param",
        example: "https://maps.google.com/?q=23.7957,86.4304",
        matcher: match_q_param,
    },
    GrammarRule {
        name: "ll-param",
        example: "https://maps.google.com/?ll=23.7957,86.4304",
        matcher: match_ll_param,
    },
    GrammarRule {
        name: "q-place",
        example: "https://maps.google.com/?q=Dhanbad+23.7957,86.4304",
        matcher: match_q_place,
    },
];

static AT_VIEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?\d{1,3}(?:\.\d+)?),(-?\d{1,3}(?:\.\d+)?),\d+(?:\.\d+)?[a-z]?")
        .expect("at-view pattern is valid")
});

static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)\s*$")
        .expect("coordinate pair pattern is valid")
});

static PLACE_THEN_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)[\s,]*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)\s*$")
        .expect("place pattern is valid")
});

/// Coordinates found in a link, tagged with the rule that found them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateMatch {
    pub coordinates: Coordinates,
    pub rule: &'static str,
    /// Free-text place name, when the link carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Result of parsing a link locally
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Found(CoordinateMatch),
    /// Shortened link; expand it once and parse again
    NeedsExpansion,
    NotFound,
}

/// Parse a pasted link without touching the network
pub fn extract_coordinates(link: &str) -> Extraction {
    let Some(url) = parse_link(link) else {
        return Extraction::NotFound;
    };

    if is_shortener(&url) {
        return Extraction::NeedsExpansion;
    }

    GRAMMAR
        .iter()
        .find_map(|rule| rule.apply(&url))
        .map_or(Extraction::NotFound, Extraction::Found)
}

/// Whether a link is on a known shortener domain
pub fn is_shortened_link(link: &str) -> bool {
    parse_link(link).is_some_and(|url| is_shortener(&url))
}

/// Parse a link, accepting pastes that dropped the scheme
fn parse_link(link: &str) -> Option<Url> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    match Url::parse(link) {
        Ok(url) if url.has_host() => Some(url),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{link}"))
            .ok()
            .filter(Url::has_host),
        Err(_) => None,
    }
}

fn is_shortener(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    SHORTENER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn match_at_view(url: &Url) -> Option<(Coordinates, Option<String>)> {
    AT_VIEW.captures_iter(url.path()).find_map(|caps| {
        Coordinates::parse(&caps[1], &caps[2]).map(|coordinates| (coordinates, None))
    })
}

fn match_pair_param(url: &Url, key: &str) -> Option<(Coordinates, Option<String>)> {
    let value = query_value(url, key)?;
    let caps = COORDINATE_PAIR.captures(&value)?;
    Coordinates::parse(&caps[1], &caps[2]).map(|coordinates| (coordinates, None))
}

fn match_q_param(url: &Url) -> Option<(Coordinates, Option<String>)> {
    match_pair_param(url, "q")
}

fn match_ll_param(url: &Url) -> Option<(Coordinates, Option<String>)> {
    match_pair_param(url, "ll")
}

fn match_q_place(url: &Url) -> Option<(Coordinates, Option<String>)> {
    let value = query_value(url, "q")?;
    let caps = PLACE_THEN_PAIR.captures(&value)?;

    let place = caps[1].trim().trim_end_matches(',').trim();
    if !place.chars().any(char::is_alphabetic) {
        return None;
    }

    Coordinates::parse(&caps[2], &caps[3]).map(|coordinates| (coordinates, Some(place.to_string())))
}
