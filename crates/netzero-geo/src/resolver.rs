//! Coordinate resolution with a single redirect expansion

use crate::grammar::{extract_coordinates, CoordinateMatch, Extraction};
use async_trait::async_trait;
use netzero_core::{NetZeroError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Port for following one redirect hop of a shortened link
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Return the link the shortened one points to
    async fn expand(&self, link: &str) -> Result<String>;
}

/// Resolves pasted map links to coordinates
#[derive(Clone)]
pub struct CoordinateResolver {
    redirect: Arc<dyn RedirectResolver>,
    timeout: Duration,
}

impl CoordinateResolver {
    pub fn new(redirect: Arc<dyn RedirectResolver>, timeout: Duration) -> Self {
        Self { redirect, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a link, expanding it at most once
    ///
    /// A shortened link that still doesn't parse after one expansion is
    /// reported as not recognized; redirects are never chained.
    pub async fn resolve(&self, link: &str) -> Result<CoordinateMatch> {
        match extract_coordinates(link) {
            Extraction::Found(found) => {
                tracing::debug!(rule = found.rule, "Coordinates extracted locally");
                Ok(found)
            }
            Extraction::NotFound => Err(NetZeroError::LinkNotRecognized {
                url: link.to_string(),
            }),
            Extraction::NeedsExpansion => {
                let expanded = self.expand_once(link).await?;
                tracing::info!(link = %link, expanded = %expanded, "Expanded shortened link");

                match extract_coordinates(&expanded) {
                    Extraction::Found(found) => Ok(found),
                    Extraction::NeedsExpansion | Extraction::NotFound => {
                        Err(NetZeroError::LinkNotRecognized { url: expanded })
                    }
                }
            }
        }
    }

    async fn expand_once(&self, link: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.redirect.expand(link)).await {
            Ok(result) => result,
            Err(_) => Err(NetZeroError::ResolverTimeout {
                seconds: self.timeout.as_secs().max(1),
            }),
        }
    }
}
