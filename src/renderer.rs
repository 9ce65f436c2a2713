//! Boundary with the page renderer.
//!
//! Browser automation lives outside this crate. A renderer hands back one
//! [`RenderedPage`] per URL; this module turns that into an audit outcome and
//! supplies the scroll-until-stable procedure a driver runs before sampling
//! styles.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AuditConfig;
use crate::descriptor::RawElement;
use crate::error::{AuditError, Result};
use crate::report::{AuditFailure, AuditOutcome, AuditReport};

/// What a renderer extracted from one loaded page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderedPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Element descriptors in DOM traversal order.
    pub elements: Vec<RawElement>,
    /// Path of the annotated full-page screenshot, if one was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

pub trait PageRenderer {
    /// Load `url` and extract every element's computed style and geometry.
    fn render(&mut self, url: &str) -> Result<RenderedPage>;
}

/// Replays a renderer dump from disk. The dump is either a full
/// [`RenderedPage`] object or a bare array of element descriptors.
pub struct SnapshotRenderer {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    Page(RenderedPage),
    Elements(Vec<RawElement>),
}

impl SnapshotRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageRenderer for SnapshotRenderer {
    fn render(&mut self, url: &str) -> Result<RenderedPage> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| AuditError::Renderer(format!("{}: {e}", self.path.display())))?;
        let dump: Dump = serde_json::from_str(&raw)
            .map_err(|e| AuditError::Renderer(format!("{}: {e}", self.path.display())))?;
        let mut page = match dump {
            Dump::Page(page) => page,
            Dump::Elements(elements) => RenderedPage {
                elements,
                ..Default::default()
            },
        };
        if page.url.is_none() {
            page.url = Some(url.to_string());
        }
        Ok(page)
    }
}

/// Render and audit one URL.
///
/// A renderer failure becomes an [`AuditFailure`], never an empty success.
pub fn audit_with<R: PageRenderer + ?Sized>(renderer: &mut R, url: &str, config: &AuditConfig) -> AuditOutcome {
    match renderer.render(url) {
        Ok(page) => {
            let summary = crate::engine::audit_page(&page, config);
            AuditOutcome::Completed(AuditReport::from_summary(&summary, page.screenshot))
        }
        Err(err) => {
            warn!(url, error = %err, "audit could not complete");
            AuditOutcome::Failed(AuditFailure::new(err.to_string()))
        }
    }
}

/// The scrolling surface of a live page.
pub trait ScrollSurface {
    fn scroll_height(&mut self) -> Result<f64>;
    fn scroll_to(&mut self, y: f64) -> Result<()>;
    fn pause(&mut self, delay: Duration);
}

#[derive(Debug, Clone)]
pub struct SettlePolicy {
    /// Wait after each scroll for lazy content to arrive.
    pub settle_delay: Duration,
    /// Wait after returning to the top.
    pub return_delay: Duration,
    /// Scroll rounds before giving up on a page that keeps growing.
    pub max_rounds: usize,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1200),
            return_delay: Duration::from_millis(1000),
            max_rounds: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleOutcome {
    pub rounds: usize,
    /// False when `max_rounds` ran out before the height stopped changing.
    pub converged: bool,
    pub final_height: f64,
}

/// Scroll to the bottom until the document height stops changing between
/// two samples, then return to the top.
pub fn settle_lazy_content<S: ScrollSurface + ?Sized>(surface: &mut S, policy: &SettlePolicy) -> Result<SettleOutcome> {
    let mut last_height = 0.0;
    let mut rounds = 0;

    let converged = loop {
        let height = surface.scroll_height()?;
        if height == last_height {
            break true;
        }
        last_height = height;
        if rounds == policy.max_rounds {
            warn!(rounds, height, "page height still changing, auditing as is");
            break false;
        }
        surface.scroll_to(height)?;
        surface.pause(policy.settle_delay);
        rounds += 1;
        debug!(round = rounds, height, "scrolled to bottom");
    };

    surface.scroll_to(0.0)?;
    surface.pause(policy.return_delay);

    Ok(SettleOutcome {
        rounds,
        converged,
        final_height: last_height,
    })
}
