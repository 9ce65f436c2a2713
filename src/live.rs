//! Re-auditing a page that keeps navigating.
//!
//! Every navigation takes a new [`AuditTicket`] and supersedes all earlier
//! ones. An audit holding a superseded ticket may still finish, but its
//! result is dropped instead of replacing the newer page's. Long-running
//! renderers can poll [`LiveSession::is_current`] to stop early.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::config::AuditConfig;
use crate::renderer::{audit_with, PageRenderer};
use crate::report::AuditOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTicket {
    generation: u64,
    url: String,
}

impl AuditTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveResult {
    pub generation: u64,
    pub url: String,
    pub outcome: AuditOutcome,
}

#[derive(Debug, Default)]
pub struct LiveSession {
    generation: AtomicU64,
    latest: Mutex<Option<LiveResult>>,
}

impl LiveSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation and supersede any audit in flight.
    pub fn navigated(&self, url: &str) -> AuditTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, url, "navigation, earlier audits superseded");
        AuditTicket {
            generation,
            url: url.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &AuditTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Store `outcome` if `ticket` is still the latest navigation.
    /// Returns whether it was stored.
    pub fn publish(&self, ticket: &AuditTicket, outcome: AuditOutcome) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, url = %ticket.url, "discarding superseded audit");
            return false;
        }
        *latest = Some(LiveResult {
            generation: ticket.generation,
            url: ticket.url.clone(),
            outcome,
        });
        true
    }

    pub fn latest(&self) -> Option<LiveResult> {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Audit `url` for a navigation event. Returns the outcome only if no
    /// newer navigation arrived while it ran.
    pub fn audit_navigation<R: PageRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        url: &str,
        config: &AuditConfig,
    ) -> Option<AuditOutcome> {
        let ticket = self.navigated(url);
        let outcome = audit_with(renderer, url, config);
        self.publish(&ticket, outcome.clone()).then_some(outcome)
    }
}
