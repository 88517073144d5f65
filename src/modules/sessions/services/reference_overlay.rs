use chrono::NaiveDate;
use futures_util::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::pricing_engine::{PricingEngine, ReferenceRequest};
use crate::core::{PricingError, Result};
use crate::modules::reference::{ExchangeRateProvider, ReferenceTotals};
use crate::modules::sessions::models::PricingSession;

/// Result of one reference lookup, tagged with the revision it was issued for
#[derive(Debug)]
pub struct ReferenceOutcome {
    pub request: ReferenceRequest,
    pub result: Result<ReferenceTotals>,
}

/// What happened when an outcome was offered to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    /// Reference totals now shown
    Applied,
    /// Lookup failed; legacy totals only
    Degraded,
    /// Session changed after the lookup was issued; outcome dropped
    Stale,
    /// Nothing to look up (rows without USD price, or no provider)
    Skipped,
}

/// Layers best-effort REF totals over the synchronous legacy totals
#[derive(Clone)]
pub struct ReferenceOverlay {
    engine: Arc<PricingEngine>,
    provider: Option<Arc<dyn ExchangeRateProvider>>,
}

impl ReferenceOverlay {
    pub fn new(engine: Arc<PricingEngine>, provider: Arc<dyn ExchangeRateProvider>) -> Self {
        Self {
            engine,
            provider: Some(provider),
        }
    }

    /// Overlay with REF pricing switched off
    pub fn disabled(engine: Arc<PricingEngine>) -> Self {
        Self {
            engine,
            provider: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Fetch the rate and convert; never touches a session
    pub async fn resolve(&self, request: ReferenceRequest) -> ReferenceOutcome {
        let result = match &self.provider {
            Some(provider) => match provider.rate_for(request.date).await {
                Ok(rate) => self.engine.convert_reference(&request, &rate),
                Err(e) => Err(e),
            },
            None => Err(PricingError::rate_unavailable("REF pricing disabled")),
        };

        ReferenceOutcome { request, result }
    }

    /// Run `resolve` on the tokio runtime without blocking the caller
    pub fn spawn(&self, request: ReferenceRequest) -> JoinHandle<ReferenceOutcome> {
        let overlay = self.clone();
        tokio::spawn(async move { overlay.resolve(request).await })
    }

    /// Offer an outcome to its session; last write wins by revision
    pub fn apply(&self, session: &mut PricingSession, outcome: ReferenceOutcome) -> OverlayStatus {
        let ReferenceOutcome { request, result } = outcome;

        if request.session_id != session.id() || request.revision != session.revision() {
            debug!(
                session_id = %session.id(),
                issued_for = request.revision,
                current = session.revision(),
                "Discarding stale reference totals"
            );
            return OverlayStatus::Stale;
        }

        match result {
            Ok(totals) => {
                session.apply_reference(request.revision, totals);
                OverlayStatus::Applied
            }
            Err(e) => {
                warn!(
                    session_id = %session.id(),
                    revision = request.revision,
                    error = %e,
                    "Reference pricing unavailable, falling back to legacy totals"
                );
                session.clear_reference(request.revision);
                OverlayStatus::Degraded
            }
        }
    }

    /// Issue, await and apply a lookup for the session's current revision
    pub async fn refresh(&self, session: &mut PricingSession, date: NaiveDate) -> OverlayStatus {
        if !self.is_enabled() {
            return OverlayStatus::Skipped;
        }

        match self.engine.reference_request(session, date) {
            Some(request) => {
                let outcome = self.resolve(request).await;
                self.apply(session, outcome)
            }
            None => OverlayStatus::Skipped,
        }
    }

    /// Refresh several open sessions (e.g. parked POS tickets) concurrently
    pub async fn refresh_many(
        &self,
        sessions: &mut [PricingSession],
        date: NaiveDate,
    ) -> Vec<OverlayStatus> {
        if !self.is_enabled() {
            return vec![OverlayStatus::Skipped; sessions.len()];
        }

        let requests: Vec<Option<ReferenceRequest>> = sessions
            .iter()
            .map(|session| self.engine.reference_request(session, date))
            .collect();

        let outcomes = join_all(requests.into_iter().map(|request| async move {
            match request {
                Some(request) => Some(self.resolve(request).await),
                None => None,
            }
        }))
        .await;

        sessions
            .iter_mut()
            .zip(outcomes)
            .map(|(session, outcome)| match outcome {
                Some(outcome) => self.apply(session, outcome),
                None => OverlayStatus::Skipped,
            })
            .collect()
    }
}
