//! ============================================================================
//! Composer - One submit action from draft to post
//! ============================================================================
//! Order of checks: session, message bounds, quote resolution, then the
//! gateway call.
//! Nothing reaches the network for a locked session.
//! ============================================================================

use tracing::{debug, warn};

use crate::access::AccessGate;
use crate::error::Result;
use crate::gateway::{PostingClient, PostingGateway};
use crate::quote::resolve_quote;
use crate::types::{PostDraft, PostResult, Session};

pub struct Composer<C> {
    gateway: PostingGateway<C>,
}

impl<C: PostingClient> Composer<C> {
    pub fn new(gateway: PostingGateway<C>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &PostingGateway<C> {
        &self.gateway
    }

    /// Submit a draft on behalf of `session`
    pub async fn submit(&self, session: &Session, draft: &PostDraft) -> Result<PostResult> {
        if let Err(e) = AccessGate::require(session) {
            warn!("Submit attempted on a locked session");
            return Err(e);
        }

        self.gateway.check_message(&draft.text)?;

        match draft.quote.as_deref() {
            Some(reference) => {
                let quote_id = resolve_quote(reference)?;
                debug!("Submitting quote post of {}", quote_id);
                self.gateway.post_quote(&draft.text, &quote_id).await
            }
            None => self.gateway.post(&draft.text).await,
        }
    }
}
