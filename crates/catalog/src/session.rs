//! One editing session over one draft.

use chrono::Utc;

use shopledger_core::{Aggregate, AggregateId, DomainResult, TenantId};

use crate::assembler::{self, SubmissionPayload};
use crate::draft::{DraftChange, DraftCommand, DraftEvent, DraftId, DraftOp, ProductDraft};

/// Owns a [`ProductDraft`] for the lifetime of the entry form: opened
/// empty, edited command by command, then either discarded or assembled
/// for submission. The session also keeps the event log, so a draft can
/// be rebuilt by replay if the embedding application wants to.
#[derive(Debug, Clone)]
pub struct DraftSession {
    tenant_id: TenantId,
    draft: ProductDraft,
    log: Vec<DraftEvent>,
}

impl DraftSession {
    /// Open a fresh draft for `tenant_id`.
    pub fn open(tenant_id: TenantId) -> Self {
        let draft_id = DraftId::new(AggregateId::new());
        // Opening a fresh draft is infallible, so the opening event is
        // built directly rather than routed through `handle`.
        let opened = DraftEvent {
            tenant_id,
            draft_id,
            occurred_at: Utc::now(),
            change: DraftChange::Opened,
        };
        let mut draft = ProductDraft::empty(draft_id);
        draft.apply(&opened);
        Self {
            tenant_id,
            draft,
            log: vec![opened],
        }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn events(&self) -> &[DraftEvent] {
        &self.log
    }

    /// Run one edit operation. Accepted edits are applied and logged;
    /// rejected ones leave the draft untouched.
    pub fn execute(&mut self, op: DraftOp) -> DomainResult<()> {
        let command = DraftCommand {
            tenant_id: self.tenant_id,
            draft_id: self.draft.id_typed(),
            occurred_at: Utc::now(),
            op,
        };
        let events = self.draft.handle(&command)?;
        for event in events {
            self.draft.apply(&event);
            self.log.push(event);
        }
        Ok(())
    }

    /// Cancel the session. Always safe; there is nothing external to
    /// unwind because the draft is purely in-memory.
    pub fn discard(&mut self) -> DomainResult<()> {
        self.execute(DraftOp::Discard)
    }

    /// Assemble the current draft for submission. The session is borrowed,
    /// not consumed, so a failed submission can be retried with the draft
    /// intact.
    pub fn assemble(&self) -> DomainResult<SubmissionPayload> {
        assembler::assemble(&self.draft)
    }
}
