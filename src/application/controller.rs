//! The wizard state machine.
//!
//! [`FormController`] is the only owner of the current step and the
//! applicant's record. Every change goes through one of its operations.

use crate::domain::{
    ApplicationRecord, CollateralEntry, DomainError, DomainResult, MailDraft, RecordPatch, Step,
    campaign,
};
use uuid::Uuid;

/// What the shared submit trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Below the last step the trigger moves forward one step.
    Advanced { changed: bool },
    /// On the last step it finalizes the application.
    Submitted(MailDraft),
}

/// Current step plus the record being filled in.
///
/// # Examples
///
/// ```
/// use loan_intake::application::FormController;
/// use loan_intake::domain::{RecordPatch, Step, TextField};
///
/// let mut form = FormController::default();
/// form.update_fields(&RecordPatch::new().text(TextField::ChurchName, "Grace Church"));
/// for _ in 0..5 {
///     form.advance_step();
/// }
/// assert_eq!(form.step(), Step::Submission);
///
/// form.update_fields(&RecordPatch::new().agreement(true).text(TextField::ApplicantName, "Kim"));
/// let draft = form.submit().unwrap();
/// assert!(draft.subject.contains("Grace Church"));
/// assert_eq!(form.step(), Step::Start);
/// ```
#[derive(Debug, Clone)]
pub struct FormController {
    step: Step,
    record: ApplicationRecord,
    recipient: String,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(campaign::RECIPIENT)
    }
}

impl FormController {
    /// Fresh session whose submissions go to `recipient`.
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            step: Step::Start,
            record: ApplicationRecord::default(),
            recipient: recipient.into(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Merges `patch` into the record. No validation is applied.
    pub fn update_fields(&mut self, patch: &RecordPatch) {
        if patch.is_empty() {
            return;
        }
        self.record = self.record.merged(patch);
    }

    /// Appends a blank collateral row and returns its identifier.
    pub fn add_collateral_entry(&mut self) -> Uuid {
        let entry = CollateralEntry::blank();
        let id = entry.id;
        self.record.collaterals.push(entry);
        tracing::debug!(count = self.record.collaterals.len(), "collateral row added");
        id
    }

    /// Replaces the description of the row with `id`.
    ///
    /// Returns `false` and leaves the sequence untouched when no row matches.
    pub fn update_collateral_entry(&mut self, id: Uuid, description: impl Into<String>) -> bool {
        match self.record.collaterals.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.description = description.into();
                true
            }
            None => {
                tracing::debug!(%id, "collateral update ignored, unknown row");
                false
            }
        }
    }

    /// Moves one step forward. Returns whether the step changed.
    pub fn advance_step(&mut self) -> bool {
        self.move_to(self.step.next())
    }

    /// Moves one step back. Returns whether the step changed.
    pub fn retreat_step(&mut self) -> bool {
        self.move_to(self.step.prev())
    }

    fn move_to(&mut self, step: Step) -> bool {
        if step == self.step {
            return false;
        }
        tracing::debug!(from = ?self.step, to = ?step, "step changed");
        self.step = step;
        true
    }

    /// Finalizes the application.
    ///
    /// On success the composed draft is returned and the session starts over
    /// with a fresh record at [`Step::Start`]. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// * [`DomainError::NotAtSubmission`] when called before the last step.
    /// * [`DomainError::AgreementRequired`] when the consent box is unticked.
    pub fn submit(&mut self) -> DomainResult<MailDraft> {
        if !self.step.is_last() {
            return Err(DomainError::NotAtSubmission { step: self.step });
        }
        if !self.record.agreement {
            tracing::info!("submission rejected, agreement missing");
            return Err(DomainError::AgreementRequired);
        }

        let draft = MailDraft::compose(&self.record, &self.recipient);
        tracing::info!(
            recipient = %draft.recipient,
            collaterals = self.record.collaterals.iter().filter(|c| !c.is_blank()).count(),
            "application composed"
        );

        self.reset();
        Ok(draft)
    }

    /// The shared submit trigger: advance below the last step, submit on it.
    pub fn dispatch_submit(&mut self) -> DomainResult<Dispatch> {
        if self.step < Step::Submission {
            let changed = self.advance_step();
            Ok(Dispatch::Advanced { changed })
        } else {
            self.submit().map(Dispatch::Submitted)
        }
    }

    fn reset(&mut self) {
        self.step = Step::Start;
        self.record = ApplicationRecord::default();
    }
}
