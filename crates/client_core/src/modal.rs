//! Detail-modal and create-dialog state machines.
//!
//! A detail modal shows at most one record at a time. Every open mode carries
//! that record, so "editing with nothing selected" or "editing while
//! confirming a delete" cannot be represented.

use std::fmt;

use shared::domain::Record;
use thiserror::Error;

use crate::error::UiError;

#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode<R: Record> {
    Closed,
    View {
        record: R,
    },
    Edit {
        record: R,
        draft: R::Draft,
        error: Option<UiError>,
        submitting: bool,
    },
    Schedule {
        record: R,
    },
    Performance {
        record: R,
    },
    DeleteConfirm {
        record: R,
        error: Option<UiError>,
        submitting: bool,
    },
}

impl<R: Record> ModalMode<R> {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModalMode::Closed => ModeKind::Closed,
            ModalMode::View { .. } => ModeKind::View,
            ModalMode::Edit { .. } => ModeKind::Edit,
            ModalMode::Schedule { .. } => ModeKind::Schedule,
            ModalMode::Performance { .. } => ModeKind::Performance,
            ModalMode::DeleteConfirm { .. } => ModeKind::DeleteConfirm,
        }
    }

    pub fn record(&self) -> Option<&R> {
        match self {
            ModalMode::Closed => None,
            ModalMode::View { record }
            | ModalMode::Edit { record, .. }
            | ModalMode::Schedule { record }
            | ModalMode::Performance { record }
            | ModalMode::DeleteConfirm { record, .. } => Some(record),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Closed,
    View,
    Edit,
    Schedule,
    Performance,
    DeleteConfirm,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeKind::Closed => "closed",
            ModeKind::View => "viewing",
            ModeKind::Edit => "editing",
            ModeKind::Schedule => "showing the schedule",
            ModeKind::Performance => "showing performance",
            ModeKind::DeleteConfirm => "confirming a delete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    OpenView,
    Edit,
    Schedule,
    Performance,
    RequestDelete,
    Cancel,
    Back,
    EditDraft,
    Save,
    ConfirmDelete,
    Submit,
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModalAction::OpenView => "open a record",
            ModalAction::Edit => "edit",
            ModalAction::Schedule => "show the schedule",
            ModalAction::Performance => "show performance",
            ModalAction::RequestDelete => "request a delete",
            ModalAction::Cancel => "cancel",
            ModalAction::Back => "go back",
            ModalAction::EditDraft => "change the draft",
            ModalAction::Save => "save",
            ModalAction::ConfirmDelete => "confirm the delete",
            ModalAction::Submit => "submit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} while the modal is {from}")]
    Invalid { action: ModalAction, from: ModeKind },
    #[error("a record is already selected; close the modal first")]
    RecordAlreadySelected,
    #[error("cannot {action} while a request is in flight")]
    SubmitInFlight { action: ModalAction },
    #[error("cannot {action}: the create form is not open")]
    CreateClosed { action: ModalAction },
    #[error("the create form is already open")]
    CreateAlreadyOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalModeMachine<R: Record> {
    mode: ModalMode<R>,
}

impl<R: Record> Default for ModalModeMachine<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ModalModeMachine<R> {
    pub fn new() -> Self {
        Self {
            mode: ModalMode::Closed,
        }
    }

    pub fn mode(&self) -> &ModalMode<R> {
        &self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.mode, ModalMode::Closed)
    }

    pub fn selected(&self) -> Option<&R> {
        self.mode.record()
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match &self.mode {
            ModalMode::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&UiError> {
        match &self.mode {
            ModalMode::Edit { error, .. } | ModalMode::DeleteConfirm { error, .. } => {
                error.as_ref()
            }
            _ => None,
        }
    }

    /// Whether a save or delete is awaiting the API; trigger controls stay
    /// disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        matches!(
            self.mode,
            ModalMode::Edit {
                submitting: true,
                ..
            } | ModalMode::DeleteConfirm {
                submitting: true,
                ..
            }
        )
    }

    pub fn open_view(&mut self, record: R) -> Result<(), TransitionError> {
        if self.is_open() {
            return Err(TransitionError::RecordAlreadySelected);
        }
        self.mode = ModalMode::View { record };
        Ok(())
    }

    pub fn edit(&mut self) -> Result<(), TransitionError> {
        self.from_view(ModalAction::Edit, |record| {
            let draft = record.to_draft();
            ModalMode::Edit {
                record,
                draft,
                error: None,
                submitting: false,
            }
        })
    }

    pub fn show_schedule(&mut self) -> Result<(), TransitionError> {
        self.from_view(ModalAction::Schedule, |record| ModalMode::Schedule { record })
    }

    pub fn show_performance(&mut self) -> Result<(), TransitionError> {
        self.from_view(ModalAction::Performance, |record| {
            ModalMode::Performance { record }
        })
    }

    pub fn request_delete(&mut self) -> Result<(), TransitionError> {
        self.from_view(ModalAction::RequestDelete, |record| {
            ModalMode::DeleteConfirm {
                record,
                error: None,
                submitting: false,
            }
        })
    }

    /// Leaves Edit (discarding the draft) or DeleteConfirm, back to View.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.reject_in_flight(ModalAction::Cancel)?;
        match std::mem::replace(&mut self.mode, ModalMode::Closed) {
            ModalMode::Edit { record, .. } | ModalMode::DeleteConfirm { record, .. } => {
                self.mode = ModalMode::View { record };
                Ok(())
            }
            other => self.restore(other, ModalAction::Cancel),
        }
    }

    /// Returns from Schedule or Performance to View.
    pub fn back(&mut self) -> Result<(), TransitionError> {
        match std::mem::replace(&mut self.mode, ModalMode::Closed) {
            ModalMode::Schedule { record } | ModalMode::Performance { record } => {
                self.mode = ModalMode::View { record };
                Ok(())
            }
            other => self.restore(other, ModalAction::Back),
        }
    }

    /// Close button, overlay click or Escape: always lands on Closed.
    pub fn close(&mut self) {
        self.mode = ModalMode::Closed;
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match &mut self.mode {
            ModalMode::Edit {
                draft,
                submitting: false,
                ..
            } => Some(draft),
            _ => None,
        }
    }

    pub fn edit_draft(&mut self, change: impl FnOnce(&mut R::Draft)) -> Result<(), TransitionError> {
        self.reject_in_flight(ModalAction::EditDraft)?;
        match self.draft_mut() {
            Some(draft) => {
                change(draft);
                Ok(())
            }
            None => Err(TransitionError::Invalid {
                action: ModalAction::EditDraft,
                from: self.kind(),
            }),
        }
    }

    /// Marks the edit as submitting and hands out what to send.
    pub fn begin_save(&mut self) -> Result<(R::Id, R::Draft), TransitionError> {
        self.reject_in_flight(ModalAction::Save)?;
        match &mut self.mode {
            ModalMode::Edit {
                record,
                draft,
                error,
                submitting,
            } => {
                *submitting = true;
                *error = None;
                Ok((record.id().clone(), draft.clone()))
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::Save,
                from: other.kind(),
            }),
        }
    }

    /// The API accepted the save; `updated` replaces the shown record.
    pub fn save_succeeded(&mut self, updated: R) -> Result<(), TransitionError> {
        match &self.mode {
            ModalMode::Edit {
                submitting: true, ..
            } => {
                self.mode = ModalMode::View { record: updated };
                Ok(())
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::Save,
                from: other.kind(),
            }),
        }
    }

    /// The API rejected the save; the draft stays as the operator left it.
    pub fn save_failed(&mut self, failure: UiError) -> Result<(), TransitionError> {
        match &mut self.mode {
            ModalMode::Edit {
                error,
                submitting: submitting @ true,
                ..
            } => {
                *submitting = false;
                *error = Some(failure);
                Ok(())
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::Save,
                from: other.kind(),
            }),
        }
    }

    pub fn begin_delete(&mut self) -> Result<R::Id, TransitionError> {
        self.reject_in_flight(ModalAction::ConfirmDelete)?;
        match &mut self.mode {
            ModalMode::DeleteConfirm {
                record,
                error,
                submitting,
            } => {
                *submitting = true;
                *error = None;
                Ok(record.id().clone())
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::ConfirmDelete,
                from: other.kind(),
            }),
        }
    }

    pub fn delete_succeeded(&mut self) -> Result<(), TransitionError> {
        match &self.mode {
            ModalMode::DeleteConfirm {
                submitting: true, ..
            } => {
                self.mode = ModalMode::Closed;
                Ok(())
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::ConfirmDelete,
                from: other.kind(),
            }),
        }
    }

    pub fn delete_failed(&mut self, failure: UiError) -> Result<(), TransitionError> {
        match &mut self.mode {
            ModalMode::DeleteConfirm {
                error,
                submitting: submitting @ true,
                ..
            } => {
                *submitting = false;
                *error = Some(failure);
                Ok(())
            }
            other => Err(TransitionError::Invalid {
                action: ModalAction::ConfirmDelete,
                from: other.kind(),
            }),
        }
    }

    fn from_view(
        &mut self,
        action: ModalAction,
        next: impl FnOnce(R) -> ModalMode<R>,
    ) -> Result<(), TransitionError> {
        match std::mem::replace(&mut self.mode, ModalMode::Closed) {
            ModalMode::View { record } => {
                self.mode = next(record);
                Ok(())
            }
            other => self.restore(other, action),
        }
    }

    fn restore(&mut self, mode: ModalMode<R>, action: ModalAction) -> Result<(), TransitionError> {
        let from = mode.kind();
        self.mode = mode;
        Err(TransitionError::Invalid { action, from })
    }

    fn reject_in_flight(&self, action: ModalAction) -> Result<(), TransitionError> {
        if self.is_submitting() {
            return Err(TransitionError::SubmitInFlight { action });
        }
        Ok(())
    }
}

/// The "new record" form, independent of the detail modal.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateDialog<R: Record> {
    Closed,
    Open {
        draft: R::Draft,
        error: Option<UiError>,
        submitting: bool,
    },
}

impl<R: Record> Default for CreateDialog<R> {
    fn default() -> Self {
        CreateDialog::Closed
    }
}

impl<R: Record> CreateDialog<R> {
    pub fn is_open(&self) -> bool {
        matches!(self, CreateDialog::Open { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self,
            CreateDialog::Open {
                submitting: true,
                ..
            }
        )
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match self {
            CreateDialog::Open { draft, .. } => Some(draft),
            CreateDialog::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&UiError> {
        match self {
            CreateDialog::Open { error, .. } => error.as_ref(),
            CreateDialog::Closed => None,
        }
    }

    /// Opens with the empty defaults of the record's draft.
    pub fn open(&mut self) -> Result<(), TransitionError> {
        if self.is_open() {
            return Err(TransitionError::CreateAlreadyOpen);
        }
        *self = CreateDialog::Open {
            draft: R::Draft::default(),
            error: None,
            submitting: false,
        };
        Ok(())
    }

    pub fn edit_draft(&mut self, change: impl FnOnce(&mut R::Draft)) -> Result<(), TransitionError> {
        match self {
            CreateDialog::Open {
                submitting: true, ..
            } => Err(TransitionError::SubmitInFlight {
                action: ModalAction::EditDraft,
            }),
            CreateDialog::Open { draft, .. } => {
                change(draft);
                Ok(())
            }
            CreateDialog::Closed => Err(TransitionError::CreateClosed {
                action: ModalAction::EditDraft,
            }),
        }
    }

    pub fn begin_submit(&mut self) -> Result<R::Draft, TransitionError> {
        match self {
            CreateDialog::Open {
                submitting: true, ..
            } => Err(TransitionError::SubmitInFlight {
                action: ModalAction::Submit,
            }),
            CreateDialog::Open {
                draft,
                error,
                submitting,
            } => {
                *submitting = true;
                *error = None;
                Ok(draft.clone())
            }
            CreateDialog::Closed => Err(TransitionError::CreateClosed {
                action: ModalAction::Submit,
            }),
        }
    }

    pub fn submit_succeeded(&mut self) -> Result<(), TransitionError> {
        match self {
            CreateDialog::Open {
                submitting: true, ..
            } => {
                *self = CreateDialog::Closed;
                Ok(())
            }
            _ => Err(TransitionError::CreateClosed {
                action: ModalAction::Submit,
            }),
        }
    }

    pub fn submit_failed(&mut self, failure: UiError) -> Result<(), TransitionError> {
        match self {
            CreateDialog::Open {
                error,
                submitting: submitting @ true,
                ..
            } => {
                *submitting = false;
                *error = Some(failure);
                Ok(())
            }
            _ => Err(TransitionError::CreateClosed {
                action: ModalAction::Submit,
            }),
        }
    }

    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        match self {
            CreateDialog::Open {
                submitting: true, ..
            } => Err(TransitionError::SubmitInFlight {
                action: ModalAction::Cancel,
            }),
            CreateDialog::Open { .. } => {
                *self = CreateDialog::Closed;
                Ok(())
            }
            CreateDialog::Closed => Err(TransitionError::CreateClosed {
                action: ModalAction::Cancel,
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
