//! Headless core of the admin console: list query state, the detail modal
//! state machine, and the controller binding both to the admin REST API.

pub mod controller;
pub mod error;
pub mod list_query;
pub mod modal;
pub mod session;
pub mod transport;

pub use controller::{
    CallOutcome, ControllerError, ControllerEvent, ControllerOptions, ListView, LoadOutcome,
    PaginationMode, QueryChange, RemoteResourceController, ResponseOrdering,
};
pub use error::{ApiFailure, UiError, UiErrorCategory, UiErrorContext};
pub use list_query::{DerivedView, EmptyState, ListQueryState, DEFAULT_PAGE_SIZE};
pub use modal::{CreateDialog, ModalMode, ModalModeMachine, ModeKind, TransitionError};
pub use session::{Session, TokenState};
pub use transport::{HttpResourceClient, MissingResourceApi, ResourceApi};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
