//! Binds list state and the detail modal to a remote collection.
//!
//! The controller is driven from a single task. Its state sits behind a
//! `tokio::sync::Mutex` that is released before every network call, so
//! overlapping list loads may resolve in any order; each load carries a
//! sequence number and [`ResponseOrdering`] decides which response wins.

use std::{
    future::Future,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering},
        Arc,
    },
};

use shared::{
    domain::{Filter, Record},
    protocol::{ListParams, Page, ResourceStats, SortSpec},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    error::{ApiFailure, UiError, UiErrorContext},
    list_query::{EmptyState, ListQueryState, DEFAULT_PAGE_SIZE},
    modal::{CreateDialog, ModalMode, ModalModeMachine, TransitionError},
    session::Session,
    transport::ResourceApi,
};

/// Where filtering and paging happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The whole collection is fetched once and derived locally.
    #[default]
    Client,
    /// The backend filters and pages; every query change reloads.
    Server,
}

/// Which list response is kept when loads overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// A response older than the last applied one is discarded.
    #[default]
    LatestIssued,
    /// Whichever response resolves last is applied.
    LastResolved,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub pagination: PaginationMode,
    pub ordering: ResponseOrdering,
    pub page_size: NonZeroUsize,
    pub event_capacity: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            pagination: PaginationMode::default(),
            ordering: ResponseOrdering::default(),
            page_size: DEFAULT_PAGE_SIZE,
            event_capacity: 1024,
        }
    }
}

/// What happened to one list load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// The session token is still resolving; nothing was sent.
    Deferred,
    Discarded { seq: u64 },
    Failed(UiError),
    /// The controller was unmounted.
    Abandoned,
}

/// Result of a stats load or a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T> {
    Done(T),
    Deferred,
    Failed(UiError),
    Abandoned,
}

impl<T> CallOutcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, CallOutcome::Done(_))
    }

    pub fn error(&self) -> Option<&UiError> {
        match self {
            CallOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Effect of a query setter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryChange {
    Unchanged,
    /// The list is re-derived locally on the next [`RemoteResourceController::view`].
    Rederived,
    Reloaded(LoadOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    ListLoaded { seq: u64, count: usize },
    LoadFailed(UiError),
    StaleResponseDiscarded { seq: u64 },
    StatsLoaded,
    RecordCreated { id: String },
    RecordUpdated { id: String },
    RecordDeleted { id: String },
    MutationFailed(UiError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("record {0} is not in the loaded list")]
    UnknownRecord(String),
    #[error("controller has been unmounted")]
    Unmounted,
}

/// Owned snapshot of everything a list page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<R: Record> {
    pub records: Vec<R>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub loading: bool,
    pub loaded: bool,
    /// The backend reported more records than it handed over; the rows
    /// shown are a partial collection.
    pub incomplete: bool,
    pub error: Option<UiError>,
    pub empty_state: Option<EmptyState>,
    pub stats: Option<ResourceStats>,
    pub stats_error: Option<UiError>,
    pub mutation_error: Option<UiError>,
    pub modal: ModalMode<R>,
    pub create: CreateDialog<R>,
}

struct ControllerState<R: Record> {
    query: ListQueryState<R>,
    modal: ModalModeMachine<R>,
    create: CreateDialog<R>,
    records: Vec<R>,
    remote_total: u64,
    remote_pages: u32,
    in_flight: usize,
    loaded: bool,
    incomplete: bool,
    error: Option<UiError>,
    applied_seq: u64,
    stats: Option<ResourceStats>,
    stats_error: Option<UiError>,
    mutation_error: Option<UiError>,
}

pub struct RemoteResourceController<R: Record> {
    api: Arc<dyn ResourceApi<R>>,
    session: Session,
    options: ControllerOptions,
    inner: Mutex<ControllerState<R>>,
    next_seq: AtomicU64,
    mounted: AtomicBool,
    events: broadcast::Sender<ControllerEvent>,
}

impl<R: Record> RemoteResourceController<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, session: Session) -> Arc<Self> {
        Self::with_options(api, session, ControllerOptions::default())
    }

    pub fn with_options(
        api: Arc<dyn ResourceApi<R>>,
        session: Session,
        options: ControllerOptions,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(options.event_capacity.max(1));
        Arc::new(Self {
            api,
            session,
            inner: Mutex::new(ControllerState {
                query: ListQueryState::new().with_page_size(options.page_size),
                modal: ModalModeMachine::new(),
                create: CreateDialog::default(),
                records: Vec::new(),
                remote_total: 0,
                remote_pages: 0,
                in_flight: 0,
                loaded: false,
                incomplete: false,
                error: None,
                applied_seq: 0,
                stats: None,
                stats_error: None,
                mutation_error: None,
            }),
            options,
            next_seq: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
            events,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(AtomicOrdering::SeqCst)
    }

    /// Responses resolving after this are ignored and no request is issued.
    pub fn unmount(&self) {
        if self.mounted.swap(false, AtomicOrdering::SeqCst) {
            debug!(resource = %R::KIND, "controller: unmounted");
        }
    }

    pub async fn query(&self) -> ListQueryState<R> {
        self.inner.lock().await.query.clone()
    }

    pub async fn view(&self) -> ListView<R> {
        let state = self.inner.lock().await;
        let (records, total_count, total_pages, page, empty_state) =
            match self.options.pagination {
                PaginationMode::Client => {
                    let derived = state.query.derive(&state.records);
                    let empty_state = derived.empty_state();
                    (
                        derived.visible.into_iter().cloned().collect::<Vec<_>>(),
                        derived.total_count,
                        derived.total_pages,
                        derived.page,
                        empty_state,
                    )
                }
                PaginationMode::Server => {
                    let total_count = usize::try_from(state.remote_total).unwrap_or(usize::MAX);
                    let empty_state = if state.records.is_empty() && total_count == 0 {
                        Some(if state.query.is_filtering() {
                            EmptyState::NoMatches
                        } else {
                            EmptyState::NoRecords
                        })
                    } else {
                        None
                    };
                    (
                        state.records.clone(),
                        total_count,
                        remote_page_count(state.remote_pages),
                        state.query.page(),
                        empty_state,
                    )
                }
            };

        ListView {
            records,
            total_count,
            total_pages,
            page,
            page_size: state.query.page_size().get(),
            loading: state.in_flight > 0,
            loaded: state.loaded,
            incomplete: state.incomplete,
            error: state.error.clone(),
            empty_state: empty_state.filter(|_| state.loaded),
            stats: state.stats.clone(),
            stats_error: state.stats_error.clone(),
            mutation_error: state.mutation_error.clone(),
            modal: state.modal.mode().clone(),
            create: state.create.clone(),
        }
    }

    /// Fetches the collection for the current query. API failures become
    /// state and a [`ControllerEvent::LoadFailed`]; prior records stay.
    pub async fn load_list(&self) -> LoadOutcome {
        if !self.is_mounted() {
            return LoadOutcome::Abandoned;
        }
        let auth = self.session.require_token().await;
        if matches!(auth, Err(ApiFailure::TokenPending)) {
            debug!(resource = %R::KIND, "list: session pending, load deferred");
            return LoadOutcome::Deferred;
        }

        let seq = self.next_seq.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        let params = {
            let mut state = self.inner.lock().await;
            state.in_flight += 1;
            state.error = None;
            self.list_params(&state.query)
        };
        debug!(resource = %R::KIND, seq, ?params, "list: request issued");

        let result = match (auth, self.options.pagination) {
            (Err(failure), _) => Err(failure),
            (Ok(_), PaginationMode::Server) => self.api.list(&self.session, &params).await,
            (Ok(_), PaginationMode::Client) => self.fetch_collection(seq, params).await,
        };
        self.settle_list(seq, result).await
    }

    /// The retry control.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load_list().await
    }

    pub async fn load_stats(&self) -> CallOutcome<ResourceStats> {
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        let auth = self.session.require_token().await;
        let result = match auth {
            Err(ApiFailure::TokenPending) => {
                debug!(resource = %R::KIND, "stats: session pending, load deferred");
                return CallOutcome::Deferred;
            }
            Err(failure) => Err(failure),
            Ok(_) => self.api.stats(&self.session).await,
        };
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }

        let mut state = self.inner.lock().await;
        match result {
            Ok(stats) => {
                state.stats = Some(stats.clone());
                state.stats_error = None;
                drop(state);
                debug!(resource = %R::KIND, total = stats.total(), "stats: loaded");
                self.emit(ControllerEvent::StatsLoaded);
                CallOutcome::Done(stats)
            }
            Err(failure) => {
                let err = UiError::from_failure(UiErrorContext::LoadStats, R::KIND, &failure);
                state.stats_error = Some(err.clone());
                drop(state);
                warn!(resource = %R::KIND, error = %failure, "stats: load failed");
                self.emit(ControllerEvent::LoadFailed(err.clone()));
                CallOutcome::Failed(err)
            }
        }
    }

    pub async fn create_record(&self, draft: &R::Draft) -> CallOutcome<R> {
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        let result = self
            .call_api(UiErrorContext::Create, self.api.create(&self.session, draft))
            .await;
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        if let Err(err) = &result {
            self.inner.lock().await.mutation_error = Some(err.clone());
        }
        self.conclude(result, |record| ControllerEvent::RecordCreated {
            id: record.id().to_string(),
        })
        .await
    }

    pub async fn update_record(&self, id: &R::Id, patch: &R::Draft) -> CallOutcome<R> {
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        let result = self
            .call_api(
                UiErrorContext::Update,
                self.api.update(&self.session, id, patch),
            )
            .await;
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        if let Err(err) = &result {
            self.inner.lock().await.mutation_error = Some(err.clone());
        }
        self.conclude(result, |record| ControllerEvent::RecordUpdated {
            id: record.id().to_string(),
        })
        .await
    }

    pub async fn delete_record(&self, id: &R::Id) -> CallOutcome<()> {
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        let result = self
            .call_api(UiErrorContext::Delete, self.api.delete(&self.session, id))
            .await;
        if !self.is_mounted() {
            return CallOutcome::Abandoned;
        }
        if let Err(err) = &result {
            self.inner.lock().await.mutation_error = Some(err.clone());
        }
        self.conclude(result, |_| ControllerEvent::RecordDeleted { id: id.to_string() })
            .await
    }

    /// Opens the detail modal on a record from the loaded list.
    pub async fn open_record(&self, id: &R::Id) -> Result<(), ControllerError> {
        self.ensure_mounted()?;
        let mut state = self.inner.lock().await;
        let record = state
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownRecord(id.to_string()))?;
        state.modal.open_view(record)?;
        Ok(())
    }

    pub async fn edit_selected(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.edit()?)
    }

    pub async fn show_schedule(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.show_schedule()?)
    }

    pub async fn show_performance(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.show_performance()?)
    }

    pub async fn request_delete(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.request_delete()?)
    }

    pub async fn cancel(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.cancel()?)
    }

    pub async fn back(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.back()?)
    }

    pub async fn close_modal(&self) {
        self.inner.lock().await.modal.close();
    }

    pub async fn update_draft(
        &self,
        change: impl FnOnce(&mut R::Draft),
    ) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.modal.edit_draft(change)?)
    }

    /// Sends the edit draft. An API failure keeps the modal in Edit with the
    /// draft and the error; success shows the updated record and reloads.
    pub async fn save_edit(&self) -> Result<CallOutcome<R>, ControllerError> {
        self.ensure_mounted()?;
        let (id, draft) = self.inner.lock().await.modal.begin_save()?;
        let result = self
            .call_api(
                UiErrorContext::Update,
                self.api.update(&self.session, &id, &draft),
            )
            .await;
        if !self.is_mounted() {
            debug!(resource = %R::KIND, id = %id, "modal: save resolved after unmount");
            return Ok(CallOutcome::Abandoned);
        }

        {
            let mut state = self.inner.lock().await;
            let settled = if state.modal.selected().map(|record| record.id()) == Some(&id) {
                match &result {
                    Ok(updated) => state.modal.save_succeeded(updated.clone()),
                    Err(err) => state.modal.save_failed(err.clone()),
                }
            } else {
                Ok(())
            };
            if settled.is_err() || state.modal.selected().is_none() {
                debug!(resource = %R::KIND, id = %id, "modal: save resolved after close");
            }
        }

        Ok(self
            .conclude(result, |record| ControllerEvent::RecordUpdated {
                id: record.id().to_string(),
            })
            .await)
    }

    /// Deletes the record under confirmation. Success closes the modal.
    pub async fn confirm_delete(&self) -> Result<CallOutcome<()>, ControllerError> {
        self.ensure_mounted()?;
        let id = self.inner.lock().await.modal.begin_delete()?;
        let result = self
            .call_api(UiErrorContext::Delete, self.api.delete(&self.session, &id))
            .await;
        if !self.is_mounted() {
            debug!(resource = %R::KIND, id = %id, "modal: delete resolved after unmount");
            return Ok(CallOutcome::Abandoned);
        }

        {
            let mut state = self.inner.lock().await;
            if state.modal.selected().map(|record| record.id()) == Some(&id) {
                let settled = match &result {
                    Ok(()) => state.modal.delete_succeeded(),
                    Err(err) => state.modal.delete_failed(err.clone()),
                };
                if settled.is_err() {
                    debug!(resource = %R::KIND, id = %id, "modal: delete resolved in another mode");
                }
            }
        }

        Ok(self
            .conclude(result, |_| ControllerEvent::RecordDeleted { id: id.to_string() })
            .await)
    }

    pub async fn open_create(&self) -> Result<(), ControllerError> {
        self.ensure_mounted()?;
        Ok(self.inner.lock().await.create.open()?)
    }

    pub async fn update_create_draft(
        &self,
        change: impl FnOnce(&mut R::Draft),
    ) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.create.edit_draft(change)?)
    }

    pub async fn submit_create(&self) -> Result<CallOutcome<R>, ControllerError> {
        self.ensure_mounted()?;
        let draft = self.inner.lock().await.create.begin_submit()?;
        let result = self
            .call_api(UiErrorContext::Create, self.api.create(&self.session, &draft))
            .await;
        if !self.is_mounted() {
            return Ok(CallOutcome::Abandoned);
        }

        {
            let mut state = self.inner.lock().await;
            let settled = match &result {
                Ok(_) => state.create.submit_succeeded(),
                Err(err) => state.create.submit_failed(err.clone()),
            };
            if settled.is_err() {
                debug!(resource = %R::KIND, "create: submit resolved after the form closed");
            }
        }

        Ok(self
            .conclude(result, |record| ControllerEvent::RecordCreated {
                id: record.id().to_string(),
            })
            .await)
    }

    pub async fn cancel_create(&self) -> Result<(), ControllerError> {
        Ok(self.inner.lock().await.create.cancel()?)
    }

    pub async fn set_search_text(&self, text: &str) -> QueryChange {
        self.change_query(|query, _| query.set_search_text(text))
            .await
    }

    pub async fn set_category_filter(&self, filter: Filter<R::Category>) -> QueryChange {
        self.change_query(|query, _| query.set_category_filter(filter))
            .await
    }

    pub async fn set_status_filter(&self, filter: Filter<R::Status>) -> QueryChange {
        self.change_query(|query, _| query.set_status_filter(filter))
            .await
    }

    /// Moves to `page`, clamped to the last known page.
    pub async fn set_page(&self, page: usize) -> QueryChange {
        self.change_query(|query, total_pages| query.set_page(page, total_pages))
            .await
    }

    pub async fn next_page(&self) -> QueryChange {
        self.change_query(|query, total_pages| query.next_page(total_pages))
            .await
    }

    pub async fn prev_page(&self) -> QueryChange {
        self.change_query(|query, total_pages| query.prev_page(total_pages))
            .await
    }

    pub async fn set_page_size(&self, page_size: NonZeroUsize) -> QueryChange {
        self.change_query(|query, _| query.set_page_size(page_size))
            .await
    }

    pub async fn set_sort(&self, sort: Option<SortSpec>) -> QueryChange {
        self.change_query(|query, _| query.set_sort(sort)).await
    }

    pub async fn clear_filters(&self) -> QueryChange {
        self.change_query(|query, _| query.clear_filters()).await
    }

    /// Applies several query changes at once; reloads at most once. The
    /// closure also receives the current total page count.
    pub async fn update_query(
        &self,
        change: impl FnOnce(&mut ListQueryState<R>, usize),
    ) -> QueryChange {
        self.change_query(|query, total_pages| {
            let before = query.clone();
            change(query, total_pages);
            *query != before
        })
        .await
    }

    async fn change_query(
        &self,
        change: impl FnOnce(&mut ListQueryState<R>, usize) -> bool,
    ) -> QueryChange {
        let changed = {
            let mut guard = self.inner.lock().await;
            let state = &mut *guard;
            let total_pages = self.total_pages(state);
            change(&mut state.query, total_pages)
        };
        if !changed {
            return QueryChange::Unchanged;
        }
        match self.options.pagination {
            PaginationMode::Client => QueryChange::Rederived,
            PaginationMode::Server => QueryChange::Reloaded(self.load_list().await),
        }
    }

    fn total_pages(&self, state: &ControllerState<R>) -> usize {
        match self.options.pagination {
            PaginationMode::Client => state.query.derive(&state.records).total_pages,
            PaginationMode::Server => remote_page_count(state.remote_pages),
        }
    }

    fn list_params(&self, query: &ListQueryState<R>) -> ListParams {
        match self.options.pagination {
            PaginationMode::Server => query.list_params(),
            PaginationMode::Client => ListParams {
                sort: query.sort().cloned(),
                ..ListParams::default()
            },
        }
    }

    /// Client mode needs the whole collection: follows the backend's pages,
    /// at the size it chose for the first one, until `total_elements`
    /// records are in hand or a page comes back empty.
    async fn fetch_collection(
        &self,
        seq: u64,
        params: ListParams,
    ) -> Result<Page<R>, ApiFailure> {
        let mut collected = self.api.list(&self.session, &params).await?;
        let batch = collected.content.len();
        let pages = remote_page_count(collected.total_pages);
        let mut next = 1;
        while batch > 0
            && next < pages
            && (collected.content.len() as u64) < collected.total_elements
            && self.is_mounted()
        {
            let page_params = ListParams {
                page: Some(next),
                size: Some(batch),
                ..params.clone()
            };
            debug!(resource = %R::KIND, seq, page = next, "list: fetching next backend page");
            let page = self.api.list(&self.session, &page_params).await?;
            if page.content.is_empty() {
                break;
            }
            collected.content.extend(page.content);
            next += 1;
        }
        Ok(collected)
    }

    async fn settle_list(&self, seq: u64, result: Result<Page<R>, ApiFailure>) -> LoadOutcome {
        let mut state = self.inner.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        if !self.is_mounted() {
            debug!(resource = %R::KIND, seq, "list: response after unmount ignored");
            return LoadOutcome::Abandoned;
        }
        if self.options.ordering == ResponseOrdering::LatestIssued && seq < state.applied_seq {
            let applied = state.applied_seq;
            drop(state);
            debug!(resource = %R::KIND, seq, applied, "list: stale response discarded");
            self.emit(ControllerEvent::StaleResponseDiscarded { seq });
            return LoadOutcome::Discarded { seq };
        }
        state.applied_seq = seq;

        match result {
            Ok(page) => {
                let count = page.content.len();
                state.remote_total = page.total_elements;
                state.remote_pages = page.total_pages;
                state.records = page.content;
                state.loaded = true;
                state.error = None;
                state.incomplete = false;
                if self.options.pagination == PaginationMode::Client {
                    let total_count = state.query.derive(&state.records).total_count;
                    state.query.clamp_page(total_count);
                    state.incomplete = (count as u64) < state.remote_total;
                    if state.incomplete {
                        warn!(
                            resource = %R::KIND,
                            seq,
                            received = count,
                            reported = state.remote_total,
                            "list: backend returned fewer records than it reported"
                        );
                    }
                }
                drop(state);
                info!(resource = %R::KIND, seq, count, "list: page applied");
                self.emit(ControllerEvent::ListLoaded { seq, count });
                LoadOutcome::Applied { count }
            }
            Err(failure) => {
                let err = UiError::from_failure(UiErrorContext::LoadList, R::KIND, &failure);
                state.error = Some(err.clone());
                drop(state);
                warn!(resource = %R::KIND, seq, error = %failure, "list: load failed");
                self.emit(ControllerEvent::LoadFailed(err.clone()));
                LoadOutcome::Failed(err)
            }
        }
    }

    async fn call_api<T>(
        &self,
        context: UiErrorContext,
        call: impl Future<Output = Result<T, ApiFailure>>,
    ) -> Result<T, UiError> {
        let result = match self.session.require_token().await {
            Ok(_) => call.await,
            Err(failure) => Err(failure),
        };
        result.map_err(|failure| {
            warn!(resource = %R::KIND, ?context, error = %failure, "mutation failed");
            UiError::from_failure(context, R::KIND, &failure)
        })
    }

    /// Emits exactly one event for a settled mutation. A success clears the
    /// last mutation error and reloads the list.
    async fn conclude<T>(
        &self,
        result: Result<T, UiError>,
        event: impl FnOnce(&T) -> ControllerEvent,
    ) -> CallOutcome<T> {
        match result {
            Ok(value) => {
                self.inner.lock().await.mutation_error = None;
                self.emit(event(&value));
                let reload = self.load_list().await;
                if !matches!(reload, LoadOutcome::Applied { .. }) {
                    debug!(
                        resource = %R::KIND,
                        outcome = ?reload,
                        "mutation: follow-up reload not applied"
                    );
                }
                CallOutcome::Done(value)
            }
            Err(err) => {
                self.emit(ControllerEvent::MutationFailed(err.clone()));
                CallOutcome::Failed(err)
            }
        }
    }

    fn ensure_mounted(&self) -> Result<(), ControllerError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(ControllerError::Unmounted)
        }
    }

    fn emit(&self, event: ControllerEvent) {
        let _ = self.events.send(event);
    }
}

fn remote_page_count(pages: u32) -> usize {
    usize::try_from(pages).unwrap_or(usize::MAX).max(1)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
