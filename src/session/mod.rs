// Session state and the reducer that drives pagination, selection and export

pub mod engine;

use crate::{
    catalog_client::{BookQuery, BookRecord},
    domain::{
        models::{ExportFile, ViewMode},
        settings::{SettingUpdate, Settings},
    },
    export::export_current_set,
};

/// Everything the browser knows about the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub settings: Settings,
    /// Bumped on every settings change; responses from older epochs are dropped
    pub epoch: u64,
    /// Append-only within an epoch
    pub books: Vec<BookRecord>,
    /// Next page to request, starts at 1
    pub page: u32,
    pub has_more: bool,
    /// A page request is in flight for the current epoch
    pub loading: bool,
    /// `index` of the expanded book
    pub selected: Option<u64>,
    pub view_mode: ViewMode,
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        SessionState {
            settings,
            epoch: 0,
            books: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
            selected: None,
            view_mode: ViewMode::default(),
        }
    }

    pub fn selected_book(&self) -> Option<&BookRecord> {
        let index = self.selected?;
        self.books.iter().find(|b| b.index == index)
    }

    pub fn is_selected(&self, book: &BookRecord) -> bool {
        self.selected == Some(book.index)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(Settings::default())
    }
}

/// A page fetch, tagged with the epoch it was issued in.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub epoch: u64,
    pub reset: bool,
    pub query: BookQuery,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.query.page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Start a fresh epoch with the current settings
    Reload,
    SettingsChanged(Settings),
    /// Replace one settings field, then behave like `SettingsChanged`
    FieldChanged(SettingUpdate),
    /// The user scrolled to the end of the list
    LoadMore,
    FetchSucceeded {
        request: PageRequest,
        books: Vec<BookRecord>,
    },
    FetchFailed {
        request: PageRequest,
        error: String,
    },
    BookSelected(u64),
    ViewModeChanged(ViewMode),
    ExportRequested,
}

/// Side effects the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(PageRequest),
    Download(ExportFile),
}

/// Apply one event. The previous state is consumed and a new one returned.
pub fn reduce(state: SessionState, event: SessionEvent) -> (SessionState, Vec<Effect>) {
    match event {
        SessionEvent::Reload => {
            let settings = state.settings.clone();
            restart(state, settings)
        }
        SessionEvent::SettingsChanged(settings) => {
            if settings == state.settings {
                tracing::debug!("settings unchanged, keeping current epoch");
                return (state, vec![]);
            }
            restart(state, settings)
        }
        SessionEvent::FieldChanged(update) => {
            let settings = state.settings.set_field(update);
            reduce(state, SessionEvent::SettingsChanged(settings))
        }
        SessionEvent::LoadMore => {
            if !state.has_more || state.loading {
                tracing::debug!(
                    has_more = state.has_more,
                    loading = state.loading,
                    "ignoring load more"
                );
                return (state, vec![]);
            }
            let request = PageRequest {
                epoch: state.epoch,
                reset: false,
                query: BookQuery::new(state.settings.clone(), state.page),
            };
            let next = SessionState {
                loading: true,
                ..state
            };
            (next, vec![Effect::Fetch(request)])
        }
        SessionEvent::FetchSucceeded { request, books } => {
            if request.epoch != state.epoch {
                tracing::debug!(
                    stale_epoch = request.epoch,
                    epoch = state.epoch,
                    "dropping stale page"
                );
                return (state, vec![]);
            }
            if books.is_empty() {
                tracing::info!(page = request.page(), "no more books");
                let next = SessionState {
                    has_more: false,
                    loading: false,
                    ..state
                };
                return (next, vec![]);
            }
            let received = books.len();
            let mut next = state;
            if request.reset {
                next.books = books;
            } else {
                next.books.extend(books);
            }
            next.page = request.page() + 1;
            next.loading = false;
            tracing::debug!(
                page = request.page(),
                received,
                total = next.books.len(),
                "page loaded"
            );
            (next, vec![])
        }
        SessionEvent::FetchFailed { request, error } => {
            if request.epoch != state.epoch {
                tracing::debug!(stale_epoch = request.epoch, %error, "dropping stale failure");
                return (state, vec![]);
            }
            tracing::error!(page = request.page(), %error, "error fetching books");
            let next = SessionState {
                has_more: false,
                loading: false,
                ..state
            };
            (next, vec![])
        }
        SessionEvent::BookSelected(index) => {
            let selected = if state.selected == Some(index) {
                None
            } else if state.books.iter().any(|b| b.index == index) {
                Some(index)
            } else {
                tracing::warn!(index, "selected book is not loaded");
                return (state, vec![]);
            };
            (SessionState { selected, ..state }, vec![])
        }
        SessionEvent::ViewModeChanged(view_mode) => (SessionState { view_mode, ..state }, vec![]),
        SessionEvent::ExportRequested => {
            let file = export_current_set(&state.books, &state.settings);
            (state, vec![Effect::Download(file)])
        }
    }
}

// New epoch: clear the sequence, cursor, flag and selection before page 1 goes out.
fn restart(state: SessionState, settings: Settings) -> (SessionState, Vec<Effect>) {
    let epoch = state.epoch + 1;
    let request = PageRequest {
        epoch,
        reset: true,
        query: BookQuery::new(settings.clone(), 1),
    };
    tracing::debug!(epoch, language = %settings.language, seed = %settings.seed, "starting new epoch");
    let next = SessionState {
        settings,
        epoch,
        books: Vec::new(),
        page: 1,
        has_more: true,
        loading: true,
        selected: None,
        view_mode: state.view_mode,
    };
    (next, vec![Effect::Fetch(request)])
}
