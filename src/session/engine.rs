use std::{collections::VecDeque, sync::Arc};

use tokio::sync::Mutex;

use super::{Effect, PageRequest, SessionEvent, SessionState, reduce};
use crate::{catalog_client::CatalogSource, domain::models::ExportFile};

/// Owns the single session and runs the reducer's effects.
///
/// Events are applied one at a time under the lock; page fetches run outside it,
/// so a settings change can land while an older request is still in flight.
pub struct BrowserEngine {
    catalog: Arc<dyn CatalogSource>,
    state: Mutex<SessionState>,
}

/// What a dispatch produced for the caller.
#[derive(Debug, Default)]
pub struct Outcome {
    pub download: Option<ExportFile>,
}

impl BrowserEngine {
    pub fn new(catalog: Arc<dyn CatalogSource>, initial: SessionState) -> Self {
        BrowserEngine {
            catalog,
            state: Mutex::new(initial),
        }
    }

    /// Clone of the current state, for rendering and API snapshots.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Apply `event` and everything it triggers, until no fetch is left to run.
    #[tracing::instrument(level = "debug", skip(self, event))]
    pub async fn dispatch(&self, event: SessionEvent) -> Outcome {
        let mut outcome = Outcome::default();
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let effects = {
                let mut guard = self.state.lock().await;
                let current = std::mem::take(&mut *guard);
                let (next, effects) = reduce(current, event);
                *guard = next;
                effects
            };
            for effect in effects {
                match effect {
                    Effect::Fetch(request) => pending.push_back(self.run_fetch(request).await),
                    Effect::Download(file) => outcome.download = Some(file),
                }
            }
        }
        outcome
    }

    #[tracing::instrument(level = "debug", skip(self, request), fields(page = request.page(), epoch = request.epoch))]
    async fn run_fetch(&self, request: PageRequest) -> SessionEvent {
        match self.catalog.fetch_books(&request.query).await {
            Ok(books) => SessionEvent::FetchSucceeded { request, books },
            Err(e) => {
                tracing::error!(error = %format!("{:?}", e), "failed to fetch books");
                SessionEvent::FetchFailed {
                    request,
                    error: e.to_string(),
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedCatalog;
    use super::*;
    use crate::{
        domain::settings::{Language, SettingUpdate, Settings},
        session::test_support::books,
    };

    fn engine(catalog: Arc<ScriptedCatalog>) -> BrowserEngine {
        BrowserEngine::new(catalog, SessionState::new(Settings::default()))
    }

    #[tokio::test]
    async fn twenty_then_empty_stops_loading() {
        let catalog = Arc::new(ScriptedCatalog::new(vec![Ok(books(1, 20)), Ok(vec![])]));
        let engine = engine(catalog.clone());

        engine.dispatch(SessionEvent::Reload).await;
        let state = engine.snapshot().await;
        assert_eq!(state.books.len(), 20);
        assert!(state.has_more);

        engine.dispatch(SessionEvent::LoadMore).await;
        let state = engine.snapshot().await;
        assert_eq!(state.books.len(), 20);
        assert!(!state.has_more);

        engine.dispatch(SessionEvent::LoadMore).await;
        engine.dispatch(SessionEvent::LoadMore).await;
        let seen = catalog.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!((seen[0].page, seen[0].per_page()), (1, 20));
        assert_eq!((seen[1].page, seen[1].per_page()), (2, 10));
        assert_eq!(seen[0].settings.reviews, 4.7);
    }

    #[tokio::test]
    async fn failure_halts_further_loading() {
        let catalog = Arc::new(ScriptedCatalog::new(vec![
            Ok(books(1, 20)),
            Err(anyhow::anyhow!("502 Bad Gateway")),
            Ok(books(21, 10)),
        ]));
        let engine = engine(catalog.clone());

        engine.dispatch(SessionEvent::Reload).await;
        engine.dispatch(SessionEvent::LoadMore).await;
        engine.dispatch(SessionEvent::LoadMore).await;

        let state = engine.snapshot().await;
        assert_eq!(state.books.len(), 20);
        assert!(!state.has_more);
        assert!(!state.loading);
        assert_eq!(catalog.seen().len(), 2);
    }

    #[tokio::test]
    async fn settings_change_restarts_from_page_one() {
        let catalog = Arc::new(ScriptedCatalog::new(vec![
            Ok(books(1, 20)),
            Ok(vec![]),
            Ok(books(40, 20)),
        ]));
        let engine = engine(catalog.clone());

        engine.dispatch(SessionEvent::Reload).await;
        engine.dispatch(SessionEvent::LoadMore).await;
        assert!(!engine.snapshot().await.has_more);

        let settings = engine
            .snapshot()
            .await
            .settings
            .set_field(SettingUpdate::Language(Language::Fr));
        engine
            .dispatch(SessionEvent::SettingsChanged(settings))
            .await;

        let state = engine.snapshot().await;
        assert!(state.has_more);
        assert_eq!(state.page, 2);
        assert_eq!(state.books.first().map(|b| b.index), Some(40));
        let seen = catalog.seen();
        assert_eq!(seen[2].page, 1);
        assert_eq!(seen[2].settings.language, Language::Fr);
    }

    #[tokio::test]
    async fn export_returns_download() {
        let catalog = Arc::new(ScriptedCatalog::new(vec![Ok(books(1, 3))]));
        let engine = engine(catalog);
        engine.dispatch(SessionEvent::Reload).await;

        let outcome = engine.dispatch(SessionEvent::ExportRequested).await;
        let file = outcome.download.expect("export produces a file");
        assert_eq!(file.filename, "books-en-2535653423.csv");
        assert_eq!(String::from_utf8(file.bytes).unwrap().lines().count(), 4);

        let outcome = engine.dispatch(SessionEvent::BookSelected(2)).await;
        assert!(outcome.download.is_none());
    }
}
