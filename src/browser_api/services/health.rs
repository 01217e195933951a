use poem_openapi::payload::PlainText;

use crate::session::engine::BrowserEngine;

pub struct HealthService<'a> {
    pub engine: &'a BrowserEngine,
    pub catalog_base_url: &'a str,
}

impl<'a> HealthService<'a> {
    pub fn new(engine: &'a BrowserEngine, catalog_base_url: &'a str) -> Self {
        Self {
            engine,
            catalog_base_url,
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn status_text(&self) -> PlainText<String> {
        let state = self.engine.snapshot().await;
        let selected = state
            .selected_book()
            .map(|b| b.title.as_str())
            .unwrap_or("-");
        PlainText(format!(
            "catalog={} epoch={} books={} has_more={} selected={}",
            self.catalog_base_url,
            state.epoch,
            state.books.len(),
            state.has_more,
            selected
        ))
    }
}
