use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::Path,
    payload::{Html, Json, PlainText},
};

use super::models::{
    ExportResponseDto, SessionResponseDto, SettingKeyDto, SettingValueDto, ViewModeDto,
};
use super::services::{export::ExportService, health::HealthService, session::SessionService};
use crate::{config::Config, render::render, session::engine::BrowserEngine};

pub struct BrowserApi {
    pub engine: Arc<BrowserEngine>,
    pub config: Arc<Config>,
}

#[OpenApi]
impl BrowserApi {
    /// Catalog location and how far the session has loaded
    #[oai(path = "/status", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn status(&self) -> PlainText<String> {
        HealthService::new(&self.engine, &self.config.catalog_base_url)
            .status_text()
            .await
    }

    /// Settings, loaded books, cursor and selection
    #[oai(path = "/session", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn session(&self) -> SessionResponseDto {
        SessionService::new(&self.engine).get_session().await
    }

    /// Replace one settings field and reload from page 1
    #[oai(path = "/settings/:key", method = "put")]
    #[tracing::instrument(level = "debug", skip(self, key, body))]
    async fn set_setting(
        &self,
        key: Path<SettingKeyDto>,
        body: Json<SettingValueDto>,
    ) -> SessionResponseDto {
        tracing::debug!(key = ?key.0, value = %body.0.value, "handling set_setting");
        SessionService::new(&self.engine)
            .set_field(key.0, &body.0.value)
            .await
    }

    /// Fetch the next page and append it
    #[oai(path = "/books/next", method = "post")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn next_page(&self) -> SessionResponseDto {
        SessionService::new(&self.engine).load_more().await
    }

    /// Toggle the expanded book
    #[oai(path = "/books/:index/select", method = "post")]
    #[tracing::instrument(level = "debug", skip(self, index))]
    async fn select_book(&self, index: Path<u64>) -> SessionResponseDto {
        SessionService::new(&self.engine).select(index.0).await
    }

    #[oai(path = "/view/:mode", method = "put")]
    #[tracing::instrument(level = "debug", skip(self, mode))]
    async fn set_view(&self, mode: Path<ViewModeDto>) -> SessionResponseDto {
        SessionService::new(&self.engine).set_view(mode.0).await
    }

    /// HTML fragment of the current view
    #[oai(path = "/render", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn render_view(&self) -> Html<String> {
        let state = self.engine.snapshot().await;
        Html(render(&state, state.view_mode))
    }

    /// Download every loaded book as CSV
    #[oai(path = "/export", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn export(&self) -> ExportResponseDto {
        ExportService::new(&self.engine).export_csv().await
    }
}
