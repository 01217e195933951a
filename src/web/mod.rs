// Form-driven HTML surface: every action redirects back to the rendered page.

use std::sync::Arc;

use poem::{
    IntoResponse, Response, Route, get, handler,
    http::StatusCode,
    post,
    web::{Data, Form, Html, Path, Redirect},
};
use poem_openapi::payload::Attachment;
use serde::Deserialize;

use crate::{
    domain::{
        models::ViewMode,
        settings::{SettingKey, SettingUpdate},
    },
    render::page::render_page,
    session::{SessionEvent, engine::BrowserEngine},
};

pub fn routes() -> Route {
    Route::new()
        .at("/", get(index))
        .at("/settings", post(apply_settings))
        .at("/more", post(load_more))
        .at("/select/:index", post(select_book))
        .at("/view/:mode", post(set_view))
        .at("/export.csv", get(export_csv))
}

/// Fields of the settings form, as the browser submits them.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub language: String,
    pub seed: String,
    pub likes: String,
    pub reviews: String,
}

impl SettingsForm {
    fn updates(&self) -> Result<Vec<SettingUpdate>, String> {
        Ok(vec![
            SettingUpdate::parse(SettingKey::Language, &self.language)?,
            SettingUpdate::parse(SettingKey::Seed, &self.seed)?,
            SettingUpdate::parse(SettingKey::Likes, &self.likes)?,
            SettingUpdate::parse(SettingKey::Reviews, &self.reviews)?,
        ])
    }
}

fn back_to_page() -> Redirect {
    Redirect::see_other("/")
}

#[handler]
async fn index(Data(engine): Data<&Arc<BrowserEngine>>) -> Html<String> {
    let state = engine.snapshot().await;
    tracing::debug!(books = state.books.len(), view = state.view_mode.name(), "rendering page");
    Html(render_page(&state))
}

#[handler]
async fn apply_settings(
    Data(engine): Data<&Arc<BrowserEngine>>,
    Form(form): Form<SettingsForm>,
) -> poem::Result<Redirect> {
    let updates = form.updates().map_err(|message| {
        tracing::warn!(%message, "rejected settings form");
        poem::Error::from_string(message, StatusCode::BAD_REQUEST)
    })?;
    let current = engine.snapshot().await.settings;
    let settings = updates
        .into_iter()
        .fold(current, |acc, update| acc.set_field(update));
    engine
        .dispatch(SessionEvent::SettingsChanged(settings))
        .await;
    Ok(back_to_page())
}

#[handler]
async fn load_more(Data(engine): Data<&Arc<BrowserEngine>>) -> Redirect {
    engine.dispatch(SessionEvent::LoadMore).await;
    back_to_page()
}

#[handler]
async fn select_book(
    Data(engine): Data<&Arc<BrowserEngine>>,
    Path(book_index): Path<u64>,
) -> Redirect {
    engine.dispatch(SessionEvent::BookSelected(book_index)).await;
    back_to_page()
}

#[handler]
async fn set_view(
    Data(engine): Data<&Arc<BrowserEngine>>,
    Path(mode): Path<String>,
) -> poem::Result<Redirect> {
    let mode = ViewMode::from_name(&mode).ok_or_else(|| {
        poem::Error::from_string(format!("unknown view mode: {}", mode), StatusCode::NOT_FOUND)
    })?;
    engine.dispatch(SessionEvent::ViewModeChanged(mode)).await;
    Ok(back_to_page())
}

#[handler]
async fn export_csv(Data(engine): Data<&Arc<BrowserEngine>>) -> poem::Result<Response> {
    let file = engine
        .dispatch(SessionEvent::ExportRequested)
        .await
        .download
        .ok_or_else(|| {
            poem::Error::from_string("export produced no file", StatusCode::INTERNAL_SERVER_ERROR)
        })?;
    tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "exporting books");
    Ok(Attachment::new(file.bytes)
        .filename(file.filename)
        .with_content_type(file.content_type)
        .into_response())
}
