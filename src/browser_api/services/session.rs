use poem_openapi::payload::Json;

use crate::{
    browser_api::models::{
        ErrorDto, SessionDto, SessionResponseDto, SettingKeyDto, ViewModeDto,
    },
    domain::settings::SettingUpdate,
    session::{SessionEvent, engine::BrowserEngine},
};

pub struct SessionService<'a> {
    pub engine: &'a BrowserEngine,
}

impl<'a> SessionService<'a> {
    pub fn new(engine: &'a BrowserEngine) -> Self {
        Self { engine }
    }

    async fn snapshot(&self) -> SessionResponseDto {
        let state = self.engine.snapshot().await;
        SessionResponseDto::Ok(Json(SessionDto::from(&state)))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_session(&self) -> SessionResponseDto {
        self.snapshot().await
    }

    /// Replace one settings field; a real change restarts pagination from page 1.
    #[tracing::instrument(level = "debug", skip(self, raw))]
    pub async fn set_field(&self, key: SettingKeyDto, raw: &str) -> SessionResponseDto {
        let update = match SettingUpdate::parse(key.into(), raw) {
            Ok(u) => u,
            Err(message) => {
                tracing::warn!(?key, %message, "rejected settings update");
                return SessionResponseDto::BadRequest(Json(ErrorDto::from(message)));
            }
        };
        self.engine.dispatch(SessionEvent::FieldChanged(update)).await;
        self.snapshot().await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn load_more(&self) -> SessionResponseDto {
        self.engine.dispatch(SessionEvent::LoadMore).await;
        self.snapshot().await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn select(&self, index: u64) -> SessionResponseDto {
        self.engine.dispatch(SessionEvent::BookSelected(index)).await;
        self.snapshot().await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn set_view(&self, mode: ViewModeDto) -> SessionResponseDto {
        self.engine
            .dispatch(SessionEvent::ViewModeChanged(mode.into()))
            .await;
        self.snapshot().await
    }
}
