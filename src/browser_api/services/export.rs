use poem_openapi::payload::{Attachment, Json};

use crate::{
    browser_api::models::{ErrorDto, ExportResponseDto},
    session::{SessionEvent, engine::BrowserEngine},
};

pub struct ExportService<'a> {
    pub engine: &'a BrowserEngine,
}

impl<'a> ExportService<'a> {
    pub fn new(engine: &'a BrowserEngine) -> Self {
        Self { engine }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn export_csv(&self) -> ExportResponseDto {
        match self
            .engine
            .dispatch(SessionEvent::ExportRequested)
            .await
            .download
        {
            Some(file) => {
                tracing::info!(filename = %file.filename, bytes = file.bytes.len(), "exporting books");
                ExportResponseDto::Ok(Attachment::new(file.bytes).filename(file.filename))
            }
            None => {
                tracing::error!("export produced no file");
                ExportResponseDto::InternalError(Json(ErrorDto {
                    message: "export produced no file".into(),
                }))
            }
        }
    }
}
