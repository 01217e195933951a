use poem_openapi::{
    ApiResponse, Enum, Object,
    payload::{Attachment, Json},
};

use crate::{
    catalog_client::{BookRecord, Review},
    domain::{
        models::ViewMode,
        settings::{SettingKey, Settings},
    },
    session::SessionState,
};

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ReviewDto {
    pub reviewer: String,
    /// 0 - 5
    pub rating: u8,
    pub date: String,
    pub comment: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BookDto {
    pub index: u64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_url: String,
    pub description: String,
    pub pages: u32,
    pub year: i32,
    pub rating: f64,
    pub likes: u64,
    pub reviews: Option<f64>,
    pub review_list: Vec<ReviewDto>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SettingsDto {
    /// Region code, e.g. "en"
    pub language: String,
    pub seed: String,
    pub likes: f64,
    pub reviews: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[oai(rename_all = "lowercase")]
pub enum ViewModeDto {
    Table,
    Gallery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[oai(rename_all = "lowercase")]
pub enum SettingKeyDto {
    Language,
    Seed,
    Likes,
    Reviews,
}

#[derive(Debug, Clone, Object)]
pub struct SettingValueDto {
    /// Raw value, parsed according to the key
    pub value: String,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SessionDto {
    pub settings: SettingsDto,
    pub epoch: u64,
    /// Next page that will be requested
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub selected: Option<u64>,
    pub view_mode: ViewModeDto,
    pub books: Vec<BookDto>,
}

#[derive(Debug, Clone, Object)]
pub struct ErrorDto {
    /// Human-readable error message
    pub message: String,
}

impl From<String> for ErrorDto {
    fn from(message: String) -> Self {
        ErrorDto { message }
    }
}

#[derive(ApiResponse)]
pub enum SessionResponseDto {
    /// Current session snapshot
    #[oai(status = 200)]
    Ok(Json<SessionDto>),

    /// Rejected input
    #[oai(status = 400)]
    BadRequest(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum ExportResponseDto {
    /// CSV of every loaded book
    #[oai(status = 200)]
    Ok(Attachment<Vec<u8>>),

    #[oai(status = 500)]
    InternalError(Json<ErrorDto>),
}

impl From<&Review> for ReviewDto {
    fn from(r: &Review) -> Self {
        ReviewDto {
            reviewer: r.reviewer.clone(),
            rating: r.rating,
            date: r.date.clone(),
            comment: r.comment.clone(),
        }
    }
}

impl From<&BookRecord> for BookDto {
    fn from(b: &BookRecord) -> Self {
        BookDto {
            index: b.index,
            isbn: b.isbn.clone(),
            title: b.title.clone(),
            author: b.author.clone(),
            publisher: b.publisher.clone(),
            cover_url: b.cover_url.clone(),
            description: b.description.clone(),
            pages: b.pages,
            year: b.year,
            rating: b.rating,
            likes: b.likes,
            reviews: b.reviews,
            review_list: b.review_list.iter().map(ReviewDto::from).collect(),
        }
    }
}

impl From<&Settings> for SettingsDto {
    fn from(s: &Settings) -> Self {
        SettingsDto {
            language: s.language.code().to_string(),
            seed: s.seed.clone(),
            likes: s.likes,
            reviews: s.reviews,
        }
    }
}

impl From<ViewMode> for ViewModeDto {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Table => ViewModeDto::Table,
            ViewMode::Gallery => ViewModeDto::Gallery,
        }
    }
}

impl From<ViewModeDto> for ViewMode {
    fn from(mode: ViewModeDto) -> Self {
        match mode {
            ViewModeDto::Table => ViewMode::Table,
            ViewModeDto::Gallery => ViewMode::Gallery,
        }
    }
}

impl From<SettingKeyDto> for SettingKey {
    fn from(key: SettingKeyDto) -> Self {
        match key {
            SettingKeyDto::Language => SettingKey::Language,
            SettingKeyDto::Seed => SettingKey::Seed,
            SettingKeyDto::Likes => SettingKey::Likes,
            SettingKeyDto::Reviews => SettingKey::Reviews,
        }
    }
}

impl From<&SessionState> for SessionDto {
    fn from(state: &SessionState) -> Self {
        SessionDto {
            settings: SettingsDto::from(&state.settings),
            epoch: state.epoch,
            page: state.page,
            has_more: state.has_more,
            loading: state.loading,
            selected: state.selected,
            view_mode: state.view_mode.into(),
            books: state.books.iter().map(BookDto::from).collect(),
        }
    }
}
