// Presentation-side models derived from catalog records

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Gallery,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Gallery => "gallery",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "table" => Some(ViewMode::Table),
            "gallery" => Some(ViewMode::Gallery),
            _ => None,
        }
    }
}

/// One row of the CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub index: u64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub reviews: String,
    pub likes: u64,
}

/// A file handed to the user for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Star glyphs for a 0-5 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub filled: u8,
    pub total: u8,
}
