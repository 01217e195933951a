// Mapping from catalog DTOs to presentation models

use super::models::{ExportRow, StarRating};
use crate::catalog_client::BookRecord;

const MAX_STARS: u8 = 5;

/// Whole stars only, matching how the listing has always drawn ratings.
pub fn star_rating(rating: f64) -> StarRating {
    let filled = if rating.is_finite() {
        rating.floor().clamp(0.0, MAX_STARS as f64) as u8
    } else {
        0
    };
    StarRating {
        filled,
        total: MAX_STARS,
    }
}

pub fn review_stars(rating: u8) -> StarRating {
    StarRating {
        filled: rating.min(MAX_STARS),
        total: MAX_STARS,
    }
}

impl StarRating {
    pub fn glyphs(&self) -> String {
        let empty = self.total.saturating_sub(self.filled);
        format!(
            "{}{}",
            "★".repeat(self.filled as usize),
            "☆".repeat(empty as usize)
        )
    }
}

pub fn map_book_to_export_row(book: &BookRecord) -> ExportRow {
    // Passed through as sent; a missing figure leaves the cell empty.
    let reviews = book.reviews.map(|r| r.to_string()).unwrap_or_default();
    ExportRow {
        index: book.index,
        isbn: book.isbn.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
        publisher: book.publisher.clone(),
        reviews,
        likes: book.likes,
    }
}
