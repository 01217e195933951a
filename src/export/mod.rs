// CSV export of the loaded book sequence

use crate::{
    catalog_client::BookRecord,
    domain::{
        mapping::map_book_to_export_row,
        models::{ExportFile, ExportRow},
        settings::Settings,
    },
};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CSV_HEADER: [&str; 7] = [
    "Index",
    "ISBN",
    "Title",
    "Author",
    "Publisher",
    "Reviews",
    "Likes",
];

/// `books-{language}-{seed}.csv`. The seed is free text, so anything that
/// cannot sit in a header or a file name becomes `_`.
pub fn export_filename(settings: &Settings) -> String {
    let seed: String = settings
        .seed
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '"' | '\\' | '/') {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("books-{}-{}.csv", settings.language.code(), seed)
}

/// Serialize every loaded book, in load order, regardless of the view mode.
#[tracing::instrument(level = "debug", skip(books, settings), fields(rows = books.len()))]
pub fn export_current_set(books: &[BookRecord], settings: &Settings) -> ExportFile {
    let rows: Vec<ExportRow> = books.iter().map(map_book_to_export_row).collect();
    let mut out = String::new();
    write_record(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));
    for row in &rows {
        write_record(
            &mut out,
            [
                row.index.to_string(),
                row.isbn.clone(),
                row.title.clone(),
                row.author.clone(),
                row.publisher.clone(),
                row.reviews.clone(),
                row.likes.to_string(),
            ],
        );
    }
    ExportFile {
        filename: export_filename(settings),
        content_type: CSV_CONTENT_TYPE,
        bytes: out.into_bytes(),
    }
}

fn write_record(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line = fields
        .into_iter()
        .map(|f| escape_field(&f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

// RFC 4180: quote when the field holds a separator, quote or line break; double inner quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::Language;

    fn book(index: u64, title: &str) -> BookRecord {
        BookRecord {
            index,
            isbn: format!("978-{}", index),
            title: title.into(),
            author: "Ann Author".into(),
            publisher: "Pub House".into(),
            cover_url: String::new(),
            description: "ignored".into(),
            pages: 100,
            year: 2001,
            rating: 4.0,
            likes: index * 2,
            reviews: Some(3.0),
            review_list: vec![],
        }
    }

    #[test]
    fn filename_uses_language_and_seed() {
        let settings = Settings {
            language: Language::Fr,
            seed: "77".into(),
            ..Settings::default()
        };
        assert_eq!(export_filename(&settings), "books-fr-77.csv");
    }

    #[test]
    fn filename_replaces_unsafe_seed_characters() {
        let named = |seed: &str| {
            export_filename(&Settings {
                seed: seed.into(),
                ..Settings::default()
            })
        };
        assert_eq!(named("a\"b"), "books-en-a_b.csv");
        assert_eq!(named("x\ny"), "books-en-x_y.csv");
        assert_eq!(named("../etc\\p"), "books-en-.._etc_p.csv");
        assert_eq!(named("seed with spaces"), "books-en-seed with spaces.csv");
    }

    #[test]
    fn one_row_per_book_in_load_order() {
        let books = vec![book(3, "C"), book(1, "A"), book(2, "B")];
        let file = export_current_set(&books, &Settings::default());
        let text = String::from_utf8(file.bytes).unwrap();
        let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Index,ISBN,Title,Author,Publisher,Reviews,Likes");
        assert_eq!(lines[1], "3,978-3,C,Ann Author,Pub House,3,6");
        assert_eq!(lines[2], "1,978-1,A,Ann Author,Pub House,3,2");
        assert_eq!(lines[3], "2,978-2,B,Ann Author,Pub House,3,4");
        assert_eq!(file.filename, "books-en-2535653423.csv");
        assert_eq!(file.content_type, CSV_CONTENT_TYPE);
    }

    #[test]
    fn empty_set_still_has_header() {
        let file = export_current_set(&[], &Settings::default());
        assert_eq!(
            String::from_utf8(file.bytes).unwrap(),
            "Index,ISBN,Title,Author,Publisher,Reviews,Likes\r\n"
        );
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("Smith, John"), "\"Smith, John\"");
        assert_eq!(escape_field("The \"Best\" Book"), "\"The \"\"Best\"\" Book\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }
}
