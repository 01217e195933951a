use std::fmt::Write;

use super::{
    cover_html, detail_html, escape_html, likes_html, select_form_open, star_rating_html,
};
use crate::session::SessionState;

/// Card grid with cover overlay and publisher/year footer.
pub fn render_gallery(state: &SessionState) -> String {
    let mut out = String::from(r#"<div class="gallery-view">"#);
    for book in &state.books {
        let selected = state.is_selected(book);
        let _ = write!(
            out,
            r#"<div class="book-card{selected_class}">{cover}<div class="card-body">{form}<button type="submit" class="card-link"><span class="card-title">{title}</span><span class="card-subtitle">{author}</span></button></form><div class="card-score">{stars}{likes}</div></div><div class="card-footer">{publisher} • {year}</div>"#,
            selected_class = if selected { " selected-card" } else { "" },
            form = select_form_open(book),
            cover = cover_html(book, "book-cover-container"),
            title = escape_html(&book.title),
            author = escape_html(&book.author),
            stars = star_rating_html(book.rating),
            likes = likes_html(book.likes, false),
            publisher = escape_html(&book.publisher),
            year = book.year,
        );
        if selected {
            out.push_str(&detail_html(state, book));
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionEvent, reduce, test_support::books};

    #[test]
    fn cards_carry_footer_metadata() {
        let state = SessionState {
            books: books(1, 2),
            ..SessionState::default()
        };
        let html = render_gallery(&state);
        assert_eq!(html.matches("class=\"book-card").count(), 2);
        assert!(html.contains("Test House • 2010"));
        assert!(html.contains("♥ 2"));
        assert!(!html.contains("selected-card"));
    }

    #[test]
    fn select_button_holds_only_inline_content() {
        let state = SessionState {
            books: books(1, 1),
            ..SessionState::default()
        };
        let html = render_gallery(&state);
        let start = html.find(r#"<button type="submit" class="card-link">"#).unwrap();
        let end = start + html[start..].find("</button>").unwrap();
        let button = &html[start..end];
        assert!(button.contains("Book 1"));
        for block in ["<div", "<h5", "<h6", "<p", "<img"] {
            assert!(!button.contains(block), "{block} inside button");
        }
        // cover sits outside the form
        assert!(html.find("book-cover-container").unwrap() < start);
    }

    #[test]
    fn selected_card_shows_detail() {
        let state = SessionState {
            books: books(1, 2),
            ..SessionState::default()
        };
        let (state, _) = reduce(state, SessionEvent::BookSelected(1));
        let html = render_gallery(&state);
        assert_eq!(html.matches("selected-card").count(), 1);
        assert!(html.contains("Description of book 1"));
        assert!(html.contains("No reviews yet"));
    }
}
