// Server-side HTML rendering of the session. Every function here is pure.

pub mod gallery;
pub mod page;
pub mod table;

use std::fmt::Write;

use crate::{
    catalog_client::BookRecord,
    domain::{
        mapping::{review_stars, star_rating},
        models::ViewMode,
    },
    session::SessionState,
};

/// Render the loaded books in the requested view.
pub fn render(state: &SessionState, mode: ViewMode) -> String {
    match mode {
        ViewMode::Table => table::render_table(state),
        ViewMode::Gallery => gallery::render_gallery(state),
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Five stars, `floor(rating)` of them filled, followed by the raw value.
pub(crate) fn star_rating_html(rating: f64) -> String {
    let stars = star_rating(rating);
    let mut out = String::from(r#"<div class="star-rating">"#);
    for i in 0..stars.total {
        let class = if i < stars.filled { "star filled" } else { "star" };
        let _ = write!(out, r#"<span class="{}">★</span>"#, class);
    }
    let _ = write!(out, r#"<span class="rating-value">({})</span></div>"#, rating);
    out
}

pub(crate) fn likes_html(likes: u64, with_label: bool) -> String {
    if with_label {
        format!(r#"<span class="likes-count">♥ {} likes</span>"#, likes)
    } else {
        format!(r#"<span class="likes-count">♥ {}</span>"#, likes)
    }
}

pub(crate) fn cover_html(book: &BookRecord, class: &str) -> String {
    format!(
        r#"<div class="{class}"><img src="{src}" alt="Book cover"><div class="book-overlay"><h5 class="book-title">{title}</h5><p class="book-author">{author}</p></div></div>"#,
        class = class,
        src = escape_html(&book.cover_url),
        title = escape_html(&book.title),
        author = escape_html(&book.author),
    )
}

pub(crate) fn reviews_html(book: &BookRecord) -> String {
    if book.review_list.is_empty() {
        return r#"<p class="text-muted">No reviews yet</p>"#.to_string();
    }
    let mut out = String::from(r#"<div class="reviews"><h5>Reviews</h5>"#);
    for review in &book.review_list {
        let _ = write!(
            out,
            r#"<div class="review"><div class="review-head"><strong>{reviewer}</strong><span class="review-stars">{stars}</span><small class="text-muted">{date}</small></div><p>{comment}</p></div>"#,
            reviewer = escape_html(&review.reviewer),
            stars = review_stars(review.rating).glyphs(),
            date = escape_html(&review.date),
            comment = escape_html(&review.comment),
        );
    }
    out.push_str("</div>");
    out
}

/// Expanded detail for the selected book, shared by both views.
pub(crate) fn detail_html(state: &SessionState, book: &BookRecord) -> String {
    format!(
        r#"<div class="book-detail"><div class="detail-side">{cover}<div class="detail-score">{stars}{likes}</div></div><div class="book-details"><h3>{title}</h3><p class="text-muted">by {author}</p><p class="small">{publisher} • ISBN: {isbn}</p><p>{description}</p><div class="book-metadata"><span class="badge">Language: {language}</span><span class="badge">Pages: {pages}</span><span class="badge">Published: {year}</span></div>{reviews}</div></div>"#,
        cover = cover_html(book, "book-cover"),
        stars = star_rating_html(book.rating),
        likes = likes_html(book.likes, true),
        title = escape_html(&book.title),
        author = escape_html(&book.author),
        publisher = escape_html(&book.publisher),
        isbn = escape_html(&book.isbn),
        description = escape_html(&book.description),
        language = state.settings.language.code().to_uppercase(),
        pages = book.pages,
        year = book.year,
        reviews = reviews_html(book),
    )
}

/// Button that toggles selection of `book` through the HTML form surface.
pub(crate) fn select_form_open(book: &BookRecord) -> String {
    format!(r#"<form method="post" action="/select/{}" class="select-form">"#, book.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_client::Review;
    use crate::session::test_support::book;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn star_rating_marks_filled_stars() {
        let html = star_rating_html(3.7);
        assert_eq!(html.matches("star filled").count(), 3);
        assert_eq!(html.matches("★").count(), 5);
        assert!(html.contains("(3.7)"));
    }

    #[test]
    fn no_reviews_message() {
        assert!(reviews_html(&book(1)).contains("No reviews yet"));
    }

    #[test]
    fn reviews_are_listed_in_order() {
        let mut b = book(1);
        b.review_list = vec![
            Review {
                reviewer: "First".into(),
                rating: 4,
                date: "2020-01-01".into(),
                comment: "good".into(),
            },
            Review {
                reviewer: "Second".into(),
                rating: 1,
                date: "2021-01-01".into(),
                comment: "<meh>".into(),
            },
        ];
        let html = reviews_html(&b);
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("★☆☆☆☆"));
        assert!(html.contains("&lt;meh&gt;"));
    }
}
