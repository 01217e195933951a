use std::fmt::Write;

use super::{escape_html, render};
use crate::{
    domain::{
        models::ViewMode,
        settings::{Language, THRESHOLD_MAX, THRESHOLD_MIN},
    },
    session::SessionState,
};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 1.5rem; }
.settings { display: flex; gap: 1rem; align-items: flex-end; margin-bottom: 1rem; }
.toolbar { display: flex; justify-content: space-between; margin-bottom: 1rem; }
.toolbar form { display: inline; }
.active { font-weight: bold; }
table.books { border-collapse: collapse; width: 100%; }
table.books td, table.books th { border: 1px solid #dee2e6; padding: .4rem; }
.selected-row { background: #e7f1ff; }
.row-link, .card-link { border: 0; background: none; cursor: pointer; padding: 0; }
.card-title, .card-subtitle { display: block; text-align: left; }
.card-title { font-weight: bold; }
.gallery-view { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
.book-card { border: 1px solid #dee2e6; border-radius: 6px; }
.selected-card { border-color: #007bff; }
.book-cover, .book-cover-container { position: relative; }
.book-overlay { position: absolute; bottom: 0; color: #fff; background: rgba(0,0,0,.5); width: 100%; }
.star { color: #ccc; } .star.filled { color: #f5b301; }
.badge { background: #6c757d; color: #fff; border-radius: 4px; padding: 0 .4rem; margin-right: .4rem; }
.text-muted { color: #6c757d; }
"#;

/// The whole browsing page: settings form, view toggle, export, books and the load-more control.
pub fn render_page(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Book Browser</title><style>{}</style></head><body><h2>Book Browser</h2>"#,
        STYLE
    );
    out.push_str(&settings_form(state));
    out.push_str(&toolbar(state));
    out.push_str(&render(state, state.view_mode));
    out.push_str(&footer(state));
    out.push_str("</body></html>");
    out
}

fn settings_form(state: &SessionState) -> String {
    let settings = &state.settings;
    let mut options = String::new();
    for language in Language::ALL {
        let _ = write!(
            options,
            r#"<option value="{}"{}>{}</option>"#,
            language.code(),
            if language == settings.language { " selected" } else { "" },
            escape_html(language.label())
        );
    }
    format!(
        r#"<form method="post" action="/settings" class="settings"><label>Language/Region <select name="language">{options}</select></label><label>Seed <input name="seed" placeholder="Seed" value="{seed}"></label><label>Likes: {likes} <input type="range" name="likes" min="{min}" max="{max}" step="0.1" value="{likes}"></label><label>Reviews: {reviews} <input type="range" name="reviews" min="{min}" max="{max}" step="0.1" value="{reviews}"></label><button type="submit">Apply</button></form>"#,
        options = options,
        seed = escape_html(&settings.seed),
        likes = settings.likes,
        reviews = settings.reviews,
        min = THRESHOLD_MIN,
        max = THRESHOLD_MAX,
    )
}

fn toolbar(state: &SessionState) -> String {
    let mut out = String::from(r#"<div class="toolbar"><nav class="view-toggle">"#);
    for (mode, label) in [
        (ViewMode::Table, "Table View"),
        (ViewMode::Gallery, "Gallery View"),
    ] {
        let _ = write!(
            out,
            r#"<form method="post" action="/view/{}"><button type="submit" class="{}">{}</button></form>"#,
            mode.name(),
            if mode == state.view_mode { "active" } else { "" },
            label
        );
    }
    out.push_str(r#"</nav><a class="export" href="/export.csv" download>Export to CSV</a></div>"#);
    out
}

fn footer(state: &SessionState) -> String {
    if state.has_more {
        r#"<form method="post" action="/more" class="load-more"><button type="submit">Load more</button></form>"#.to_string()
    } else {
        r#"<p class="end-message">You've seen all books</p>"#.to_string()
    }
}
