use std::fmt::Write;

use super::{detail_html, escape_html, select_form_open};
use crate::session::SessionState;

const COLUMNS: usize = 5;

/// Compact rows; the selected row is followed by its detail panel.
pub fn render_table(state: &SessionState) -> String {
    let mut out = String::from(
        r#"<div class="table-container"><table class="books"><thead><tr><th>#</th><th>ISBN</th><th>Title</th><th>Author(s)</th><th>Publisher</th></tr></thead><tbody>"#,
    );
    for book in &state.books {
        let selected = state.is_selected(book);
        let _ = write!(
            out,
            r#"<tr class="{class}"><td>{form}<button type="submit" class="row-link">{index}</button></form></td><td>{isbn}</td><td>{title}</td><td>{author}</td><td>{publisher}</td></tr>"#,
            class = if selected { "selected-row" } else { "" },
            form = select_form_open(book),
            index = book.index,
            isbn = escape_html(&book.isbn),
            title = escape_html(&book.title),
            author = escape_html(&book.author),
            publisher = escape_html(&book.publisher),
        );
        if selected {
            let _ = write!(
                out,
                r#"<tr class="detail-row"><td colspan="{}">{}</td></tr>"#,
                COLUMNS,
                detail_html(state, book)
            );
        }
    }
    out.push_str("</tbody></table></div>");
    out
}
