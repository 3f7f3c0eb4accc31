use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use std::fmt::Write;
use std::sync::Arc;

use crate::{
    middleware::request_id::RequestId,
    models::{selection::PageQuery, SelectionState},
    routes::AppState,
    services::controller::{self, MovieCard, PageView},
};

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; color: white; font-family: 'Segoe UI', sans-serif;
       background: linear-gradient(rgba(0,0,0,0.75), rgba(0,0,0,0.75)), #111;
       background-size: cover; background-position: center; background-attachment: fixed; }
main { max-width: 1100px; margin: 2rem auto; padding: 2rem; border-radius: 20px;
       background-color: rgba(0,0,0,0.55); backdrop-filter: blur(8px); }
h1 { text-align: center; font-weight: 800; }
.tagline { text-align: center; font-size: 18px; }
form { display: flex; gap: 1rem; align-items: flex-end; }
label { color: #f5c518; font-size: 16px; font-weight: 600; display: block; }
select { width: 100%; padding: 0.6rem; border-radius: 14px; border: 2px solid #f5c518;
         background-color: rgba(0,0,0,0.75); color: white; }
button { background: linear-gradient(135deg, #f5c518, #ffb703); color: black; font-weight: 700;
         border-radius: 14px; padding: 0.7rem 1.4rem; border: none; cursor: pointer; }
.section-title { font-size: 24px; font-weight: 700; margin: 30px 0 15px; color: #f5c518;
                 border-left: 5px solid #f5c518; padding-left: 12px; }
.selected { display: grid; grid-template-columns: 1fr 4fr; gap: 1rem; }
.cards { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; }
.movie-card { background: rgba(255,255,255,0.08); border-radius: 16px; padding: 12px;
              text-align: center; color: white; text-decoration: none; display: block; }
.movie-card img { width: 100%; border-radius: 12px; }
.movie-title { margin-top: 10px; font-size: 15px; font-weight: 600; }
.message { padding: 1rem; border-radius: 12px; background: rgba(200,60,60,0.4); margin-top: 1rem; }
footer { text-align: center; color: gray; }
"#;

/// Handler for the interactive page
///
/// The selection lives in the query string: `movie` is sent by the submit button,
/// `pick` by a recommendation card.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let selection = controller::apply(SelectionState::default(), query.into_event());

    tracing::info!(
        request_id = %request_id,
        selected = selection.selected().unwrap_or(""),
        "Rendering page"
    );

    let view = controller::build_page(&state.artifacts, &state.metadata, &selection).await;
    Html(render(&view))
}

/// Renders the page view as a complete HTML document
pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Movie Recommendation System</title><style>");
    html.push_str(STYLE);
    if let Some(backdrop) = &view.backdrop_url {
        let _ = write!(
            html,
            "body {{ background: linear-gradient(rgba(0,0,0,0.75), rgba(0,0,0,0.75)), url(\"{}\"); \
             background-size: cover; background-position: center; background-attachment: fixed; }}",
            css_string(backdrop)
        );
    }
    html.push_str("</style></head><body><main>");
    html.push_str("<h1>🎬 Movie Recommendation System</h1>");
    html.push_str("<p class=\"tagline\">Find movies similar to your favorite one 🍿</p>");

    html.push_str("<form method=\"get\" action=\"/\"><div style=\"flex: 4\">");
    html.push_str("<label for=\"movie\">🎥 Select a movie</label><select id=\"movie\" name=\"movie\">");
    for (index, title) in view.titles.iter().enumerate() {
        let selected = if index == view.default_index { " selected" } else { "" };
        let title = escape(title);
        let _ = write!(html, "<option value=\"{title}\"{selected}>{title}</option>");
    }
    html.push_str("</select></div><div style=\"flex: 1\">");
    html.push_str("<button type=\"submit\">✨ Recommend</button></div></form>");

    if let Some(message) = &view.message {
        let _ = write!(html, "<div class=\"message\">{}</div>", escape(message));
    }

    if let Some(selected) = &view.selected {
        section(&mut html, "Selected Movie");
        html.push_str("<div class=\"selected\"><div>");
        card(&mut html, selected, false);
        let _ = write!(
            html,
            "</div><div><h3 style=\"margin-top:40px;\">{}</h3></div></div>",
            escape(&selected.title)
        );

        section(&mut html, "Recommended Movies");
        html.push_str("<div class=\"cards\">");
        for recommendation in &view.recommendations {
            card(&mut html, recommendation, true);
        }
        html.push_str("</div>");
    }

    html.push_str("</main><footer><hr><p>🎬 Movie Recommendation System</p></footer></body></html>");
    html
}

fn section(html: &mut String, title: &str) {
    let _ = write!(html, "<div class=\"section-title\">{}</div>", escape(title));
}

/// Poster card; recommendation cards link back to the page with `pick=<title>`
fn card(html: &mut String, movie: &MovieCard, link: bool) {
    let poster = format!(
        "<img src=\"{}\" alt=\"{}\">",
        escape(&movie.poster_url),
        escape(&movie.title)
    );
    if link {
        let _ = write!(
            html,
            "<a class=\"movie-card\" href=\"/?pick={}\">{}<div class=\"movie-title\">{}</div></a>",
            escape(&urlencoding::encode(&movie.title)),
            poster,
            escape(&movie.title)
        );
    } else {
        let _ = write!(html, "<div class=\"movie-card\">{}</div>", poster);
    }
}

/// Escapes text for a double-quoted CSS string inside `<style>`.
///
/// `<style>` is raw text, so HTML entities would be taken literally; CSS hex escapes are
/// used instead, and `<` is escaped so the value cannot close the element.
fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' | '<' | '>' | '\n' | '\r' => {
                let _ = write!(out, "\\{:x} ", c as u32);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text for use in HTML content and double-quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
