use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// The single-page form. Variants, auth state and results are fetched from the API.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
