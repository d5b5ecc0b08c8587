//! Live preview endpoint (`POST /preview`).
//!
//! Receives the client's form-encoded document text and returns the
//! converted HTML fragment. Each request gets a fresh scanner/parser
//! pair, so concurrent previews never share state.

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::warn;

use crate::server::GatewayState;

/// Form body posted by the client page.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// The markdown document under edit.
    pub textfield: String,
}

/// Handler for `POST /preview`.
pub async fn preview(
    State(_state): State<GatewayState>,
    Form(body): Form<PreviewRequest>,
) -> Html<String> {
    let rendered = markdown::render(&body.textfield);

    if rendered.truncated {
        warn!(
            input_chars = body.textfield.len(),
            "Preview input malformed; returning truncated fragment"
        );
    }

    Html(rendered.html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use markpreview_config::MarkPreviewConfig;
    use std::sync::Arc;

    fn state() -> GatewayState {
        GatewayState {
            config: Arc::new(MarkPreviewConfig::default()),
        }
    }

    #[tokio::test]
    async fn test_preview_converts_the_form_field() {
        let body = PreviewRequest {
            textfield: "# title".to_string(),
        };
        let Html(out) = preview(State(state()), Form(body)).await;
        assert_eq!(out, "<h1>title</h1>");
    }

    #[tokio::test]
    async fn test_preview_returns_partial_output_for_malformed_input() {
        let body = PreviewRequest {
            textfield: "# title\n*broken".to_string(),
        };
        let Html(out) = preview(State(state()), Form(body)).await;
        assert_eq!(out, "<h1>title</h1><br/>");
    }
}
