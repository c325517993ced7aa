//! The question form served over HTTP.
//!
//! Routes:
//! - GET /  - empty form
//! - POST / - form field `question`; the answer is shown below the form

use crate::engine::Engine;
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::Html,
    routing::get,
};
use log::{debug, info};
use serde::Deserialize;
use std::{io, net::SocketAddr, sync::Arc};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Project Samarth</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
        h1 { color: #2c3e50; }
        form { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        input[type="text"] { padding: 10px; border: 2px solid #ddd; border-radius: 4px; font-size: 16px; }
        button { padding: 10px 20px; background: #3498db; color: white; border: none; border-radius: 4px; cursor: pointer; font-size: 16px; }
        button:hover { background: #2980b9; }
        .answer { background: white; padding: 20px; margin-top: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); white-space: pre-wrap; font-family: monospace; }
    </style>
</head>
<body>
    <h1>🌾 Project Samarth – Multi-Query Agricultural Engine</h1>
    <form method="POST">
        <input type="text" name="question" placeholder="Ask multiple questions! (e.g., 'Highest rice production AND rainfall in Punjab')" size="70" required>
        <button type="submit">🔍 Ask</button>
    </form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// The whole page, with the answer block if there is an answer.
pub fn page(answer: Option<&str>) -> String {
    let mut html = PAGE_HEAD.to_owned();
    if let Some(answer) = answer {
        html.push_str("    <div class=\"answer\">");
        html.push_str(&escape_html(answer));
        html.push_str("</div>\n");
    }
    html.push_str(PAGE_TAIL);
    html
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionForm {
    pub question: Option<String>,
}

pub async fn show_form() -> Html<String> {
    Html(page(None))
}

pub async fn ask(
    State(engine): State<Arc<Engine>>,
    form: Result<Form<QuestionForm>, FormRejection>,
) -> Html<String> {
    // A body that is not a form counts as no question.
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            debug!(target: "samarth", "form rejected: {e}");
            QuestionForm::default()
        }
    };
    let question = form.question.unwrap_or_default();
    let answer = engine.answer(&question);
    Html(page(Some(&answer)))
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/", get(show_form).post(ask))
        .with_state(engine)
}

pub async fn serve(engine: Arc<Engine>, addr: SocketAddr) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "samarth", "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(engine)).await
}
