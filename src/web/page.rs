use base64::{engine::general_purpose, Engine};

use crate::models::{AnalysisOutcome, UploadedFile};

const PAGE_TEMPLATE: &str = include_str!("../../static/index.html");

/// Everything the single page can show after an action.
#[derive(Default)]
pub struct PageView<'a> {
    pub question: &'a str,
    pub preview: Option<&'a UploadedFile>,
    pub outcome: Option<&'a AnalysisOutcome>,
    pub error: Option<String>,
}

pub fn render(view: &PageView<'_>) -> String {
    let preview = view.preview.map(render_preview).unwrap_or_default();
    let error = view
        .error
        .as_deref()
        .map(|message| format!(r#"<div class="error" role="alert">{}</div>"#, escape_html(message)))
        .unwrap_or_default();
    let results = view.outcome.map(render_results).unwrap_or_default();
    let question = escape_html(view.question);

    fill_template(
        PAGE_TEMPLATE,
        &[
            ("preview", preview.as_str()),
            ("question", question.as_str()),
            ("error", error.as_str()),
            ("results", results.as_str()),
        ],
    )
}

fn render_preview(file: &UploadedFile) -> String {
    format!(
        r#"<figure id="uploaded-preview"><img src="data:{};base64,{}" alt="Uploaded Image."><figcaption>Uploaded Image.</figcaption></figure>"#,
        escape_html(&file.content_type),
        general_purpose::STANDARD.encode(&file.bytes)
    )
}

fn render_results(outcome: &AnalysisOutcome) -> String {
    let mut html = String::from(r#"<section class="results"><h2>Analysis Results:</h2>"#);
    html.push_str("<h3>Total Calories:</h3>");
    html.push_str(&format!(
        r#"<div class="result" id="calories">{}</div>"#,
        escape_html(&outcome.calories)
    ));

    if let Some(answer) = &outcome.answer {
        html.push_str("<h3>Answer to your question:</h3>");
        html.push_str(&format!(
            r#"<div class="result" id="answer">{}</div>"#,
            escape_html(answer)
        ));
    }

    html.push_str("</section>");
    html
}

/// Single pass over `{{slot}}` markers, so inserted text is never re-scanned.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match slots.iter().find(|(slot, _)| *slot == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
