//! Server-rendered HTML pages
//!
//! Pages are built with `format!` around a shared layout. Every piece of
//! user-supplied text must pass through [`html_escape`] before interpolation.

pub mod batches;
pub mod species;

use axum::http::StatusCode;

/// Top navigation tab to highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Batches,
    Species,
    None,
}

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; max-width: 1000px; margin: 0 auto; padding: 20px; }
        h1 { color: #2d5016; }
        .header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px; }
        .nav { margin-bottom: 20px; }
        .nav a { margin-right: 15px; padding: 8px 15px; text-decoration: none; background: #f0f0f0; border-radius: 4px; }
        .nav a.active { background: #4CAF50; color: white; }
        .btn { padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; text-decoration: none; display: inline-block; }
        .btn-primary { background: #4CAF50; color: white; }
        .btn-secondary { background: #2196F3; color: white; font-size: 12px; padding: 5px 10px; }
        .btn-muted { background: #999; color: white; margin-left: 10px; }
        .btn-danger { background: #f44336; color: white; font-size: 12px; padding: 5px 10px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #4CAF50; color: white; }
        tr:hover { background-color: #f5f5f5; }
        .actions { display: flex; gap: 10px; }
        .actions form { margin: 0; }
        form.record { background: #f9f9f9; padding: 20px; border-radius: 5px; max-width: 600px; }
        .form-group { margin-bottom: 15px; }
        label { display: block; margin-bottom: 5px; font-weight: bold; }
        input[type="text"], input[type="number"], input[type="date"], select { width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px; box-sizing: border-box; }
        .step-row { display: flex; gap: 10px; align-items: center; margin-bottom: 8px; }
        .step-row select, .step-row input[type="number"] { width: auto; }
        .step-row label { display: inline; font-weight: normal; }
        .form-actions { margin-top: 20px; }
        .error { background: #fdecea; border: 1px solid #f44336; padding: 15px; border-radius: 5px; }
"#;

/// Wrap page content in the shared document shell
pub fn layout(title: &str, active: Nav, content: &str) -> String {
    let tab = |nav: Nav| if nav == active { r#" class="active""# } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Plant Tracker</title>
    <style>{style}</style>
</head>
<body>
    <div class="nav">
        <a href="/"{batches_tab}>Batches</a>
        <a href="/species"{species_tab}>Species</a>
    </div>
{content}
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        batches_tab = tab(Nav::Batches),
        species_tab = tab(Nav::Species),
        content = content,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let content = format!(
        r#"    <h1>{code} {reason}</h1>
    <div class="error">{message}</div>
    <p><a href="/">Back to batches</a></p>"#,
        code = status.as_u16(),
        reason = reason,
        message = html_escape(message),
    );
    layout(reason, Nav::None, &content)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
