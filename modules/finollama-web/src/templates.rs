use finollama_common::{Accuracy, FactCheckPayload};

use crate::ExploreView;

/// Render the landing page.
pub fn render_home() -> String {
    let content = format!(
        r#"<div class="container">
    <h2 style="margin-bottom:8px;">Check the facts in an article</h2>
    <p class="lead">Paste a link to a news article or blog post. Finollama reads the main text,
    asks a language model to list the claims it makes, and marks each one as accurate,
    accurate but needing context, or misleading.</p>
    {form}
    <p class="hint">Results are cached per URL. A page re-checked within five minutes is served
    from the cache; after that it is re-read, and the model is only asked again if the text changed.</p>
</div>"#,
        form = url_form("")
    );

    build_page("Home", &content)
}

/// Render the explore page: the form, plus an error or a result when present.
pub fn render_explore(view: &ExploreView) -> String {
    let error_html = match &view.error {
        Some(e) => format!(r#"<div class="error-banner">{}</div>"#, html_escape(e)),
        None => String::new(),
    };

    let source_html = match view.source {
        Some(source) => format!(
            r#"<div class="meta-row"><span>Checked <a href="{url}" target="_blank" rel="noopener">{url}</a></span><span class="source">{source}</span></div>"#,
            url = html_escape(&view.url),
        ),
        None => String::new(),
    };

    let facts_html = view.facts.as_ref().map(render_facts).unwrap_or_default();

    let article_html = if view.content.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="card"><details><summary>Article text</summary><div class="article">{}</div></details></div>"#,
            html_escape(&view.content)
        )
    };

    let content = format!(
        r#"<div class="container">
    <h2 style="margin-bottom:16px;">Explore</h2>
    {form}
    {error_html}
    {source_html}
    {facts_html}
    {article_html}
</div>"#,
        form = url_form(&view.url)
    );

    build_page("Explore", &content)
}

fn render_facts(payload: &FactCheckPayload) -> String {
    let mut facts: Vec<_> = payload.facts.iter().collect();
    facts.sort_by_key(|f| f.accuracy.severity());

    let rows: String = facts
        .iter()
        .map(|f| {
            format!(
                r#"<tr><td>{fact}</td><td><span class="badge badge-{class}">{label}</span></td><td class="explanation">{explanation}</td></tr>"#,
                fact = html_escape(&f.fact),
                class = badge_class(f.accuracy),
                label = f.accuracy.as_str(),
                explanation = html_escape(&f.explanation),
            )
        })
        .collect();

    let tally = format!(
        "{} misleading, {} need context, {} accurate",
        payload.count(Accuracy::Misleading),
        payload.count(Accuracy::ContextRequired),
        payload.count(Accuracy::Accurate),
    );

    format!(
        r#"<div class="card">
    <h3 style="margin-bottom:8px;">Summary</h3>
    <p class="summary">{summary}</p>
</div>
<div class="card">
    <h3 style="margin-bottom:4px;">Facts</h3>
    <p class="hint">{tally}</p>
    <table><thead><tr><th>Fact</th><th>Verdict</th><th>Explanation</th></tr></thead><tbody>{rows}</tbody></table>
</div>"#,
        summary = html_escape(&payload.summary),
    )
}

// --- Helpers ---

fn badge_class(accuracy: Accuracy) -> &'static str {
    match accuracy {
        Accuracy::Accurate => "accurate",
        Accuracy::ContextRequired => "context",
        Accuracy::Misleading => "misleading",
    }
}

fn url_form(value: &str) -> String {
    format!(
        r#"<form method="post" action="/explore" class="url-form">
    <input type="text" name="url" placeholder="https://example.com/article" value="{}" autofocus>
    <button type="submit" class="action-btn">Check</button>
</form>"#,
        html_escape(value)
    )
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Finollama</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.header nav a{{color:#ccc;text-decoration:none;margin-left:20px;font-size:14px;}}
.header nav a:hover{{color:#fff;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
.lead{{color:#444;font-size:15px;line-height:1.5;margin-bottom:20px;}}
.hint{{color:#888;font-size:13px;margin:8px 0;}}
.url-form{{display:flex;gap:8px;margin-bottom:16px;}}
.url-form input{{flex:1;padding:8px 12px;border:1px solid #ccc;border-radius:4px;font-size:14px;}}
.card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.card .summary{{color:#333;font-size:14px;line-height:1.5;}}
.card table{{width:100%;font-size:14px;border-collapse:collapse;}}
.card th{{text-align:left;color:#666;font-weight:600;padding:6px 8px;border-bottom:1px solid #eee;}}
.card td{{padding:8px;border-bottom:1px solid #f3f3f3;vertical-align:top;}}
.card .explanation{{color:#555;font-size:13px;}}
.article{{white-space:pre-wrap;font-size:13px;color:#444;margin-top:8px;}}
.badge{{display:inline-block;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;white-space:nowrap;}}
.badge-accurate{{background:#e8f5e9;color:#2e7d32;}}
.badge-context{{background:#fff3e0;color:#e65100;}}
.badge-misleading{{background:#fce4ec;color:#c62828;}}
.meta-row{{display:flex;gap:12px;align-items:center;font-size:12px;color:#888;margin:8px 0 12px;}}
.meta-row a{{color:#0066cc;}}
.source{{background:#f0f0f0;padding:2px 8px;border-radius:10px;color:#555;}}
.action-btn{{display:inline-block;padding:6px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;text-decoration:none;font-size:13px;font-weight:500;cursor:pointer;}}
.action-btn:hover{{background:#004499;}}
.error-banner{{background:#fff8e1;border:1px solid #ffecb3;padding:8px 12px;border-radius:4px;font-size:13px;color:#795548;margin-bottom:12px;}}
</style>
</head>
<body>
<div class="header">
    <h1>Finollama</h1>
    <nav><a href="/">Home</a><a href="/explore">Explore</a></nav>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
