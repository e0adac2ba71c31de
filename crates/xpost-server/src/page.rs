// ============================================================================
// page — HTML for the login and compose pages
// ============================================================================

use xpost_core::AppConfig;

/// Favicon, as an inline SVG emoji
const PAGE_ICON: &str = "🛡️";

/// Feedback shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Values echoed back into the compose form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub text: String,
    pub quote_url: String,
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

fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Success(msg)) => {
            format!("<div class=\"notice success\">{}</div>", escape_html(msg))
        }
        Some(Notice::Error(msg)) => {
            format!("<div class=\"notice error\">{}</div>", escape_html(msg))
        }
        None => String::new(),
    }
}

fn layout(config: &AppConfig, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>">
    <style>
        body {{ font-family: sans-serif; max-width: 720px; margin: 40px auto; padding: 0 16px; }}
        textarea {{
            font-size: {font_size}px !important;
            width: 100%;
        }}
        input[type=text], input[type=password] {{ width: 100%; }}
        .notice {{ padding: 12px; margin: 12px 0; border-radius: 4px; }}
        .success {{ background: #e6f4ea; color: #1e4620; }}
        .error {{ background: #fdecea; color: #611a15; }}
        form.inline {{ display: inline; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(&config.page_title),
        icon = PAGE_ICON,
        font_size = config.textarea_font_size,
        body = body,
    )
}

/// Password form shown to locked sessions
pub fn login_page(config: &AppConfig, error: Option<&str>) -> String {
    let notice = error.map(|e| Notice::Error(format!("😕 {}", e)));
    let body = format!(
        r#"<h1>🔒 Reserved access</h1>
<p>Sign-in:</p>
{notice}
<form method="post" action="/login">
    <label for="password">Password</label>
    <input type="password" id="password" name="password" autofocus>
    <button type="submit">Submit</button>
</form>"#,
        notice = notice_html(notice.as_ref()),
    );
    layout(config, &body)
}

/// Compose form shown to unlocked sessions
pub fn compose_page(config: &AppConfig, form: &ComposeForm, notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<h1>Post on X</h1>
<p>Enter the text and optionally a URL to quote.</p>
{notice}
<form method="post" action="/post">
    <label for="text">Post text (max {max} chars)</label>
    <textarea id="text" name="text" maxlength="{max}" style="height: {height}px">{text}</textarea>
    <label for="quote_url">URL of the post to quote (optional)</label>
    <input type="text" id="quote_url" name="quote_url" placeholder="https://x.com/.../status/..." value="{quote}">
    <button type="submit">Post on X</button>
</form>
<form class="inline" method="post" action="/logout">
    <button type="submit">Logout</button>
</form>"#,
        notice = notice_html(notice),
        max = config.textarea_max_chars,
        height = config.textarea_height,
        text = escape_html(&form.text),
        quote = escape_html(&form.quote_url),
    );
    layout(config, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_layout_uses_config() {
        let config = AppConfig {
            page_title: "My <poster>".to_string(),
            textarea_font_size: 22,
            ..AppConfig::default()
        };
        let html = login_page(&config, None);

        assert!(html.contains("<title>My &lt;poster&gt;</title>"));
        assert!(html.contains("font-size: 22px !important;"));
        assert!(html.contains("🔒 Reserved access"));
        assert!(!html.contains("notice error"));
    }

    #[test]
    fn test_login_error() {
        let html = login_page(&AppConfig::default(), Some("Incorrect password"));
        assert!(html.contains("😕 Incorrect password"));
    }

    #[test]
    fn test_compose_page_bounds_and_echo() {
        let config = AppConfig {
            textarea_max_chars: 140,
            textarea_height: 250,
            ..AppConfig::default()
        };
        let form = ComposeForm {
            text: "a <script>".to_string(),
            quote_url: "https://x.com/a/status/1".to_string(),
        };
        let html = compose_page(&config, &form, Some(&Notice::Success("Posted".into())));

        assert!(html.contains("Post text (max 140 chars)"));
        assert!(html.contains("maxlength=\"140\""));
        assert!(html.contains("height: 250px"));
        assert!(html.contains("a &lt;script&gt;</textarea>"));
        assert!(html.contains("value=\"https://x.com/a/status/1\""));
        assert!(html.contains("notice success"));
    }
}
