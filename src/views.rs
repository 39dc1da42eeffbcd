//! Server-rendered HTML pages
//!
//! Every page shares one layout: navigation, flash messages, then the page
//! body. All interpolated text goes through `escape_html`.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::constants::FLASH_COOKIE;
use crate::models::Account;
use crate::session::{clear_cookie, CurrentAccount, Flash};

/// Escape text for safe interpolation into HTML
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Per-request rendering context
#[derive(Debug, Default)]
pub struct PageContext {
    pub account: Option<Account>,
    pub messages: Vec<String>,
    /// A flash cookie was consumed and must be cleared
    consumed_flash: bool,
}

impl PageContext {
    pub fn new(account: Option<CurrentAccount>, flash: Flash) -> Self {
        let consumed_flash = flash.0.is_some();
        Self {
            account: account.map(|CurrentAccount(a)| a),
            messages: flash.0.into_iter().collect(),
            consumed_flash,
        }
    }

    /// Add a message shown on this very render
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

/// A rendered HTML page
pub struct Page {
    html: String,
    clear_flash: bool,
}

impl Page {
    fn render(ctx: &PageContext, title: &str, body: &str) -> Self {
        Self {
            html: layout(ctx, title, body),
            clear_flash: ctx.consumed_flash,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        if self.clear_flash {
            (
                [(header::SET_COOKIE, clear_cookie(FLASH_COOKIE))],
                Html(self.html),
            )
                .into_response()
        } else {
            Html(self.html).into_response()
        }
    }
}

fn layout(ctx: &PageContext, title: &str, body: &str) -> String {
    let account_links = match &ctx.account {
        Some(account) => format!(
            r#"<span class="account">{}</span> <a href="/logout">Logout</a>"#,
            escape_html(&account.email)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };

    let flashes: String = ctx
        .messages
        .iter()
        .map(|m| format!(r#"<li class="flash">{}</li>"#, escape_html(m)))
        .collect();
    let flashes = if flashes.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="flashes">{}</ul>"#, flashes)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Merchant Secret Sauce</title>
</head>
<body>
<nav>
<a href="/">Home</a> <a href="/about">About</a> <a href="/downloads">Downloads</a> <a href="/community">Community</a>
{account_links}
</nav>
{flashes}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        account_links = account_links,
        flashes = flashes,
        body = body,
    )
}

// =============================================================================
// Pages
// =============================================================================

pub fn home(ctx: &PageContext) -> Page {
    Page::render(
        ctx,
        "Home",
        r#"<h1>Merchant Secret Sauce</h1>
<p>Tools and resources for merchants. Create a free account to access the downloads.</p>
<p><a href="/downloads">Go to downloads</a></p>"#,
    )
}

pub fn community(ctx: &PageContext) -> Page {
    Page::render(
        ctx,
        "Community",
        r#"<h1>Community</h1>
<p>Share tips, ask questions and meet other merchants.</p>"#,
    )
}

pub fn downloads(ctx: &PageContext, files: &[String]) -> Page {
    let list = if files.is_empty() {
        "<p>No files are available yet.</p>".to_string()
    } else {
        let items: String = files
            .iter()
            .map(|name| {
                format!(
                    r#"<li><a href="/download/{}">{}</a></li>"#,
                    escape_html(&url_path_segment(name)),
                    escape_html(name)
                )
            })
            .collect();
        format!(r#"<ul class="downloads">{}</ul>"#, items)
    };

    Page::render(ctx, "Downloads", &format!("<h1>Downloads</h1>\n{}", list))
}

pub fn login(ctx: &PageContext) -> Page {
    Page::render(
        ctx,
        "Login",
        &credentials_form("Login", "/login", "Log in", "No account yet? <a href=\"/register\">Register</a>"),
    )
}

pub fn register(ctx: &PageContext) -> Page {
    Page::render(
        ctx,
        "Register",
        &credentials_form("Register", "/register", "Create account", "Already registered? <a href=\"/login\">Log in</a>"),
    )
}

fn credentials_form(heading: &str, action: &str, submit: &str, footer: &str) -> String {
    format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit}</button>
</form>
<p>{footer}</p>"#
    )
}

/// Standalone error page (no session lookups on the error path)
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    layout(
        &PageContext::default(),
        &title,
        &format!("<h1>{}</h1>\n<p>{}</p>", escape_html(&title), escape_html(message)),
    )
}

/// Percent-encode a file name for use as a single URL path segment
pub(crate) fn url_path_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> PageContext {
        PageContext::default()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_url_path_segment() {
        assert_eq!(url_path_segment("guide.pdf"), "guide.pdf");
        assert_eq!(url_path_segment("my file#1.zip"), "my%20file%231.zip");
    }

    #[test]
    fn test_layout_anonymous_shows_login_links() {
        let page = home(&anonymous());
        assert!(page.html().contains(r#"href="/login""#));
        assert!(page.html().contains(r#"href="/register""#));
        assert!(!page.html().contains(r#"href="/logout""#));
    }

    #[test]
    fn test_layout_logged_in_shows_logout() {
        let ctx = PageContext {
            account: Some(Account {
                id: 1,
                email: "a@example.com".to_string(),
            }),
            ..Default::default()
        };
        let page = home(&ctx);
        assert!(page.html().contains(r#"href="/logout""#));
        assert!(page.html().contains("a@example.com"));
    }

    #[test]
    fn test_messages_are_escaped() {
        let ctx = anonymous().with_message("<b>hi</b>");
        let page = login(&ctx);
        assert!(page.html().contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_downloads_lists_files() {
        let files = vec!["a b.zip".to_string(), "guide.pdf".to_string()];
        let page = downloads(&anonymous(), &files);
        assert!(page.html().contains(r#"href="/download/a%20b.zip""#));
        assert!(page.html().contains(r#"href="/download/guide.pdf""#));
    }

    #[test]
    fn test_downloads_empty() {
        let page = downloads(&anonymous(), &[]);
        assert!(page.html().contains("No files are available yet."));
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "missing");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("missing"));
    }
}
