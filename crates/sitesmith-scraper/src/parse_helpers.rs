//! Small regex helpers shared by the markup heuristics. These are not an HTML
//! parser; they tolerate malformed markup by simply finding nothing.

use std::sync::LazyLock;

use regex::Regex;

static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>|<!--.*?-->").expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\s([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid regex")
});

/// Value of `attr` inside a single tag, quoted with either quote style. The
/// first occurrence wins; names compare case-insensitively.
pub(crate) fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    ATTR_RE
        .captures_iter(tag)
        .find(|c| c[1].eq_ignore_ascii_case(attr))
        .and_then(|c| c.get(2).or_else(|| c.get(3)))
        .map(|m| decode_entities(m.as_str().trim()))
}

pub(crate) fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content").filter(|c| !c.is_empty())
        } else {
            None
        }
    })
}

/// Visible text of a fragment: scripts, styles and comments dropped, tags
/// removed, entities decoded, whitespace collapsed.
pub(crate) fn strip_tags(fragment: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(fragment, " ");
    let without_tags = TAG_RE.replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&quot;", "\"")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Resolve `candidate` against `base_url`, keeping only `http(s)` results.
///
/// Handles absolute, protocol-relative (`//cdn...`), root-relative (`/img...`)
/// and document-relative forms. `data:`, `blob:` and similar are dropped.
pub(crate) fn absolutize_url(base_url: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim().replace("&amp;", "&");
    if candidate.is_empty() {
        return None;
    }
    let base = reqwest::Url::parse(base_url).ok()?;
    let resolved = base.join(&candidate).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_attr_reads_both_quote_styles() {
        let tag = r#"<img src="/a.png" alt='Joe"s logo' class="site-logo">"#;
        assert_eq!(extract_attr(tag, "src").as_deref(), Some("/a.png"));
        assert_eq!(extract_attr(tag, "alt").as_deref(), Some("Joe\"s logo"));
        assert_eq!(extract_attr(tag, "class").as_deref(), Some("site-logo"));
    }

    #[test]
    fn extract_attr_does_not_confuse_data_src() {
        let tag = r#"<img data-src="/lazy.jpg" src="/real.jpg">"#;
        assert_eq!(extract_attr(tag, "src").as_deref(), Some("/real.jpg"));
        assert_eq!(extract_attr(tag, "data-src").as_deref(), Some("/lazy.jpg"));
    }

    #[test]
    fn extract_attr_ignores_unquoted_and_embedded_names() {
        let tag = r#"<a width=100 title="x href='/bad'" HREF="/good">"#;
        assert_eq!(extract_attr(tag, "href").as_deref(), Some("/good"));
        assert_eq!(extract_attr(tag, "width"), None);
        assert_eq!(extract_attr(tag, "title").as_deref(), Some("x href='/bad'"));
    }

    #[test]
    fn strip_tags_drops_scripts_and_collapses_whitespace() {
        let html = "<p>Hello <b>world</b></p><script>var x = 1;</script>\n\n<p>Tom &amp; Jerry</p>";
        assert_eq!(strip_tags(html), "Hello world Tom & Jerry");
    }

    #[test]
    fn absolutize_handles_relative_forms() {
        let base = "https://acme.com/about/team";
        assert_eq!(
            absolutize_url(base, "//cdn.acme.com/a.png").as_deref(),
            Some("https://cdn.acme.com/a.png")
        );
        assert_eq!(
            absolutize_url(base, "/img/b.png").as_deref(),
            Some("https://acme.com/img/b.png")
        );
        assert_eq!(
            absolutize_url(base, "c.png").as_deref(),
            Some("https://acme.com/about/c.png")
        );
    }

    #[test]
    fn absolutize_skips_non_http_sources() {
        let base = "https://acme.com/";
        assert!(absolutize_url(base, "data:image/png;base64,iVBORw0KGgo=").is_none());
        assert!(absolutize_url(base, "javascript:void(0)").is_none());
        assert!(absolutize_url(base, "").is_none());
    }

    #[test]
    fn find_meta_content_matches_case_insensitively() {
        let html = r#"<meta NAME="Description" content="We fix pipes.">"#;
        assert_eq!(
            find_meta_content(html, "name", "description").as_deref(),
            Some("We fix pipes.")
        );
    }
}
