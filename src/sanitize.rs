//! Translation text cleanup.
//!
//! Translations come back from the API as HTML fragments carrying footnote
//! references such as `<sup foot_note=123>1</sup>`. Those markers are dropped
//! entirely, then every remaining tag and attribute is stripped by ammonia.
//! Whatever `<`, `>` or `&` survives as text is entity-escaped, so the result
//! never contains live markup and sanitizing it again is a no-op.

use ammonia::Builder;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<sup[^>]*>.*?</sup>").expect("footnote pattern is valid")
});

static NO_MARKUP: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut b = Builder::empty();
    b.strip_comments(true)
        .clean_content_tags(HashSet::from(["script", "style"]));
    b
});

pub fn sanitize(input: Option<&str>) -> String {
    let Some(text) = input.filter(|t| !t.is_empty()) else {
        return String::new();
    };
    let cleaned = FOOTNOTE.replace_all(text, "");
    NO_MARKUP.clean(&cleaned).to_string()
}
