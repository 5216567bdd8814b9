//! Embedded browser client
//!
//! A single self-contained HTML page compiled into the binary and served
//! at `/app`. It talks to the JSON API on the same origin.

/// The browser client page
pub const APP_HTML: &str = include_str!("index.html");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_posts_to_api() {
        assert!(APP_HTML.contains("/generate_recipes"));
        assert!(APP_HTML.contains("<!DOCTYPE html>"));
    }
}
