//! HTML helpers: visible text and the image-only menu heuristic.

use scraper::{Html, Selector};

/// Pages with less visible text than this and at least one image are treated
/// as image-only menus.
pub const MIN_TEXT_CHARS: usize = 100;

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Visible text of an HTML document: trimmed text nodes joined by single spaces.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document_text(&document)
}

fn document_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .map(|name| HIDDEN_ELEMENTS.contains(&name))
            .unwrap_or(false);
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

/// Extract the `<title>` of a document.
pub fn title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Number of `<img>` elements in the document.
fn image_count(document: &Html) -> usize {
    match Selector::parse("img") {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => 0,
    }
}

/// Whether the page is dominated by images (menu published as a picture).
///
/// True when the visible text is shorter than [`MIN_TEXT_CHARS`] characters
/// and the page embeds at least one image.
pub fn is_mostly_image(html: &str) -> bool {
    let document = Html::parse_document(html);
    let text_chars = document_text(&document).chars().count();
    text_chars < MIN_TEXT_CHARS && image_count(&document) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"
            <html><head><title>Menu</title><style>body { color: red; }</style></head>
            <body>
              <h1>Polední menu</h1>
              <script>var tracking = "nope";</script>
              <p>Svíčková   na smetaně</p>
            </body></html>
        "#;

        let text = visible_text(html);
        assert!(text.contains("Polední menu"));
        assert!(text.contains("Svíčková   na smetaně"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_title() {
        assert_eq!(
            title("<html><head><title> U Zlatého tygra </title></head></html>"),
            Some("U Zlatého tygra".to_string())
        );
        assert_eq!(title("<html><body>No title</body></html>"), None);
    }

    #[test]
    fn test_image_only_page_detected() {
        let html = r#"<html><body><h2>Menu</h2><img src="/menu-tyden.jpg"></body></html>"#;
        assert!(is_mostly_image(html));
    }

    #[test]
    fn test_short_page_without_images_is_not_image_only() {
        let html = "<html><body><p>Zavřeno</p></body></html>";
        assert!(!is_mostly_image(html));
    }

    #[test]
    fn test_text_menu_with_images_is_not_image_only() {
        let dishes = "Hovězí vývar s nudlemi 45 Kč. Kuřecí řízek, bramborový salát 159 Kč. ";
        let html = format!(
            r#"<html><body><img src="/logo.png"><p>{}</p><img src="/interior.jpg"></body></html>"#,
            dishes.repeat(3)
        );
        assert!(!is_mostly_image(&html));
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes but only 60 characters of text
        let text = "č".repeat(60);
        let html = format!(r#"<html><body><p>{}</p><img src="/a.jpg"></body></html>"#, text);
        assert!(is_mostly_image(&html));
    }
}
