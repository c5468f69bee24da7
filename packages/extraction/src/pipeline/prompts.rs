//! LLM prompts for menu extraction.

use crate::types::menu::ALLERGENS_UNKNOWN;

/// Page text beyond this many characters is cut before prompting.
pub const MAX_PAGE_CHARS: usize = 6000;

/// System message for the extraction call.
pub const SYSTEM_PROMPT: &str =
    "You are a data extraction assistant. You answer with a single JSON object and nothing else.";

/// Prompt for extracting one day's menu from page text.
pub const MENU_PROMPT: &str = r#"From the following restaurant webpage text, extract today's menu (date: {date}) in valid JSON format.
If no allergens were found for a dish, write "{no_allergens}" to its allergens field.

Dietary flags must agree with the dish description:
- "vegan" and "vegetarian" are false whenever the dish contains meat, poultry, fish, seafood or meat stock.
- "vegan" is false whenever the dish contains dairy, eggs or honey.
- "gluten_free" is false whenever the dish contains bread, dumplings, breadcrumbs, pasta, pastry or wheat flour.
- Use null when the page gives no information.

IMPORTANT: Return only valid JSON - no markdown, no explanations.

JSON schema:
{
  "restaurant_name": string,
  "date": "{date}",
  "day_of_week": string,
  "menu_items": [
    {
      "category": string,
      "name": string,
      "description": string | null,
      "price": integer,
      "allergens": [string],
      "weight": string | null,
      "vegan": boolean | null,
      "vegetarian": boolean | null,
      "gluten_free": boolean | null
    }
  ],
  "daily_menu": true,
  "source_url": "{source_url}"
}

Text (truncated to {max_chars} chars):
{text}"#;

/// Format the menu prompt for a page.
pub fn format_menu_prompt(text: &str, source_url: &str, date: &str) -> String {
    let text = truncate_chars(text, MAX_PAGE_CHARS);

    // Page text goes in last so braces in it are never treated as placeholders.
    MENU_PROMPT
        .replace("{date}", date)
        .replace("{no_allergens}", ALLERGENS_UNKNOWN)
        .replace("{source_url}", source_url)
        .replace("{max_chars}", &MAX_PAGE_CHARS.to_string())
        .replace("{text}", text)
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
