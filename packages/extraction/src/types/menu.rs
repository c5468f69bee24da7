//! Menu document types - the structured result served and cached per URL/day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Allergen placeholder used when the page lists none ("ask the staff").
pub const ALLERGENS_UNKNOWN: &str = "Musíte se zeptat obsluhu";

/// A restaurant's menu for one logical day.
///
/// Field declaration order is the serialized key order, so `restaurant_name`
/// is always the first key. Keys the model emitted that have no field here are
/// kept in `extra` and serialized after the known keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,

    /// Logical date (`YYYY-MM-DD`) the menu applies to
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub day_of_week: String,

    /// Items in the order the page lists them
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,

    #[serde(default)]
    pub daily_menu: bool,

    #[serde(default)]
    pub source_url: String,

    /// Advisory text, set only on public holidays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MenuDocument {
    /// Create an empty document for a source and date.
    pub fn new(source_url: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            restaurant_name: None,
            date: date.format("%Y-%m-%d").to_string(),
            day_of_week: weekday_name(date.weekday()).to_string(),
            menu_items: Vec::new(),
            daily_menu: false,
            source_url: source_url.into(),
            info: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the restaurant name.
    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = Some(name.into());
        self
    }

    /// Append a menu item.
    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.menu_items.push(item);
        self
    }

    /// Mark the document as a daily (lunch) menu.
    pub fn daily(mut self) -> Self {
        self.daily_menu = true;
        self
    }
}

/// A single dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub name: String,

    /// Ingredient or preparation text when the page gives one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price in whole currency units; `None` when it could not be parsed
    #[serde(default)]
    pub price: Option<i64>,

    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(default)]
    pub weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegan: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetarian: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gluten_free: Option<bool>,
}

impl MenuItem {
    /// Create an item with a category and name.
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            description: None,
            price: None,
            allergens: Vec::new(),
            weight: None,
            vegan: None,
            vegetarian: None,
            gluten_free: None,
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the allergen list.
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the portion weight.
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Text the dietary correction inspects: name plus description, lower-cased.
    pub fn ingredient_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {}", self.name, description).to_lowercase(),
            None => self.name.to_lowercase(),
        }
    }
}

/// Error document returned (but never cached) when extraction fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedMenu {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

/// English weekday name, as the menu documents spell it.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
