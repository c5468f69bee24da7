//! Dietary flag correction.
//!
//! Models tend to mark a dish vegetarian because its name sounds light. The
//! flags are checked against the dish text and forced to `false` when an
//! ingredient contradicts them. Flags are never set to `true` here.

use crate::types::menu::MenuItem;

/// Meat, poultry and fish stems (Czech and English).
const MEAT_OR_FISH: &[&str] = &[
    // Czech
    "maso", "masa", "masem", "masov", "vepř", "hověz", "kuř", "krůt", "kachn", "kachní", "husa",
    "husí", "telec", "jehně", "zvěřin", "srnč", "kančí", "králík", "slanin", "šunk", "klobás",
    "párek", "párky", "párk", "salám", "špek", "uzen", "játr", "jater", "sekaná", "řízek", "ryb",
    "losos", "tuňák", "tresk", "pstruh", "kapr", "sumec", "candát", "krevet", "sardin", "ančovič",
    "tatarák", "gulá", "svíčk", "žebír", "žebr", "karbanát", "čevab", "kebab", "kotlet", "plec",
    "panenk",
    // English
    "meat", "beef", "pork", "chicken", "turkey", "duck", "goose", "veal", "lamb", "venison",
    "bacon", "ham", "sausage", "salami", "steak", "burger", "fish", "salmon", "tuna", "cod",
    "trout", "carp", "shrimp", "prawn", "anchov", "seafood", "ribs",
];

/// Dairy and egg stems.
const DAIRY_OR_EGG: &[&str] = &[
    // Czech
    "sýr", "sýrov", "mléko", "mléč", "mlék", "smetan", "másl", "tvaroh", "jogurt", "parmazán",
    "mozzarell", "niva", "hermelín", "eidam", "vejce", "vejci", "vajíč", "vaječ", "med",
    // English
    "cheese", "milk", "cream", "butter", "yogurt", "yoghurt", "egg", "honey", "parmesan",
];

/// Wheat-based ingredient stems.
const GLUTEN: &[&str] = &[
    // Czech
    "chléb", "chleb", "knedl", "strouhank", "trojobal", "těstovin", "špaget", "nudl", "lasagn",
    "pečiv", "rohlík", "housk", "bageta", "toast", "krutón", "mouk", "pšeni", "palačink", "lívan",
    "smažen", "řízek", "pizz", "kuskus", "bulgur",
    // English
    "bread", "dumpling", "breadcrumb", "pasta", "spaghetti", "noodle", "penne", "lasagna",
    "toast", "bun", "croissant", "crouton", "flour", "wheat", "pancake", "tortilla", "pizza", "couscous",
    "schnitzel",
];

/// Words that start with an ingredient stem but are not that ingredient.
const FALSE_FRIENDS: &[&str] = &[
    "eggplant", "butternut", "meatless", "rybíz", "medvěd", "medailon", "bunch",
    "masala", "plech",
];

/// Force dietary flags to agree with the dish text.
pub fn correct_dietary_flags(item: &mut MenuItem) {
    let text = item.ingredient_text();

    if mentions(&text, MEAT_OR_FISH) {
        item.vegan = Some(false);
        item.vegetarian = Some(false);
    } else if mentions(&text, DAIRY_OR_EGG) {
        item.vegan = Some(false);
    }

    if mentions(&text, GLUTEN) {
        item.gluten_free = Some(false);
    }
}

/// Whether any word of `text` starts with one of `stems`.
fn mentions(text: &str, stems: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .filter(|word| !FALSE_FRIENDS.iter().any(|f| word.starts_with(f)))
        .any(|word| stems.iter().any(|stem| word.starts_with(stem)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, description: Option<&str>) -> MenuItem {
        let mut item = MenuItem::new("Hlavní jídlo", name);
        item.description = description.map(str::to_string);
        item.vegan = Some(true);
        item.vegetarian = Some(true);
        item.gluten_free = Some(true);
        item
    }

    #[test]
    fn test_meat_clears_vegan_and_vegetarian() {
        let mut dish = item("Kuřecí prsa na grilu", Some("s rýží"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegan, Some(false));
        assert_eq!(dish.vegetarian, Some(false));
        assert_eq!(dish.gluten_free, Some(true));
    }

    #[test]
    fn test_dairy_clears_only_vegan() {
        let mut dish = item("Smažený sýr", Some("hranolky, tatarská omáčka"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegan, Some(false));
        assert_eq!(dish.vegetarian, Some(true));
    }

    #[test]
    fn test_dumplings_clear_gluten_free() {
        let mut dish = item("Svíčková na smetaně", Some("houskový knedlík, brusinky"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.gluten_free, Some(false));
        assert_eq!(dish.vegan, Some(false));
        assert_eq!(dish.vegetarian, Some(false));
    }

    #[test]
    fn test_czech_meat_dishes_are_not_vegetarian() {
        for name in [
            "Svíčková na smetaně",
            "Grilovaná žebírka s křenem",
            "Vepřová žebra BBQ",
            "Karbanátek s bramborovou kaší",
            "Čevabčiči s hořčicí",
            "Kebab talíř",
            "Vepřová kotleta na rožni",
            "Pečená plec s zelím",
            "Vepřová panenka s pepřovou omáčkou",
            "Smoked ribs",
        ] {
            let mut dish = item(name, None);
            correct_dietary_flags(&mut dish);

            assert_eq!(dish.vegetarian, Some(false), "{}", name);
            assert_eq!(dish.vegan, Some(false), "{}", name);
        }
    }

    #[test]
    fn test_breaded_and_wheat_dishes_are_not_gluten_free() {
        for name in [
            "Smažený sýr",
            "Kuřecí řízek",
            "Pizza margherita",
            "Kuskus se zeleninou",
            "Bulgur s cizrnou",
            "Couscous salad",
        ] {
            let mut dish = item(name, None);
            correct_dietary_flags(&mut dish);

            assert_eq!(dish.gluten_free, Some(false), "{}", name);
        }
    }

    #[test]
    fn test_baking_tray_is_not_meat() {
        let mut dish = item("Zelenina z plechu", Some("brambory, cuketa"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegetarian, Some(true));
        assert_eq!(dish.vegan, Some(true));
    }

    #[test]
    fn test_english_keywords() {
        let mut dish = item("Grilled salmon", Some("with butter and bread"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegetarian, Some(false));
        assert_eq!(dish.gluten_free, Some(false));
    }

    #[test]
    fn test_plant_dish_keeps_flags() {
        let mut dish = item("Pečená eggplant s rýží", Some("čočka, rajčata, koriandr"));
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegan, Some(true));
        assert_eq!(dish.vegetarian, Some(true));
        assert_eq!(dish.gluten_free, Some(true));
    }

    #[test]
    fn test_absent_flags_stay_absent_without_contradiction() {
        let mut dish = MenuItem::new("Polévka", "Čočková polévka");
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegan, None);
        assert_eq!(dish.vegetarian, None);
        assert_eq!(dish.gluten_free, None);
    }

    #[test]
    fn test_absent_flags_forced_false_on_contradiction() {
        let mut dish = MenuItem::new("Hlavní jídlo", "Vepřový řízek");
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegan, Some(false));
        assert_eq!(dish.vegetarian, Some(false));
        assert_eq!(dish.gluten_free, Some(false));
    }

    #[test]
    fn test_absent_flags_forced_false_only_where_contradicted() {
        let mut dish = MenuItem::new("Hlavní jídlo", "Kuřecí prsa s rýží");
        correct_dietary_flags(&mut dish);

        assert_eq!(dish.vegetarian, Some(false));
        assert_eq!(dish.gluten_free, None);
    }
}
