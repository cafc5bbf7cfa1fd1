//! Shelf-life estimation for pantry items.
//!
//! Rules are scanned in declaration order and the first rule with any keyword
//! contained in the lowercased ingredient name wins. Overlapping keywords
//! ("cream" vs "cream cheese", "egg" vs "eggplant") resolve by that order, so
//! the table must stay a list and keep its sequence.

use chrono::{Days, NaiveDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShelfLifeRule {
    pub keywords: &'static [&'static str],
    pub days: u32,
}

impl ShelfLifeRule {
    const fn new(keywords: &'static [&'static str], days: u32) -> Self {
        Self { keywords, days }
    }

    pub fn applies_to(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered_name.contains(*keyword))
    }
}

// Long-keeping staples (flour, sugar, rice, pasta, canned goods, oils, spices)
// have no rule and report no expiry.
pub const SHELF_LIFE_RULES: &[ShelfLifeRule] = &[
    // dairy
    ShelfLifeRule::new(&["milk"], 7),
    ShelfLifeRule::new(&["cream", "half and half"], 10),
    ShelfLifeRule::new(&["butter"], 21),
    ShelfLifeRule::new(&["yogurt", "yoghurt"], 14),
    ShelfLifeRule::new(&["sour cream"], 14),
    ShelfLifeRule::new(&["cream cheese"], 14),
    ShelfLifeRule::new(&["cottage cheese"], 7),
    ShelfLifeRule::new(&["hard cheese", "cheddar", "parmesan", "gouda", "swiss"], 30),
    ShelfLifeRule::new(&["soft cheese", "brie", "camembert", "feta"], 7),
    ShelfLifeRule::new(&["mozzarella"], 5),
    // eggs
    ShelfLifeRule::new(&["egg"], 35),
    // meat and fish
    ShelfLifeRule::new(&["chicken", "turkey", "ground"], 2),
    ShelfLifeRule::new(&["beef", "pork", "lamb", "steak"], 3),
    ShelfLifeRule::new(&["fish", "salmon", "tuna", "cod", "shrimp", "prawn"], 2),
    ShelfLifeRule::new(&["bacon", "sausage", "deli", "ham", "salami"], 7),
    ShelfLifeRule::new(&["cooked meat", "leftover"], 4),
    // produce that spoils quickly
    ShelfLifeRule::new(&["lettuce", "spinach", "arugula", "greens", "kale"], 7),
    ShelfLifeRule::new(&["strawberr", "raspberr", "blueberr", "blackberr"], 5),
    ShelfLifeRule::new(&["mushroom"], 7),
    ShelfLifeRule::new(&["avocado"], 4),
    ShelfLifeRule::new(&["tomato"], 7),
    ShelfLifeRule::new(&["broccoli", "cauliflower", "asparagus"], 5),
    ShelfLifeRule::new(&["corn"], 3),
    ShelfLifeRule::new(&["cucumber"], 7),
    ShelfLifeRule::new(&["fresh herb", "cilantro", "parsley", "basil", "mint", "dill"], 7),
    // longer lasting produce
    ShelfLifeRule::new(&["apple", "pear"], 30),
    ShelfLifeRule::new(&["orange", "lemon", "lime", "grapefruit"], 21),
    ShelfLifeRule::new(&["grape"], 14),
    ShelfLifeRule::new(&["carrot", "celery"], 21),
    ShelfLifeRule::new(&["onion", "shallot"], 60),
    ShelfLifeRule::new(&["garlic"], 90),
    ShelfLifeRule::new(&["potato", "sweet potato"], 30),
    ShelfLifeRule::new(&["cabbage"], 14),
    ShelfLifeRule::new(&["pepper", "bell pepper"], 14),
    ShelfLifeRule::new(&["zucchini", "squash"], 7),
    ShelfLifeRule::new(&["eggplant", "aubergine"], 7),
    // bread and baked goods
    ShelfLifeRule::new(&["bread", "bun", "roll", "bagel"], 7),
    ShelfLifeRule::new(&["tortilla", "wrap"], 7),
];

/// Returns the first matching rule for `name`, if any.
pub fn find_rule(name: &str) -> Option<&'static ShelfLifeRule> {
    let lowered = name.to_lowercase();
    SHELF_LIFE_RULES.iter().find(|rule| rule.applies_to(&lowered))
}

/// Estimated shelf life in days, or `None` when no rule covers the name.
pub fn estimate_shelf_life_days(name: &str) -> Option<u32> {
    find_rule(name).map(|rule| rule.days)
}

/// Expiry date derived from the acquisition date with calendar-day arithmetic.
pub fn estimate_expiry(name: &str, acquired_on: NaiveDate) -> Option<NaiveDate> {
    let days = estimate_shelf_life_days(name)?;
    acquired_on.checked_add_days(Days::new(u64::from(days)))
}
