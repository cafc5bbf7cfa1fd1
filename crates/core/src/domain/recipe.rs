use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;

/// Free-text ingredient name, guaranteed non-empty after trimming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IngredientName(String);

impl IngredientName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::input("name", "ingredient name must not be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded, trimmed form used by every comparison.
    pub fn folded(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl TryFrom<String> for IngredientName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque recipe identifier. Older exports used millisecond timestamps.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Tsp,
    Tbsp,
    FlOz,
    Cup,
    Pint,
    Quart,
    Gallon,
    Oz,
    Lb,
    G,
    Kg,
    Ml,
    L,
    Pinch,
    Dash,
    Handful,
    Clove,
    Slice,
    Piece,
    Can,
    Package,
    ToTaste,
    Unitless,
}

impl Unit {
    /// Volume, weight, common cooking units, then the unitless choices.
    pub const ALL: [Unit; 23] = [
        Unit::Tsp,
        Unit::Tbsp,
        Unit::FlOz,
        Unit::Cup,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Oz,
        Unit::Lb,
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Pinch,
        Unit::Dash,
        Unit::Handful,
        Unit::Clove,
        Unit::Slice,
        Unit::Piece,
        Unit::Can,
        Unit::Package,
        Unit::ToTaste,
        Unit::Unitless,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tsp => "tsp",
            Self::Tbsp => "tbsp",
            Self::FlOz => "fl oz",
            Self::Cup => "cup",
            Self::Pint => "pint",
            Self::Quart => "quart",
            Self::Gallon => "gallon",
            Self::Oz => "oz",
            Self::Lb => "lb",
            Self::G => "g",
            Self::Kg => "kg",
            Self::Ml => "ml",
            Self::L => "l",
            Self::Pinch => "pinch",
            Self::Dash => "dash",
            Self::Handful => "handful",
            Self::Clove => "clove",
            Self::Slice => "slice",
            Self::Piece => "piece",
            Self::Can => "can",
            Self::Package => "package",
            Self::ToTaste => "to taste",
            Self::Unitless => "",
        }
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|unit| unit.as_str() == wanted).ok_or_else(|| {
            DomainError::input("unit", format!("unsupported unit `{}`", value.trim()))
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount and unit recovered from a combined quantity string such as `"2 cup"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantityParts {
    pub amount: String,
    pub unit: String,
}

/// Joins an amount and a unit with a single space, skipping empty parts.
pub fn join_quantity(amount: &str, unit: &str) -> String {
    [amount.trim(), unit.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits quantity text on spaces; a numeric first token becomes the amount and
/// everything else is the unit.
pub fn split_quantity(text: &str) -> QuantityParts {
    let parts: Vec<&str> = text.split(' ').collect();
    let first = parts.first().copied().unwrap_or_default();
    let is_numeric = !first.is_empty() && first.parse::<f64>().is_ok();

    if is_numeric {
        QuantityParts { amount: first.to_string(), unit: parts[1..].join(" ") }
    } else {
        QuantityParts { amount: String::new(), unit: parts.join(" ") }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: IngredientName,
    #[serde(default)]
    pub quantity: String,
}

impl RecipeIngredient {
    pub fn new(name: IngredientName, quantity: impl Into<String>) -> Self {
        Self { name, quantity: quantity.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub meal: String,
    #[serde(default)]
    pub cuisine: String,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub complexity: u8,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn complexity_stars(&self) -> Option<String> {
        if self.complexity == 0 {
            return None;
        }
        let filled = usize::from(self.complexity.min(5));
        Some(format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)))
    }

    /// Path of the recipe image relative to the site root, when one is set.
    pub fn image_path(&self) -> Option<String> {
        (!self.image.is_empty()).then(|| format!("images/{}", self.image))
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u8>::deserialize(deserializer)?.unwrap_or_default())
}
