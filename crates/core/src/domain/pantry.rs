use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::recipe::{join_quantity, split_quantity, IngredientName};
use crate::errors::DomainError;
use crate::expiry::{classify, compare_for_listing, ExpiryState, ExpiryStatus};
use crate::shelf_life::estimate_expiry;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub name: IngredientName,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub added_on: Option<NaiveDate>,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl PantryItem {
    /// New item acquired on `today`; the expiry estimate is fixed here and never recomputed.
    pub fn acquired(name: IngredientName, quantity: impl Into<String>, today: NaiveDate) -> Self {
        let expires_on = estimate_expiry(name.as_str(), today);
        Self { name, quantity: quantity.into(), added_on: Some(today), expires_on }
    }

    /// Item carried over from storage that predates quantities and dates.
    pub fn legacy(name: IngredientName) -> Self {
        Self { name, quantity: String::new(), added_on: None, expires_on: None }
    }

    pub fn expiry_status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        classify(self.expires_on, today)
    }
}

/// Raw pantry form input: a name plus an optional amount and unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryInput {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

impl PantryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_amount(mut self, amount: impl Into<String>, unit: impl Into<String>) -> Self {
        self.amount = amount.into();
        self.unit = unit.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PantryListing<'a> {
    /// Position in the stored sequence, used for remove/edit.
    pub index: usize,
    pub item: &'a PantryItem,
    pub status: Option<ExpiryStatus>,
    /// Expired, due today, or due soon; drives highlighting.
    pub attention: bool,
}

impl PantryListing<'_> {
    pub fn state(&self) -> ExpiryState {
        ExpiryState::of(self.status.as_ref())
    }
}

/// The user's on-hand ingredients, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pantry {
    items: Vec<PantryItem>,
}

impl Pantry {
    pub fn new(items: Vec<PantryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PantryItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item whose name equals `name`, ignoring case and surrounding whitespace.
    pub fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().position(|item| item.name.folded() == wanted)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Adds an item acquired on `today`.
    ///
    /// Names are compared case-insensitively on the full text, so "Red Onion" and
    /// "Onion" are distinct while "flour" is rejected next to "Flour". A rejected
    /// insert leaves the pantry untouched.
    pub fn add(
        &mut self,
        input: PantryInput,
        today: NaiveDate,
    ) -> Result<&PantryItem, DomainError> {
        let name = IngredientName::parse(input.name.trim())?;
        if self.contains_name(name.as_str()) {
            return Err(DomainError::DuplicatePantryItem { name: name.as_str().to_string() });
        }

        let quantity = join_quantity(&input.amount, &input.unit);
        self.items.push(PantryItem::acquired(name, quantity, today));
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    pub fn remove(&mut self, index: usize) -> Option<PantryItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Starts editing an item: it is removed right away and its fields are handed back
    /// for resubmission through [`Pantry::add`]. Abandoning the edit loses the item.
    pub fn begin_edit(&mut self, index: usize) -> Option<PantryInput> {
        let item = self.remove(index)?;
        let parts = split_quantity(&item.quantity);
        Some(PantryInput { name: item.name.into(), amount: parts.amount, unit: parts.unit })
    }

    /// Items in display order: expired, due today, due soon, fine, untracked; then by name.
    pub fn listing(&self, today: NaiveDate) -> Vec<PantryListing<'_>> {
        let mut listing: Vec<PantryListing<'_>> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let status = item.expiry_status(today);
                let attention = ExpiryState::of(status.as_ref()).needs_attention();
                PantryListing { index, item, status, attention }
            })
            .collect();

        listing.sort_by(|left, right| {
            compare_for_listing(
                left.item.name.as_str(),
                left.status.as_ref(),
                right.item.name.as_str(),
                right.status.as_ref(),
            )
        });
        listing
    }

    pub fn expired_count(&self, today: NaiveDate) -> usize {
        self.items
            .iter()
            .filter_map(|item| item.expiry_status(today))
            .filter(|status| status.state == ExpiryState::Expired)
            .count()
    }

    /// Parses the stored JSON document. Missing or unreadable data yields an empty pantry,
    /// and bare-string entries from older versions become items without dates.
    pub fn from_json(raw: Option<&str>) -> Self {
        raw.and_then(|raw| Self::parse_json(raw).ok()).unwrap_or_default()
    }

    /// Strict parse of a stored document, normalizing legacy bare-name entries.
    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str::<Option<Vec<StoredPantryEntry>>>(raw)?;
        let items = entries.unwrap_or_default().into_iter();
        Ok(Self::new(items.filter_map(StoredPantryEntry::normalize).collect()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPantryEntry {
    Name(String),
    Item(StoredPantryItem),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPantryItem {
    name: String,
    #[serde(default)]
    quantity: Option<String>,
    #[serde(default)]
    added_on: Option<NaiveDate>,
    #[serde(default)]
    expires_on: Option<NaiveDate>,
}

impl StoredPantryEntry {
    fn normalize(self) -> Option<PantryItem> {
        match self {
            Self::Name(name) => IngredientName::parse(name).ok().map(PantryItem::legacy),
            Self::Item(item) => {
                let name = IngredientName::parse(item.name).ok()?;
                Some(PantryItem {
                    name,
                    quantity: item.quantity.unwrap_or_default(),
                    added_on: item.added_on,
                    expires_on: item.expires_on,
                })
            }
        }
    }
}
