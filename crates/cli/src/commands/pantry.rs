use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use whatcanicook_core::domain::pantry::{Pantry, PantryInput, PantryItem, PantryListing};
use whatcanicook_core::errors::{ApplicationError, DomainError};

use crate::commands::{persistence_failure, with_kitchen, CommandResult};

#[derive(Debug, Serialize)]
struct PantryView<'a> {
    count: usize,
    expired: usize,
    summary: String,
    items: Vec<PantryListing<'a>>,
}

#[derive(Debug, Serialize)]
struct AddedItem<'a> {
    message: String,
    item: &'a PantryItem,
}

#[derive(Debug, Serialize)]
struct EditDraft {
    message: String,
    draft: PantryInput,
}

/// `"(3 · 1 expired)"`, or empty for an empty pantry.
pub fn summary(pantry: &Pantry, today: NaiveDate) -> String {
    if pantry.is_empty() {
        return String::new();
    }
    match pantry.expired_count(today) {
        0 => format!("({})", pantry.len()),
        expired => format!("({} · {expired} expired)", pantry.len()),
    }
}

pub fn list(today: NaiveDate) -> CommandResult {
    with_kitchen("pantry list", |kitchen| async move {
        let pantry = kitchen.pantry.load().await;
        let view = PantryView {
            count: pantry.len(),
            expired: pantry.expired_count(today),
            summary: summary(&pantry, today),
            items: pantry.listing(today),
        };
        CommandResult::report("pantry list", &view)
    })
}

pub fn add(input: PantryInput, today: NaiveDate) -> CommandResult {
    with_kitchen("pantry add", |kitchen| async move {
        let mut pantry = kitchen.pantry.load().await;
        let item = match pantry.add(input, today) {
            Ok(item) => item.clone(),
            Err(error) => {
                return CommandResult::from_application_error("pantry add", error.into())
            }
        };

        if let Err(error) = kitchen.pantry.save(&pantry).await {
            return persistence_failure("pantry add", error);
        }

        info!(
            event_name = "cli.pantry.item_added",
            name = %item.name,
            expires_on = ?item.expires_on,
            "pantry item added"
        );
        let added = AddedItem { message: format!("added `{}`", item.name), item: &item };
        CommandResult::report("pantry add", &added)
    })
}

pub fn remove(index: usize) -> CommandResult {
    with_kitchen("pantry remove", |kitchen| async move {
        let mut pantry = kitchen.pantry.load().await;
        let Some(removed) = pantry.remove(index) else {
            return missing_index("pantry remove", index, pantry.len());
        };

        if let Err(error) = kitchen.pantry.save(&pantry).await {
            return persistence_failure("pantry remove", error);
        }

        info!(event_name = "cli.pantry.item_removed", name = %removed.name, "pantry item removed");
        CommandResult::success("pantry remove", format!("removed `{}`", removed.name))
    })
}

/// Takes the item out of the pantry and hands back its fields for re-adding.
/// The removal is saved immediately; nothing is restored if the edit is not resubmitted.
pub fn edit(index: usize) -> CommandResult {
    with_kitchen("pantry edit", |kitchen| async move {
        let mut pantry = kitchen.pantry.load().await;
        let Some(draft) = pantry.begin_edit(index) else {
            return missing_index("pantry edit", index, pantry.len());
        };

        if let Err(error) = kitchen.pantry.save(&pantry).await {
            return persistence_failure("pantry edit", error);
        }

        let message = format!(
            "`{}` removed for editing; re-add it with `pantry add` to keep it",
            draft.name
        );
        CommandResult::report("pantry edit", &EditDraft { message, draft })
    })
}

fn missing_index(command: &str, index: usize, len: usize) -> CommandResult {
    let reason = format!("no pantry item at {index} (pantry has {len})");
    let error = DomainError::input("index", reason);
    CommandResult::from_application_error(command, ApplicationError::from(error))
}
