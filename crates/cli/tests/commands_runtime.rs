use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::NaiveDate;
use serde_json::Value;
use tempfile::TempDir;
use whatcanicook_cli::commands::{cook, doctor, favorites, migrate, pantry, recipes};
use whatcanicook_core::domain::pantry::PantryInput;
use whatcanicook_core::domain::recipe::RecipeId;
use whatcanicook_core::export::{IngredientRow, RecipeDraft};
use whatcanicook_core::filters::RecipeFilter;

const FRIED_RICE: &str = r#"{
    "id": 1718000000001,
    "name": "Fried Rice",
    "meal": "Dinner",
    "cuisine": "Asian",
    "ingredients": [
        { "name": "rice", "quantity": "2 cup" },
        { "name": "egg", "quantity": "2" },
        { "name": "soy sauce", "quantity": "1 tbsp" },
        { "name": "salt", "quantity": "1 pinch" }
    ],
    "instructions": ["Fry the rice.", "Scramble in the eggs."]
}"#;

const SHAKSHUKA: &str = r#"{
    "id": "shakshuka",
    "name": "Shakshuka",
    "meal": "Breakfast",
    "cuisine": "Middle Eastern",
    "complexity": 2,
    "ingredients": [
        { "name": "egg", "quantity": "4" },
        { "name": "tomato", "quantity": "1 can" },
        { "name": "olive oil", "quantity": "1 tbsp" }
    ]
}"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("date")
}

#[test]
fn migrate_returns_success_with_valid_env() {
    with_kitchen_env(|_| {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn commands_return_config_failure_for_non_sqlite_url() {
    with_env(&[("WHATCANICOOK_STORAGE_DATABASE_URL", "postgres://localhost/pantry")], || {
        let result = pantry::list(today());
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "pantry list");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn pantry_add_estimates_expiry_and_rejects_duplicates() {
    with_kitchen_env(|_| {
        let added = pantry::add(PantryInput::new(" Milk ").with_amount("1", "l"), today());
        assert_eq!(added.exit_code, 0, "expected pantry add success: {}", added.output);

        let payload = parse_payload(&added.output);
        assert_eq!(payload["item"]["name"], "Milk");
        assert_eq!(payload["item"]["quantity"], "1 l");
        assert_eq!(payload["item"]["addedOn"], "2024-03-01");
        assert_eq!(payload["item"]["expiresOn"], "2024-03-08");

        let duplicate = pantry::add(PantryInput::new("milk"), today());
        assert_eq!(duplicate.exit_code, 7, "expected conflict exit code");
        let payload = parse_payload(&duplicate.output);
        assert_eq!(payload["error_class"], "conflict");
        assert!(payload["message"].as_str().unwrap_or_default().starts_with("Already in pantry!"));

        let listed = parse_payload(&pantry::list(today()).output);
        assert_eq!(listed["count"], 1);
    });
}

#[test]
fn pantry_add_rejects_blank_names() {
    with_kitchen_env(|_| {
        let result = pantry::add(PantryInput::new("   "), today());
        assert_eq!(result.exit_code, 6, "expected bad request exit code");
        assert_eq!(parse_payload(&result.output)["error_class"], "bad_request");
    });
}

#[test]
fn pantry_list_puts_expired_items_first() {
    with_kitchen_env(|_| {
        let bought = NaiveDate::from_ymd_opt(2024, 2, 1).expect("date");
        for name in ["Rice", "Milk", "Onion"] {
            assert_eq!(pantry::add(PantryInput::new(name), bought).exit_code, 0);
        }

        let payload = parse_payload(&pantry::list(today()).output);
        assert_eq!(payload["count"], 3);
        assert_eq!(payload["expired"], 1);
        assert_eq!(payload["summary"], "(3 · 1 expired)");

        let names: Vec<&str> = payload["items"]
            .as_array()
            .expect("items")
            .iter()
            .filter_map(|entry| entry["item"]["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Milk", "Onion", "Rice"]);
        assert_eq!(payload["items"][0]["attention"], true);
        assert_eq!(payload["items"][1]["attention"], false);
    });
}

#[test]
fn pantry_remove_and_edit_take_items_out() {
    with_kitchen_env(|_| {
        assert_eq!(pantry::add(PantryInput::new("Eggs"), today()).exit_code, 0);
        assert_eq!(
            pantry::add(PantryInput::new("Greek Yogurt").with_amount("500", "g"), today())
                .exit_code,
            0
        );

        let edited = pantry::edit(1);
        assert_eq!(edited.exit_code, 0, "expected edit success: {}", edited.output);
        let payload = parse_payload(&edited.output);
        assert_eq!(payload["draft"]["name"], "Greek Yogurt");
        assert_eq!(payload["draft"]["amount"], "500");
        assert_eq!(payload["draft"]["unit"], "g");

        assert_eq!(pantry::remove(0).exit_code, 0);
        assert_eq!(parse_payload(&pantry::list(today()).output)["count"], 0);

        let missing = pantry::remove(0);
        assert_eq!(missing.exit_code, 6, "expected bad request for missing index");
    });
}

#[test]
fn cook_groups_recipes_by_readiness() {
    with_kitchen_env(|_| {
        assert_eq!(pantry::add(PantryInput::new("Eggs"), today()).exit_code, 0);
        assert_eq!(pantry::add(PantryInput::new("Jasmine Rice"), today()).exit_code, 0);

        let result = cook::run(true);
        assert_eq!(result.exit_code, 0, "expected cook success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["pantry"]["count"], 2);
        let tiers = payload["tiers"].as_array().expect("tiers");
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0]["tier"], "almost");

        let ranked: Vec<(&str, u64)> = tiers[0]["recipes"]
            .as_array()
            .expect("recipes")
            .iter()
            .map(|card| {
                (card["name"].as_str().unwrap_or_default(), card["score"].as_u64().unwrap_or(0))
            })
            .collect();
        assert_eq!(ranked, vec![("Fried Rice", 75), ("Shakshuka", 67)]);
        assert_eq!(tiers[0]["recipes"][1]["still_need"], "Still need: tomato");
    });
}

#[test]
fn recipes_filter_distinguishes_no_results_from_empty() {
    with_kitchen_env(|_| {
        let breakfast = RecipeFilter { meal: "Breakfast".to_string(), ..RecipeFilter::default() };
        let payload = parse_payload(&recipes::list(breakfast, false).output);
        assert_eq!(payload["outcome"], "matches");
        assert_eq!(payload["recipes"][0]["name"], "Shakshuka");
        assert_eq!(payload["recipes"][0]["complexity"], "★★☆☆☆");

        let nothing = RecipeFilter { query: "lasagna".to_string(), ..RecipeFilter::default() };
        let payload = parse_payload(&recipes::list(nothing, false).output);
        assert_eq!(payload["outcome"], "no_results");
        assert_eq!(payload["count"], 0);
    });
}

#[test]
fn recipe_detail_marks_ingredients_on_hand() {
    with_kitchen_env(|_| {
        assert_eq!(pantry::add(PantryInput::new("Tomato"), today()).exit_code, 0);

        let payload = parse_payload(&recipes::show("shakshuka").output);
        assert_eq!(payload["name"], "Shakshuka");
        let have: Vec<bool> = payload["ingredients"]
            .as_array()
            .expect("ingredients")
            .iter()
            .map(|line| line["have"].as_bool().unwrap_or(false))
            .collect();
        assert_eq!(have, vec![false, true, true]);

        assert_eq!(recipes::show("nope").exit_code, 6);
    });
}

#[test]
fn recipes_favorites_view_lists_saved_snapshots() {
    with_kitchen_env(|dir| {
        let empty = parse_payload(&recipes::list(RecipeFilter::default(), true).output);
        assert_eq!(empty["outcome"], "no_favorites");
        assert_eq!(empty["count"], 0);
        assert!(empty["message"].as_str().unwrap_or_default().starts_with("No favorites yet."));

        assert_eq!(favorites::toggle("shakshuka").exit_code, 0);
        fs::remove_file(dir.join("recipes").join("shakshuka.json")).expect("remove recipe file");

        let saved = parse_payload(&recipes::list(RecipeFilter::default(), true).output);
        assert_eq!(saved["outcome"], "matches");
        assert_eq!(saved["count"], 1);
        assert_eq!(saved["recipes"][0]["id"], "shakshuka");

        let dinner = RecipeFilter { meal: "Dinner".to_string(), ..RecipeFilter::default() };
        let filtered = parse_payload(&recipes::list(dinner, true).output);
        assert_eq!(filtered["outcome"], "no_results");
    });
}

#[test]
fn favorites_toggle_and_export() {
    with_kitchen_env(|dir| {
        let out = dir.join("favorites.json");
        let empty = favorites::export(Some(out.clone()));
        assert_eq!(empty.exit_code, 6, "expected empty export to be rejected");
        assert!(!out.exists());

        let toggled = parse_payload(&favorites::toggle("1718000000001").output);
        assert_eq!(toggled["favorite"], true);
        assert_eq!(toggled["count"], 1);

        let exported = favorites::export(Some(out.clone()));
        assert_eq!(exported.exit_code, 0, "expected export success: {}", exported.output);
        let document: Value =
            serde_json::from_str(&fs::read_to_string(&out).expect("read export")).expect("json");
        assert_eq!(document["1718000000001"]["name"], "Fried Rice");

        let cooked = parse_payload(&cook::run(true).output);
        assert_eq!(cooked["favorites"][0]["name"], "Fried Rice");

        let untoggled = parse_payload(&favorites::toggle("1718000000001").output);
        assert_eq!(untoggled["favorite"], false);
        assert_eq!(untoggled["count"], 0);
    });
}

#[test]
fn new_recipe_lands_in_the_recipes_directory() {
    with_kitchen_env(|dir| {
        let draft = RecipeDraft {
            name: "Overnight Oats".to_string(),
            meal: "Breakfast".to_string(),
            cook_time: "5 min".to_string(),
            complexity: 9,
            ingredients: vec![
                IngredientRow::new("rolled oats", "1", "cup"),
                IngredientRow::new("", "2", "cup"),
            ],
            steps: vec!["  Soak overnight. ".to_string(), " ".to_string()],
            ..RecipeDraft::default()
        };

        let result = recipes::create(draft, RecipeId::Number(1718000000009), None);
        assert_eq!(result.exit_code, 0, "expected new recipe success: {}", result.output);

        let written = dir.join("recipes").join("overnight-oats.json");
        let saved: Value =
            serde_json::from_str(&fs::read_to_string(&written).expect("read recipe")).expect("json");
        assert_eq!(saved["cookTime"], 5);
        assert_eq!(saved["complexity"], 5);
        assert_eq!(saved["ingredients"][0]["quantity"], "1 cup");
        assert_eq!(saved["instructions"], serde_json::json!(["Soak overnight."]));

        let listed = parse_payload(&recipes::list(RecipeFilter::default(), false).output);
        assert_eq!(listed["count"], 3);

        let invalid = recipes::create(RecipeDraft::default(), RecipeId::Number(1), None);
        assert_eq!(invalid.exit_code, 6, "expected missing name to be rejected");
    });
}

#[test]
fn doctor_reports_skipped_recipe_files() {
    with_kitchen_env(|dir| {
        let healthy: Value = serde_json::from_str(&doctor::run(true)).expect("doctor json");
        assert_eq!(healthy["overall_status"], "pass");

        fs::write(dir.join("recipes").join("broken.json"), "{ \"name\": ").expect("write");
        let report: Value = serde_json::from_str(&doctor::run(true)).expect("doctor json");
        assert_eq!(report["overall_status"], "fail");
        let recipe_check = report["checks"]
            .as_array()
            .expect("checks")
            .iter()
            .find(|check| check["name"] == "recipe_sources")
            .cloned()
            .expect("recipe check");
        assert_eq!(recipe_check["status"], "fail");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

/// Fresh database file and a recipes directory holding two recipes.
fn with_kitchen_env(test_fn: impl FnOnce(&Path)) {
    let dir = TempDir::new().expect("tempdir");
    let recipes_dir = dir.path().join("recipes");
    fs::create_dir_all(&recipes_dir).expect("recipes dir");
    fs::write(recipes_dir.join("fried-rice.json"), FRIED_RICE).expect("write recipe");
    fs::write(recipes_dir.join("shakshuka.json"), SHAKSHUKA).expect("write recipe");

    let database_url = format!("sqlite://{}", dir.path().join("kitchen.db").display());
    let recipes_dir = recipes_dir.display().to_string();
    with_env(
        &[
            ("WHATCANICOOK_STORAGE_DATABASE_URL", database_url.as_str()),
            ("WHATCANICOOK_RECIPES_DIRECTORY", recipes_dir.as_str()),
        ],
        || test_fn(dir.path()),
    );
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "WHATCANICOOK_STORAGE_DATABASE_URL",
        "WHATCANICOOK_DATABASE_URL",
        "WHATCANICOOK_STORAGE_MAX_CONNECTIONS",
        "WHATCANICOOK_STORAGE_TIMEOUT_SECS",
        "WHATCANICOOK_RECIPES_DIRECTORY",
        "WHATCANICOOK_RECIPES_FILES",
        "WHATCANICOOK_LOGGING_LEVEL",
        "WHATCANICOOK_LOGGING_FORMAT",
        "WHATCANICOOK_LOG_LEVEL",
        "WHATCANICOOK_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
