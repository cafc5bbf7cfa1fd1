use serde::Serialize;
use whatcanicook_core::config::{AppConfig, LoadOptions};
use whatcanicook_db::{connect_with_config, migrations, RecipeLoader};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => {
                    checks.push(runtime.block_on(check_database(&config)));
                    checks.push(runtime.block_on(check_recipe_sources(&config)));
                }
                Err(error) => {
                    let details = format!("failed to initialize async runtime: {error}");
                    checks.push(DoctorCheck {
                        name: "database_connectivity",
                        status: CheckStatus::Fail,
                        details: details.clone(),
                    });
                    checks.push(DoctorCheck {
                        name: "recipe_sources",
                        status: CheckStatus::Fail,
                        details,
                    });
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("database_connectivity"));
            checks.push(skipped("recipe_sources"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: "skipped because configuration did not load".to_string(),
    }
}

async fn check_database(config: &AppConfig) -> DoctorCheck {
    let result = async {
        let pool = connect_with_config(&config.storage)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| format!("failed to apply migrations: {error}"))?;
        pool.close().await;
        Ok::<(), String>(())
    }
    .await;

    match result {
        Ok(()) => DoctorCheck {
            name: "database_connectivity",
            status: CheckStatus::Pass,
            details: format!("connected and migrated using `{}`", config.storage.database_url),
        },
        Err(error) => {
            DoctorCheck { name: "database_connectivity", status: CheckStatus::Fail, details: error }
        }
    }
}

async fn check_recipe_sources(config: &AppConfig) -> DoctorCheck {
    let loader = RecipeLoader::from_config(&config.recipes);
    match loader.load_all().await {
        Ok(catalog) if catalog.skipped.is_empty() => DoctorCheck {
            name: "recipe_sources",
            status: CheckStatus::Pass,
            details: format!(
                "{} recipe(s) readable from `{}`",
                catalog.recipes.len(),
                loader.directory().display()
            ),
        },
        Ok(catalog) => {
            let skipped = catalog
                .skipped
                .iter()
                .map(|entry| format!("{} ({})", entry.path.display(), entry.reason))
                .collect::<Vec<_>>()
                .join("; ");
            DoctorCheck {
                name: "recipe_sources",
                status: CheckStatus::Fail,
                details: format!(
                    "{} recipe(s) readable, {} skipped: {skipped}",
                    catalog.recipes.len(),
                    catalog.skipped.len()
                ),
            }
        }
        Err(error) => DoctorCheck {
            name: "recipe_sources",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
