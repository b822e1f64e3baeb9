//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `repo_criteria_core` linkage with one in-memory round trip.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `repo_criteria_cli [ABSOLUTE_LOG_DIR]`

use log::info;
use repo_criteria_core::criteria::{OrderBy, WhereEq};
use repo_criteria_core::db::open_db_in_memory;
use repo_criteria_core::{
    default_log_level, init_logging, Attributes, CriteriaRepository, CrudRepository, Entity,
    RepoResult, Repository,
};
use rusqlite::Row;
use std::process::ExitCode;

const SCHEMA: &str = "CREATE TABLE tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    done INTEGER NOT NULL DEFAULT 0
);";

struct Task {
    id: i64,
    title: String,
    done: bool,
}

impl Entity for Task {
    type Id = i64;

    fn table_name() -> &'static str {
        "tasks"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "done"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            done: row.get("done")?,
        })
    }
}

fn main() -> ExitCode {
    if let Some(log_dir) = std::env::args().nth(1) {
        if let Err(err) = init_logging(default_log_level().as_str(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("repo_criteria_core version={}", repo_criteria_core::core_version());
    match smoke() {
        Ok(open_titles) => {
            println!("smoke status=ok open_tasks={}", open_titles.join(","));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("smoke status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke() -> RepoResult<Vec<String>> {
    let conn = open_db_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    let mut tasks = Repository::<Task>::try_new(&conn)?;

    for (title, done) in [("write docs", false), ("ship", true), ("review", false)] {
        tasks.create(
            &Attributes::new()
                .with("title", title.to_string())
                .with("done", done),
        )?;
    }

    tasks
        .push_criteria(WhereEq::new("done", false))
        .push_criteria(OrderBy::asc("title"));
    let open = tasks.all()?;
    info!(
        "event=cli_smoke module=cli status=ok open_tasks={}",
        open.len()
    );

    Ok(open
        .into_iter()
        .filter(|task| !task.done)
        .map(|task| task.title)
        .collect())
}
