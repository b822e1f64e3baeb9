#![allow(dead_code)]

use repo_criteria_core::db::open_db_in_memory;
use repo_criteria_core::{Attributes, CrudRepository, Entity, RepoResult, Repository};
use rusqlite::{Connection, Row};
use serde::Serialize;

pub const SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        active INTEGER NOT NULL DEFAULT 1,
        score INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE notes (
        id TEXT PRIMARY KEY NOT NULL,
        body TEXT NOT NULL DEFAULT ''
    );
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub score: i64,
}

impl Entity for User {
    type Id = i64;

    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "active", "score"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            active: row.get("active")?,
            score: row.get("score")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub body: String,
}

impl Entity for Note {
    type Id = String;

    fn table_name() -> &'static str {
        "notes"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "body"]
    }

    fn id(&self) -> &String {
        &self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            body: row.get("body")?,
        })
    }
}

pub fn open() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn
}

pub fn user_attrs(name: &str, score: i64, active: bool) -> Attributes {
    Attributes::new()
        .with("name", name.to_string())
        .with("email", format!("{name}@example.com"))
        .with("score", score)
        .with("active", active)
}

/// Seeds alice(10, active), bob(10, active), carol(5, inactive).
pub fn seed_users(repo: &Repository<'_, User>) -> Vec<User> {
    [("alice", 10, true), ("bob", 10, true), ("carol", 5, false)]
        .into_iter()
        .map(|(name, score, active)| repo.create(&user_attrs(name, score, active)).unwrap())
        .collect()
}

pub fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}
