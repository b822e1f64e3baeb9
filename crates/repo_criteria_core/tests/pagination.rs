mod common;

use common::{names, open, user_attrs, User};
use repo_criteria_core::criteria::{Limit, OrderBy, WhereEq};
use repo_criteria_core::{CriteriaRepository, CrudRepository, Repository, DEFAULT_PER_PAGE};

fn seed_many(repo: &Repository<'_, User>, count: usize) {
    for index in 0..count {
        let name = format!("user{index:02}");
        repo.create(&user_attrs(&name, index as i64, index % 2 == 0))
            .unwrap();
    }
}

#[test]
fn zero_per_page_falls_back_to_default() {
    let conn = open();
    let repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 25);

    let page = repo.paginate(0).unwrap();

    assert_eq!(page.per_page, DEFAULT_PER_PAGE);
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.last_page, 3);
    assert!(page.has_more_pages);
}

#[test]
fn explicit_page_uses_offset_and_metadata() {
    let conn = open();
    let mut repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 7);
    repo.push_criteria(OrderBy::asc("name"));

    let page = repo.paginate_page(3, 3).unwrap();

    assert_eq!(names(&page.items), vec!["user06"]);
    assert_eq!(page.from, Some(7));
    assert_eq!(page.to, Some(7));
    assert_eq!(page.last_page, 3);
    assert!(!page.has_more_pages);
}

#[test]
fn page_zero_is_treated_as_first_page() {
    let conn = open();
    let mut repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 4);
    repo.push_criteria(OrderBy::asc("name"));

    let page = repo.paginate_page(2, 0).unwrap();
    assert_eq!(page.current_page, 1);
    assert_eq!(names(&page.items), vec!["user00", "user01"]);
}

#[test]
fn total_counts_rows_after_criteria() {
    let conn = open();
    let mut repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 9);

    repo.push_criteria(WhereEq::new("active", true))
        .push_criteria(Limit(1));
    let page = repo.paginate(2).unwrap();

    // Active rows are the even indexes: 0, 2, 4, 6, 8.
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.last_page, 3);
    assert!(page.items.iter().all(|user| user.active));

    repo.skip_criteria(true);
    assert_eq!(repo.paginate(2).unwrap().total, 9);
}

#[test]
fn page_past_the_end_is_empty_but_keeps_totals() {
    let conn = open();
    let repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 3);

    let page = repo.paginate_page(10, 5).unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.last_page, 1);
    assert_eq!(page.from, None);
    assert_eq!(page.to, None);

    let json = serde_json::to_value(&page).unwrap();
    assert!(json["from"].is_null());
}

#[test]
fn page_serializes_items_and_metadata() {
    let conn = open();
    let repo = Repository::<User>::try_new(&conn).unwrap();
    seed_many(&repo, 1);

    let page = repo.paginate(5).unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["total"], 1);
    assert_eq!(json["per_page"], 5);
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["last_page"], 1);
    assert_eq!(json["from"], 1);
    assert_eq!(json["to"], 1);
    assert_eq!(json["has_more_pages"], false);
    assert_eq!(json["items"][0]["name"], "user00");
    assert_eq!(json["items"][0]["active"], true);
}
