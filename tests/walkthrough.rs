mod support;

use chrono::{NaiveDate, TimeZone, Utc};
use cratedb_testdrive::display::result_table;
use cratedb_testdrive::walkthrough::{insert_basic, insert_basic_at};
use serde_json::json;
use support::{FakeCrate, Recorded};

#[test]
fn walkthrough_reads_back_three_rows() {
    let naive = NaiveDate::from_ymd_opt(2024, 5, 6)
        .and_then(|d| d.and_hms_opt(7, 8, 9))
        .unwrap();
    let aware = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 10).unwrap();

    let mut db = FakeCrate::new(1);
    let results = insert_basic_at(&mut db, naive, aware).unwrap();

    assert_eq!(results.cols, vec!["id", "timestamp"]);
    assert_eq!(results.total_rows, 3);
    assert_eq!(results.rows[0], vec![json!(42), json!(23423434)]);
    assert_eq!(results.rows[1], vec![json!(43), json!(1_714_979_289_000i64)]);
    assert_eq!(results.rows[2], vec![json!(44), json!(1_714_979_290_000i64)]);
}

#[test]
fn walkthrough_statement_sequence_is_fixed() {
    let mut db = FakeCrate::new(1);
    insert_basic(&mut db).unwrap();

    assert_eq!(
        db.statements(),
        vec![
            "DROP TABLE IF EXISTS testdrive.foo;",
            "CREATE TABLE testdrive.foo (id INT, timestamp TIMESTAMP WITH TIME ZONE);",
            "INSERT INTO testdrive.foo (id, timestamp) VALUES (42, 23423434);",
            "INSERT INTO testdrive.foo (id, timestamp) VALUES (43, ?);",
            "INSERT INTO testdrive.foo (id, timestamp) VALUES (44, ?);",
            "REFRESH TABLE testdrive.foo;",
            "SELECT * FROM testdrive.foo;",
        ]
    );

    let bound: Vec<usize> = db
        .recorded
        .iter()
        .map(|r| match r {
            Recorded::Execute { args, .. } => args.len(),
            Recorded::Bulk { .. } => usize::MAX,
        })
        .collect();
    assert_eq!(bound, vec![0, 0, 0, 1, 1, 0, 0]);
}

#[test]
fn walkthrough_is_repeatable() {
    let mut db = FakeCrate::new(1);
    insert_basic(&mut db).unwrap();
    let second = insert_basic(&mut db).unwrap();
    assert_eq!(second.total_rows, 3);
}

#[test]
fn walkthrough_result_renders_without_column_types() {
    let mut db = FakeCrate::new(1);
    let results = insert_basic(&mut db).unwrap();
    let rendered = result_table(&results).to_string();
    assert!(rendered.contains("42"));
    assert!(rendered.contains("23423434"));
}
