// Table Operation Integration Tests
//
// Covers constraint enforcement on insert, conditional update/delete, and
// column removal.

use vaultdb::{Column, Constraint, DataType, Record, Schema, Table, TableError};

fn record(pairs: &[(&str, &str)]) -> Record {
    let mut record = Record::new();
    for (column, value) in pairs {
        record.set(*column, *value);
    }
    record
}

fn users_table() -> Table {
    let mut schema = Schema::new();
    schema.add_column(Column::new("id", DataType::Integer, false, None));
    schema.add_column(Column::new("name", DataType::String, true, None));
    schema.add_column(Column::new("age", DataType::Integer, true, None));
    schema.add_constraint(Constraint::PrimaryKey {
        columns: vec!["id".to_string()],
    });
    Table::new("users", schema)
}

#[test]
fn insert_rejects_duplicate_primary_key() {
    let mut table = users_table();
    table
        .insert(record(&[("id", "1"), ("name", "Alice"), ("age", "30")]))
        .unwrap();

    let err = table
        .insert(record(&[("id", "1"), ("name", "Bob"), ("age", "40")]))
        .unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateKey {
            constraint: "PRIMARY KEY",
            columns: vec!["id".to_string()],
        }
    );

    // The failed insert left the table unchanged: still exactly Alice.
    assert_eq!(table.records().len(), 1);
    assert_eq!(table.records()[0].get("name"), Some("Alice"));
}

#[test]
fn insert_rejects_missing_constraint_column() {
    let mut table = users_table();
    let err = table
        .insert(record(&[("name", "NoId")]))
        .unwrap_err();
    assert_eq!(
        err,
        TableError::MissingConstraintColumn {
            column: "id".to_string(),
            constraint: "PRIMARY KEY",
        }
    );
    assert!(table.records().is_empty());
}

#[test]
fn insert_rejects_empty_primary_key_value() {
    let mut table = users_table();
    let err = table.insert(record(&[("id", "")])).unwrap_err();
    assert_eq!(err, TableError::EmptyKeyValue("id".to_string()));
    assert!(table.records().is_empty());
}

#[test]
fn unique_constraint_is_checked_against_existing_rows() {
    let mut schema = Schema::new();
    schema.add_column(Column::new("id", DataType::Integer, false, None));
    schema.add_column(Column::new("email", DataType::String, true, None));
    schema.add_constraint(Constraint::PrimaryKey {
        columns: vec!["id".to_string()],
    });
    schema.add_constraint(Constraint::Unique {
        columns: vec!["email".to_string()],
    });
    let mut table = Table::new("accounts", schema);

    table
        .insert(record(&[("id", "1"), ("email", "a@example.com")]))
        .unwrap();
    let err = table
        .insert(record(&[("id", "2"), ("email", "a@example.com")]))
        .unwrap_err();
    assert!(matches!(err, TableError::DuplicateKey { constraint: "UNIQUE", .. }));

    // An empty value is fine for UNIQUE, only PRIMARY KEY forbids it.
    table.insert(record(&[("id", "3"), ("email", "")])).unwrap();
    assert_eq!(table.records().len(), 2);
}

#[test]
fn uniqueness_scan_skips_rows_missing_the_constraint_column() {
    let mut schema = Schema::new();
    schema.add_column(Column::new("id", DataType::Integer, false, None));
    schema.add_column(Column::new("nick", DataType::String, true, None));
    schema.add_constraint(Constraint::Unique {
        columns: vec!["nick".to_string()],
    });
    let mut table = Table::new("players", schema);

    // A row without the constrained column never conflicts.
    table.insert(record(&[("id", "1")])).unwrap();
    table.insert(record(&[("id", "2"), ("nick", "zed")])).unwrap();
    assert_eq!(table.records().len(), 2);
}

#[test]
fn foreign_key_is_not_enforced_on_insert() {
    let mut schema = Schema::new();
    schema.add_column(Column::new("id", DataType::Integer, false, None));
    schema.add_column(Column::new("user_id", DataType::Integer, true, None));
    schema.add_constraint(Constraint::ForeignKey {
        columns: vec!["user_id".to_string()],
        referenced_table: "users".to_string(),
        referenced_columns: vec!["id".to_string()],
    });
    let mut table = Table::new("orders", schema);

    // No referenced table exists at all; the insert still goes through.
    table.insert(record(&[("id", "1"), ("user_id", "999")])).unwrap();
    assert_eq!(table.records().len(), 1);
}

#[test]
fn update_with_equality_condition() {
    let mut table = users_table();
    table
        .insert(record(&[("id", "1"), ("name", "Alice"), ("age", "30")]))
        .unwrap();
    table
        .insert(record(&[("id", "2"), ("name", "Bob"), ("age", "40")]))
        .unwrap();

    let updated = table.update(&record(&[("age", "31")]), "id = 1").unwrap();
    assert_eq!(updated, 1);
    assert_eq!(table.records()[0].get("age"), Some("31"));
    assert_eq!(table.records()[0].get("name"), Some("Alice"));
    assert_eq!(table.records()[1].get("age"), Some("40"));
}

#[test]
fn update_all_and_empty_condition_select_every_record() {
    let mut table = users_table();
    table.insert(record(&[("id", "1"), ("age", "30")])).unwrap();
    table.insert(record(&[("id", "2"), ("age", "40")])).unwrap();

    assert_eq!(table.update(&record(&[("age", "0")]), "all").unwrap(), 2);
    assert_eq!(table.update(&record(&[("age", "1")]), "").unwrap(), 2);
    assert!(table.records().iter().all(|r| r.get("age") == Some("1")));
}

#[test]
fn update_can_add_a_column_value_not_previously_present() {
    let mut table = users_table();
    table.insert(record(&[("id", "1")])).unwrap();

    let updated = table.update(&record(&[("name", "Late")]), "id = 1").unwrap();
    assert_eq!(updated, 1);
    assert_eq!(table.records()[0].get("name"), Some("Late"));
}

#[test]
fn update_with_invalid_condition_changes_nothing() {
    let mut table = users_table();
    table.insert(record(&[("id", "1"), ("age", "30")])).unwrap();

    let err = table
        .update(&record(&[("age", "99")]), "id is 1")
        .unwrap_err();
    assert!(matches!(err, TableError::InvalidCondition(_)));
    assert_eq!(table.records()[0].get("age"), Some("30"));
}

#[test]
fn update_with_no_matches_returns_zero() {
    let mut table = users_table();
    table.insert(record(&[("id", "1")])).unwrap();
    assert_eq!(table.update(&record(&[("age", "5")]), "id = 99").unwrap(), 0);
}

#[test]
fn delete_all_clears_the_table() {
    let mut table = users_table();
    for i in 1..=3 {
        table.insert(record(&[("id", &i.to_string())])).unwrap();
    }
    assert_eq!(table.delete("all").unwrap(), 3);
    assert!(table.records().is_empty());
}

#[test]
fn delete_with_no_matches_leaves_table_unchanged() {
    let mut table = users_table();
    table.insert(record(&[("id", "1"), ("name", "Alice")])).unwrap();

    assert_eq!(table.delete("id = 99").unwrap(), 0);
    assert_eq!(table.records().len(), 1);
}

#[test]
fn delete_strips_quoted_literal_before_comparing() {
    let mut table = users_table();
    table.insert(record(&[("id", "1"), ("name", "Alice")])).unwrap();

    assert_eq!(table.delete("name = 'Alice'").unwrap(), 1);
    assert!(table.records().is_empty());
}

#[test]
fn delete_skips_records_missing_the_condition_column() {
    let mut table = users_table();
    table.insert(record(&[("id", "1")])).unwrap();
    table.insert(record(&[("id", "2"), ("name", "Bob")])).unwrap();

    assert_eq!(table.delete("name = Bob").unwrap(), 1);
    assert_eq!(table.records().len(), 1);
    assert_eq!(table.records()[0].get("id"), Some("1"));
}

#[test]
fn drop_column_removes_schema_entry_and_record_values() {
    let mut table = users_table();
    table
        .insert(record(&[("id", "1"), ("name", "Alice"), ("age", "30")]))
        .unwrap();
    table.insert(record(&[("id", "2")])).unwrap();

    table.drop_column("age").unwrap();
    assert!(!table.schema().has_column("age"));
    let names: Vec<&str> = table.schema().columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["id", "name"]);
    assert!(table.records().iter().all(|r| !r.has("age")));

    let err = table.drop_column("age").unwrap_err();
    assert_eq!(err, TableError::ColumnNotFound("age".to_string()));
}

#[test]
fn dropping_a_constrained_column_leaves_the_constraint_in_place() {
    let mut table = users_table();
    table.drop_column("id").unwrap();

    // The PRIMARY KEY constraint still references the gone column, so the
    // next insert fails its missing-column check.
    assert_eq!(table.schema().constraints().len(), 1);
    let err = table.insert(record(&[("name", "Ghost")])).unwrap_err();
    assert_eq!(
        err,
        TableError::MissingConstraintColumn {
            column: "id".to_string(),
            constraint: "PRIMARY KEY",
        }
    );
}
