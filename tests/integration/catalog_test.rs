// Catalog Integration Tests
//
// Table registration, lookup, and the cross-table bookkeeping performed
// when a table is dropped.

use vaultdb::{Catalog, CatalogError, Column, Constraint, DataType, Schema, Table};

fn table_with_pk(name: &str, pk_column: &str) -> Table {
    let mut schema = Schema::new();
    schema.add_column(Column::new(pk_column, DataType::Integer, false, None));
    schema.add_constraint(Constraint::PrimaryKey {
        columns: vec![pk_column.to_string()],
    });
    Table::new(name, schema)
}

fn orders_table() -> Table {
    let mut schema = Schema::new();
    schema.add_column(Column::new("id", DataType::Integer, false, None));
    schema.add_column(Column::new("user_id", DataType::Integer, true, None));
    schema.add_constraint(Constraint::PrimaryKey {
        columns: vec!["id".to_string()],
    });
    schema.add_constraint(Constraint::ForeignKey {
        columns: vec!["user_id".to_string()],
        referenced_table: "users".to_string(),
        referenced_columns: vec!["id".to_string()],
    });
    Table::new("orders", schema)
}

#[test]
fn add_and_lookup_tables() {
    let mut catalog = Catalog::new();
    assert!(!catalog.table_exists("users"));
    assert!(catalog.get_table("users").is_none());

    catalog.add_table(table_with_pk("users", "id"));
    catalog.add_table(table_with_pk("items", "sku"));

    assert!(catalog.table_exists("users"));
    assert_eq!(catalog.get_table("users").map(|t| t.name()), Some("users"));
    assert!(catalog.get_table_mut("items").is_some());

    // Names come back sorted, matching the serialized order.
    assert_eq!(catalog.table_names(), vec!["items", "users"]);
}

#[test]
fn add_table_replaces_an_existing_table_of_the_same_name() {
    let mut catalog = Catalog::new();
    catalog.add_table(table_with_pk("users", "id"));
    catalog.add_table(table_with_pk("users", "uid"));

    assert_eq!(catalog.table_names().len(), 1);
    let table = catalog.get_table("users").unwrap();
    assert_eq!(table.schema().columns()[0].name(), "uid");
}

#[test]
fn drop_unknown_table_is_an_error() {
    let mut catalog = Catalog::new();
    let err = catalog.drop_table("ghosts").unwrap_err();
    assert_eq!(err, CatalogError::TableNotFound("ghosts".to_string()));
}

#[test]
fn drop_table_strips_foreign_keys_referencing_it() {
    let mut catalog = Catalog::new();
    catalog.add_table(table_with_pk("users", "id"));
    catalog.add_table(orders_table());

    catalog.drop_table("users").unwrap();
    assert!(!catalog.table_exists("users"));

    // The orders table keeps its primary key but loses the dangling
    // foreign key.
    let orders = catalog.get_table("orders").unwrap();
    assert_eq!(orders.schema().constraints().len(), 1);
    assert!(matches!(
        orders.schema().constraints()[0],
        Constraint::PrimaryKey { .. }
    ));
}

#[test]
fn drop_table_leaves_foreign_keys_to_other_tables_alone() {
    let mut catalog = Catalog::new();
    catalog.add_table(table_with_pk("users", "id"));
    catalog.add_table(table_with_pk("items", "sku"));
    catalog.add_table(orders_table());

    catalog.drop_table("items").unwrap();

    let orders = catalog.get_table("orders").unwrap();
    assert_eq!(orders.schema().constraints().len(), 2);
}
