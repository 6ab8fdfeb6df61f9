//! Multi-row INSERT statement building.

use crate::model::{Row, TableRows};

/// Maximum rows rendered into a single INSERT statement. Larger groups are
/// split so statement size stays bounded.
pub const MAX_ROWS_PER_STATEMENT: usize = 2_000;

/// Generate a batched INSERT statement for one chunk of rows.
pub fn generate_batch_insert(table: &str, columns: &[&str], rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut sql = format!("INSERT INTO \"{}\"", table);

    sql.push_str(" (");
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('"');
        sql.push_str(col);
        sql.push('"');
    }
    sql.push(')');

    sql.push_str(" VALUES\n");

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            sql.push_str(",\n");
        }
        sql.push('(');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&value.to_sql());
        }
        sql.push(')');
    }

    sql
}

/// Render a [`TableRows`] group into one or more INSERT statements, each
/// covering at most [`MAX_ROWS_PER_STATEMENT`] rows.
pub fn statements_for(group: &TableRows) -> Vec<String> {
    group
        .rows
        .chunks(MAX_ROWS_PER_STATEMENT)
        .map(|chunk| generate_batch_insert(group.table, group.columns, chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SqlValue;

    #[test]
    fn test_generate_batch_insert() {
        let rows = vec![
            vec![SqlValue::Int(1), SqlValue::String("a'b".to_string())],
            vec![SqlValue::Int(2), SqlValue::Null],
        ];
        let sql = generate_batch_insert("company", &["id", "legal_name"], &rows);
        assert!(sql.starts_with("INSERT INTO \"company\" (\"id\", \"legal_name\") VALUES"));
        assert!(sql.contains("(1, 'a''b')"));
        assert!(sql.contains("(2, NULL)"));
    }

    #[test]
    fn test_empty_rows_produce_no_sql() {
        assert_eq!(generate_batch_insert("t", &["a"], &[]), "");
    }

    #[test]
    fn test_statements_split_at_row_bound() {
        let rows: Vec<_> = (0..MAX_ROWS_PER_STATEMENT as i64 + 5)
            .map(|i| vec![SqlValue::Int(i)])
            .collect();
        let group = TableRows {
            table: "subscription",
            columns: &["tier_id"],
            rows,
        };
        let statements = statements_for(&group);
        assert_eq!(statements.len(), 2);
    }
}
