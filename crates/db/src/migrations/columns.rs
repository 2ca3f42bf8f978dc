//! Columns added after the first release.
//!
//! Applied with a bare `ALTER TABLE ... ADD COLUMN` on every start. SQLite has
//! no `ADD COLUMN IF NOT EXISTS`, so a "duplicate column name" failure means
//! the column is already there and counts as success.

/// One additive column.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdditiveColumn {
    pub table: &'static str,
    pub column: &'static str,
    /// Type and constraints. Defaults must be constants.
    pub definition: &'static str,
}

impl AdditiveColumn {
    pub fn statement(&self) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            self.table, self.column, self.definition
        )
    }
}

const fn col(table: &'static str, column: &'static str, definition: &'static str) -> AdditiveColumn {
    AdditiveColumn {
        table,
        column,
        definition,
    }
}

pub(crate) const ADDITIVE_COLUMNS: &[AdditiveColumn] = &[
    col("schedules", "time", "TEXT NOT NULL DEFAULT '-'"),
    col("payment_requests", "item_name", "TEXT"),
    col("payment_requests", "material_amount", "INTEGER NOT NULL DEFAULT 0"),
    col("payment_requests", "labor_amount", "INTEGER NOT NULL DEFAULT 0"),
    col("payment_requests", "original_labor_amount", "INTEGER NOT NULL DEFAULT 0"),
    col("payment_requests", "apply_tax_deduction", "INTEGER NOT NULL DEFAULT 0"),
    col("payment_requests", "includes_vat", "INTEGER NOT NULL DEFAULT 0"),
    col("work_requests", "project", "TEXT NOT NULL DEFAULT ''"),
    col("work_requests", "request_date", "TEXT"),
    col("work_requests", "request_type", "TEXT NOT NULL DEFAULT ''"),
    col("work_requests", "requested_by", "TEXT NOT NULL DEFAULT ''"),
];

/// Whether `err` is SQLite reporting that the column already exists.
pub(crate) fn is_duplicate_column(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("duplicate column name"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_is_plain_add_column() {
        assert_eq!(
            ADDITIVE_COLUMNS[0].statement(),
            "ALTER TABLE schedules ADD COLUMN time TEXT NOT NULL DEFAULT '-'"
        );
    }

    #[test]
    fn non_database_errors_are_not_duplicates() {
        assert!(!is_duplicate_column(&sqlx::Error::RowNotFound));
    }
}
