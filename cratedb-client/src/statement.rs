/// Quote an identifier, splitting on `.` so `schema.table` quotes both parts.
pub fn quote_ident(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Parameterized `INSERT` for a fixed table and column list.
///
/// Renders single-row and multi-row `VALUES` clauses with `?` placeholders,
/// so callers can page rows into statements of any size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: String,
    columns: Vec<String>,
}

impl InsertStatement {
    pub fn new<I, S>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// `INSERT INTO … VALUES (?, …)` for a single row, the form used with bulk args.
    pub fn single_row_sql(&self) -> String {
        self.values_sql(1)
    }

    /// `INSERT INTO … VALUES (?, …), (?, …)` for `rows` rows.
    pub fn values_sql(&self, rows: usize) -> String {
        let placeholders = format!("({})", vec!["?"; self.columns.len()].join(", "));
        let values = vec![placeholders; rows.max(1)].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES {}",
            quote_ident(&self.table),
            self.columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", "),
            values
        )
    }
}
