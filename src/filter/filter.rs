use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterOp, FilterWhereInfo, Filterable, SqlResult, Table};

/// List query over one table: substring conditions plus a fetch window.
/// Rows come back ordered by id.
#[derive(Debug, Clone)]
pub struct Filter {
    table: &'static Table,
    conditions: Vec<FilterWhereInfo>,
    limit: i64,
    offset: i64,
}

impl Filter {
    pub fn new(table: &'static Table, limit: i64, offset: i64) -> Result<Self, FilterError> {
        Self::validate_identifier(table.name).map_err(FilterError::InvalidTableName)?;
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        if offset < 0 {
            return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
        }
        Ok(Self { table, conditions: vec![], limit, offset })
    }

    /// Require `column` to contain `value`, ignoring case.
    ///
    /// Blank values add nothing. Conditions on columns the table does not have
    /// are dropped, so they never narrow the result.
    pub fn contains(mut self, column: &str, value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return self;
        };
        let table = self.table;
        match table.columns.iter().find(|c| **c == column) {
            Some(known) => self.conditions.push(FilterWhereInfo {
                column: *known,
                operator: FilterOp::Contains,
                data: value.to_string(),
            }),
            None => tracing::debug!(
                "Ignoring filter on unknown column {}.{}",
                table.name,
                column
            ),
        }
        self
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn conditions(&self) -> &[FilterWhereInfo] {
        &self.conditions
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        self.validate_columns()?;
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0);
        let query = format!(
            "SELECT * FROM \"{}\" WHERE {} ORDER BY \"id\" ASC LIMIT {} OFFSET {}",
            self.table.name, where_clause, self.limit, self.offset
        );
        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        self.validate_columns()?;
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0);
        let query = format!(
            "SELECT COUNT(*) as count FROM \"{}\" WHERE {}",
            self.table.name, where_clause
        );
        Ok(SqlResult { query, params })
    }

    /// In-memory evaluation with the same semantics as the generated SQL
    pub fn matches<R: Filterable>(&self, row: &R) -> bool {
        self.conditions.iter().all(|condition| match condition.operator {
            FilterOp::Contains => row
                .text_column(condition.column)
                .map(|text| text.to_lowercase().contains(&condition.data.to_lowercase()))
                .unwrap_or(false),
        })
    }

    fn validate_columns(&self) -> Result<(), FilterError> {
        for condition in &self.conditions {
            Self::validate_identifier(condition.column).map_err(FilterError::InvalidColumn)?;
        }
        Ok(())
    }

    fn validate_identifier(name: &str) -> Result<(), String> {
        let mut chars = name.chars();
        let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("Invalid identifier format: {:?}", name));
        }
        Ok(())
    }
}
