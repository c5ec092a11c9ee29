use serde_json::Value;

/// A table that can be filtered: its name and the columns conditions may target
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match
    Contains,
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub column: &'static str,
    pub operator: FilterOp,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

/// Rows the in-memory store can evaluate a filter against
pub trait Filterable {
    /// Text value of `column`, or `None` when the row has no such text column
    fn text_column(&self, column: &str) -> Option<&str>;
}
