use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::Page;
use crate::filter::Filter;

/// Runs a [`Filter`] against Postgres as a row query plus a count query
pub struct QueryBuilder<'f> {
    filter: &'f Filter,
}

impl<'f> QueryBuilder<'f> {
    pub fn new(filter: &'f Filter) -> Self {
        Self { filter }
    }

    pub async fn select_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.filter.to_sql()?;
        let rows = sqlx::query_as_with::<_, T, _>(&sql.query, arguments(&sql.params))
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql = self.filter.to_count_sql()?;
        let count = sqlx::query_scalar_with::<_, i64, _>(&sql.query, arguments(&sql.params))
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Rows in the window and the total match count
    pub async fn select_page<T>(&self, pool: &PgPool) -> Result<Page<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let count = self.count(pool).await?;
        let rows = self.select_all(pool).await?;
        Ok(Page { count, rows })
    }
}

/// Positional arguments for `$1..$n`, in order
fn arguments(params: &[Value]) -> PgArguments {
    let mut args = PgArguments::default();
    for value in params {
        match value {
            Value::Null => args.add(None::<String>),
            Value::Bool(b) => args.add(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => args.add(i),
                None => args.add(n.as_f64()),
            },
            Value::String(s) => args.add(s.clone()),
            Value::Array(_) | Value::Object(_) => args.add(value.to_string()),
        }
    }
    args
}
