pub mod accounts;
pub mod manager;
pub mod models;
pub mod todos;

use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Postgres};

use crate::filter::FilterValue;

/// Bind a typed filter parameter onto a `query_as` statement.
pub fn bind_value<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    v: FilterValue,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        FilterValue::Text(s) => q.bind(s),
        FilterValue::Uuid(u) => q.bind(u),
        FilterValue::Int(i) => q.bind(i),
        FilterValue::Bool(b) => q.bind(b),
        FilterValue::Date(d) => q.bind(d),
    }
}

/// Same, for plain `query` statements (count queries).
pub fn bind_value_scalar(
    q: Query<'_, Postgres, PgArguments>,
    v: FilterValue,
) -> Query<'_, Postgres, PgArguments> {
    match v {
        FilterValue::Text(s) => q.bind(s),
        FilterValue::Uuid(u) => q.bind(u),
        FilterValue::Int(i) => q.bind(i),
        FilterValue::Bool(b) => q.bind(b),
        FilterValue::Date(d) => q.bind(d),
    }
}
