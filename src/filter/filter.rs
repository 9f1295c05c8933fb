use super::conditions::{Cond, FilterValue};
use super::order::OrderBy;

/// Parameterized SQL plus its values, in placeholder order.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}

/// Builder for owner-scoped list queries: WHERE + ORDER BY + LIMIT/OFFSET,
/// with a count variant sharing the same WHERE clause for pagination totals.
pub struct Filter {
    table: &'static str,
    conditions: Vec<Cond>,
    order: Vec<OrderBy>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            conditions: vec![],
            order: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn and_where(mut self, cond: Cond) -> Self {
        self.conditions.push(cond);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut params = vec![];
        let where_clause = self.where_sql(&mut params);

        let mut query = format!("SELECT * FROM \"{}\" WHERE {}", self.table, where_clause);
        if !self.order.is_empty() {
            let parts: Vec<String> = self.order.iter().map(OrderBy::to_sql).collect();
            query.push_str(&format!(" ORDER BY {}", parts.join(", ")));
        }
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            query.push_str(&format!(" OFFSET {}", offset));
        }

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let mut params = vec![];
        let where_clause = self.where_sql(&mut params);
        SqlResult {
            query: format!(
                "SELECT COUNT(*) as count FROM \"{}\" WHERE {}",
                self.table, where_clause
            ),
            params,
        }
    }

    fn where_sql(&self, params: &mut Vec<FilterValue>) -> String {
        Cond::And(self.conditions.clone()).to_sql(params)
    }
}
