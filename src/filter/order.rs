#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn to_sql(&self) -> String {
        format!("\"{}\" {}", self.column, self.direction.to_sql())
    }
}

/// Map an API sort field (camelCase, as the query string spells it) to the
/// underlying column. Unknown fields return None and are rejected upstream.
pub fn sort_column(field: &str) -> Option<&'static str> {
    match field {
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        "dueDate" => Some("due_date"),
        "title" => Some("title"),
        "description" => Some("description"),
        "priority" => Some("priority"),
        "status" => Some("status"),
        _ => None,
    }
}

/// Only an explicit "asc" sorts ascending; everything else is descending.
pub fn sort_direction(order: &str) -> SortDirection {
    if order.eq_ignore_ascii_case("asc") {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    }
}
