use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::todos::{self, ListParams};
use crate::error::ApiError;
use crate::filter::{sort_column, sort_direction, OrderBy};
use crate::middleware::CurrentUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_todos: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn compute(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = (total + limit - 1) / limit;
        Self {
            current_page: page,
            total_pages,
            total_todos: total,
            limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// GET /todos - list the caller's items
///
/// Supports case-insensitive substring search over title/description,
/// exact-match status and priority filters, sorting by any todo field, and
/// page/limit pagination. Defaults: createdAt descending, page 1, limit 5.
pub async fn todos_get(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let pagination_cfg = &config::config().pagination;
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(pagination_cfg.default_limit)
        .clamp(1, pagination_cfg.max_limit);

    let sort_by = query.sort_by.as_deref().unwrap_or("createdAt");
    let column = sort_column(sort_by)
        .ok_or_else(|| ApiError::validation(format!("Cannot sort by '{}'", sort_by)))?;
    let direction = sort_direction(query.order.as_deref().unwrap_or("desc"));

    let params = ListParams {
        search: query.search.filter(|s| !s.trim().is_empty()),
        status: query.status.filter(|s| !s.is_empty()),
        priority: query.priority.filter(|s| !s.is_empty()),
        order: OrderBy { column, direction },
        limit,
        offset: (page - 1) * limit,
    };

    let pool = DatabaseManager::pool().await?;
    let todos = todos::list(&pool, account.id, &params).await?;
    let total = todos::count(&pool, account.id, &params).await?;

    Ok(Json(json!({
        "todos": todos,
        "pagination": Pagination::compute(total, page, limit),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_items_page_two_of_five() {
        let p = Pagination::compute(12, 2, 5);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);
        assert_eq!(p.total_todos, 12);
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        let p = Pagination::compute(10, 2, 5);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next_page);
    }

    #[test]
    fn empty_collection() {
        let p = Pagination::compute(0, 1, 5);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }

    #[test]
    fn first_page_has_no_previous() {
        let p = Pagination::compute(6, 1, 5);
        assert!(p.has_next_page);
        assert!(!p.has_prev_page);
    }
}
