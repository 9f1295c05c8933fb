//! Todo repository. Every statement here is owner-scoped: the caller's
//! account id is part of each WHERE clause, so one account can never
//! observe or mutate another account's items.

use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::Todo;
use super::{bind_value, bind_value_scalar};
use crate::filter::{Cond, Filter, FilterValue, OrderBy};

#[derive(Debug)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
}

/// Field-presence-aware change set for partial updates. An outer `None`
/// leaves the column untouched; `due_date: Some(None)` clears the due date.
#[derive(Debug, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// Search/filter/sort/pagination parameters for the list operation.
#[derive(Debug)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub order: OrderBy,
    pub limit: i64,
    pub offset: i64,
}

pub async fn insert(pool: &PgPool, user_id: Uuid, new: NewTodo) -> Result<Todo, DatabaseError> {
    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (user_id, title, description, priority, status, due_date) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.priority)
    .bind(&new.status)
    .bind(new.due_date)
    .fetch_one(pool)
    .await?;
    Ok(todo)
}

pub async fn find_by_id(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<Todo>, DatabaseError> {
    let todo = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(todo)
}

fn list_filter(user_id: Uuid, params: &ListParams) -> Filter {
    let mut filter =
        Filter::new("todos").and_where(Cond::Eq("user_id", FilterValue::Uuid(user_id)));

    if let Some(search) = &params.search {
        filter = filter.and_where(Cond::Or(vec![
            Cond::Contains("title", search.clone()),
            Cond::Contains("description", search.clone()),
        ]));
    }
    if let Some(status) = &params.status {
        filter = filter.and_where(Cond::Eq("status", FilterValue::Text(status.clone())));
    }
    if let Some(priority) = &params.priority {
        filter = filter.and_where(Cond::Eq("priority", FilterValue::Text(priority.clone())));
    }

    filter
}

pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    params: &ListParams,
) -> Result<Vec<Todo>, DatabaseError> {
    let sql = list_filter(user_id, params)
        .order_by(params.order)
        .paginate(params.limit, params.offset)
        .to_sql();

    let mut query = sqlx::query_as::<_, Todo>(&sql.query);
    for value in sql.params {
        query = bind_value(query, value);
    }
    let todos = query.fetch_all(pool).await?;
    Ok(todos)
}

pub async fn count(
    pool: &PgPool,
    user_id: Uuid,
    params: &ListParams,
) -> Result<i64, DatabaseError> {
    let sql = list_filter(user_id, params).to_count_sql();

    let mut query = sqlx::query(&sql.query);
    for value in sql.params {
        query = bind_value_scalar(query, value);
    }
    let row = query.fetch_one(pool).await?;
    let count: i64 = row.try_get("count")?;
    Ok(count)
}

enum UpdateParam {
    Text(String),
    Date(Option<NaiveDate>),
}

/// Owner-scoped partial update. Returns the updated row, or None when the
/// item is absent or owned by someone else.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    changes: TodoChanges,
) -> Result<Option<Todo>, DatabaseError> {
    if changes.is_empty() {
        return find_by_id(pool, user_id, id).await;
    }

    let mut assignments = vec!["updated_at = now()".to_string()];
    let mut params: Vec<UpdateParam> = vec![];

    if let Some(title) = changes.title {
        params.push(UpdateParam::Text(title));
        assignments.push(format!("title = ${}", params.len()));
    }
    if let Some(description) = changes.description {
        params.push(UpdateParam::Text(description));
        assignments.push(format!("description = ${}", params.len()));
    }
    if let Some(priority) = changes.priority {
        params.push(UpdateParam::Text(priority));
        assignments.push(format!("priority = ${}", params.len()));
    }
    if let Some(status) = changes.status {
        params.push(UpdateParam::Text(status));
        assignments.push(format!("status = ${}", params.len()));
    }
    if let Some(due_date) = changes.due_date {
        params.push(UpdateParam::Date(due_date));
        assignments.push(format!("due_date = ${}", params.len()));
    }

    let sql = format!(
        "UPDATE todos SET {} WHERE id = ${} AND user_id = ${} RETURNING *",
        assignments.join(", "),
        params.len() + 1,
        params.len() + 2,
    );

    let mut query = sqlx::query_as::<_, Todo>(&sql);
    for param in params {
        query = match param {
            UpdateParam::Text(s) => query.bind(s),
            UpdateParam::Date(d) => query.bind(d),
        };
    }
    let todo = query.bind(id).bind(user_id).fetch_optional(pool).await?;
    Ok(todo)
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
