use serde_json::{json, Map, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::{OutputFormat, TodoCommand};
use crate::client::ApiClient;

pub async fn run(
    client: &mut ApiClient,
    output: &OutputFormat,
    command: TodoCommand,
) -> anyhow::Result<()> {
    match command {
        TodoCommand::Add {
            title,
            description,
            priority,
            status,
            due,
        } => {
            let mut body = Map::new();
            body.insert("title".to_string(), json!(title));
            insert_if(&mut body, "description", description);
            insert_if(&mut body, "priority", priority);
            insert_if(&mut body, "status", status);
            insert_if(&mut body, "dueDate", due);

            match client.post_json("/todos", &Value::Object(body)).await {
                Ok(data) => {
                    let message = data["message"].as_str().unwrap_or("Todo created.");
                    output_success(output, message, Some(&data["todo"]));
                }
                Err(e) => output_error(output, &e),
            }
        }
        TodoCommand::List {
            search,
            status,
            priority,
            sort_by,
            order,
            page,
            limit,
        } => {
            let mut query: Vec<(&str, String)> = vec![];
            push_if(&mut query, "search", search);
            push_if(&mut query, "status", status);
            push_if(&mut query, "priority", priority);
            push_if(&mut query, "sortBy", sort_by);
            push_if(&mut query, "order", order);
            push_if(&mut query, "page", page.map(|p| p.to_string()));
            push_if(&mut query, "limit", limit.map(|l| l.to_string()));

            match client.get_query("/todos", &query).await {
                Ok(data) => print_list(output, &data),
                Err(e) => output_error(output, &e),
            }
        }
        TodoCommand::Show { id } => match client.get(&format!("/todos/{}", id)).await {
            Ok(data) => print_todo(output, &data["todo"]),
            Err(e) => output_error(output, &e),
        },
        TodoCommand::Update {
            id,
            title,
            description,
            priority,
            status,
            due,
        } => {
            let mut body = Map::new();
            insert_if(&mut body, "title", title);
            insert_if(&mut body, "description", description);
            insert_if(&mut body, "priority", priority);
            insert_if(&mut body, "status", status);
            insert_if(&mut body, "dueDate", due);

            match client
                .put_json(&format!("/todos/{}", id), &Value::Object(body))
                .await
            {
                Ok(data) => {
                    let message = data["message"].as_str().unwrap_or("Todo updated.");
                    output_success(output, message, Some(&data["todo"]));
                }
                Err(e) => output_error(output, &e),
            }
        }
        TodoCommand::Done { id } => {
            let body = json!({ "status": "completed" });
            match client.put_json(&format!("/todos/{}", id), &body).await {
                Ok(data) => {
                    output_success(output, "Todo completed.", Some(&data["todo"]));
                }
                Err(e) => output_error(output, &e),
            }
        }
        TodoCommand::Rm { id } => match client.delete(&format!("/todos/{}", id)).await {
            Ok(data) => {
                let message = data["message"].as_str().unwrap_or("Todo deleted.");
                output_success(output, message, None);
            }
            Err(e) => output_error(output, &e),
        },
    }
    Ok(())
}

fn insert_if(body: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        body.insert(key.to_string(), json!(value));
    }
}

fn push_if<'a>(query: &mut Vec<(&'a str, String)>, key: &'a str, value: Option<String>) {
    if let Some(value) = value {
        query.push((key, value));
    }
}

fn print_list(output: &OutputFormat, data: &Value) {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(data).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            let todos = data["todos"].as_array().cloned().unwrap_or_default();
            if todos.is_empty() {
                println!("No todos.");
                return;
            }
            for todo in &todos {
                print_todo_line(todo);
            }
            let p = &data["pagination"];
            println!(
                "page {}/{} ({} total)",
                p["currentPage"], p["totalPages"], p["totalTodos"]
            );
        }
    }
}

fn print_todo(output: &OutputFormat, todo: &Value) {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(todo).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            print_todo_line(todo);
            if let Some(description) = todo["description"].as_str() {
                if !description.is_empty() {
                    println!("  {}", description);
                }
            }
        }
    }
}

fn print_todo_line(todo: &Value) {
    let done = todo["status"].as_str() == Some("completed");
    let due = todo["dueDate"]
        .as_str()
        .map(|d| format!(", due {}", d))
        .unwrap_or_default();
    println!(
        "[{}] {} ({}{})  {}",
        if done { "x" } else { " " },
        todo["title"].as_str().unwrap_or("?"),
        todo["priority"].as_str().unwrap_or("?"),
        due,
        todo["id"].as_str().unwrap_or("")
    );
}
