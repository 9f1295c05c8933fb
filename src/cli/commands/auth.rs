use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::token_store::TokenStore;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::client::ApiClient;

pub async fn signup(
    client: &mut ApiClient,
    output: &OutputFormat,
    username: String,
    email: String,
    password: String,
    profile_pic: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut form = reqwest::multipart::Form::new()
        .text("username", username)
        .text("email", email)
        .text("password", password);
    if let Some(path) = profile_pic {
        form = form.part("profile_pic", file_part(&path)?);
    }

    match client.post_multipart("/users/signup", form).await {
        Ok(data) => {
            let message = data["message"].as_str().unwrap_or("Registered.");
            output_success(output, message, None);
        }
        Err(e) => output_error(output, &e),
    }
    Ok(())
}

pub async fn signin(
    client: &mut ApiClient,
    store: &TokenStore,
    output: &OutputFormat,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let body = json!({ "email": email, "password": password });
    match client.post_json("/users/signin", &body).await {
        Ok(data) => {
            if let Some(token) = data["token"].as_str() {
                store.save(token)?;
                client.set_token(token.to_string());
            }
            let message = data["message"].as_str().unwrap_or("Signed in.");
            output_success(output, message, None);
        }
        Err(e) => output_error(output, &e),
    }
    Ok(())
}

pub async fn whoami(client: &mut ApiClient, output: &OutputFormat) -> anyhow::Result<()> {
    match client.get("/users/profile").await {
        Ok(data) => match output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Text => {
                let user = &data["user"];
                println!(
                    "{} <{}>",
                    user["username"].as_str().unwrap_or("?"),
                    user["email"].as_str().unwrap_or("?")
                );
                if let Some(pic) = user["profile_pic"].as_str() {
                    if !pic.is_empty() {
                        println!("picture: {}", pic);
                    }
                }
            }
        },
        Err(e) => output_error(output, &e),
    }
    Ok(())
}

pub async fn update_profile(
    client: &mut ApiClient,
    output: &OutputFormat,
    username: Option<String>,
    profile_pic: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut form = reqwest::multipart::Form::new();
    if let Some(username) = username {
        form = form.text("username", username);
    }
    if let Some(path) = profile_pic {
        form = form.part("profile_pic", file_part(&path)?);
    }

    match client.put_multipart("/users/profile", form).await {
        Ok(data) => {
            let message = data["message"].as_str().unwrap_or("Profile updated.");
            output_success(output, message, Some(&data["user"]));
        }
        Err(e) => output_error(output, &e),
    }
    Ok(())
}

pub async fn delete_account(
    client: &mut ApiClient,
    store: &TokenStore,
    output: &OutputFormat,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("deleting an account removes all of its todos; re-run with --yes to confirm");
    }

    match client.delete("/users/account").await {
        Ok(data) => {
            store.clear()?;
            let message = data["message"].as_str().unwrap_or("Account deleted.");
            output_success(output, message, None);
        }
        Err(e) => output_error(output, &e),
    }
    Ok(())
}

pub fn signout(store: &TokenStore, output: &OutputFormat) -> anyhow::Result<()> {
    store.clear()?;
    output_success(output, "Signed out.", None);
    Ok(())
}

fn file_part(path: &Path) -> anyhow::Result<reqwest::multipart::Part> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile_pic".to_string());
    Ok(reqwest::multipart::Part::bytes(bytes).file_name(file_name))
}
