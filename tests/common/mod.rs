use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use uuid::Uuid;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const TEST_JWT_SECRET: &str = "taskpad-test-secret";

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/taskpad-api");
        cmd.env("PORT", port.to_string())
            .env("JWT_SECRET_KEY", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready on OK; SERVICE_UNAVAILABLE means up but no database
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Tests that need real persistence skip themselves when no database is
/// configured in the environment.
pub fn database_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

pub struct TestAccount {
    pub email: String,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Register a fresh account and sign it in, returning a usable bearer token.
pub async fn register_and_signin(base_url: &str) -> Result<TestAccount> {
    let client = reqwest::Client::new();
    let suffix = Uuid::new_v4().simple().to_string();
    let email = format!("user-{}@example.com", suffix);
    let username = format!("user{}", &suffix[..12]);
    let password = "secret123".to_string();

    let form = reqwest::multipart::Form::new()
        .text("username", username.clone())
        .text("email", email.clone())
        .text("password", password.clone());

    let res = client
        .post(format!("{}/users/signup", base_url))
        .multipart(form)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "signup failed with {}: {}",
        res.status(),
        res.text().await.unwrap_or_default()
    );

    let res = client
        .post(format!("{}/users/signin", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "signin failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"]
        .as_str()
        .context("signin response missing token")?
        .to_string();

    Ok(TestAccount {
        email,
        username,
        password,
        token,
    })
}
