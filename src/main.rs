#[tokio::main]
async fn main() {
    if let Err(e) = taskpad_api::server::run().await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}
