#[tokio::main]
async fn main() {
    if let Err(e) = expiring_tokens::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
