#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    storefront::start_server().await
}
