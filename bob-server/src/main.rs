use anyhow::Context as _;
use bob_server::{Server, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let server = Server::bind(&Settings::default())
        .await
        .context("failed starting Bob's server")?;

    println!("Server running at {}", server.url());

    server.run().await;
    Ok(())
}
