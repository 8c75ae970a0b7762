#[tokio::main]
async fn main() -> anyhow::Result<()> {
    movies_api::run_server().await
}
