use healthpredict::{api, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    api::server::serve().await
}
