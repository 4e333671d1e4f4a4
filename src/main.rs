#[tokio::main]
async fn main() {
    skywatch::start_server().await;
}
