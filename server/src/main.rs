#[tokio::main]
async fn main() {
    studyhall_server::start_server().await;
}
