#[tokio::main]
async fn main() {
    let code = mcp_desk_lib::run().await;
    std::process::exit(code);
}
