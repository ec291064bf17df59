#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = kwyl_rust::run().await {
        eprintln!("kwyl-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
