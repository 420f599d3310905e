#[tokio::main]
async fn main() {
    if let Err(error) = launcher_profiles::run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
