use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = lbrender::cli::Cli::parse();
    if let Err(e) = lbrender::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
