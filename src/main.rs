// src/main.rs

use mailgate::{cli, logging, run};
use tracing::error;

#[tokio::main]
async fn main() {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("mailgate error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
