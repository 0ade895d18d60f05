use std::io;
use std::process;

use clap::Parser;
use env_logger::Env;
use featurehub_admin::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    let code = cli::run(args, &mut io::stdout()).await;
    process::exit(code);
}
