use std::net::SocketAddr;

use anyhow::Result;
use args::Args;
use clap::Parser;
use context::{Config as ContextConfig, Context};
use env::Environment;
use utils::{
    banner::print_banner,
    telemetry::{get_subscriber, init_subscriber},
};

mod args;
mod clients;
mod context;
mod env;
mod error;
mod rewards;
mod server;
mod service;
mod slots;
mod sync_duties;
mod utils;

async fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let env = Environment::from_env()?;
    let args = Args::parse();

    let _guard = env.sentry_dsn.clone().map(|sentry_dsn| {
        sentry::init((
            sentry_dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let subscriber = get_subscriber("info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    print_banner(&args, &env);

    let context = Context::try_new(ContextConfig::from(&env))?;

    server::serve(Box::new(context), SocketAddr::new(args.host, args.port)).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
