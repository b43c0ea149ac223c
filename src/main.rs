use clap::Parser;
use tokio_util::sync::CancellationToken;
use url::Url;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = args::into_config(&args);

    let root = match Url::parse(&args.root) {
        Ok(url) => url,
        Err(err) => {
            ::log::error!("invalid root URL {:?}: {err}", args.root);
            std::process::exit(5);
        }
    };

    ::log::info!("starting crawl of {root} with {} workers", config.workers);

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::info!("received interrupt, draining in-flight requests");
            cancel_on_signal.cancel();
        }
    });

    let (errors, outcome) = match linkrover::run(&config, root, cancel).await {
        Ok(result) => result,
        Err(err) => {
            ::log::error!("failed to build HTTP client: {err}");
            std::process::exit(5);
        }
    };

    if !errors.is_empty() {
        print!("{}", linkrover::report::render(&errors));
    }

    ::log::info!(
        "crawl finished: {} pages fetched, {} erroring",
        outcome.store.len(),
        errors.len()
    );

    let verdict = linkrover::outcome_verdict(&outcome, &errors);
    std::process::exit(verdict.exit_code());
}
