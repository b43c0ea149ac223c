use std::time::Duration;

use clap::Parser;
use linkrover::CrawlConfig;

#[derive(Parser, Debug)]
#[command(name = "linkrover")]
#[command(author = "Ryan Northey <ryan@synca.io>")]
#[command(about = "Recursive link checker: crawls a site and reports broken links and missing fragments")]
#[command(version)]
pub struct Args {
    /// Root URL to crawl. Only pages whose URL begins with this
    /// string are fetched and have their links extracted.
    pub root: String,

    /// Number of worker tasks. Defaults to the host's CPU count.
    #[arg(short, long, env = "LINKROVER_WORKERS")]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10, env = "LINKROVER_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// URL prefix to exclude from the crawl. May be repeated.
    #[arg(long = "exclude")]
    pub exclude_prefixes: Vec<String>,

    /// User-Agent header sent with every fetch.
    #[arg(long, env = "LINKROVER_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Enables verbose (transient-error) logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Builds a [`CrawlConfig`] from parsed CLI arguments, falling back to
/// [`CrawlConfig::default`] for anything left unset.
pub fn into_config(args: &Args) -> CrawlConfig {
    let defaults = CrawlConfig::default();
    CrawlConfig {
        workers: args.workers.unwrap_or(defaults.workers),
        request_timeout: Duration::from_secs(args.timeout_secs),
        exclude_prefixes: args.exclude_prefixes.clone(),
        user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
        verbose: args.verbose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_fall_back_to_defaults() {
        let args = Args {
            root: "https://example.com".to_string(),
            workers: None,
            timeout_secs: 10,
            exclude_prefixes: Vec::new(),
            user_agent: None,
            verbose: false,
        };
        let config = into_config(&args);
        assert_eq!(config.workers, CrawlConfig::default().workers);
        assert_eq!(config.user_agent, CrawlConfig::default().user_agent);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let args = Args {
            root: "https://example.com".to_string(),
            workers: Some(2),
            timeout_secs: 5,
            exclude_prefixes: vec!["https://example.com/skip".to_string()],
            user_agent: Some("custom-agent".to_string()),
            verbose: true,
        };
        let config = into_config(&args);
        assert_eq!(config.workers, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "custom-agent");
        assert!(config.verbose);
    }
}
