use clap::Parser;
use image_mirror::{ConfigError, Mirror, MirrorConfig, MirrorError};
use std::path::PathBuf;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::from(2);
        }
    };

    // The working directory is read here only; the library takes it as a parameter
    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(e) => {
            ::log::error!("Failed to read the current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Configuration is validated by the run itself before any request is made
    let mirror = build_mirror(&args, config, root);

    tokio::select! {
        result = mirror.run() => match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(MirrorError::Config(e)) => {
                ::log::error!("{}", e);
                ExitCode::from(2)
            }
            Err(e) => {
                log_error_chain(&e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            ::log::error!("The script has been stopped.");
            ExitCode::from(130)
        }
    }
}

/// Load the optional config file and apply the required parameters
fn build_config(args: &Args) -> Result<MirrorConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => MirrorConfig::from_file(path)?,
        None => {
            let url = args.url.as_deref().ok_or(ConfigError::Missing("url"))?;
            let domain = args.domain.as_deref().ok_or(ConfigError::Missing("domain"))?;
            MirrorConfig::new(url, domain)
        }
    };

    if let Some(url) = &args.url {
        config.report_url = url.clone();
    }
    if let Some(domain) = &args.domain {
        config.domain = domain.clone();
    }

    Ok(config)
}

/// Apply the optional command-line overrides through the builder
fn build_mirror(args: &Args, config: MirrorConfig, root: PathBuf) -> Mirror {
    let mut mirror = Mirror::new(config, root);

    if let Some(origin) = &args.report_origin {
        mirror = mirror.with_report_origin(origin);
    }
    if let Some(policy) = args.on_io_error {
        mirror = mirror.with_io_policy(policy.into());
    }
    if let Some(timeout) = args.timeout {
        mirror = mirror.with_timeout(timeout);
    }
    if let Some(endpoint) = &args.webdriver {
        mirror = mirror.with_webdriver(endpoint);
    }

    mirror
}

fn log_error_chain(error: &dyn std::error::Error) {
    ::log::error!("{}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        ::log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
