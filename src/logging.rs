use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::AppConfig;
use crate::Error;

pub fn init(config: &AppConfig) -> Result<(), Error> {
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    let directives = [
        "serenity=warn",
        "tokio_tungstenite=warn",
        "h2=warn",
        "hyper=warn",
    ];

    for directive in directives {
        if let Ok(parsed) = directive.parse::<Directive>() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    let stdout_layer = default_layer().with_writer(std::io::stdout);

    match &config.log.path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file_layer = default_layer().with_writer(Arc::new(file)).with_ansi(false);
            Registry::default()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .try_init()?;
        }
        None => {
            Registry::default()
                .with(env_filter)
                .with(stdout_layer)
                .try_init()?;
        }
    }

    Ok(())
}

fn default_layer<S>() -> tracing_subscriber::fmt::Layer<S>
where
    S: Subscriber,
{
    tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
}
