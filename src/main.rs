mod app_context;
mod config;
mod jobs;
mod monitor;
mod notifier;

use std::process::ExitCode;

use tokio::net::lookup_host;
use tracing_subscriber::EnvFilter;

use crate::app_context::build_monitor_service;
use crate::config::{Config, SourceKind, load_config};
use crate::jobs::run_monitor_job;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH_ENV: &str = "AIR_ALERT_BOT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

async fn log_dns_probe(host: &str, port: u16) {
    match lookup_host((host, port)).await {
        Ok(mut addresses) => {
            if let Some(address) = addresses.next() {
                log::info!("dns_probe_ok host={} address={}", host, address);
            } else {
                log::warn!("dns_probe_degraded host={} reason=no_records", host);
            }
        }
        Err(error) => {
            log::warn!(
                "dns_probe_degraded host={} reason=lookup_failed error={}",
                host,
                error
            );
        }
    }
}

fn source_endpoint(config: &Config) -> Option<(String, u16)> {
    if config.source.kind == SourceKind::Simulated {
        return None;
    }

    let url = reqwest::Url::parse(&config.source.url).ok()?;
    Some((url.host_str()?.to_string(), url.port_or_known_default()?))
}

// Main
#[tokio::main]
async fn main() -> ExitCode {
    init_json_logging();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config: Config = match load_config(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Air alert bot is starting... source={} area={} monitor_interval={} commemoration_enabled={}",
        config.source.kind.as_str(),
        config.area_name,
        config.monitor_interval,
        config.commemoration.enabled
    );

    if !config.dry_run {
        log_dns_probe("api.telegram.org", 443).await;
    }
    if let Some((host, port)) = source_endpoint(&config) {
        log_dns_probe(&host, port).await;
    }

    let service = match build_monitor_service(&config) {
        Ok(service) => service,
        Err(error) => {
            log::error!("Startup failed: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::warn!("shutdown_requested signal=ctrl_c"),
            Err(error) => {
                log::error!("shutdown_signal_listener_failed error={}", error);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = run_monitor_job(service, config.monitor_interval) => {}
        _ = shutdown => {}
    }

    ExitCode::SUCCESS
}
