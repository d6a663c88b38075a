//! appcache-sim - drive a scripted navigation through the cache host.
//!
//! Simulates one main-resource navigation against the in-memory backend:
//! request stamping, response capture, cache selection, a replayed backend
//! event stream, and script status polls along the way.

mod output;
mod scenario;

use std::sync::Arc;

use anyhow::{Context, Result};
use appcache_core::{
    CacheEventId, CacheHostClient, CacheId, LogLevel, ResourceRequest, ResourceResponse,
};
use appcache_host::{CacheHost, InMemoryBackend};
use clap::Parser;
use url::Url;

use output::Output;
use scenario::Scenario;

/// Drive one scripted navigation through the application cache host
#[derive(Parser)]
#[command(name = "appcache-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Document URL being navigated
    #[arg(long, default_value = "http://example.com/")]
    document: String,

    /// Manifest URL referenced by the document (omit for a no-manifest selection)
    #[arg(long)]
    manifest: Option<String>,

    /// HTTP method of the navigation
    #[arg(long, default_value = "GET")]
    method: String,

    /// Cache id the response was served from (simulates an existing association)
    #[arg(long)]
    cache_id: Option<i64>,

    /// Manifest URL the existing association was selected under
    #[arg(long)]
    cached_manifest: Option<String>,

    /// Scenario TOML replayed as the backend event stream
    #[arg(long)]
    scenario: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Client that prints relayed script notifications to the terminal.
struct ConsoleClient {
    out: Output,
}

impl CacheHostClient for ConsoleClient {
    fn notify_event(&self, event: CacheEventId) {
        self.out.info(&format!("script event: {}", event));
    }

    fn notify_progress_event(&self, url: &Url, num_total: u32, num_complete: u32) {
        self.out.info(&format!(
            "script progress: {}/{} {}",
            num_complete, num_total, url
        ));
    }

    fn notify_log_message(&self, level: LogLevel, message: &str) {
        self.out.debug(&format!("console [{}] {}", level, message));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let out = Output::new(cli.verbose);

    let document_url = Url::parse(&cli.document)
        .with_context(|| format!("invalid document URL: {}", cli.document))?;

    let backend = Arc::new(InMemoryBackend::new());
    let mut host = CacheHost::new(Arc::clone(&backend), ConsoleClient { out: out.clone() });

    out.header("Navigation");
    let mut request = ResourceRequest::new(document_url.clone(), cli.method.as_str());
    host.will_start_main_resource_request(&mut request);
    out.step(
        1,
        4,
        &format!(
            "main resource request ({}) stamped with {}",
            request.method,
            host.host_id()
        ),
    );

    let mut response = ResourceResponse::new(document_url);
    if let Some(raw_id) = cli.cache_id {
        let cached_manifest = cli
            .cached_manifest
            .as_deref()
            .context("--cache-id requires --cached-manifest")?;
        let cached_manifest = Url::parse(cached_manifest)
            .with_context(|| format!("invalid cached manifest URL: {}", cached_manifest))?;
        response = response.with_cache(CacheId::new(raw_id), cached_manifest);
    }
    host.did_receive_response_for_main_resource(response);
    out.step(2, 4, "main resource response captured");

    let proceed = match &cli.manifest {
        Some(raw) => {
            let manifest =
                Url::parse(raw).with_context(|| format!("invalid manifest URL: {}", raw))?;
            host.select_cache_with_manifest(&manifest)
        },
        None => {
            host.select_cache_without_manifest();
            true
        },
    };
    if proceed {
        out.step(
            3,
            4,
            &format!(
                "cache selected (master entry: {:?})",
                host.master_entry_disposition()
            ),
        );
    } else {
        out.warn("foreign entry detected; the navigation would be restarted");
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    if let Some(status) = scenario.status {
        backend.set_status(host.host_id(), status);
    }
    out.step(4, 4, &format!("script polls status: {}", host.status()));

    for event in &scenario.events {
        let event_id = event.event_id()?;
        replay_event(&mut host, event_id, event)?;
        out.info(&format!("status after {}: {}", event_id, host.status()));
    }

    report_backend_calls(&out, &backend);
    out.success("navigation simulation complete");
    Ok(())
}

fn replay_event(
    host: &mut CacheHost<InMemoryBackend, ConsoleClient>,
    event_id: CacheEventId,
    event: &scenario::ScenarioEvent,
) -> Result<()> {
    match event_id {
        CacheEventId::Progress => {
            let raw = event
                .url
                .as_deref()
                .context("Progress event requires a url")?;
            let resource =
                Url::parse(raw).with_context(|| format!("invalid progress URL: {}", raw))?;
            host.on_progress_event_raised(
                &resource,
                event.total.unwrap_or(0),
                event.complete.unwrap_or(0),
            );
        },
        CacheEventId::Error => {
            let message = event.message.as_deref().unwrap_or("unknown error");
            host.on_error_event_raised(message);
        },
        other => host.on_event_raised(other),
    }
    Ok(())
}

fn report_backend_calls(out: &Output, backend: &InMemoryBackend) {
    out.header("Backend calls");
    for selection in backend.selections() {
        let manifest = selection
            .manifest_url
            .map(|url| url.to_string())
            .unwrap_or_else(|| "none".to_string());
        out.kv(
            "select_cache",
            &format!(
                "{} {} manifest={}",
                selection.document_url, selection.cache_id, manifest
            ),
        );
    }
    for foreign in backend.foreign_entries() {
        out.kv(
            "mark_as_foreign_entry",
            &format!("{} {}", foreign.document_url, foreign.cache_id),
        );
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
