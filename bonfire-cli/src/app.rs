//! Per-invocation context shared by the backend commands.

use std::future::Future;

use tokio::runtime::Runtime;

use bonfire_api::{ApiConfig, StoreClient};
use bonfire_core::Variant;
use bonfire_lib::settings::resolve_variant;

use crate::error::CliError;
use crate::spinner;

pub(crate) struct App {
    pub client: StoreClient,
    pub variant: Variant,
    pub quiet: bool,
    rt: Runtime,
}

impl App {
    /// Resolve configuration, build the HTTP client and an async runtime.
    pub(crate) fn new(
        api_url: Option<&str>,
        variant: Option<Variant>,
        quiet: bool,
    ) -> Result<Self, CliError> {
        let (mut config, sources) = ApiConfig::load()?;
        if let Some(url) = api_url {
            config = config.with_base_url(url)?;
        }
        log::debug!(
            "Backend {} (from {}), timeout {:?} (from {})",
            config.base_url,
            if api_url.is_some() {
                "--api-url".to_string()
            } else {
                sources.base_url.to_string()
            },
            config.timeout,
            sources.timeout,
        );

        let client = StoreClient::new(&config)?;
        let rt = Runtime::new().map_err(|e| CliError::runtime(e.to_string()))?;
        Ok(Self {
            client,
            variant: resolve_variant(variant),
            quiet,
            rt,
        })
    }

    /// Drive `fut` to completion behind a spinner showing `msg`.
    pub(crate) fn run<F: Future>(&self, msg: &str, fut: F) -> F::Output {
        let pb = spinner::start(msg, self.quiet);
        let out = self.rt.block_on(fut);
        pb.finish_and_clear();
        out
    }
}
