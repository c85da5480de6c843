//! Live dashboard command

use super::helpers::record_activity;
use mekon_core::{dashboard, error::Result, DashOptions, MekonConfig, Providers};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Handle dash command
pub async fn handle(config: &MekonConfig, refresh_secs: u64, no_interactive: bool) -> Result<()> {
    let options = DashOptions {
        refresh: Duration::from_secs(refresh_secs),
        interactive: !no_interactive,
    };
    debug!("Dashboard options: {:?}", options);

    if options.interactive {
        record_activity(
            config,
            "dash",
            &format!("refresh={}s", refresh_secs),
            "ok",
        );
    }

    let providers = Arc::new(Providers::live(config));
    dashboard::run(options, providers).await
}
