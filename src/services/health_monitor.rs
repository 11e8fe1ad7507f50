//! Background health-check polling. Hits the service's own health endpoint
//! on a fixed interval and logs an alert when it misbehaves; shares no
//! state with request handling.

use std::time::Duration;

use crate::config::HealthMonitorConfig;

pub fn spawn(config: &HealthMonitorConfig, port: u16) {
    if config.interval_secs == 0 {
        tracing::info!("Health monitor disabled (interval 0)");
        return;
    }

    let interval_secs = config.interval_secs;
    let url = format!("http://127.0.0.1:{port}/api/v1/healthcheck");

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

        // first tick fires immediately; skip it so the server can bind
        interval.tick().await;

        loop {
            interval.tick().await;

            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!("Health check passed");
                }
                Ok(resp) => {
                    tracing::warn!("Health check endpoint returned status {}", resp.status());
                }
                Err(e) => {
                    tracing::warn!("Health check endpoint error: {}", e);
                }
            }
        }
    });

    tracing::info!("Health monitor started (every {interval_secs}s)");
}
