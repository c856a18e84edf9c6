pub mod config;
pub mod correction;
pub mod driver;
pub mod error;
pub mod models;
pub mod sampler;
pub mod scheduler;
pub mod sink;

use crate::config::AppConfig;
use crate::correction::AmbientCorrector;
use crate::driver::iio::IioDriver;
use crate::driver::SensorDriver;
use crate::sampler::SensorSample;
use crate::scheduler::Scheduler;
use crate::sink::RecordSink;
use anyhow::Context;
use log::{debug, error, info};

pub async fn run() -> anyhow::Result<()> {
    info!("Starting climate logger");

    tokio::select! {
        result = main_loop() => {
            match result {
                Ok(_) => info!("Application completed successfully"),
                Err(e) => {
                    error!("Application error: {e:#}");
                    // Print chain of error causes
                    let mut source = e.source();
                    while let Some(e) = source {
                        error!("Caused by: {e}");
                        source = e.source();
                    }
                    return Err(e).context("Application failed to run");
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}

async fn main_loop() -> anyhow::Result<()> {
    debug!("Loading configuration");
    let config = AppConfig::new().context("Failed to load configuration")?;

    let sink = RecordSink::open(&config.store.path)
        .await
        .context("Failed to open record store")?;
    sink.ensure_schema()
        .await
        .context("Failed to create record schema")?;

    let driver = IioDriver::new(&config.sensor.device).context("Failed to open sensor device")?;
    info!("Sampling {}", driver.banner());
    info!(
        "Appending to {} every {} seconds",
        config.store.path, config.sampling.interval
    );

    let corrector = AmbientCorrector::new(config.calibration());
    let mut sample = SensorSample::new(driver, corrector, config.plausible_bounds());

    // The sender stays alive for the whole loop; process termination is the
    // only shutdown path in the reference deployment.
    let (_shutdown_tx, shutdown_rx) = scheduler::shutdown_channel();
    let mut scheduler = Scheduler::new(config.interval(), shutdown_rx);

    loop {
        if !scheduler.tick().await {
            break;
        }

        // A failed cycle is logged and skipped; the cadence is kept.
        let record = match sample.update() {
            Ok(record) => record.clone(),
            Err(e) => {
                error!("Sampling cycle failed: {e}");
                continue;
            }
        };
        debug!("Corrected record: {record:?}");

        if let Err(e) = sink.append(&record).await {
            error!("Failed to append record: {e}");
        }
    }

    Ok(())
}
