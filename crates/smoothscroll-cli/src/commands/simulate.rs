use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::time::{sleep, Instant};
use tracing::info;

use smoothscroll_core::scroll::ScrollConfigExt;
use smoothscroll_core::{AppConfig, Axis, ScrollAnimator, SpeedLevel};

pub struct SimulateOptions {
    pub distance: f64,
    pub speed: SpeedLevel,
    pub axis: Axis,
    pub repeat: u32,
    pub every_ms: u64,
    pub stop_after_ms: Option<u64>,
}

/// One emitted step
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub tick: usize,
    pub elapsed_ms: u64,
    pub axis: Axis,
    pub step: i32,
    pub emitted: i64,
}

pub async fn run(config: &AppConfig, options: SimulateOptions, json: bool) -> Result<()> {
    let records = record(config, &options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No steps emitted (distance too small to animate).");
        return Ok(());
    }

    println!(
        "{} request(s) of {} on the {} axis at {:?} speed:\n",
        options.repeat.max(1),
        options.distance,
        options.axis,
        options.speed
    );
    println!("  tick   time   step   total");
    for r in &records {
        println!(
            "  {:>4} {:>4}ms {:>6} {:>7}",
            r.tick, r.elapsed_ms, r.step, r.emitted
        );
    }

    Ok(())
}

/// Drive a real animator and collect what it hands to its stepper
pub async fn record(config: &AppConfig, options: &SimulateOptions) -> Result<Vec<StepRecord>> {
    let start = Instant::now();
    let records: Arc<Mutex<Vec<StepRecord>>> = Arc::default();

    let sink = records.clone();
    let stepper = move |axis: Axis, step: i32| {
        let mut records = match sink.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        let emitted = records.last().map(|r| r.emitted).unwrap_or(0) + step as i64;
        let tick = records.len();
        records.push(StepRecord {
            tick,
            elapsed_ms: start.elapsed().as_millis() as u64,
            axis,
            step,
            emitted,
        });
    };

    let animator = ScrollAnimator::new(options.axis, config.scroll.clone(), stepper, options.speed);
    let tick = config.scroll.tick_interval();
    let stop_at = options
        .stop_after_ms
        .map(|ms| start + Duration::from_millis(ms));

    for i in 0..options.repeat.max(1) {
        if i > 0 {
            sleep(Duration::from_millis(options.every_ms)).await;
        }
        animator.request(options.distance)?;
    }

    while animator.is_running() {
        if let Some(stop_at) = stop_at {
            if Instant::now() >= stop_at {
                animator.stop()?;
                info!(elapsed_ms = start.elapsed().as_millis() as u64, "Simulation stopped");
                break;
            }
        }
        sleep(tick).await;
    }

    let records = match records.lock() {
        Ok(records) => records.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(distance: f64) -> SimulateOptions {
        SimulateOptions {
            distance,
            speed: SpeedLevel::Normal,
            axis: Axis::Vertical,
            repeat: 1,
            every_ms: 50,
            stop_after_ms: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_single_request() {
        let records = record(&AppConfig::default(), &options(360.0)).await.unwrap();
        assert_eq!(records[0].step, 30);
        assert_eq!(records.last().unwrap().emitted, 360);
        assert!(records.iter().all(|r| r.axis == Axis::Vertical));
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_stop_after() {
        let mut opts = options(-720.0);
        opts.stop_after_ms = Some(40);
        let records = record(&AppConfig::default(), &opts).await.unwrap();
        assert!(!records.is_empty());
        assert!(records.last().unwrap().emitted > -720);
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_tiny_request() {
        let records = record(&AppConfig::default(), &options(0.2)).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_requests_accumulate() {
        let mut opts = options(120.0);
        opts.repeat = 3;
        opts.every_ms = 100;
        let records = record(&AppConfig::default(), &opts).await.unwrap();
        // Late repeats are accelerated, so more than 3 x 120 gets emitted
        assert!(records.last().unwrap().emitted > 360);
    }

    #[test]
    fn test_record_serializes() {
        let record = StepRecord {
            tick: 0,
            elapsed_ms: 0,
            axis: Axis::Horizontal,
            step: -12,
            emitted: -12,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"axis\":\"horizontal\""));
    }
}
