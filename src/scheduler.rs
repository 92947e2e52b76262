// src/scheduler.rs
//! Daily trigger for unattended scrape + analyze runs

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime, TimeZone};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// The first instant strictly after `now` whose wall-clock time is `at`
pub fn next_occurrence(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// How long to wait from `now` (local time) until the next `at`
fn delay_until(at: NaiveTime) -> Duration {
    let now = Local::now();
    let next = next_occurrence(now.naive_local(), at);

    // a DST gap can make the naive target nonexistent; fall back to the naive delta
    let target = match Local.from_local_datetime(&next).earliest() {
        Some(target) => target,
        None => {
            warn!("Local time {} does not exist, using naive delay", next);
            return (next - now.naive_local()).to_std().unwrap_or_default();
        }
    };
    (target - now).to_std().unwrap_or_default()
}

/// Run `job` every day at `at` local time, `runs` times or forever.
/// A failed run is logged and the schedule continues.
pub async fn run_daily<F, Fut>(at: NaiveTime, runs: Option<usize>, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut completed = 0usize;
    while runs.map_or(true, |limit| completed < limit) {
        let delay = delay_until(at);
        info!(
            "Next run at {} (in {} minutes)",
            at.format("%H:%M"),
            delay.as_secs() / 60
        );
        tokio::time::sleep(delay).await;

        match job().await {
            Ok(()) => info!("Scheduled run {} finished", completed + 1),
            Err(e) => error!("Scheduled run {} failed: {:#}", completed + 1, e),
        }
        completed += 1;
    }
    info!("Schedule finished after {} runs", completed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_later_today() {
        let now = day(10).and_time(at(8, 30));
        assert_eq!(next_occurrence(now, at(9, 0)), day(10).and_time(at(9, 0)));
    }

    #[test]
    fn test_already_passed_rolls_over() {
        let now = day(10).and_time(at(9, 30));
        assert_eq!(next_occurrence(now, at(9, 0)), day(11).and_time(at(9, 0)));
    }

    #[test]
    fn test_exact_time_rolls_over() {
        let now = day(10).and_time(at(9, 0));
        assert_eq!(next_occurrence(now, at(9, 0)), day(11).and_time(at(9, 0)));
    }

    #[test]
    fn test_month_boundary() {
        let now = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_time(at(23, 59));
        assert_eq!(next_occurrence(now, at(0, 0)), day(1).and_time(at(0, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_runs_do_not_stop_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        run_daily(at(3, 0), Some(3), move || {
            let counter = Arc::clone(&counter);
            async move {
                let call = counter.fetch_add(1, Ordering::SeqCst);
                if call == 0 {
                    anyhow::bail!("listing unavailable");
                }
                Ok(())
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
