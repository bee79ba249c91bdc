// src/scheduler.rs

use chrono::{Duration as ChronoDuration, NaiveDateTime};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::domain::snapshot::{kst_now, SNAPSHOT_TIME_FORMAT};
use crate::scraper;
use crate::store::SnapshotStore;

/// What one scheduled collection run targets.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub complex_no: String,
    pub trade_type: String,
    pub interval_min: u64,
}

/// Point-in-time view of the scheduler state, for the admin page.
#[derive(Debug, Clone)]
pub struct SchedulerStatus {
    pub running: bool,
    pub config: Option<RunConfig>,
    pub last_run: Option<NaiveDateTime>,
    pub next_run: Option<NaiveDateTime>,
    pub last_result: Option<String>,
}

#[derive(Default)]
struct Inner {
    running: bool,
    generation: u64,
    config: Option<RunConfig>,
    last_run: Option<NaiveDateTime>,
    next_run: Option<NaiveDateTime>,
    last_result: Option<String>,
}

/// Background collection loop with explicit, mutex-guarded state.
///
/// `start` runs one collection immediately, then repeats on the configured
/// interval. Each start bumps a generation counter; a loop whose generation
/// has been superseded exits quietly, so restarting never leaves two loops
/// appending at once.
pub struct Scheduler {
    inner: Arc<Mutex<Inner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("scheduler state poisoned")
    }

    pub fn start(&self, store: Arc<dyn SnapshotStore>, config: RunConfig) {
        let interval_min = config.interval_min.max(1);
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.running = true;
            state.config = Some(config.clone());
            state.next_run = None;
            state.last_result = None;
            state.generation
        };

        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            eprintln!(
                "🗓️ Scheduler started: complex {} ({}) every {interval_min} min",
                config.complex_no, config.trade_type
            );

            loop {
                // Collect first; the start control doubles as "run now".
                let started_at = kst_now().naive_local();
                let outcome =
                    scraper::collect_once(store.as_ref(), &config.complex_no, &config.trade_type);
                let line = match &outcome {
                    Ok(0) => "매물 없음 또는 API 오류".to_string(),
                    Ok(n) => format!("수집 완료: {n}건"),
                    Err(e) => format!("수집 실패: {e}"),
                };
                eprintln!("🗓️ [{}] {line}", started_at.format(SNAPSHOT_TIME_FORMAT));

                {
                    let mut state = inner.lock().expect("scheduler state poisoned");
                    if !state.running || state.generation != generation {
                        return;
                    }
                    state.last_run = Some(started_at);
                    state.next_run =
                        Some(started_at + ChronoDuration::minutes(interval_min as i64));
                    state.last_result = Some(line);
                }

                // Sleep in one-second ticks so stop() takes effect promptly.
                for _ in 0..interval_min * 60 {
                    thread::sleep(Duration::from_secs(1));
                    let state = inner.lock().expect("scheduler state poisoned");
                    if !state.running || state.generation != generation {
                        return;
                    }
                }
            }
        });
    }

    pub fn stop(&self) {
        let mut state = self.lock();
        state.running = false;
        state.next_run = None;
    }

    pub fn status(&self) -> SchedulerStatus {
        let state = self.lock();
        SchedulerStatus {
            running: state.running,
            config: state.config.clone(),
            last_run: state.last_run,
            next_run: state.next_run,
            last_result: state.last_result.clone(),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
