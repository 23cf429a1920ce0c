// src/refresh.rs
//! Refresh controller: owns the canonical leaderboard and its reload lifecycle.
//!
//! ```text
//!   Idle ──start──▶ Loading ──ok──▶ Ready ──check sees newer──▶ Loading
//!                      │                                          ▲
//!                      └──err──▶ Error ──check sees newer─────────┘
//! ```
//!
//! Work is split into jobs so frontends can run them off the UI thread:
//! `begin_*` hands out a job (or `None` when one is already in flight),
//! the job runs anywhere, and `finish_*` applies its outcome here. The
//! leaderboard is only ever replaced whole; a failed reload leaves it alone.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local, Utc};

use crate::{
    config::consts::RETRY_HINT,
    config::options::AppOptions,
    csv::Table,
    data::Leaderboard,
    error::LoadError,
    progress::Progress,
    source::Source,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Decides whether a probed version warrants a full reload.
pub trait ChangeDetector: Send {
    fn changed(&self, last: Option<DateTime<Utc>>, seen: Option<DateTime<Utc>>) -> bool;
}

/// Reload when the reported timestamp is strictly newer than the last one,
/// or when nothing has been recorded yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewerTimestamp;

impl ChangeDetector for NewerTimestamp {
    fn changed(&self, last: Option<DateTime<Utc>>, seen: Option<DateTime<Utc>>) -> bool {
        match (last, seen) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(last), Some(seen)) => seen > last,
        }
    }
}

/// Result of one successful pipeline pass.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub board: Leaderboard,
    pub modified: Option<DateTime<Utc>>,
}

/// fetch → decode → normalize → rank.
pub struct ReloadJob {
    source: Arc<dyn Source>,
    opts: AppOptions,
}

impl ReloadJob {
    pub fn run(self, mut progress: Option<&mut dyn Progress>) -> Result<Snapshot, LoadError> {
        if let Some(p) = progress.as_deref_mut() { p.begin(&self.source.describe()); }

        let result = self.pipeline(&mut progress);

        if let Some(p) = progress.as_deref_mut() { p.finish(result.is_ok()); }
        result
    }

    fn pipeline(&self, progress: &mut Option<&mut dyn Progress>) -> Result<Snapshot, LoadError> {
        let fetched = self.source.fetch()?;
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Fetched {} bytes", fetched.text.len()));
        }

        let table = Table::parse(&fetched.text, ',')?;
        let board = Leaderboard::build(&table, &self.opts);
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Ranked {} participants ({} rows)", board.len(), table.row_count()));
        }

        Ok(Snapshot { board, modified: fetched.modified })
    }
}

/// Metadata-only probe.
pub struct CheckJob {
    source: Arc<dyn Source>,
}

impl CheckJob {
    pub fn run(self) -> Result<Option<DateTime<Utc>>, LoadError> {
        self.source.probe()
    }
}

pub struct RefreshController {
    source: Arc<dyn Source>,
    opts: AppOptions,
    detector: Box<dyn ChangeDetector>,

    state: RefreshState,
    board: Leaderboard,
    last_modified: Option<DateTime<Utc>>,
    last_refresh: Option<DateTime<Local>>,
    error: Option<String>,

    reload_in_flight: bool,
    check_in_flight: bool,
    next_check: Option<Instant>,
}

impl RefreshController {
    pub fn new(source: Arc<dyn Source>, opts: AppOptions) -> Self {
        Self {
            source,
            opts,
            detector: Box::new(NewerTimestamp),
            state: RefreshState::Idle,
            board: Leaderboard::empty(),
            last_modified: None,
            last_refresh: None,
            error: None,
            reload_in_flight: false,
            check_in_flight: false,
            next_check: None,
        }
    }

    pub fn with_detector(mut self, detector: impl ChangeDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /* ---------- read side ---------- */

    pub fn state(&self) -> RefreshState { self.state }
    pub fn board(&self) -> &Leaderboard { &self.board }
    pub fn options(&self) -> &AppOptions { &self.opts }
    pub fn source(&self) -> &dyn Source { self.source.as_ref() }
    pub fn last_modified(&self) -> Option<DateTime<Utc>> { self.last_modified }
    pub fn last_refresh(&self) -> Option<DateTime<Local>> { self.last_refresh }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn is_loading(&self) -> bool { self.reload_in_flight }

    /// Error text plus the retry hint, for display.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| format!("Error loading leaderboard data: {e}\n{RETRY_HINT}"))
    }

    /* ---------- reload ---------- */

    /// `None` while another reload is in flight.
    pub fn begin_reload(&mut self) -> Option<ReloadJob> {
        if self.reload_in_flight {
            logd!("Reload: already in flight, trigger ignored");
            return None;
        }
        self.reload_in_flight = true;
        self.state = RefreshState::Loading;
        logf!("Reload: begin source={}", self.source.describe());
        Some(ReloadJob { source: Arc::clone(&self.source), opts: self.opts.clone() })
    }

    pub fn finish_reload(&mut self, outcome: Result<Snapshot, LoadError>) {
        self.reload_in_flight = false;
        match outcome {
            Ok(snap) => {
                logf!(
                    "Reload: OK participants={} modified={:?}",
                    snap.board.len(),
                    snap.modified
                );
                self.board = snap.board;
                if snap.modified.is_some() {
                    self.last_modified = snap.modified;
                }
                self.last_refresh = Some(Local::now());
                self.error = None;
                self.state = RefreshState::Ready;
            }
            Err(e) => {
                loge!("Reload: {} (keeping {} participants)", e, self.board.len());
                self.error = Some(e.to_string());
                self.state = RefreshState::Error;
            }
        }
    }

    /// Blocking reload on the current thread. Returns false if one was already running.
    pub fn reload(&mut self, progress: Option<&mut dyn Progress>) -> bool {
        let Some(job) = self.begin_reload() else { return false };
        let outcome = job.run(progress);
        self.finish_reload(outcome);
        true
    }

    /// Push the next check one interval out from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.next_check = Some(now + self.opts.source.poll_interval());
    }

    /// `Idle → Loading` and the first reload. Schedules the first check one interval out.
    pub fn start(&mut self, now: Instant, progress: Option<&mut dyn Progress>) {
        self.schedule(now);
        if self.state == RefreshState::Idle {
            self.reload(progress);
        }
    }

    /* ---------- periodic check ---------- */

    pub fn time_until_check(&self, now: Instant) -> Duration {
        match self.next_check {
            Some(at) => at.saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// `None` if not due yet, or a check/reload is already running.
    /// A check that comes due during a reload is skipped and pushed one
    /// interval out.
    pub fn begin_check(&mut self, now: Instant) -> Option<CheckJob> {
        if self.next_check.is_some_and(|at| now < at) {
            return None;
        }
        self.schedule(now);
        if self.check_in_flight || self.reload_in_flight {
            logd!("Check: skipped, job in flight");
            return None;
        }
        self.check_in_flight = true;
        Some(CheckJob { source: Arc::clone(&self.source) })
    }

    /// True when a full reload should follow. Failures never change state.
    pub fn finish_check(&mut self, outcome: Result<Option<DateTime<Utc>>, LoadError>) -> bool {
        self.check_in_flight = false;
        match outcome {
            Ok(seen) => {
                let changed = self.detector.changed(self.last_modified, seen);
                if changed {
                    logf!("Check: source changed ({:?} → {:?})", self.last_modified, seen);
                } else {
                    logd!("Check: unchanged ({:?})", seen);
                }
                changed
            }
            Err(e) => {
                logw!("Check: {} (will retry)", e);
                false
            }
        }
    }

    /// Blocking check + reload-if-changed. True when a reload ran.
    pub fn tick(&mut self, now: Instant, progress: Option<&mut dyn Progress>) -> bool {
        let Some(job) = self.begin_check(now) else { return false };
        let changed = self.finish_check(job.run());
        changed && self.reload(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use chrono::TimeZone;
    use crate::{config::consts::*, progress::tests::RecordingProgress, source::Fetched};

    /// Scripted source: each call pops the next canned answer.
    #[derive(Default)]
    struct Scripted {
        fetches: Mutex<Vec<Result<Fetched, LoadError>>>,
        probes: Mutex<Vec<Result<Option<DateTime<Utc>>, LoadError>>>,
    }

    impl Scripted {
        fn fetch_ok(self, text: &str, secs: i64) -> Self {
            self.fetches.lock().unwrap().insert(0, Ok(Fetched { text: s!(text), modified: Some(ts(secs)) }));
            self
        }
        fn fetch_err(self, e: LoadError) -> Self {
            self.fetches.lock().unwrap().insert(0, Err(e));
            self
        }
        fn probe(self, r: Result<Option<DateTime<Utc>>, LoadError>) -> Self {
            self.probes.lock().unwrap().insert(0, r);
            self
        }
    }

    impl Source for Scripted {
        fn describe(&self) -> String { s!("scripted") }
        fn fetch(&self) -> Result<Fetched, LoadError> {
            self.fetches.lock().unwrap().pop().unwrap_or_else(|| Err(LoadError::Transport(s!("script exhausted"))))
        }
        fn probe(&self) -> Result<Option<DateTime<Utc>>, LoadError> {
            self.probes.lock().unwrap().pop().unwrap_or(Ok(None))
        }
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn sheet(rows: &str) -> String {
        format!("{},{},{},{}\n{}", COL_NAME, COL_SKILL_COUNT, COL_ARCADE_COUNT, COL_COMPLETED, rows)
    }

    fn controller(src: Scripted) -> RefreshController {
        RefreshController::new(Arc::new(src), AppOptions::default())
    }

    #[test]
    fn start_loads_and_records_modified() {
        let mut c = controller(Scripted::default().fetch_ok(&sheet("A,5,0,No\nC,19,1,Yes\n"), 10));
        assert_eq!(c.state(), RefreshState::Idle);
        let mut prog = RecordingProgress::default();
        c.start(Instant::now(), Some(&mut prog));
        assert_eq!(c.state(), RefreshState::Ready);
        assert_eq!(c.board().participants()[0].name, "C");
        assert_eq!(c.last_modified(), Some(ts(10)));
        assert!(c.last_refresh().is_some());
        assert_eq!(prog.finished, Some(true));
        assert_eq!(prog.lines[0], "begin scripted");
    }

    #[test]
    fn first_load_failure_leaves_empty_board_and_message() {
        let mut c = controller(Scripted::default().fetch_err(LoadError::Transport(s!("refused"))));
        c.start(Instant::now(), None);
        assert_eq!(c.state(), RefreshState::Error);
        assert!(c.board().is_empty());
        let msg = c.error_message().unwrap();
        assert!(msg.contains("refused"));
        assert!(msg.contains(RETRY_HINT));
    }

    #[test]
    fn failed_reload_keeps_previous_board() {
        let src = Scripted::default()
            .fetch_ok(&sheet("A,5,0,No\n"), 10)
            .fetch_ok("a,b\n\"broken\n", 20);
        let mut c = controller(src);
        c.start(Instant::now(), None);
        let before = c.board().clone();
        let before_rows = before.participants().to_vec();

        assert!(c.reload(None));
        assert_eq!(c.state(), RefreshState::Error);
        assert!(c.board().same_as(&before));
        assert_eq!(c.board().participants(), before_rows.as_slice());
        assert_eq!(c.last_modified(), Some(ts(10)));
        assert!(c.error().unwrap().starts_with("decode"));
    }

    #[test]
    fn check_waits_for_interval() {
        let t0 = Instant::now();
        let mut c = controller(Scripted::default().fetch_ok(&sheet(""), 0));
        c.start(t0, None);
        assert!(c.begin_check(t0).is_none());
        assert_eq!(c.time_until_check(t0), Duration::from_secs(POLL_INTERVAL_SECS));
        let due = t0 + Duration::from_secs(POLL_INTERVAL_SECS);
        let job = c.begin_check(due);
        assert!(job.is_some());
        // second check can't start while the first is out
        assert!(c.begin_check(due + Duration::from_secs(600)).is_none());
    }

    #[test]
    fn check_due_during_reload_is_rescheduled() {
        let t0 = Instant::now();
        let mut c = controller(Scripted::default().fetch_ok(&sheet("A,1,0,No\n"), 1));
        c.schedule(t0);
        let job = c.begin_reload().unwrap();

        let due = t0 + Duration::from_secs(POLL_INTERVAL_SECS);
        assert!(c.begin_check(due).is_none());
        assert_eq!(c.time_until_check(due), Duration::from_secs(POLL_INTERVAL_SECS));

        c.finish_reload(job.run(None));
        assert!(c.begin_check(due).is_none());
        assert!(c.begin_check(due + Duration::from_secs(POLL_INTERVAL_SECS)).is_some());
    }

    #[test]
    fn newer_timestamp_triggers_reload() {
        let t0 = Instant::now();
        let src = Scripted::default()
            .fetch_ok(&sheet("A,1,0,No\n"), 10)
            .probe(Ok(Some(ts(10))))
            .probe(Ok(Some(ts(11))))
            .fetch_ok(&sheet("A,1,0,No\nB,9,0,No\n"), 11);
        let mut c = controller(src);
        c.start(t0, None);

        let step = Duration::from_secs(POLL_INTERVAL_SECS);
        assert!(!c.tick(t0 + step, None), "same timestamp must not reload");
        assert!(c.tick(t0 + step * 2, None));
        assert_eq!(c.board().len(), 2);
        assert_eq!(c.board().participants()[0].name, "B");
        assert_eq!(c.last_modified(), Some(ts(11)));
    }

    #[test]
    fn probe_failure_changes_nothing() {
        let t0 = Instant::now();
        let src = Scripted::default()
            .fetch_ok(&sheet("A,1,0,No\n"), 10)
            .probe(Err(LoadError::Transport(s!("timeout"))));
        let mut c = controller(src);
        c.start(t0, None);
        let board = c.board().clone();
        assert!(!c.tick(t0 + Duration::from_secs(POLL_INTERVAL_SECS), None));
        assert_eq!(c.state(), RefreshState::Ready);
        assert!(c.error().is_none());
        assert!(c.board().same_as(&board));
    }

    #[test]
    fn error_state_heals_on_next_check() {
        let t0 = Instant::now();
        let src = Scripted::default()
            .fetch_err(LoadError::Transport(s!("down")))
            .probe(Ok(Some(ts(5))))
            .fetch_ok(&sheet("A,1,0,No\n"), 5);
        let mut c = controller(src);
        c.start(t0, None);
        assert_eq!(c.state(), RefreshState::Error);
        assert!(c.tick(t0 + Duration::from_secs(POLL_INTERVAL_SECS), None));
        assert_eq!(c.state(), RefreshState::Ready);
        assert!(c.error().is_none());
        assert_eq!(c.board().len(), 1);
    }

    #[test]
    fn only_one_reload_in_flight() {
        let mut c = controller(Scripted::default().fetch_ok(&sheet("A,1,0,No\n"), 1));
        let job = c.begin_reload().unwrap();
        assert!(c.is_loading());
        assert!(c.begin_reload().is_none());
        assert!(!c.reload(None));
        assert!(c.begin_check(Instant::now()).is_none());
        c.finish_reload(job.run(None));
        assert!(!c.is_loading());
        assert_eq!(c.state(), RefreshState::Ready);
    }

    #[test]
    fn missing_modified_keeps_last_known() {
        let src = Scripted::default().fetch_ok(&sheet(""), 3);
        src.fetches.lock().unwrap().insert(0, Ok(Fetched { text: sheet(""), modified: None }));
        let mut c = controller(src);
        c.start(Instant::now(), None);
        assert!(c.reload(None));
        assert_eq!(c.last_modified(), Some(ts(3)));
    }

    #[test]
    fn detector_rules() {
        let d = NewerTimestamp;
        assert!(d.changed(None, Some(ts(0))));
        assert!(!d.changed(Some(ts(5)), None));
        assert!(!d.changed(Some(ts(5)), Some(ts(5))));
        assert!(!d.changed(Some(ts(5)), Some(ts(4))));
        assert!(d.changed(Some(ts(5)), Some(ts(6))));
    }

    #[test]
    fn custom_detector_is_used() {
        struct Always;
        impl ChangeDetector for Always {
            fn changed(&self, _: Option<DateTime<Utc>>, _: Option<DateTime<Utc>>) -> bool { true }
        }
        let t0 = Instant::now();
        let src = Scripted::default()
            .fetch_ok(&sheet(""), 1)
            .probe(Ok(None))
            .fetch_ok(&sheet("Z,1,0,No\n"), 1);
        let mut c = RefreshController::new(Arc::new(src), AppOptions::default()).with_detector(Always);
        c.start(t0, None);
        assert!(c.tick(t0 + Duration::from_secs(POLL_INTERVAL_SECS), None));
        assert_eq!(c.board().len(), 1);
    }
}
