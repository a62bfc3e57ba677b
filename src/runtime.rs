//! Event loop plumbing: where events come from, how long the loop sleeps
//! and how many wall-clock seconds the running session is owed.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

const ONE_SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub enum StudyEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived before the wait ran out.
    Tick,
}

/// Where the loop reads its events from.
pub trait EventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StudyEvent, RecvTimeoutError>;
}

/// Events delivered over an mpsc channel, either from the terminal reader
/// thread or straight from a test.
pub struct ChannelEventSource {
    rx: Receiver<StudyEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<StudyEvent>) -> Self {
        Self { rx }
    }

    /// Spawn a thread forwarding key presses and resizes from crossterm.
    /// Key releases and repeats are dropped here so the app only sees presses.
    pub fn crossterm() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || forward_terminal_events(&tx));
        Self::new(rx)
    }
}

fn forward_terminal_events(tx: &Sender<StudyEvent>) {
    loop {
        let forwarded = match event::read() {
            Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => tx.send(StudyEvent::Key(key)),
            Ok(CtEvent::Resize(_, _)) => tx.send(StudyEvent::Resize),
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(%err, "terminal event reader stopped");
                return;
            }
        };
        if forwarded.is_err() {
            return;
        }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StudyEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Upper bound on how long the loop sleeps without input.
pub trait Ticker {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Source of "now" for second accounting.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Turns wall-clock time into whole-second credits for the session timer.
///
/// The loop may wake at any rate (keys, resizes, ticks); `due` only ever
/// hands out full seconds and keeps the remainder for the next call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondPacer {
    anchor: Option<Instant>,
}

impl SecondPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `now`. Already armed pacers keep their anchor.
    pub fn arm(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Stop counting and drop any partial second.
    pub fn disarm(&mut self) {
        self.anchor = None;
    }

    pub fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Whole seconds elapsed since the last credit.
    pub fn due(&mut self, now: Instant) -> u64 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let whole = now.saturating_duration_since(anchor).as_secs();
        if whole > 0 {
            self.anchor = Some(anchor + Duration::from_secs(whole));
        }
        whole
    }

    /// Time left until the next whole second is owed, `None` when disarmed.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.anchor
            .map(|anchor| (anchor + ONE_SECOND).saturating_duration_since(now))
    }
}

/// One turn of the event loop.
#[derive(Clone, Debug)]
pub struct Step {
    pub event: StudyEvent,
    /// Whole seconds the running session earned while waiting for `event`.
    pub seconds: u64,
}

/// Waits for the next event and settles the seconds owed to the session.
pub struct Runner<E: EventSource, T: Ticker, C: Clock = SystemClock> {
    event_source: E,
    ticker: T,
    clock: C,
    pacer: SecondPacer,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self::with_clock(event_source, ticker, SystemClock)
    }
}

impl<E: EventSource, T: Ticker, C: Clock> Runner<E, T, C> {
    pub fn with_clock(event_source: E, ticker: T, clock: C) -> Self {
        Self {
            event_source,
            ticker,
            clock,
            pacer: SecondPacer::new(),
        }
    }

    /// Block until an event arrives, the tick interval passes or the next
    /// second falls due, whichever is first.
    ///
    /// `running` says whether the session timer counts right now: the pacer
    /// arms when it turns true and drops its partial second when it turns
    /// false. Seconds owed are reported with the event that ended the wait,
    /// so the caller credits them before acting on a pause or stop key.
    pub fn step(&mut self, running: bool) -> Step {
        let now = self.clock.now();
        if running {
            self.pacer.arm(now);
        } else {
            self.pacer.disarm();
        }

        let wait = match self.pacer.until_next(now) {
            Some(next) => next.min(self.ticker.interval()),
            None => self.ticker.interval(),
        };

        let event = match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => StudyEvent::Tick,
        };

        Step {
            event,
            seconds: self.pacer.due(self.clock.now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn runner(
        rx: Receiver<StudyEvent>,
        clock: &ManualClock,
    ) -> Runner<ChannelEventSource, FixedTicker, ManualClock> {
        Runner::with_clock(
            ChannelEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
            clock.clone(),
        )
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let mut runner = Runner::new(
            ChannelEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        let step = runner.step(false);
        assert_matches!(step.event, StudyEvent::Tick);
        assert_eq!(step.seconds, 0);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(StudyEvent::Resize).unwrap();
        let clock = ManualClock::new(Instant::now());
        let mut runner = runner(rx, &clock);

        assert_matches!(runner.step(false).event, StudyEvent::Resize);
    }

    #[test]
    fn running_steps_collect_whole_seconds() {
        let (_tx, rx) = mpsc::channel();
        let clock = ManualClock::new(Instant::now());
        let mut runner = runner(rx, &clock);

        // arms the pacer
        assert_eq!(runner.step(true).seconds, 0);

        clock.advance(Duration::from_millis(2500));
        assert_eq!(runner.step(true).seconds, 2);
        clock.advance(Duration::from_millis(600));
        assert_eq!(runner.step(true).seconds, 1);
    }

    #[test]
    fn key_step_carries_seconds_owed_so_far() {
        let (tx, rx) = mpsc::channel();
        let clock = ManualClock::new(Instant::now());
        let mut runner = runner(rx, &clock);
        runner.step(true);

        clock.advance(Duration::from_millis(3400));
        tx.send(StudyEvent::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)))
            .unwrap();

        let step = runner.step(true);
        assert_matches!(step.event, StudyEvent::Key(key) if key.code == KeyCode::Char('x'));
        assert_eq!(step.seconds, 3);
    }

    #[test]
    fn idle_steps_never_credit() {
        let (_tx, rx) = mpsc::channel();
        let clock = ManualClock::new(Instant::now());
        let mut runner = runner(rx, &clock);

        runner.step(true);
        clock.advance(Duration::from_millis(800));
        // stopping drops the 0.8s partial second
        assert_eq!(runner.step(false).seconds, 0);
        clock.advance(Duration::from_secs(10));
        assert_eq!(runner.step(false).seconds, 0);

        // counting restarts from the moment the session runs again
        assert_eq!(runner.step(true).seconds, 0);
        clock.advance(Duration::from_millis(999));
        assert_eq!(runner.step(true).seconds, 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(runner.step(true).seconds, 1);
    }

    #[test]
    fn pacer_unarmed_credits_nothing() {
        let mut pacer = SecondPacer::new();
        assert_eq!(pacer.due(Instant::now()), 0);
        assert!(!pacer.is_armed());
        assert_eq!(pacer.until_next(Instant::now()), None);
    }

    #[test]
    fn pacer_carries_partial_seconds() {
        let t0 = Instant::now();
        let mut pacer = SecondPacer::new();
        pacer.arm(t0);

        assert_eq!(pacer.due(t0 + Duration::from_millis(900)), 0);
        assert_eq!(pacer.due(t0 + Duration::from_millis(2500)), 2);
        // 0.6s later: 0.5s carried from before + 0.6s
        assert_eq!(pacer.due(t0 + Duration::from_millis(3100)), 1);
        assert_eq!(pacer.due(t0 + Duration::from_millis(3900)), 0);
    }

    #[test]
    fn pacer_reports_time_to_next_second() {
        let t0 = Instant::now();
        let mut pacer = SecondPacer::new();
        pacer.arm(t0);
        assert_eq!(
            pacer.until_next(t0 + Duration::from_millis(300)),
            Some(Duration::from_millis(700))
        );
        assert_eq!(pacer.until_next(t0 + Duration::from_secs(2)), Some(Duration::ZERO));
    }

    #[test]
    fn pacer_rearm_keeps_existing_anchor() {
        let t0 = Instant::now();
        let mut pacer = SecondPacer::new();
        pacer.arm(t0);
        pacer.arm(t0 + Duration::from_millis(800));
        assert_eq!(pacer.due(t0 + Duration::from_millis(1000)), 1);
    }

    #[test]
    fn pacer_ignores_clock_going_backwards() {
        let t0 = Instant::now() + Duration::from_secs(5);
        let mut pacer = SecondPacer::new();
        pacer.arm(t0);
        assert_eq!(pacer.due(t0 - Duration::from_secs(1)), 0);
    }
}
