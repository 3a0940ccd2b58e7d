use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// moves the word; every missed period is replayed
    Fall,
    /// elapsed time and throughput display; missed periods collapse into one
    Clock,
}

/// A due tick, stamped with the epoch of the schedule that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub kind: TickKind,
    pub epoch: u64,
}

#[derive(Debug, Clone)]
struct Interval {
    kind: TickKind,
    period: Duration,
    next_due: Instant,
}

/// The session's periodic triggers. Every arm or cancel starts a new epoch.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    epoch: u64,
    intervals: Vec<Interval>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever was armed, then starts both intervals from `now`
    pub fn arm(&mut self, now: Instant, fall_period: Duration, clock_period: Duration) -> u64 {
        self.cancel_all();
        self.intervals = vec![
            Interval {
                kind: TickKind::Fall,
                period: fall_period,
                next_due: now + fall_period,
            },
            Interval {
                kind: TickKind::Clock,
                period: clock_period,
                next_due: now + clock_period,
            },
        ];
        self.epoch
    }

    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        self.intervals.clear();
    }

    pub fn is_armed(&self) -> bool {
        !self.intervals.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.intervals.iter().map(|i| i.next_due).min()
    }

    /// Pops the earliest tick due at `now`. Fall wins ties so floor contact is seen first.
    pub fn pop_due(&mut self, now: Instant) -> Option<Tick> {
        let interval = self
            .intervals
            .iter_mut()
            .filter(|i| i.next_due <= now)
            .min_by_key(|i| (i.next_due, i.kind == TickKind::Clock))?;

        match interval.kind {
            TickKind::Fall => interval.next_due += interval.period,
            TickKind::Clock => {
                while interval.next_due <= now {
                    interval.next_due += interval.period;
                }
            }
        }

        Some(Tick {
            kind: interval.kind,
            epoch: self.epoch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALL: Duration = Duration::from_millis(30);
    const CLOCK: Duration = Duration::from_millis(100);

    fn drain(schedule: &mut Schedule, now: Instant) -> Vec<TickKind> {
        std::iter::from_fn(|| schedule.pop_due(now))
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn nothing_due_before_first_period() {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.arm(start, FALL, CLOCK);

        assert!(schedule.is_armed());
        assert_eq!(schedule.pop_due(start), None);
        assert_eq!(schedule.next_deadline(), Some(start + FALL));
    }

    #[test]
    fn fall_ticks_are_replayed_clock_ticks_coalesce() {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.arm(start, FALL, CLOCK);

        let ticks = drain(&mut schedule, start + Duration::from_millis(310));
        let falls = ticks.iter().filter(|k| **k == TickKind::Fall).count();
        let clocks = ticks.iter().filter(|k| **k == TickKind::Clock).count();

        assert_eq!(falls, 10);
        assert_eq!(clocks, 1);
        assert_eq!(
            schedule.next_deadline(),
            Some(start + Duration::from_millis(330))
        );
    }

    #[test]
    fn ticks_come_out_in_deadline_order() {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        schedule.arm(start, FALL, CLOCK);

        let ticks = drain(&mut schedule, start + Duration::from_millis(100));
        assert_eq!(
            ticks,
            vec![
                TickKind::Fall,
                TickKind::Fall,
                TickKind::Fall,
                TickKind::Clock
            ]
        );
    }

    #[test]
    fn cancel_stops_everything_and_bumps_epoch() {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        let first = schedule.arm(start, FALL, CLOCK);
        schedule.cancel_all();

        assert!(!schedule.is_armed());
        assert!(schedule.epoch() > first);
        assert_eq!(schedule.next_deadline(), None);
        assert_eq!(schedule.pop_due(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn rearm_replaces_previous_intervals() {
        let start = Instant::now();
        let mut schedule = Schedule::new();
        let first = schedule.arm(start, FALL, CLOCK);
        let later = start + Duration::from_secs(5);
        let second = schedule.arm(later, FALL, CLOCK);

        assert_ne!(first, second);
        // the old intervals would have hundreds of ticks due; the new ones have none
        assert_eq!(schedule.pop_due(later), None);
        let tick = schedule.pop_due(later + FALL).unwrap();
        assert_eq!(tick.epoch, second);
    }
}
