use std::thread;
use std::time::{Duration, SystemTime};
/// Paces acquisition and stamps readings.
pub trait SampleClock {
    /// Block until one sample period has passed.
    fn wait(&mut self, period: Duration);
    fn now(&self) -> SystemTime;
}
/// Real time: sleeps the calling thread for every sample period.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;
impl SampleClock for WallClock {
    fn wait(&mut self, period: Duration) {
        thread::sleep(period);
    }
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
/// Virtual time useful for tests and fast playback; `wait` returns
/// immediately after moving the clock forward.
#[derive(Clone, Copy, Debug)]
pub struct ManualClock {
    current: SystemTime,
}
impl ManualClock {
    pub fn starting_at(start: SystemTime) -> Self {
        Self { current: start }
    }
    pub fn advance(&mut self, by: Duration) {
        self.current += by;
    }
}
impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(SystemTime::UNIX_EPOCH)
    }
}
impl SampleClock for ManualClock {
    fn wait(&mut self, period: Duration) {
        self.advance(period);
    }
    fn now(&self) -> SystemTime {
        self.current
    }
}
impl<C: SampleClock + ?Sized> SampleClock for Box<C> {
    fn wait(&mut self, period: Duration) {
        (**self).wait(period);
    }
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn manual_clock_advances_without_sleeping() {
        let mut clock = ManualClock::default();
        let before = std::time::Instant::now();
        for _ in 0..100 {
            clock.wait(Duration::from_millis(500));
        }
        assert!(before.elapsed() < Duration::from_secs(1));
        assert_eq!(
            clock.now().duration_since(SystemTime::UNIX_EPOCH).unwrap(),
            Duration::from_secs(50)
        );
    }
    #[test]
    fn boxed_clock_delegates() {
        let mut clock: Box<dyn SampleClock> = Box::new(ManualClock::default());
        clock.wait(Duration::from_secs(2));
        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(2)
        );
    }
}
