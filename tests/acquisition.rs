use std::time::{Duration, SystemTime};
use daq_sim::daq::{DaqSession, ManualClock, SessionState};
use daq_sim::{DaqConfig, DaqError, Identity, Instrument};
use ndarray::Array1;
fn session(id: &str) -> DaqSession<ManualClock> {
    DaqSession::new(
        Identity::parse(id).unwrap(),
        DaqConfig::default(),
        ManualClock::starting_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)),
    )
    .unwrap()
}
fn run_script(id: &str) -> Vec<u16> {
    let mut daq = session(id);
    let mut codes = Vec::new();
    daq.connect("coursework", 0.0).unwrap();
    daq.trigger().unwrap();
    codes.extend(daq.acquire(40).unwrap().iter().map(|r| r.code));
    daq.connect("constant", 1.5).unwrap();
    daq.trigger().unwrap();
    codes.extend(daq.acquire(10).unwrap().iter().map(|r| r.code));
    codes
}
#[test]
fn same_identity_gives_identical_readings() {
    assert_eq!(run_script("s1234567"), run_script("s1234567"));
}
#[test]
fn different_identity_gives_different_readings() {
    assert_ne!(run_script("s1234567"), run_script("s2345678"));
}
#[test]
fn coursework_curve_is_reproducible_per_identity() {
    let times = Array1::linspace(0.0, 60.0, 121);
    let mut a = session("s0000001");
    let mut b = session("s0000001");
    a.connect("coursework", 0.0).unwrap();
    b.connect("coursework", 0.0).unwrap();
    assert_eq!(a.voltage(&times).unwrap(), b.voltage(&times).unwrap());
}
#[test]
fn coursework_session_matches_fixed_envelope() {
    let mut daq = session("s7654321");
    daq.connect_instrument(Instrument::Coursework, 0.0).unwrap();
    let volts = daq
        .voltage(&Array1::from(vec![0.0, 10.0, 30.0, 50.0, 60.0]))
        .unwrap();
    let expected = [-3.0, -2.0, 4.5, -2.0, -4.0];
    for (v, e) in volts.iter().zip(expected) {
        assert!((v - e).abs() < 1e-9, "{v} != {e}");
    }
    let profile = daq.profile().unwrap();
    for t in [3.0, 17.5, 41.0] {
        assert!((profile.voltage(t) - profile.voltage(t + 60.0)).abs() < 1e-9);
    }
}
#[test]
fn retrigger_restarts_the_ideal_signal() {
    let mut daq = session("s1234567");
    daq.connect("constant", -2.0).unwrap();
    daq.trigger().unwrap();
    daq.next_reading().unwrap();
    let first = daq.profile().unwrap().voltage(daq.elapsed());
    daq.acquire(5).unwrap();
    daq.trigger().unwrap();
    daq.next_reading().unwrap();
    let second = daq.profile().unwrap().voltage(daq.elapsed());
    assert_eq!(first, second);
    assert_eq!(daq.elapsed(), 0.5);
}
#[test]
fn ramp_readings_rise_over_a_cycle() {
    let mut daq = session("s1234567");
    daq.connect("ramp up", 0.0).unwrap();
    daq.trigger().unwrap();
    let readings = daq.acquire(120).unwrap();
    let head: u32 = readings[..10].iter().map(|r| u32::from(r.code)).sum();
    let tail: u32 = readings[110..].iter().map(|r| u32::from(r.code)).sum();
    assert!(tail > head + 10 * 700);
}
#[test]
fn out_of_range_constant_saturates() {
    let mut daq = session("s1234567");
    daq.connect("constant", 9.0).unwrap();
    daq.trigger().unwrap();
    assert!(daq.acquire(20).unwrap().iter().all(|r| r.code == 1023));
    daq.connect("constant", -9.0).unwrap();
    daq.trigger().unwrap();
    assert!(daq.acquire(20).unwrap().iter().all(|r| r.code == 0));
}
#[test]
fn error_paths() {
    let mut daq = session("s1234567");
    assert!(matches!(daq.next_reading(), Err(DaqError::NotTriggered)));
    assert!(matches!(
        daq.connect("oscilloscope", 0.0),
        Err(DaqError::UnknownInstrument(_))
    ));
    assert_eq!(daq.state(), SessionState::Uninitialized);
    assert!(matches!(
        Identity::parse("1234567"),
        Err(DaqError::InvalidIdentity(_))
    ));
}
