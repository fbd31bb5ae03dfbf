use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert!(limits.move_time.is_none());
    assert!(!limits.should_stop());
}

#[test]
fn test_search_limits_time_only() {
    let limits = SearchLimits::time(Duration::from_millis(250));
    assert_eq!(limits.depth, u8::MAX);
    assert_eq!(limits.move_time, Some(Duration::from_millis(250)));
    assert_eq!(
        limits.time_control.time_limit(),
        Some(Duration::from_millis(250))
    );
}

#[test]
fn test_time_control_expiry() {
    let tc = TimeControl::new(Some(Duration::from_millis(10)));
    tc.start();
    assert!(!tc.is_stopped());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
    assert_eq!(tc.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_time_control_not_started_never_expires() {
    let tc = TimeControl::new(Some(Duration::from_millis(1)));
    thread::sleep(Duration::from_millis(5));
    assert!(!tc.is_started());
    assert!(!tc.check_time());
    assert_eq!(tc.elapsed(), Duration::ZERO);

    tc.clone().start();
    assert!(tc.is_started());
}

#[test]
fn test_time_control_no_limit() {
    let tc = TimeControl::new(None);
    tc.start();
    thread::sleep(Duration::from_millis(10));
    assert!(!tc.check_time());
    assert!(tc.remaining().is_none());
}

#[test]
fn test_stop_is_shared_between_clones() {
    let tc = TimeControl::new(None);
    let handle = tc.clone();
    tc.start();
    handle.stop();
    assert!(tc.is_stopped());
    assert!(tc.check_time());

    // Restarting clears the flag for every clone.
    tc.start();
    assert!(!handle.is_stopped());
}

#[test]
fn test_check_interval() {
    let tc = TimeControl::new(None).with_check_interval(4);
    let hits: Vec<u64> = (1..=12).filter(|&n| tc.should_check_time(n)).collect();
    assert_eq!(hits, vec![4, 8, 12]);

    let every = TimeControl::new(None).with_check_interval(0);
    assert!(every.should_check_time(7));
}
