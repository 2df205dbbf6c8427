//! Concurrency: racing appends for the same day cannot both land.

mod support;

use std::collections::BTreeMap;
use std::thread;

use chrono::NaiveDate;
use dayplan::scheduler::Scheduler;
use dayplan::Error;
use support::TestStore;

#[test]
fn only_one_of_two_racing_logs_wins_the_day() {
    let fixture = TestStore::init();
    let store = fixture.create_demo_project();
    Scheduler::new(&store)
        .start("demo", NaiveDate::from_ymd_opt(2024, 1, 1))
        .unwrap();

    let results: Vec<Result<(), Error>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|i| {
                let store = store.clone();
                scope.spawn(move || {
                    let scheduler = Scheduler::new(&store);
                    let hours = BTreeMap::from([("Design".to_string(), f64::from(i + 1))]);
                    scheduler.log_completed("demo", 1, hours).map(|_| ())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one append may succeed: {results:?}");
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(Error::OutOfOrderDay { expected: 2, .. }))));

    let record = store.load("demo").unwrap();
    assert_eq!(record.journal.len(), 1);
    assert_eq!(record.current_day, 2);
}
