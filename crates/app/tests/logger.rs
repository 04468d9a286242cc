use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use ::log::{Level, LevelFilter, debug, info, warn};
use pretty_assertions::assert_eq;
use reptrack_app::log::{self, Entry, Error, MAX_ENTRIES, Repository};

#[derive(Default)]
struct Entries(Mutex<VecDeque<Entry>>);

impl Repository for Entries {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        log::push_entry(&mut self.0.lock().unwrap(), entry);
        Ok(())
    }
}

// Installing a logger is only possible once per process, so everything is checked in
// a single test.
#[test]
fn test_logger_writes_to_repository() {
    let repository = Arc::new(Entries::default());
    log::init(repository.clone(), LevelFilter::Info).unwrap();
    assert!(log::init(Arc::new(Entries::default()), LevelFilter::Info).is_err());

    info!(target: "session", "starting workout Push Day with 1 exercises");
    debug!(target: "session", "discarding stale Rest tick");
    warn!(target: "session", "rejected set while paused");

    let entries = repository.read_entries().unwrap();
    assert_eq!(
        entries
            .iter()
            .map(|e| (e.level, e.message.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (Level::Warn, "session: rejected set while paused"),
            (
                Level::Info,
                "session: starting workout Push Day with 1 exercises"
            ),
        ]
    );
    assert!(entries.iter().all(|e| !e.time.is_empty()));

    for i in 0..MAX_ENTRIES {
        info!(target: "session", "tick {i}");
    }
    let entries = repository.read_entries().unwrap();
    assert_eq!(entries.len(), MAX_ENTRIES);
    assert_eq!(
        entries.front().map(|e| e.message.as_str()),
        Some(format!("session: tick {}", MAX_ENTRIES - 1).as_str())
    );
    assert_eq!(
        entries.back().map(|e| e.message.as_str()),
        Some("session: tick 0")
    );
}
