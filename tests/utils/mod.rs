use async_trait::async_trait;
use curtain::{FeatureStore, Roll, StoreError};
use log::kv::Key;
use log::{set_max_level, Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct RecordingLogger {}

impl RecordingLogger {
    thread_local!(pub static LOGS: RefCell<String> = RefCell::new(String::default()));
}

impl Log for RecordingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target().contains("curtain")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        let event_id = record.key_values().get(Key::from("event_id")).unwrap();
        Self::LOGS.with_borrow_mut(|l| l.push_str(format!("{level} [{}] {}\n", event_id.to_i64().unwrap(), record.args()).as_str()));
    }

    fn flush(&self) {}
}

pub fn log_record_init() {
    set_max_level(log::LevelFilter::Info);
    _ = log::set_logger(&RecordingLogger {});
}

/// Store that fails every operation the way an unreachable server does.
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Connection("Connection refused (os error 111)".to_owned()))
    }
}

#[async_trait]
impl FeatureStore for FailingStore {
    async fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
        self.fail()
    }

    async fn set_add(&self, _: &str, _: &str) -> Result<(), StoreError> {
        self.fail()
    }

    async fn set_is_member(&self, _: &str, _: &str) -> Result<bool, StoreError> {
        self.fail()
    }

    async fn set_members(&self, _: &str) -> Result<HashSet<String>, StoreError> {
        self.fail()
    }
}

/// Roll that replays `values` in order, wrapping around at the end.
pub struct SequenceRoll {
    values: Vec<u8>,
    next: AtomicUsize,
}

impl SequenceRoll {
    pub fn new(values: Vec<u8>) -> Self {
        Self { values, next: AtomicUsize::new(0) }
    }
}

impl Roll for SequenceRoll {
    fn roll(&self) -> u8 {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}
