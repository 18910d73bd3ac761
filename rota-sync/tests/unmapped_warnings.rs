//! Each unmapped name is warned about once per run, whichever step reports it.

use std::sync::Mutex;

use chrono::NaiveDate;
use rota_core::{DutyAssignment, GroupId, MappingInput, PersonName};
use rota_sync::pipeline::{self, RunSettings};

struct Capture(Mutex<Vec<String>>);

impl tracing::Log for Capture {
    fn enabled(&self, metadata: &tracing::Metadata) -> bool {
        metadata.level() <= tracing::Level::Warn
    }

    fn log(&self, record: &tracing::Record) {
        if self.enabled(record.metadata()) {
            self.0.lock().expect("lock").push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

fn take_warnings_about(name: &str) -> usize {
    let mut lines = CAPTURE.0.lock().expect("lock");
    let count = lines.iter().filter(|l| l.contains(&format!("'{name}'"))).count();
    lines.clear();
    count
}

fn names(list: &[&str]) -> Vec<PersonName> {
    list.iter().map(|n| PersonName::from(*n)).collect()
}

fn settings() -> RunSettings {
    RunSettings {
        date: NaiveDate::from_ymd_opt(2026, 2, 9).expect("date"),
        assignment: DutyAssignment::new(names(&["Alice", "Dana"]), names(&["Erin"])),
        dry_run: true,
        announce: true,
        reconcile: true,
        channel: Some("#art-release".to_string()),
        group: Some(GroupId::from("S_RELEASE")),
        mapping: Some(MappingInput::Json(r#"{"Alice":"U1"}"#.to_string())),
        template_dir: None,
    }
}

// One test function: the logger is process-global.
#[test]
fn unmapped_names_are_warned_once() {
    tracing::set_logger(&CAPTURE).expect("install logger");
    tracing::set_max_level(tracing::LevelFilter::Warn);

    // Announce and reconcile: release artistry name reported by the target builder only.
    let report = pipeline::run(&settings(), None, None);
    assert_eq!(
        report.reconciliation.as_ref().expect("reconciliation").unmapped,
        names(&["Dana"])
    );
    assert_eq!(take_warnings_about("Dana"), 1);

    // Focused work names never reach the target builder.
    pipeline::run(&settings(), None, None);
    assert_eq!(take_warnings_about("Erin"), 1);

    // Announce only: the announcement reports it.
    let mut announce_only = settings();
    announce_only.reconcile = false;
    pipeline::run(&announce_only, None, None);
    assert_eq!(take_warnings_about("Dana"), 1);

    // No usable mapping: reconciliation cannot map anyone, announcement warns.
    let mut no_mapping = settings();
    no_mapping.mapping = Some(MappingInput::Json("{broken".to_string()));
    pipeline::run(&no_mapping, None, None);
    assert_eq!(take_warnings_about("Alice"), 1);
}
