/*!
 * Workload Loader Tests
 * Loading from disk and descriptor rejection reporting
 */

use mlfq_kernel::{load_file, ConfigError, DescriptorError, Scheduler};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_workload(contents: &str) -> NamedTempFile {
    write_raw(contents.as_bytes())
}

fn write_raw(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_disk() {
    let file = write_workload(
        "Procesadores 2\nHilos 3\n10|1|init|4|128|2|5|3\n11|10|child|4|128|1|2|1\n",
    );

    let workload = load_file(file.path()).unwrap();
    assert_eq!(workload.header.processors, 2);
    assert_eq!(workload.header.threads_per_processor, 3);
    assert_eq!(workload.budget(), 6);

    let pids: Vec<u32> = workload.descriptors.iter().map(|d| d.pid).collect();
    assert_eq!(pids, vec![10, 11]);
    assert_eq!(workload.descriptors[1].ppid, 10);
}

#[test]
fn test_every_rejection_kind_is_reported() {
    let file = write_workload(
        "\
Procesadores 1
Hilos 4
1|0|ok|1|1|1|1|1
2|0|short|1|1|1|1
3|0|dec|1|1|1|2.5|1
4|0|text|1|one|1|1|1
5|0|big|1|1|1|1|99999999999999999999
6|0|neg|1|1|-2|1|1
1|0|dup|1|1|1|1|1
",
    );

    let workload = load_file(file.path()).unwrap();
    assert_eq!(workload.descriptors.len(), 1);

    let errors: Vec<&DescriptorError> = workload.report.rejected.iter().map(|r| &r.error).collect();
    assert_eq!(errors.len(), 6);
    assert!(matches!(errors[0], DescriptorError::FieldCount { found: 7, .. }));
    assert!(matches!(errors[1], DescriptorError::DecimalValue { .. }));
    assert!(matches!(errors[2], DescriptorError::NotNumeric { .. }));
    assert!(matches!(errors[3], DescriptorError::OutOfRange { .. }));
    assert!(matches!(errors[4], DescriptorError::NonPositive { value: -2, .. }));
    assert_eq!(errors[5], &DescriptorError::DuplicatePid(1));
}

#[test]
fn test_duplicate_never_reaches_scheduler() {
    let file = write_workload("P 1\nH 10\n5|0|a|1|1|1|3|1\n5|0|b|1|1|1|4|1\n");
    let workload = load_file(file.path()).unwrap();

    let mut scheduler = Scheduler::builder(workload.budget()).build().unwrap();
    for descriptor in workload.descriptors {
        scheduler.admit_descriptor(descriptor).unwrap();
    }
    scheduler.run().unwrap();

    assert_eq!(scheduler.completed().len(), 1);
    assert_eq!(scheduler.completed()[0].executed_time, 3);
}

#[test]
fn test_undecodable_bytes_skip_only_their_line() {
    let file = write_raw(
        b"Procesadores 1\nHilos 4\n1|0|ok|1|1|1|1|1\n2|0|\xff\xfe|1|1|1|1|1\n3|0|ok|1|1|1|1|1\n4|0|ok|1|\xff|1|1|1\n",
    );

    let workload = load_file(file.path()).unwrap();

    let pids: Vec<u32> = workload.descriptors.iter().map(|d| d.pid).collect();
    assert_eq!(pids, vec![1, 2, 3]);
    assert_eq!(workload.descriptors[1].pc, "\u{FFFD}\u{FFFD}");

    assert_eq!(workload.report.rejected.len(), 1);
    assert_eq!(workload.report.rejected[0].line, 6);
    assert!(matches!(
        workload.report.rejected[0].error,
        DescriptorError::NotNumeric { .. }
    ));
}

#[test]
fn test_unreadable_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("procesos.dat");
    assert!(matches!(load_file(&missing), Err(ConfigError::Io { .. })));
}

#[test]
fn test_report_serializes_to_json() {
    let file = write_workload("P 1\nH 1\nx|0|a|1|1|1|1|1\n");
    let workload = load_file(file.path()).unwrap();

    let json = serde_json::to_value(&workload.report).unwrap();
    assert_eq!(json["rejected"][0]["line"], 3);
    assert_eq!(json["rejected"][0]["error"]["error_type"], "not_numeric");
}
