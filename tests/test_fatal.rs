//! Fatal emissions end the process only after every sink has the line.

mod common;

use common::run_sevlog;

#[test]
fn demo_exits_after_fatal_line() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.log");
    let b = tmp.path().join("b.log");

    let output = run_sevlog(&[
        "--quiet",
        "demo",
        "--sink",
        a.to_str().unwrap(),
        "--sink",
        b.to_str().unwrap(),
    ]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "fatal must exit with status 1"
    );

    let a_text = std::fs::read_to_string(&a).unwrap();
    let b_text = std::fs::read_to_string(&b).unwrap();
    assert_eq!(a_text, b_text, "both sinks must receive identical lines");

    let lines: Vec<&str> = a_text.lines().collect();
    assert_eq!(lines.len(), 2, "{a_text}");
    // HH:MM:SS - TAG   - message
    assert_eq!(&lines[0][8..], " - DEBUG - Starting. ");
    assert_eq!(&lines[1][8..], " - FATAL - Cannot start server, aborting. ");
    assert!(!a_text.contains("Passed here!"));
    assert!(!a_text.contains("This should not show."));
    assert!(a_text.ends_with('\n'));
}

#[test]
fn demo_defaults_to_stderr() {
    let output = run_sevlog(&["--quiet", "demo"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(" - FATAL - Cannot start server, aborting. \n"),
        "{stderr}"
    );
    assert!(!stderr.contains("This should not show."));
}

#[test]
fn fatal_emit_stops_after_first_message() {
    let tmp = tempfile::tempdir().unwrap();
    let log = tmp.path().join("fatal.log");
    let output = run_sevlog(&[
        "--quiet",
        "emit",
        "--format",
        "tag,message",
        "--sink",
        log.to_str().unwrap(),
        "--severity",
        "fatal",
        "first",
        "second",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "FATAL - first \n");
}
