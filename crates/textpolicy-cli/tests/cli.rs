use std::io::Write;
use std::process::{Command, Output, Stdio};

const POLICY: &str = "p, admin, data1, read\ng, alice, admin";

fn textpolicy() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_textpolicy"));
    for key in [
        "TEXTPOLICY_CONFIG",
        "TEXTPOLICY_MODEL",
        "TEXTPOLICY_POLICY",
        "TEXTPOLICY_LOG",
        "RUST_LOG",
    ] {
        command.env_remove(key);
    }
    command
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = textpolicy()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn textpolicy");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait textpolicy")
}

#[test]
fn check_reads_stdin_and_exits_zero_on_allow() {
    let output = run_with_stdin(
        &["--policy", "-", "check", "alice", "data1", "read"],
        POLICY,
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "allow\n");
}

#[test]
fn check_exits_two_on_deny() {
    let output = run_with_stdin(
        &["--policy", "-", "check", "alice", "data1", "write"],
        POLICY,
    );
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "deny\n");
}

#[test]
fn check_with_empty_policy_fails() {
    let output = run_with_stdin(&["--policy", "-", "check", "alice", "data1", "read"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("build enforcer"));
}

#[test]
fn normalize_writes_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("normalized.csv");
    let output = run_with_stdin(
        &[
            "--policy",
            "-",
            "normalize",
            "--output",
            out.to_str().expect("utf8 path"),
        ],
        "g,alice,admin\n\n  p ,admin,data1,read  \n",
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(&out).expect("read output");
    assert_eq!(written, "p, admin, data1, read\ng, alice, admin\n");
}

#[test]
fn normalize_prints_to_stdout_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let policy = dir.path().join("policy.csv");
    std::fs::write(&policy, POLICY).expect("write policy");

    let output = textpolicy()
        .args(["--policy", policy.to_str().expect("utf8 path"), "normalize"])
        .output()
        .expect("run textpolicy");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "p, admin, data1, read\ng, alice, admin\n"
    );
}

#[test]
fn model_prints_embedded_conf_without_policy() {
    let output = textpolicy().arg("model").output().expect("run textpolicy");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        textpolicy_adapter::rbac_model_string()
    );
}
