use gtesh::ERROR_MESSAGE;
use gtesh::bin_path::BinPath;
use gtesh::editor::ReaderSource;
use gtesh::session::{Session, State};
use pretty_assertions::assert_eq;
use std::ffi::OsStr;
use std::fs;
use std::io::Cursor;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn gtesh<S: AsRef<OsStr>>(args: &[S], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gtesh"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

fn batch(dir: &TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("script.sh");
    fs::write(&path, script).unwrap();
    path
}

fn session_in(dir: &Path) -> Session {
    Session::with_state(State {
        bin_path: BinPath::new(vec![PathBuf::from("/bin"), PathBuf::from("/usr/bin")]),
        current_dir: dir.to_path_buf(),
    })
}

#[test]
fn batch_survives_unknown_command() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "badcmd123\necho ok\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn every_failure_prints_the_same_message() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "cd\ncd a b\ncd nowhere\nexit 1\nls > a b\nnope\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        ERROR_MESSAGE.repeat(6)
    );
}

#[test]
fn exit_builtin_stops_batch() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "echo before\nexit\necho after\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "before\n");
}

#[test]
fn missing_batch_file_is_fatal() {
    let dir = TempDir::new().unwrap();

    let output = gtesh(&[&dir.path().join("missing")], dir.path());
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn too_many_arguments_is_fatal() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "echo ok\n");

    let output = gtesh(&[&script, &script], dir.path());
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn path_replacement_hides_default_dir() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "path /nonexistent\necho hidden\npath /bin\necho shown\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "shown\n");
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn redirect_from_batch_writes_file() {
    let dir = TempDir::new().unwrap();
    let script = batch(&dir, "echo one two > out.txt\nls missing-file > err.txt\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "one two\n"
    );
    assert!(!fs::read_to_string(dir.path().join("err.txt")).unwrap().is_empty());
}

#[test]
fn non_utf8_line_does_not_abort_batch() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.sh");
    fs::write(&script, b"echo one\necho caf\xe9\necho three\n").unwrap();

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "one\ncaf\u{fffd}\nthree\n"
    );
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
}

#[test]
fn exec_failure_spares_siblings() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad");
    fs::write(&bad, b"\x7fELFgarbage").unwrap();
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o755)).unwrap();
    let script = batch(&dir, "./bad & echo ok\n");

    let output = gtesh(&[&script], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn hyphenated_argument_is_a_batch_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("-x"), "echo dashed\n").unwrap();

    let output = gtesh(&["-x"], dir.path());
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "dashed\n");

    let output = gtesh(&["--help"], dir.path());
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "");
    assert_eq!(String::from_utf8_lossy(&output.stderr), ERROR_MESSAGE);
}

#[test]
fn parallel_line_waits_for_every_command() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(dir.path());
    let script = "sleep 1 & sleep 1 & touch done\ntouch next\n";

    let start = Instant::now();
    session
        .run(&mut ReaderSource::new(Cursor::new(script.as_bytes())))
        .unwrap();
    let elapsed = start.elapsed();

    assert!(dir.path().join("done").exists());
    assert!(dir.path().join("next").exists());
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(3));
}

#[test]
fn next_line_starts_after_barrier() {
    let dir = TempDir::new().unwrap();
    let late = dir.path().join("late");
    fs::write(&late, "#!/bin/sh\nsleep 0.3\ntouch first\n").unwrap();
    fs::set_permissions(&late, fs::Permissions::from_mode(0o755)).unwrap();
    let mut session = session_in(dir.path());
    let script = "./late & echo started &\nls first > seen.txt\n";

    session
        .run(&mut ReaderSource::new(Cursor::new(script.as_bytes())))
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("seen.txt")).unwrap(),
        "first\n"
    );
}

#[test]
fn cd_in_batch_moves_later_commands() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let mut session = session_in(dir.path());
    let script = "cd sub\ntouch inside\ncd nowhere\ntouch still-inside\n";

    session
        .run(&mut ReaderSource::new(Cursor::new(script.as_bytes())))
        .unwrap();

    assert!(dir.path().join("sub/inside").exists());
    assert!(dir.path().join("sub/still-inside").exists());
    assert_eq!(
        session.state().current_dir,
        fs::canonicalize(dir.path().join("sub")).unwrap()
    );
}
