use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{StubServer, rtg, setup_config_dir, setup_empty_config_dir};

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[test]
fn test_start_creates_running_record() {
    let server = StubServer::start();
    let dir = setup_config_dir("start_creates", &server.url());

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "start", "Coffee #break"])
        .assert()
        .success()
        .stdout(contains("Timer started: Coffee #break"));

    assert_eq!(server.record_count(), 1);
    let record = server.state.records.lock().unwrap()[0].clone();
    assert_eq!(record["ds"], "Coffee #break");
    assert_eq!(record["t1"], record["t2"], "new records must be running");
    assert_eq!(record["t1"], record["mt"]);
    assert_eq!(record["key"].as_str().unwrap().len(), 12);
}

#[test]
fn test_start_without_description_reuses_last() {
    let server = StubServer::start();
    let dir = setup_config_dir("start_reuse", &server.url());

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "start", "Deep work"])
        .assert()
        .success();

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "start"])
        .assert()
        .success()
        .stdout(contains("Deep work"));

    assert_eq!(server.record_count(), 2);
}

#[test]
fn test_start_fails_when_server_rejects() {
    let server = StubServer::start();
    server.reject_puts();
    let dir = setup_config_dir("start_rejected", &server.url());

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "start", "Doomed"])
        .assert()
        .failure()
        .stderr(contains("Failed to start timer"));
}

#[test]
fn test_start_fails_without_session() {
    let dir = setup_empty_config_dir("start_no_session");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "start", "Anything"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_list_hides_tombstones_and_sorts_recent_first() {
    let server = StubServer::start();
    let dir = setup_config_dir("list_hidden", &server.url());

    let now = now();
    server.push_record("older", now - 7200, now - 6000, "alpha task");
    server.push_record("newer", now - 3600, now - 1800, "beta task");
    server.push_record("gone", now - 5400, now - 5000, "HIDDEN secret task");

    let output = rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "list", "--period", "all"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("alpha task"));
    assert!(stdout.contains("beta task"));
    assert!(!stdout.contains("secret task"));

    // Descending by start time: the newer record prints first.
    assert!(stdout.find("beta task").unwrap() < stdout.find("alpha task").unwrap());
}

#[test]
fn test_list_search_filters_case_insensitively() {
    let server = StubServer::start();
    let dir = setup_config_dir("list_search", &server.url());

    let now = now();
    server.push_record("r1", now - 7200, now - 6000, "Write report");
    server.push_record("r2", now - 3600, now - 1800, "Review #work PR");

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "list",
            "--period",
            "all",
            "--search",
            "review",
        ])
        .assert()
        .success()
        // Tags are ANSI-colored inline, so match around them.
        .stdout(contains("Review"))
        .stdout(contains("PR"))
        .stdout(contains("Write report").not());
}

#[test]
fn test_tags_ranked_by_frequency() {
    let server = StubServer::start();
    let dir = setup_config_dir("tags_rank", &server.url());

    let now = now();
    server.push_record("r1", now - 9000, now - 8000, "#work meeting");
    server.push_record("r2", now - 7000, now - 6000, "#Work followup");
    server.push_record("r3", now - 5000, now - 4000, "#home stuff");

    let output = rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "tags", "--period", "all"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("#work"));
    assert!(stdout.contains("#home"));
    assert!(stdout.find("#work").unwrap() < stdout.find("#home").unwrap());
}

#[test]
fn test_stop_closes_running_record() {
    let server = StubServer::start();
    let dir = setup_config_dir("stop_running", &server.url());

    let now = now();
    server.push_record("runner", now - 3600, now - 3600, "ongoing work");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "stop"])
        .assert()
        .success()
        .stdout(contains("Timer stopped"));

    let record = server.record("runner").unwrap();
    assert_ne!(record["t1"], record["t2"], "record must be closed");
    assert_eq!(record["t2"], record["mt"]);
}

#[test]
fn test_stop_without_running_record_fails() {
    let server = StubServer::start();
    let dir = setup_config_dir("stop_none", &server.url());

    let now = now();
    server.push_record("done", now - 3600, now - 1800, "finished work");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "stop"])
        .assert()
        .failure()
        .stderr(contains("No running record"));
}

#[test]
fn test_del_tombstones_record() {
    let server = StubServer::start();
    let dir = setup_config_dir("del_tombstone", &server.url());

    let now = now();
    server.push_record("victim", now - 3600, now - 1800, "to be removed");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "del", "victim", "--force"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    let record = server.record("victim").unwrap();
    assert!(
        record["ds"].as_str().unwrap().starts_with("HIDDEN "),
        "delete must hide, not erase"
    );

    // The tombstone never shows up again.
    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("to be removed").not());
}

#[test]
fn test_del_can_be_cancelled() {
    let server = StubServer::start();
    let dir = setup_config_dir("del_cancel", &server.url());

    let now = now();
    server.push_record("victim", now - 3600, now - 1800, "precious");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "del", "victim"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    let record = server.record("victim").unwrap();
    assert_eq!(record["ds"], "precious");
}

#[test]
fn test_edit_rejects_backwards_range() {
    let server = StubServer::start();
    let dir = setup_config_dir("edit_backwards", &server.url());

    let now = now();
    server.push_record("target", now - 86400, now - 82800, "yesterday work");

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "edit",
            "target",
            "--start",
            "2025-01-02 10:00",
            "--end",
            "2025-01-02 09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));

    // Untouched on the server.
    let record = server.record("target").unwrap();
    assert_eq!(record["ds"], "yesterday work");
}

#[test]
fn test_edit_updates_description() {
    let server = StubServer::start();
    let dir = setup_config_dir("edit_desc", &server.url());

    let now = now();
    server.push_record("target", now - 7200, now - 3600, "old words");

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "edit",
            "target",
            "--desc",
            "new words #tagged",
        ])
        .assert()
        .success()
        .stdout(contains("updated"));

    let record = server.record("target").unwrap();
    assert_eq!(record["ds"], "new words #tagged");
    assert_eq!(record["t1"], serde_json::json!(now - 7200));
}

#[test]
fn test_login_saves_verified_credentials() {
    let server = StubServer::start();
    let dir = setup_empty_config_dir("login_ok");

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "login",
            "--url",
            &server.url(),
            "--token",
            "fresh-token",
        ])
        .assert()
        .success()
        .stdout(contains("Logged in"));

    let conf = std::fs::read_to_string(dir.join("rtagger.conf")).unwrap();
    assert!(conf.contains("fresh-token"));
    assert!(conf.contains(&server.url()));
}

#[test]
fn test_login_rejected_credentials_are_not_saved() {
    let server = StubServer::start();
    server.reject_auth();
    let dir = setup_empty_config_dir("login_bad");

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "login",
            "--url",
            &server.url(),
            "--token",
            "wrong-token",
        ])
        .assert()
        .failure();

    assert!(!dir.join("rtagger.conf").exists());
}

#[test]
fn test_check_alerts_once_per_record() {
    let server = StubServer::start();
    let dir = setup_config_dir("check_alert", &server.url());

    let now = now();
    server.push_record("zombie", now - 11 * 3600, now - 11 * 3600, "forgotten #work");

    // First check: alert plus cursor write.
    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(contains("Still working?"));

    let cursor = std::fs::read_to_string(dir.join("last_zombie_key")).unwrap();
    assert_eq!(cursor.trim(), "zombie");

    // Second check on the same record: silent no-op.
    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(contains("Still working?").not());
}

#[test]
fn test_check_is_silent_below_threshold() {
    let server = StubServer::start();
    let dir = setup_config_dir("check_young", &server.url());

    let now = now();
    server.push_record("young", now - 9 * 3600, now - 9 * 3600, "recent work");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(contains("Still working?").not());

    assert!(!dir.join("last_zombie_key").exists());
}

#[test]
fn test_check_exits_nonzero_on_unreachable_server() {
    // Nothing listens on port 9; the checker must map this to a retry.
    let dir = setup_config_dir("check_down", "http://127.0.0.1:9");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stderr(contains("run again later"));
}

#[test]
fn test_logout_clears_session_state() {
    let server = StubServer::start();
    let dir = setup_config_dir("logout_state", &server.url());
    std::fs::write(dir.join("last_zombie_key"), "somekey").unwrap();
    std::fs::write(dir.join("last_description"), "old work").unwrap();

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "logout"])
        .assert()
        .success();

    assert!(!dir.join("last_zombie_key").exists());
    assert!(!dir.join("last_description").exists());
    let conf = std::fs::read_to_string(dir.join("rtagger.conf")).unwrap();
    assert!(!conf.contains("test-token"));
}

#[test]
fn test_export_csv_and_json() {
    let server = StubServer::start();
    let dir = setup_config_dir("export_both", &server.url());

    let now = now();
    server.push_record("r1", now - 7200, now - 3600, "billable #client");

    let csv_path = dir.join("out.csv");
    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "export",
            "--format",
            "csv",
            "--file",
            csv_path.to_str().unwrap(),
            "--period",
            "all",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.contains("r1"));
    assert!(csv.contains("billable #client"));

    let json_path = dir.join("out.json");
    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "export",
            "--format",
            "json",
            "--file",
            json_path.to_str().unwrap(),
            "--period",
            "all",
        ])
        .assert()
        .success();

    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("duration_seconds"));
    assert!(json.contains("#client"));
}

#[test]
fn test_export_refuses_to_overwrite() {
    let server = StubServer::start();
    let dir = setup_config_dir("export_clobber", &server.url());

    let path = dir.join("existing.csv");
    std::fs::write(&path, "precious data").unwrap();

    rtg()
        .args([
            "--config-dir",
            dir.to_str().unwrap(),
            "export",
            "--file",
            path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_init_and_config_print() {
    let dir = setup_empty_config_dir("init_print");

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(dir.join("rtagger.conf").exists());

    rtg()
        .args(["--config-dir", dir.to_str().unwrap(), "config", "--print"])
        .assert()
        .success()
        .stdout(contains("server_url"));
}
