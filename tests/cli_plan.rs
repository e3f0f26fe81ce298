mod common;

use common::{stdout, TestEnv};
use serde_json::Value;

#[test]
fn plan_lists_uploads_for_fresh_site() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");
    env.write_artifact("assets/app.js", "console.log(1)");

    let output = env.run_ok(&["plan", "--artifacts", "site"]);
    let text = stdout(&output);

    assert!(text.contains("upload index.html"));
    assert!(text.contains("upload assets/app.js"));
    assert!(text.contains("2 uploads, 0 deletes, 0 unchanged"));
}

#[test]
fn plan_is_read_only() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");

    env.run_ok(&["plan", "--artifacts", "site"]);

    assert!(!env.published_path("index.html").exists());
}

#[test]
fn plan_json_reports_actions() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");

    let output = env.run_ok(&["plan", "--artifacts", "site", "--json"]);
    let value: Value = serde_json::from_str(stdout(&output).trim()).unwrap();

    assert_eq!(value["event"], "plan");
    assert_eq!(value["environment"], "local");
    assert_eq!(value["uploads"][0], "index.html");
    assert_eq!(value["skips"], 0);
}

#[test]
fn plan_after_deploy_is_noop() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");

    env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    let output = env.run_ok(&["plan", "--artifacts", "site"]);

    assert!(stdout(&output).contains("0 uploads, 0 deletes, 1 unchanged"));
}

#[test]
fn plan_fails_without_artifact_dir() {
    let env = TestEnv::new();
    let output = env.run(&["plan", "--artifacts", "no-such-dir"]);
    assert!(!output.status.success());
}
