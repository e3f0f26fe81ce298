//! Scenario: routine releases only transfer what changed.

use crate::common::{stdout, TestEnv};

#[test]
fn second_release_transfers_only_the_changed_page() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>v1</html>");
    env.write_artifact("pricing.html", "<html>$9</html>");
    env.write_artifact("assets/app.js", "console.log('v1')");

    env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);

    // Only pricing changes in the next build.
    env.write_artifact("pricing.html", "<html>$12</html>");
    let deploy = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);

    assert!(stdout(&deploy).contains("1 uploaded, 0 deleted, 2 skipped, 0 failed"));
    assert_eq!(env.read_published("pricing.html"), "<html>$12</html>");
    assert_eq!(env.read_published("index.html"), "<html>v1</html>");
}

#[test]
fn redeploying_an_identical_build_converges_to_noop() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>stable</html>");

    env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    let second = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    let third = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);

    for output in [&second, &third] {
        assert!(stdout(output).contains("0 uploaded, 0 deleted, 1 skipped, 0 failed"));
        assert!(stdout(output).contains("Invalidation: not needed"));
    }
}
