//! Scenario: a team ships the first release of a new site.

use crate::common::{stdout, TestEnv};

#[test]
fn first_release_goes_live_end_to_end() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>welcome</html>");
    env.write_artifact("about.html", "<html>about</html>");
    env.write_artifact("assets/app.js", "console.log('v1')");
    env.write_artifact("assets/css/site.css", "body { margin: 0 }");
    env.write_artifact(".well-known/security.txt", "Contact: mailto:sec@example.com");

    // Preview first, like a cautious release manager.
    let plan = env.run_ok(&["plan", "--artifacts", "site"]);
    assert!(stdout(&plan).contains("5 uploads, 0 deletes, 0 unchanged"));

    // Ship it.
    let deploy = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    assert!(stdout(&deploy).contains("Result: succeeded"));

    // Everything is live, including the hidden path.
    assert_eq!(env.read_published("index.html"), "<html>welcome</html>");
    assert_eq!(
        env.read_published(".well-known/security.txt"),
        "Contact: mailto:sec@example.com"
    );

    // Status agrees with what was shipped.
    let status = env.run_ok(&["status"]);
    assert!(stdout(&status).contains("5 objects published"));
}
