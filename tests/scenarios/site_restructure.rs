//! Scenario: a restructure renames pages; stale objects must disappear
//! without the new ones ever being absent.

use crate::common::{stdout, TestEnv};

#[test]
fn renamed_pages_replace_stale_ones() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");
    env.write_artifact("blog.html", "<html>posts</html>");
    env.write_artifact("assets/bundle-a1b2.js", "console.log('old bundle')");

    env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);

    // The new build renames the blog and rolls the hashed bundle name.
    env.remove_artifact("blog.html");
    env.remove_artifact("assets/bundle-a1b2.js");
    env.write_artifact("posts/index.html", "<html>posts</html>");
    env.write_artifact("assets/bundle-c3d4.js", "console.log('new bundle')");

    let deploy = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    assert!(stdout(&deploy).contains("2 uploaded, 2 deleted, 1 skipped, 0 failed"));

    // New layout is live, old one is gone.
    assert_eq!(env.read_published("posts/index.html"), "<html>posts</html>");
    assert!(!env.published_path("blog.html").exists());
    assert!(!env.published_path("assets/bundle-a1b2.js").exists());
    assert!(env.published_path("assets/bundle-c3d4.js").exists());
}

#[test]
fn emptied_build_is_rejected_by_missing_dir_but_empty_dir_deletes_all() {
    let env = TestEnv::new();
    env.write_artifact("index.html", "<html>home</html>");
    env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);

    // Deploying an empty build directory deletes everything published.
    env.remove_artifact("index.html");
    let deploy = env.run_ok(&["deploy", "--artifacts", "site", "--yes"]);
    assert!(stdout(&deploy).contains("0 uploaded, 1 deleted, 0 skipped, 0 failed"));

    let status = env.run_ok(&["status"]);
    assert!(stdout(&status).contains("Nothing published yet"));

    // A missing directory is a corrupt pipeline, not an empty site.
    let missing = env.run(&["deploy", "--artifacts", "no-such-build", "--yes"]);
    assert!(!missing.status.success());
}
