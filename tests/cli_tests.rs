mod common;

use common::{CommandOutput, TestContext};

#[test]
fn test_help_and_version() {
    let ctx = TestContext::new();

    // Test --help
    let output: CommandOutput = ctx
        .cmd()
        .arg("--help")
        .output()
        .expect("Failed to run setup-air")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("Installs the air CLI from GitHub Releases")
        .assert_stdout_contains("Usage: setup-air");

    // Test version
    let output: CommandOutput = ctx
        .cmd()
        .arg("version")
        .output()
        .expect("Failed to run setup-air")
        .into();

    output.assert_success().assert_stdout_contains("setup-air");
}

#[test]
fn test_list_empty_cache() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .args(["list", "--arch", "x86_64"])
        .output()
        .expect("Failed to run setup-air")
        .into();

    output.assert_success();
    assert!(
        output.stdout.trim().is_empty(),
        "Expected empty listing, got: {}",
        output.stdout
    );
}

#[test]
fn test_list_seeded_cache_sorted() {
    let ctx = TestContext::new();
    ctx.seed_cache_entry("1.5.2", "x86_64");
    ctx.seed_cache_entry("1.0.0", "x86_64");
    ctx.seed_cache_entry("2.0.0", "aarch64");

    let output: CommandOutput = ctx
        .cmd()
        .args(["list", "--arch", "x86_64"])
        .output()
        .expect("Failed to run setup-air")
        .into();

    output.assert_success();
    assert_eq!(output.stdout.lines().collect::<Vec<_>>(), ["1.0.0", "1.5.2"]);
}

#[test]
fn test_install_hits_cache_without_network() {
    let ctx = TestContext::new();
    ctx.seed_cache_entry("1.5.2", "x86_64");

    // A satisfiable range never needs to touch the release host
    let output: CommandOutput = ctx
        .cmd()
        .args([
            "install",
            "--version",
            "1.x",
            "--arch",
            "x86_64",
            "--platform",
            "unknown-linux-gnu",
        ])
        .output()
        .expect("Failed to run setup-air")
        .into();

    output.assert_success().assert_stdout_contains("1.5.2");
    output.assert_stdout_contains("x86_64");
}

#[test]
fn test_rejects_unknown_target() {
    let ctx = TestContext::new();

    let output: CommandOutput = ctx
        .cmd()
        .args(["list", "--arch", "sparc64"])
        .output()
        .expect("Failed to run setup-air")
        .into();

    output.assert_failure();
    assert!(
        output.stderr.contains("Unsupported architecture"),
        "Expected architecture error, got: {}",
        output.stderr
    );
}
