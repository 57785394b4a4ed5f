use assert_cmd::Command;

/// Helper to get a Command for the vmguard binary.
#[allow(deprecated)]
fn vmguard_cmd() -> Command {
    Command::cargo_bin("vmguard").unwrap()
}

#[test]
fn help_works() {
    vmguard_cmd().arg("--help").assert().success();
}

#[test]
fn check_help_lists_inventory_flag() {
    vmguard_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("--inventory"));
}
