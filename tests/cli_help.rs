use std::process::Command;

#[test]
fn test_help_lists_commands() {
    let bin = env!("CARGO_BIN_EXE_tokenpad");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "tree", "build", "check", "watch", "clear", "export", "import"] {
        assert!(
            stdout.contains(command),
            "help output should list '{}'; got:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn test_version() {
    let bin = env!("CARGO_BIN_EXE_tokenpad");

    let output = Command::new(bin).arg("--version").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
