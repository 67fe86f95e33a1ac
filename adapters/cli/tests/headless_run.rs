use std::{fs, process::Command};

fn room_wavefronts() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_room-wavefronts"));
    let _ = command.env("RUST_LOG", "info");
    command
}

#[test]
fn headless_run_finishes_successfully() {
    let output = room_wavefronts()
        .args(["--headless", "--room", "5", "5", "3", "--tmax", "0.002"])
        .output()
        .expect("failed to launch room-wavefronts");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reached final step 4"), "stderr: {stderr}");
}

#[test]
fn mismatched_source_lists_fail_before_running() {
    let output = room_wavefronts()
        .args([
            "--headless", "--room", "5", "5", "3", "--source", "1,1,1", "--source", "2,2,2",
            "--spl", "100", "--spl", "90", "--spl", "80",
        ])
        .output()
        .expect("failed to launch room-wavefronts");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("2 source(s) but 3 reference level(s)"),
        "stderr: {stderr}"
    );
}

#[test]
fn missing_room_is_reported() {
    let output = room_wavefronts()
        .arg("--headless")
        .output()
        .expect("failed to launch room-wavefronts");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("room dimensions are required"), "stderr: {stderr}");
}

#[test]
fn config_file_supplies_values_the_command_line_omits() {
    let path = std::env::temp_dir().join(format!(
        "room-wavefronts-headless-{}.toml",
        std::process::id()
    ));
    fs::write(
        &path,
        "room = { length = 5.0, width = 5.0, height = 3.0 }\ntmax = 0.5\nspl = [100.0]\n",
    )
    .expect("write temporary config");

    let output = room_wavefronts()
        .arg("--headless")
        .arg("--config")
        .arg(&path)
        .args(["--tmax", "0.001"])
        .output()
        .expect("failed to launch room-wavefronts");
    let _ = fs::remove_file(&path);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reached final step 2"), "stderr: {stderr}");
}

#[test]
fn oversized_duration_is_reported_without_panicking() {
    let output = room_wavefronts()
        .args(["--headless", "--room", "5", "5", "3", "--tmax", "1e16"])
        .output()
        .expect("failed to launch room-wavefronts");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("needs too many steps"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}
