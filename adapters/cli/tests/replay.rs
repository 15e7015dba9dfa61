use std::process::Command;

fn wraptrail(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_wraptrail"))
        .args(args)
        .output()
        .expect("failed to run wraptrail binary");
    assert!(
        output.status.success(),
        "wraptrail {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn solved_route_replays_to_completion() {
    let level = ["--width", "5", "--height", "4", "--length", "20", "--seed", "2024"];

    let mut solve_args = vec!["solve"];
    solve_args.extend(level);
    let solved = wraptrail(&solve_args);
    let route = solved.lines().last().expect("route line").trim().to_owned();

    let mut replay_args = vec!["replay"];
    replay_args.extend(level);
    replay_args.extend(["--moves", route.as_str()]);
    let replayed = wraptrail(&replay_args);

    assert!(replayed.contains("state: Completed"), "{replayed}");
    assert!(!replayed.contains("reset:"), "{replayed}");
}

#[test]
fn rejects_invalid_dimensions() {
    let output = Command::new(env!("CARGO_BIN_EXE_wraptrail"))
        .args(["generate", "--width", "0"])
        .output()
        .expect("failed to run wraptrail binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("grid width must be at least 1"), "{stderr}");
}

#[test]
fn colour_board_follows_eased_progress() {
    let level = ["--width", "5", "--height", "4", "--length", "2", "--seed", "7"];

    let mut solve_args = vec!["solve"];
    solve_args.extend(level);
    let solved = wraptrail(&solve_args);
    let route = solved.lines().last().expect("route line").trim().to_owned();

    let mut replay_args = vec!["replay", "--color"];
    replay_args.extend(level);
    replay_args.extend(["--moves", route.as_str()]);
    let replayed = wraptrail(&replay_args);

    assert!(replayed.contains("state: Completed"), "{replayed}");
    assert!(replayed.contains("\x1b[48;2;"), "{replayed}");
    // Every tile is spent; at a raw ratio of 1.0 each would be the accent's
    // lite shade. Two ticks of easing leave the palette well short of that.
    assert!(!replayed.contains("\x1b[48;2;170;227;227m"), "{replayed}");
}
