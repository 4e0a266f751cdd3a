use std::process::Command;

fn arena_legends() -> Command {
    Command::new(env!("CARGO_BIN_EXE_arena-legends"))
}

#[test]
fn computer_match_is_reproducible() {
    let run = || {
        arena_legends()
            .args(["--players", "3", "--seed", "11", "--json"])
            .output()
            .expect("failed to launch arena-legends")
    };

    let first = run();
    let second = run();

    assert!(first.status.success(), "arena-legends should exit cleanly");
    assert_eq!(first.stdout, second.stdout);
    let summary: serde_json::Value =
        serde_json::from_slice(&first.stdout).expect("stdout holds the JSON summary");
    assert_eq!(summary["seed"], serde_json::json!(11));
    assert_eq!(
        summary["heroes"].as_array().map(Vec::len),
        Some(3),
        "every seat is reported"
    );
}

#[test]
fn text_log_shows_the_grid() {
    let output = arena_legends()
        .args(["--players", "2", "--hero", "knight", "--hero", "sorcerer"])
        .output()
        .expect("failed to launch arena-legends");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(text.contains("[Hero draft] Player 1 drafts the knight"));
    assert!(text.contains("   0  1  2  3  4  5  6"));
}

#[test]
fn invalid_player_count_fails() {
    let output = arena_legends()
        .args(["--players", "5"])
        .output()
        .expect("failed to launch arena-legends");

    assert!(!output.status.success());
}
