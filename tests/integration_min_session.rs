// Smoke test that drives the compiled binary through a PTY: menu, one finished
// word, then back out through the menu.
//
// Requires a TTY (expectrl allocates a pseudo terminal), so it is Unix-only and
// ignored by default. Run with `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_plays_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let bin = assert_cmd::cargo::cargo_bin("wordfall");
    // slow fall so the single word cannot reach the floor during the test;
    // HOME points at the tempdir so the best score lands there
    let cmd = format!(
        "env HOME={home} {bin} --config {home}/config.json --words hi --start-speed 0.01 --max-speed 0.01",
        home = dir.path().display(),
        bin = bin.display(),
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // enter starts a game from the menu
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("hi")?;
    std::thread::sleep(Duration::from_millis(200));

    // esc back to the menu, q quits
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}
