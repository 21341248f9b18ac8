use std::net::TcpListener;

use assert_cmd::Command;

/// Runs the binary against `node_url`, feeding `script` as stdin, and returns
/// everything it printed.
pub fn run_console(node_url: &str, script: &str) -> String {
    let output = Command::cargo_bin("chain_bridge")
        .unwrap()
        .env("NODE_URL", node_url)
        .env("RUST_LOG", "info")
        .env_remove("WAIT_ON_EXIT")
        .write_stdin(script)
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    println!("{}", stdout);

    assert!(output.status.success());

    stdout
}

/// Text printed under every `[id]` header, in output order.
pub fn rendered_blocks(stdout: &str, id: &str) -> Vec<String> {
    let header = format!("[{}]", id);
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in stdout.lines() {
        if line == header {
            if let Some(lines) = current.take() {
                blocks.push(lines.join("\n"));
            }
            current = Some(Vec::new());

            continue;
        }

        if let Some(lines) = current.as_mut() {
            if line.starts_with('[') {
                blocks.push(lines.join("\n"));
                current = None;
            } else {
                lines.push(line);
            }
        }
    }

    if let Some(lines) = current {
        blocks.push(lines.join("\n"));
    }

    blocks
}

#[allow(dead_code)]
pub fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    format!("http://127.0.0.1:{}", port)
}
