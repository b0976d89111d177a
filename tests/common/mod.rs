#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{ensure, Result};
use git_e2e::files::create_test_file;
use git_e2e::{logging, run_shell_command, CwdGuard, Settings};
use tempfile::TempDir;

pub fn init_logging() {
    logging::init(true);
}

/// Settings for tests that talk to GitHub; errors when credentials are absent.
pub fn live_settings() -> Result<Settings> {
    init_logging();
    Settings::from_env()
}

/// Throwaway local repository that the process is chdir'ed into.
pub struct ScratchRepo {
    // Restores the working directory before the temp dir is removed.
    _guard: CwdGuard,
    dir: TempDir,
}

impl ScratchRepo {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn scratch_repo() -> Result<ScratchRepo> {
    init_logging();

    let dir = TempDir::new()?;
    let guard = CwdGuard::enter(dir.path())?;

    let result = run_shell_command("git -c init.defaultBranch=main init -q", true)?;
    ensure!(result.success(), "git init failed: {}", result.stderr);
    run_shell_command("git config user.name \"Test User\"", false)?;
    run_shell_command("git config user.email \"test@example.com\"", false)?;

    Ok(ScratchRepo { _guard: guard, dir })
}

/// Create the test file, stage it and commit it with `message`.
pub fn commit_test_file(message: &str) -> Result<PathBuf> {
    let test_file = create_test_file()?;

    let result = run_shell_command("git add .", false)?;
    ensure!(result.stdout.is_empty(), "Expected empty stdout, but got: {}", result.stdout);

    let result = run_shell_command(&format!("git commit -m \"{}\"", message), false)?;
    ensure!(
        result.stdout.contains(message),
        "Commit failed: expected message not found in {}",
        result.stdout
    );

    Ok(test_file)
}

/// Settings pointing at `api_url`, with the workspace rooted at `root`.
pub fn stub_settings(api_url: &str, root: &Path) -> Settings {
    let vars: HashMap<&str, String> = [
        ("GH_USERNAME", "octo".to_string()),
        ("GH_TOKEN", "secret".to_string()),
        ("GH_API_URL", api_url.to_string()),
        ("GITHUB_WORKSPACE", root.display().to_string()),
    ]
    .into_iter()
    .collect();

    Settings::from_lookup(|key| vars.get(key).cloned()).expect("stub settings")
}

/// One-shot HTTP server on 127.0.0.1 answering each connection with the next
/// canned `(status, body)` and recording `METHOD /path?query` per request.
pub struct StubServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(responses: Vec<(u16, String)>) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("stub address"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };

                let mut reader = BufReader::new(&mut stream);
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    return;
                }

                let mut content_length = 0;
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).is_err() || header.trim().is_empty() {
                        break;
                    }
                    if let Some((key, value)) = header.split_once(':') {
                        if key.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap_or(0);
                        }
                    }
                }
                let mut request_body = vec![0; content_length];
                let _ = reader.read_exact(&mut request_body);

                let target: Vec<&str> = request_line.split_whitespace().take(2).collect();
                seen.lock().unwrap().push(target.join(" "));

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        StubServer { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// JSON body of a successful `POST /user/repos` for `octo/<name>`.
pub fn created_repo_body(name: &str) -> String {
    serde_json::json!({
        "name": name,
        "clone_url": format!("https://github.com/octo/{}.git", name),
        "private": true,
    })
    .to_string()
}

/// Points `git config --global` at a throwaway file for the guard's lifetime.
pub struct GlobalGitConfig {
    previous: Option<OsString>,
    _dir: TempDir,
}

impl GlobalGitConfig {
    pub fn isolate() -> Result<GlobalGitConfig> {
        let dir = TempDir::new()?;
        let previous = env::var_os("GIT_CONFIG_GLOBAL");
        env::set_var("GIT_CONFIG_GLOBAL", dir.path().join("gitconfig"));
        Ok(GlobalGitConfig { previous, _dir: dir })
    }
}

impl Drop for GlobalGitConfig {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var("GIT_CONFIG_GLOBAL", value),
            None => env::remove_var("GIT_CONFIG_GLOBAL"),
        }
    }
}
