//! Minimal HTTP/1.1 server that fakes the comment-export API for integration
//! tests.
//!
//! Handles `PUT /api/v2/export` (submission), `GET /api/v2/export?guid=`
//! (status) and `GET /exports/<guid>.json` (raw results). Submissions can be
//! rate limited with an in-body 429, and jobs can be made to fail.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

const TEST_TOKEN: &str = "test-token";

#[derive(Debug, Clone, Copy)]
pub struct ExportServerOptions {
    /// Status polls each job answers with `processing` before going terminal.
    pub polls_until_done: u32,
    /// First N submissions get a 200 body with status_code 429 and a wait hint.
    pub rate_limited_submits: u32,
    /// If true, jobs end in `error` instead of `done`.
    pub fail_jobs: bool,
}

impl Default for ExportServerOptions {
    fn default() -> Self {
        Self {
            polls_until_done: 1,
            rate_limited_submits: 0,
            fail_jobs: false,
        }
    }
}

#[derive(Debug)]
struct JobEntry {
    url: String,
    polls_left: u32,
}

#[derive(Debug, Default)]
struct ServerState {
    jobs: HashMap<String, JobEntry>,
    submits_seen: u32,
    next_id: u32,
}

/// Token the server expects in `X-AUTH-TOKEN`.
pub fn auth_token() -> &'static str {
    TEST_TOKEN
}

/// Starts a server in a background thread with default options. Returns the
/// base URL (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start() -> String {
    start_with_options(ExportServerOptions::default())
}

/// Like `start` but allows customizing server behavior (rate limits, failing jobs).
pub fn start_with_options(opts: ExportServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(ServerState::default()));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&state);
            thread::spawn(move || handle(stream, &state, opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, state: &Mutex<ServerState>, opts: ExportServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let Some(parsed) = parse_request(request) else {
        respond(&mut stream, "400 Bad Request", "{}");
        return;
    };

    if parsed.auth_token.as_deref() != Some(TEST_TOKEN) {
        respond(&mut stream, "401 Unauthorized", "{}");
        return;
    }

    match (parsed.method.as_str(), parsed.path.as_str()) {
        ("PUT", "/api/v2/export") => {
            let body = {
                let mut state = state.lock().unwrap();
                state.submits_seen += 1;
                if state.submits_seen <= opts.rate_limited_submits {
                    r#"{"data":{"status_code":429,"seconds_to_wait":0}}"#.to_string()
                } else {
                    let url = parsed.query.get("url").cloned().unwrap_or_default();
                    state.next_id += 1;
                    let guid = format!("guid-{}", state.next_id);
                    state.jobs.insert(
                        guid.clone(),
                        JobEntry {
                            url,
                            polls_left: opts.polls_until_done,
                        },
                    );
                    format!(r#"{{"data":{{"guid":"{}","status":"pending"}}}}"#, guid)
                }
            };
            respond(&mut stream, "200 OK", &body);
        }
        ("GET", "/api/v2/export") => {
            let Some(guid) = parsed.query.get("guid").cloned() else {
                respond(&mut stream, "400 Bad Request", "{}");
                return;
            };
            let body = {
                let mut state = state.lock().unwrap();
                match state.jobs.get_mut(&guid) {
                    None => r#"{"data":[]}"#.to_string(),
                    Some(job) if job.polls_left > 0 => {
                        job.polls_left -= 1;
                        r#"{"data":[{"status":"processing"}]}"#.to_string()
                    }
                    Some(_) if opts.fail_jobs => {
                        r#"{"data":[{"status":"error","error":"export failed upstream"}]}"#
                            .to_string()
                    }
                    Some(_) => format!(
                        r#"{{"data":[{{"status":"done","rawUrl":"/exports/{}.json"}}]}}"#,
                        guid
                    ),
                }
            };
            respond(&mut stream, "200 OK", &body);
        }
        ("GET", path) if path.starts_with("/exports/") && path.ends_with(".json") => {
            let guid = &path["/exports/".len()..path.len() - ".json".len()];
            let body = {
                let state = state.lock().unwrap();
                match state.jobs.get(guid) {
                    None => None,
                    Some(job) => Some(format!(
                        r#"[{{"comment":"first comment","post":"{url}"}},{{"comment":"second comment","likes":2,"post":"{url}"}}]"#,
                        url = job.url
                    )),
                }
            };
            match body {
                Some(body) => respond(&mut stream, "200 OK", &body),
                None => respond(&mut stream, "404 Not Found", "{}"),
            }
        }
        _ => respond(&mut stream, "405 Method Not Allowed", "{}"),
    }
}

fn respond(stream: &mut std::net::TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

#[derive(Debug)]
struct ParsedRequest {
    method: String,
    path: String,
    query: HashMap<String, String>,
    auth_token: Option<String>,
}

/// Parses the request line and headers; query values are percent-decoded just
/// enough for the test traffic (%XX escapes and '+').
fn parse_request(request: &str) -> Option<ParsedRequest> {
    let mut lines = request.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;

    let (path, raw_query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q),
        None => (target.to_string(), ""),
    };
    let mut query = HashMap::new();
    for pair in raw_query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        query.insert(percent_decode(key), percent_decode(value));
    }

    let mut auth_token = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("x-auth-token") {
                auth_token = Some(value.trim().to_string());
            }
        }
    }

    Some(ParsedRequest {
        method,
        path,
        query,
        auth_token,
    })
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = &s[i + 1..i + 3];
                match u8::from_str_radix(hex, 16) {
                    Ok(b) => {
                        out.push(b);
                        i += 3;
                    }
                    Err(_) => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
