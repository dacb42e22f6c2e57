#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

const V1_KEYS: &[&str] = &[
    "period",
    "previous_capital",
    "installed_capital",
    "capital",
    "investment",
    "energy_price",
    "fossil_fuel_price",
    "fossil_fuel",
    "renewable_capital",
    "renewable_output",
    "non_renewable_output",
    "renewable_profit",
    "non_renewable_profit",
];

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn api_state_and_trajectory_have_v1_schema_and_http_200() {
    let port = allocate_port();
    let addr = format!("127.0.0.1:{port}");
    let _child = spawn_api_process(port);

    wait_for_server(&addr, Duration::from_secs(8));

    let (state_status, state_body) =
        http_get(&addr, "/state").expect("/state request should succeed");
    assert_eq!(state_status, 200);

    let state: Value = serde_json::from_str(&state_body).expect("state body should be JSON object");
    let latest = state
        .get("latest_period")
        .and_then(Value::as_object)
        .expect("latest_period should be an object");
    assert_has_v1_keys(latest);
    assert_eq!(latest.get("period").and_then(Value::as_u64), Some(19));
    assert!(state.get("steady_state").is_some_and(Value::is_object));

    let (traj_status, traj_body) =
        http_get(&addr, "/trajectory?from=2&to=4").expect("/trajectory request should succeed");
    assert_eq!(traj_status, 200);

    let rows: Value = serde_json::from_str(&traj_body).expect("trajectory body should be JSON");
    let rows = rows.as_array().expect("trajectory should be an array");
    assert_eq!(rows.len(), 3);

    for row in rows {
        let row_obj = row.as_object().expect("row should be an object");
        assert_has_v1_keys(row_obj);
    }

    let first = rows[0].get("period").and_then(Value::as_u64);
    let last = rows[rows.len() - 1].get("period").and_then(Value::as_u64);
    assert_eq!(first, Some(2));
    assert_eq!(last, Some(4));

    let (bad_status, _) =
        http_get(&addr, "/trajectory?from=9&to=3").expect("/trajectory request should succeed");
    assert_eq!(bad_status, 400);
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_energy-transition"))
        .args([
            "--preset",
            "baseline",
            "--horizon",
            "20",
            "--quiet",
            "--serve",
            "--port",
            &port.to_string(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("energy-transition process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((200, _)) = http_get(addr, "/state") {
            return;
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_get(addr: &str, path: &str) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("status code: {err}"))?;

    Ok((status_code, body.to_string()))
}

fn assert_has_v1_keys(obj: &serde_json::Map<String, Value>) {
    for key in V1_KEYS {
        assert!(obj.contains_key(*key), "missing key: {key}");
    }
}
