//! End-to-end rendering tests: logical state in, HAProxy config out.

use std::path::Path;

use lbrender::config::model::LogicalConfig;
use lbrender::config::sources::parse_config_str;
use lbrender::render::{render_config, save, WriteOutcome};

fn load_example(name: &str) -> LogicalConfig {
    let path = format!("example/{name}");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    parse_config_str("yaml", &content, &path).unwrap()
}

fn state_from_json(json: &str) -> LogicalConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn simple_http_pool_renders_completely() {
    let config = load_example("lbrender.yaml");
    let rendered = render_config(&config, None).unwrap();

    let expected = "\
global
\tdaemon
\tuser nobody
\tgroup nogroup
\tlog /dev/log local0
\tlog /dev/log local1 notice
defaults
\tlog global
\tretries 3
\toption redispatch
\ttimeout connect 5000
\ttimeout client 50000
\ttimeout server 50000
frontend 7a3f9d2c-8f41-4c8e-9b1a-d2e4f6a8c0b2
\toption tcplog
\tbind 10.0.0.5:80
\tmode http
\tdefault_backend 1be4a7d0-52c3-4b8f-8e6d-9f0a1b2c3d4e
\toption forwardfor
backend 1be4a7d0-52c3-4b8f-8e6d-9f0a1b2c3d4e
\tmode http
\tbalance roundrobin
\toption forwardfor
\tserver c4d5e6f7-0819-4a2b-b3c4-d5e6f7a8b9c0 10.0.0.10:8080 weight 1
\tserver 9e8d7c6b-5a49-4382-b716-05f4e3d2c1b0 10.0.0.11:8080 weight 2";

    assert_eq!(rendered, expected);
}

#[test]
fn full_example_applies_eligibility_and_health_policy() {
    let config = load_example("full.yaml");
    let rendered = render_config(&config, None).unwrap();

    // HTTPS frontend passes through as tcp; the cap is emitted
    assert!(rendered.contains("\tbind 192.0.2.20:443"));
    assert!(!rendered.contains("192.0.2.21"));
    assert!(rendered.contains("\tmode tcp"));
    assert!(rendered.contains("\tmaxconn 8192"));

    // HTTP pool with least-connections balancing
    assert!(rendered.contains("\tbalance leastconn"));

    // Only the one eligible member renders, with the monitor suffix
    let servers: Vec<&str> = rendered
        .lines()
        .filter(|l| l.starts_with("\tserver "))
        .collect();
    assert_eq!(
        servers,
        vec!["\tserver aa11bb22-cc33-4d44-9e55-ff6677889900 198.51.100.10:8443 weight 10 check inter 10s fall 4"]
    );

    // The disabled HTTP monitor is skipped; the HTTPS one governs
    assert!(rendered.contains("\ttimeout check 5s"));
    assert!(rendered.contains("\toption httpchk HEAD /healthz"));
    assert!(rendered.contains("\thttp-check expect rstatus 200|201|202|203|204|301"));
    assert!(rendered.contains("\toption ssl-hello-chk"));
}

#[test]
fn rendering_twice_is_byte_identical() {
    let config = load_example("full.yaml");
    assert_eq!(
        render_config(&config, None).unwrap(),
        render_config(&config, None).unwrap()
    );
}

#[test]
fn connection_limit_boundary() {
    let template = |limit: i64| {
        state_from_json(&format!(
            r#"{{
                "vip": {{"id": "v", "protocol": "TCP", "protocol_port": 80,
                        "connection_limit": {limit},
                        "port": {{"fixed_ips": [{{"ip_address": "10.0.0.5"}}]}}}},
                "pool": {{"id": "p", "protocol": "TCP"}}
            }}"#
        ))
    };

    let unlimited = render_config(&template(-1), None).unwrap();
    assert!(!unlimited.contains("maxconn"));

    let zero = render_config(&template(0), None).unwrap();
    assert!(zero.contains("\tmaxconn 0"));
}

#[test]
fn save_is_atomic_and_skips_identical_output() {
    let config = load_example("lbrender.yaml");
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("haproxy.cfg");

    assert_eq!(
        save(&target, &config, None).unwrap(),
        WriteOutcome::Written
    );
    let first = std::fs::read_to_string(&target).unwrap();

    assert_eq!(
        save(&target, &config, None).unwrap(),
        WriteOutcome::Unchanged
    );
    assert_eq!(std::fs::read_to_string(&target).unwrap(), first);

    // Adding the stats socket changes the global section and rewrites
    assert_eq!(
        save(&target, &config, Some(Path::new("/run/lb.sock"))).unwrap(),
        WriteOutcome::Written
    );
    assert!(std::fs::read_to_string(&target)
        .unwrap()
        .contains("stats socket /run/lb.sock mode 0666 level user"));
}

#[test]
fn failed_render_writes_nothing() {
    let config = state_from_json(
        r#"{
            "vip": {"id": "v", "protocol": "TCP", "protocol_port": 80, "port": {}},
            "pool": {"id": "p", "protocol": "TCP"}
        }"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("haproxy.cfg");

    assert!(save(&target, &config, None).is_err());
    assert!(!target.exists());
}
