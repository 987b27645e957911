//! Non-interactive starter templates.
//!
//! Builds a small but valid logical state in code (fresh UUIDs each
//! run, so generated files can be fed straight to an orchestrator
//! without id collisions) and serializes it to the chosen format.
//! `--full` adds a second member and an HTTP health monitor to show
//! the complete field surface.

use std::path::PathBuf;

use uuid::Uuid;

use crate::cli::{InitArgs, StateFormat};
use crate::config::model::{
    FixedIp, HealthMonitor, LbMethod, LogicalConfig, Member, MonitorType, NetworkPort, Pool,
    Protocol, ResourceStatus, Vip,
};
use crate::error::LbrenderError;

use super::serialize::serialize_config;

const YAML_BANNER: &str = "\
# Logical load-balancer state for lbrender.
# Render it with: lbrender render -s <this file>
";

pub fn run(args: &InitArgs) -> Result<(), LbrenderError> {
    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("lbrender.{}", args.format.extension()))
    });

    if output.exists() {
        return Err(LbrenderError::FileExists { path: output });
    }

    let config = if args.full {
        full_state()
    } else {
        minimal_state()
    };

    let mut content = serialize_config(&config, &args.format)?;
    if matches!(args.format, StateFormat::Yaml) {
        content = format!("{YAML_BANNER}{content}");
    }

    std::fs::write(&output, content)?;
    println!("\u{2713} Created {}", output.display());
    println!("  Edit the addresses, then run: lbrender render -s {}", output.display());
    Ok(())
}

fn member(address: &str, weight: u32) -> Member {
    Member {
        id: Uuid::new_v4().to_string(),
        address: address.to_string(),
        protocol_port: 8080,
        weight,
        status: ResourceStatus::Active,
        admin_state_up: true,
    }
}

fn minimal_state() -> LogicalConfig {
    LogicalConfig {
        vip: Vip {
            id: Uuid::new_v4().to_string(),
            protocol: Protocol::Http,
            protocol_port: 80,
            connection_limit: -1,
            port: NetworkPort {
                fixed_ips: vec![FixedIp {
                    ip_address: "10.0.0.5".into(),
                }],
            },
        },
        pool: Pool {
            id: Uuid::new_v4().to_string(),
            protocol: Protocol::Http,
            lb_method: LbMethod::RoundRobin,
        },
        members: vec![member("10.0.0.10", 1)],
        healthmonitors: vec![],
    }
}

fn full_state() -> LogicalConfig {
    let mut config = minimal_state();
    config.vip.connection_limit = 4096;
    config.pool.lb_method = LbMethod::LeastConnections;
    config.members.push(member("10.0.0.11", 2));
    config.healthmonitors.push(HealthMonitor {
        kind: MonitorType::Http,
        delay: 5,
        max_retries: 3,
        timeout: 2,
        status: ResourceStatus::Active,
        admin_state_up: true,
        http_method: "GET".into(),
        url_path: "/healthz".into(),
        expected_codes: "200-205".into(),
    });
    config
}
