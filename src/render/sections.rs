//! Section builders for the four HAProxy config blocks.
//!
//! Each builder is a pure function of the logical state returning a
//! [`Section`]; indentation and joining happen once in
//! [`render_config`](super::render_config). The protocol→mode and
//! method→algorithm mappings are explicit tables: the protocol table has
//! no default and an unmapped value fails the render, while an
//! unrecognized balancing method falls back to `roundrobin`.

use std::path::Path;

use crate::config::model::{LbMethod, LogicalConfig, NetworkPort, Protocol};
use crate::error::LbrenderError;
use crate::render::health::server_health_options;
use crate::render::Section;

/// Protocol → proxy mode. HTTPS is passed through at the transport layer,
/// not terminated, so it maps to `tcp`.
pub(crate) const PROTOCOL_MODES: &[(Protocol, &str)] = &[
    (Protocol::Tcp, "tcp"),
    (Protocol::Http, "http"),
    (Protocol::Https, "tcp"),
];

/// Balancing method → HAProxy `balance` algorithm.
pub(crate) const BALANCE_ALGORITHMS: &[(LbMethod, &str)] = &[
    (LbMethod::RoundRobin, "roundrobin"),
    (LbMethod::LeastConnections, "leastconn"),
    (LbMethod::SourceIp, "source"),
];

const FALLBACK_ALGORITHM: &str = "roundrobin";

/// Shared timeout/retry policy emitted in the `defaults` section.
///
/// Named constants rather than literals in the builder so tests can pin
/// them and exercise the builder with other values.
#[derive(Debug, Clone, Copy)]
pub struct RenderDefaults {
    pub retries: u32,
    pub timeout_connect_ms: u64,
    pub timeout_client_ms: u64,
    pub timeout_server_ms: u64,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout_connect_ms: 5000,
            timeout_client_ms: 50_000,
            timeout_server_ms: 50_000,
        }
    }
}

/// Look up the proxy mode for a protocol. The table has no default; an
/// unmapped protocol is a configuration error.
pub fn proxy_mode(protocol: Protocol) -> Result<&'static str, LbrenderError> {
    PROTOCOL_MODES
        .iter()
        .find(|(p, _)| *p == protocol)
        .map(|(_, mode)| *mode)
        .ok_or(LbrenderError::UnmappedProtocol { protocol })
}

/// Look up the `balance` algorithm for a method, falling back to
/// `roundrobin` for anything the table does not know.
pub fn balance_algorithm(method: &LbMethod) -> &'static str {
    match BALANCE_ALGORITHMS.iter().find(|(m, _)| m == method) {
        Some(&(_, algorithm)) => algorithm,
        None => {
            tracing::debug!(method = %method, "unrecognized lb_method, falling back to roundrobin");
            FALLBACK_ALGORITHM
        }
    }
}

fn first_bind_address<'a>(
    port: &'a NetworkPort,
    vip_id: &str,
) -> Result<&'a str, LbrenderError> {
    port.fixed_ips
        .first()
        .map(|ip| ip.ip_address.as_str())
        .ok_or_else(|| LbrenderError::MissingBindAddress {
            vip: vip_id.to_string(),
        })
}

/// Daemon-wide operational directives.
pub fn build_global(socket_path: Option<&Path>) -> Section {
    let mut opts = vec![
        "daemon".to_string(),
        "user nobody".to_string(),
        "group nogroup".to_string(),
        "log /dev/log local0".to_string(),
        "log /dev/log local1 notice".to_string(),
    ];

    if let Some(path) = socket_path {
        opts.push(format!(
            "stats socket {} mode 0666 level user",
            path.display()
        ));
    }

    Section {
        header: "global".to_string(),
        options: opts,
    }
}

/// Shared retry policy and timeouts applied to all proxies.
pub fn build_defaults(defaults: &RenderDefaults) -> Section {
    Section {
        header: "defaults".to_string(),
        options: vec![
            "log global".to_string(),
            format!("retries {}", defaults.retries),
            "option redispatch".to_string(),
            format!("timeout connect {}", defaults.timeout_connect_ms),
            format!("timeout client {}", defaults.timeout_client_ms),
            format!("timeout server {}", defaults.timeout_server_ms),
        ],
    }
}

/// The listening side: bind directive and per-VIP options.
pub fn build_frontend(config: &LogicalConfig) -> Result<Section, LbrenderError> {
    let vip = &config.vip;
    let bind_address = first_bind_address(&vip.port, &vip.id)?;

    let mut opts = vec![
        "option tcplog".to_string(),
        format!("bind {}:{}", bind_address, vip.protocol_port),
        format!("mode {}", proxy_mode(vip.protocol)?),
        format!("default_backend {}", config.pool.id),
    ];

    if vip.connection_limit >= 0 {
        opts.push(format!("maxconn {}", vip.connection_limit));
    }

    if vip.protocol == Protocol::Http {
        opts.push("option forwardfor".to_string());
    }

    Ok(Section {
        header: format!("frontend {}", vip.id),
        options: opts,
    })
}

/// The server-group side: pool-wide mode/algorithm, health-check options
/// derived from the first eligible monitor, and one `server` line per
/// eligible member (input order, duplicates preserved).
pub fn build_backend(config: &LogicalConfig) -> Result<Section, LbrenderError> {
    let pool = &config.pool;

    let mut opts = vec![
        format!("mode {}", proxy_mode(pool.protocol)?),
        format!("balance {}", balance_algorithm(&pool.lb_method)),
    ];

    if pool.protocol == Protocol::Http {
        opts.push("option forwardfor".to_string());
    }

    let (server_addon, health_opts) = server_health_options(config)?;
    opts.extend(health_opts);

    opts.extend(config.eligible_members().map(|member| {
        format!(
            "server {} {}:{} weight {}{}",
            member.id, member.address, member.protocol_port, member.weight, server_addon
        )
    }));

    Ok(Section {
        header: format!("backend {}", pool.id),
        options: opts,
    })
}
