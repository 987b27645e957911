//! Serde data structures for the logical load-balancer state file.
//!
//! Contains [`LogicalConfig`] (the root), [`Vip`], [`Pool`], [`Member`],
//! and [`HealthMonitor`], plus the wire enums [`Protocol`], [`LbMethod`],
//! [`MonitorType`], and [`ResourceStatus`]. All types derive `Serialize`
//! and `Deserialize` with `deny_unknown_fields` for strict parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

const fn default_connection_limit() -> i64 {
    -1
}

const fn default_weight() -> u32 {
    1
}

const fn default_admin_state_up() -> bool {
    true
}

fn default_http_method() -> String {
    "GET".to_string()
}

fn default_url_path() -> String {
    "/".to_string()
}

fn default_expected_codes() -> String {
    "200".to_string()
}

fn is_unlimited(v: &i64) -> bool {
    *v < 0
}

fn is_default_weight(v: &u32) -> bool {
    *v == default_weight()
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_active(v: &ResourceStatus) -> bool {
    *v == ResourceStatus::Active
}

fn is_default_http_method(v: &str) -> bool {
    v == default_http_method()
}

fn is_default_url_path(v: &str) -> bool {
    v == default_url_path()
}

fn is_default_expected_codes(v: &str) -> bool {
    v == default_expected_codes()
}

/// The root of a logical load-balancer description.
///
/// `vip` and `pool` are required; a document without them fails to parse.
/// Member and monitor sequences keep their input order — eligibility
/// filtering and first-match selection happen at render time, never here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogicalConfig {
    pub vip: Vip,

    pub pool: Pool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub healthmonitors: Vec<HealthMonitor>,
}

impl LogicalConfig {
    /// Members that render as `server` lines, in input order.
    pub fn eligible_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_eligible())
    }

    /// The first monitor with `status == ACTIVE && admin_state_up`, if any.
    ///
    /// HAProxy supports one health policy per backend, so only the first
    /// eligible monitor governs the rendered options.
    #[must_use]
    pub fn active_monitor(&self) -> Option<&HealthMonitor> {
        self.healthmonitors
            .iter()
            .find(|m| m.status == ResourceStatus::Active && m.admin_state_up)
    }
}

/// The virtual IP clients connect to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Vip {
    pub id: String,

    pub protocol: Protocol,

    pub protocol_port: u16,

    /// Negative means unlimited; the `maxconn` directive is then omitted.
    #[serde(
        default = "default_connection_limit",
        skip_serializing_if = "is_unlimited"
    )]
    pub connection_limit: i64,

    /// The network attachment carrying the bind addresses. The first fixed
    /// IP in the sequence is authoritative; any others are ignored.
    pub port: NetworkPort,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkPort {
    #[serde(default)]
    pub fixed_ips: Vec<FixedIp>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FixedIp {
    pub ip_address: String,
}

/// The backend pool sharing one balancing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Pool {
    pub id: String,

    pub protocol: Protocol,

    #[serde(default)]
    pub lb_method: LbMethod,
}

/// One backend server instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Member {
    pub id: String,

    pub address: String,

    pub protocol_port: u16,

    #[serde(default = "default_weight", skip_serializing_if = "is_default_weight")]
    pub weight: u32,

    #[serde(default, skip_serializing_if = "is_active")]
    pub status: ResourceStatus,

    #[serde(default = "default_admin_state_up", skip_serializing_if = "is_true")]
    pub admin_state_up: bool,
}

impl Member {
    /// Only `ACTIVE` members with `admin_state_up` receive traffic.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.status == ResourceStatus::Active && self.admin_state_up
    }
}

/// A periodic check definition used to mark members healthy or unhealthy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HealthMonitor {
    #[serde(rename = "type")]
    pub kind: MonitorType,

    /// Seconds between checks.
    pub delay: u64,

    /// Consecutive failures before a member is marked down.
    pub max_retries: u32,

    /// Seconds to wait for a check response.
    pub timeout: u64,

    #[serde(default, skip_serializing_if = "is_active")]
    pub status: ResourceStatus,

    #[serde(default = "default_admin_state_up", skip_serializing_if = "is_true")]
    pub admin_state_up: bool,

    // HTTP/HTTPS checks only; ignored for PING and TCP.
    #[serde(
        default = "default_http_method",
        skip_serializing_if = "is_default_http_method"
    )]
    pub http_method: String,

    #[serde(
        default = "default_url_path",
        skip_serializing_if = "is_default_url_path"
    )]
    pub url_path: String,

    /// Compact status-code spec, e.g. `"200-204, 301"`.
    #[serde(
        default = "default_expected_codes",
        skip_serializing_if = "is_default_expected_codes"
    )]
    pub expected_codes: String,
}

/// VIP/pool protocols. The protocol→proxy-mode table in the renderer is
/// the only consumer; an unknown wire value is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Protocol {
    Tcp,
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tcp => "TCP",
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        })
    }
}

/// Balancing method. Unrecognized wire values are preserved in
/// [`LbMethod::Other`] and fall back to `roundrobin` at render time —
/// a fallback by design, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LbMethod {
    #[default]
    RoundRobin,
    LeastConnections,
    SourceIp,
    Other(String),
}

impl LbMethod {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RoundRobin => "ROUND_ROBIN",
            Self::LeastConnections => "LEAST_CONNECTIONS",
            Self::SourceIp => "SOURCE_IP",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for LbMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LbMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "ROUND_ROBIN" => Self::RoundRobin,
            "LEAST_CONNECTIONS" => Self::LeastConnections,
            "SOURCE_IP" => Self::SourceIp,
            _ => Self::Other(raw),
        })
    }
}

impl Serialize for LbMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Health monitor kinds. PING and TCP carry no HTTP check options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitorType {
    Ping,
    Tcp,
    Http,
    Https,
}

impl MonitorType {
    /// HTTP and HTTPS checks emit `option httpchk` and an expect-status line.
    #[must_use]
    pub const fn is_http(self) -> bool {
        matches!(self, Self::Http | Self::Https)
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ping => "PING",
            Self::Tcp => "TCP",
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        })
    }
}

/// Provisioning status of a member or monitor. Anything other than
/// `ACTIVE` keeps the resource out of the rendered configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    #[default]
    Active,
    PendingCreate,
    PendingUpdate,
    PendingDelete,
    Inactive,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lb_method_round_trips_known_values() {
        let method: LbMethod = serde_json::from_str("\"LEAST_CONNECTIONS\"").unwrap();
        assert_eq!(method, LbMethod::LeastConnections);
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"LEAST_CONNECTIONS\"");
    }

    #[test]
    fn lb_method_preserves_unknown_values() {
        let method: LbMethod = serde_json::from_str("\"WEIGHTED_FASTEST\"").unwrap();
        assert_eq!(method, LbMethod::Other("WEIGHTED_FASTEST".into()));
        assert_eq!(method.as_str(), "WEIGHTED_FASTEST");
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let result: Result<Protocol, _> = serde_json::from_str("\"UDP\"");
        assert!(result.is_err());
    }

    #[test]
    fn member_defaults_apply() {
        let member: Member = serde_json::from_str(
            r#"{"id": "m1", "address": "10.0.0.10", "protocol_port": 80}"#,
        )
        .unwrap();
        assert_eq!(member.weight, 1);
        assert_eq!(member.status, ResourceStatus::Active);
        assert!(member.admin_state_up);
        assert!(member.is_eligible());
    }

    #[test]
    fn monitor_http_defaults_apply() {
        let monitor: HealthMonitor = serde_json::from_str(
            r#"{"type": "HTTP", "delay": 5, "max_retries": 3, "timeout": 2}"#,
        )
        .unwrap();
        assert_eq!(monitor.http_method, "GET");
        assert_eq!(monitor.url_path, "/");
        assert_eq!(monitor.expected_codes, "200");
    }

    #[test]
    fn active_monitor_picks_first_eligible() {
        let config: LogicalConfig = serde_json::from_str(
            r#"{
                "vip": {"id": "v", "protocol": "TCP", "protocol_port": 80,
                        "port": {"fixed_ips": [{"ip_address": "10.0.0.5"}]}},
                "pool": {"id": "p", "protocol": "TCP"},
                "healthmonitors": [
                    {"type": "TCP", "delay": 1, "max_retries": 1, "timeout": 1,
                     "admin_state_up": false},
                    {"type": "HTTP", "delay": 2, "max_retries": 2, "timeout": 2},
                    {"type": "HTTPS", "delay": 3, "max_retries": 3, "timeout": 3}
                ]
            }"#,
        )
        .unwrap();
        let selected = config.active_monitor().unwrap();
        assert_eq!(selected.kind, MonitorType::Http);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Pool, _> = serde_json::from_str(
            r#"{"id": "p", "protocol": "TCP", "session_persistence": {}}"#,
        );
        assert!(result.is_err());
    }
}
