//! Health-check option derivation from the monitor sequence.
//!
//! [`server_health_options`] selects the first eligible monitor with a
//! single linear scan — the ordering is input order, not priority order,
//! so there is no pre-filtering or sorting. HAProxy supports one health
//! policy per backend, which is why the remaining monitors are ignored.
//!
//! [`expand_expected_codes`] expands the compact status-code spec
//! (`"200-204, 301"`) into the literal codes for `http-check expect
//! rstatus`. Ranges are half-open: `200-204` yields 200 through 203.
//! This matches the behavior the consuming daemon was deployed against
//! and is pinned by tests; do not "fix" it to inclusive.

use std::collections::BTreeSet;

use crate::config::model::{LogicalConfig, MonitorType};
use crate::error::LbrenderError;

/// Derive the per-server suffix and the backend-wide option lines from
/// the first eligible monitor. No eligible monitor means no health
/// options at all: empty suffix, empty list.
pub fn server_health_options(
    config: &LogicalConfig,
) -> Result<(String, Vec<String>), LbrenderError> {
    let Some(monitor) = config.active_monitor() else {
        return Ok((String::new(), Vec::new()));
    };

    let server_addon = format!(
        " check inter {}s fall {}",
        monitor.delay, monitor.max_retries
    );

    let mut opts = vec![format!("timeout check {}s", monitor.timeout)];

    if monitor.kind.is_http() {
        opts.push(format!(
            "option httpchk {} {}",
            monitor.http_method, monitor.url_path
        ));
        let codes = expand_expected_codes(&monitor.expected_codes)?;
        opts.push(format!(
            "http-check expect rstatus {}",
            codes.into_iter().collect::<Vec<_>>().join("|")
        ));
    }

    if monitor.kind == MonitorType::Https {
        opts.push("option ssl-hello-chk".to_string());
    }

    Ok((server_addon, opts))
}

/// Expand a compact status-code spec into a set of literal codes.
///
/// Tokens are separated by commas and/or whitespace. A bare token is
/// added verbatim; a `low-high` token adds every code in `[low, high)`.
/// Extra `-`-separated components beyond the first two are ignored.
/// Non-numeric range bounds are an error.
pub fn expand_expected_codes(codes: &str) -> Result<BTreeSet<String>, LbrenderError> {
    let mut expanded = BTreeSet::new();

    for token in codes.replace(',', " ").split_whitespace() {
        if token.contains('-') {
            let mut bounds = token.split('-');
            let low = parse_bound(bounds.next().unwrap_or_default(), token)?;
            let high = parse_bound(bounds.next().unwrap_or_default(), token)?;
            expanded.extend((low..high).map(|code| code.to_string()));
        } else {
            expanded.insert(token.to_string());
        }
    }

    Ok(expanded)
}

fn parse_bound(bound: &str, token: &str) -> Result<u32, LbrenderError> {
    bound.parse().map_err(|_| LbrenderError::ExpectedCodes {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{
        FixedIp, HealthMonitor, LbMethod, LogicalConfig, MonitorType, NetworkPort, Pool, Protocol,
        ResourceStatus, Vip,
    };

    fn codes(spec: &str) -> Vec<String> {
        expand_expected_codes(spec)
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn expands_range_with_exclusive_upper_bound() {
        assert_eq!(codes("200-204"), vec!["200", "201", "202", "203"]);
    }

    #[test]
    fn expands_comma_separated_codes() {
        assert_eq!(codes("200, 203"), vec!["200", "203"]);
    }

    #[test]
    fn empty_spec_yields_empty_set() {
        assert!(codes("").is_empty());
        assert!(codes("  ,  , ").is_empty());
    }

    #[test]
    fn mixes_ranges_and_codes_with_dedup() {
        assert_eq!(codes("200-203, 202 301"), vec!["200", "201", "202", "301"]);
    }

    #[test]
    fn ignores_components_past_the_second() {
        assert_eq!(codes("200-202-299"), vec!["200", "201"]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        assert!(codes("204-200").is_empty());
    }

    #[test]
    fn malformed_bound_is_an_error() {
        let err = expand_expected_codes("200-abc").unwrap_err();
        assert!(matches!(err, LbrenderError::ExpectedCodes { ref token } if token == "200-abc"));

        assert!(expand_expected_codes("200-").is_err());
        assert!(expand_expected_codes("-204").is_err());
    }

    fn config_with_monitors(healthmonitors: Vec<HealthMonitor>) -> LogicalConfig {
        LogicalConfig {
            vip: Vip {
                id: "vip-1".into(),
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
                id: "pool-1".into(),
                protocol: Protocol::Http,
                lb_method: LbMethod::RoundRobin,
            },
            members: vec![],
            healthmonitors,
        }
    }

    fn monitor(kind: MonitorType) -> HealthMonitor {
        HealthMonitor {
            kind,
            delay: 10,
            max_retries: 4,
            timeout: 3,
            status: ResourceStatus::Active,
            admin_state_up: true,
            http_method: "GET".into(),
            url_path: "/".into(),
            expected_codes: "200".into(),
        }
    }

    #[test]
    fn no_monitors_means_no_options() {
        let (addon, opts) = server_health_options(&config_with_monitors(vec![])).unwrap();
        assert!(addon.is_empty());
        assert!(opts.is_empty());
    }

    #[test]
    fn all_ineligible_means_no_options() {
        let mut down = monitor(MonitorType::Http);
        down.status = ResourceStatus::PendingCreate;
        let mut disabled = monitor(MonitorType::Http);
        disabled.admin_state_up = false;

        let (addon, opts) =
            server_health_options(&config_with_monitors(vec![down, disabled])).unwrap();
        assert!(addon.is_empty());
        assert!(opts.is_empty());
    }

    #[test]
    fn first_eligible_monitor_wins() {
        let mut skipped = monitor(MonitorType::Https);
        skipped.admin_state_up = false;
        let mut selected = monitor(MonitorType::Tcp);
        selected.delay = 7;
        let ignored = monitor(MonitorType::Http);

        let (addon, opts) =
            server_health_options(&config_with_monitors(vec![skipped, selected, ignored]))
                .unwrap();
        assert_eq!(addon, " check inter 7s fall 4");
        assert_eq!(opts, vec!["timeout check 3s"]);
    }

    #[test]
    fn tcp_monitor_emits_only_timeout_check() {
        let (addon, opts) =
            server_health_options(&config_with_monitors(vec![monitor(MonitorType::Tcp)]))
                .unwrap();
        assert_eq!(addon, " check inter 10s fall 4");
        assert_eq!(opts, vec!["timeout check 3s"]);
    }

    #[test]
    fn http_monitor_emits_httpchk_and_expect() {
        let mut http = monitor(MonitorType::Http);
        http.http_method = "HEAD".into();
        http.url_path = "/status".into();
        http.expected_codes = "200-202".into();

        let (_, opts) = server_health_options(&config_with_monitors(vec![http])).unwrap();
        assert_eq!(
            opts,
            vec![
                "timeout check 3s",
                "option httpchk HEAD /status",
                "http-check expect rstatus 200|201",
            ]
        );
    }

    #[test]
    fn https_monitor_adds_ssl_hello_check() {
        let (_, opts) =
            server_health_options(&config_with_monitors(vec![monitor(MonitorType::Https)]))
                .unwrap();
        assert_eq!(opts.last().unwrap(), "option ssl-hello-chk");
    }

    #[test]
    fn malformed_codes_fail_the_render() {
        let mut http = monitor(MonitorType::Http);
        http.expected_codes = "2xx".into();
        // A bare token is added verbatim, not parsed...
        assert!(server_health_options(&config_with_monitors(vec![http.clone()])).is_ok());
        // ...but a range with a bad bound fails fast.
        http.expected_codes = "2xx-300".into();
        let err = server_health_options(&config_with_monitors(vec![http])).unwrap_err();
        assert!(matches!(err, LbrenderError::ExpectedCodes { .. }));
    }
}
