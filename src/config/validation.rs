//! Logical-state validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`LogicalConfig`] for the
//! structural problems that would make rendering unsafe or produce a
//! config HAProxy rejects: missing bind addresses, zero ports, empty
//! identifiers, bad IP literals, and malformed monitor fields. Returns
//! a list of [`ValidationError`] values with per-field suggestions.
//!
//! Duplicate member ids are deliberately NOT flagged — duplicates render
//! as duplicate `server` lines, matching the upstream contract.

use std::net::IpAddr;

use super::model::LogicalConfig;
use crate::error::ValidationError;
use crate::render::health::expand_expected_codes;

/// Highest weight HAProxy accepts on a `server` line.
pub const MAX_MEMBER_WEIGHT: u32 = 256;

/// Validate a single IP address literal. Returns `Ok(())` or a human-readable error.
pub fn validate_ip_address(address: &str) -> Result<(), String> {
    if address.is_empty() {
        return Err("IP address cannot be empty".into());
    }
    match address.parse::<IpAddr>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("'{address}' is not a valid IP address")),
    }
}

/// Validate a monitor URL path. Returns `Ok(())` or a human-readable error.
pub fn validate_url_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("url_path cannot be empty".into());
    }
    if !path.starts_with('/') {
        return Err(format!("url_path must start with '/' (did you mean '/{path}'?)"));
    }
    Ok(())
}

/// Validate a member weight. Returns `Ok(())` or a human-readable error.
pub fn validate_weight(weight: u32) -> Result<(), String> {
    if weight == 0 {
        Err("weight must be at least 1".into())
    } else if weight > MAX_MEMBER_WEIGHT {
        Err(format!("weight must be at most {MAX_MEMBER_WEIGHT}"))
    } else {
        Ok(())
    }
}

/// Validate a compact expected-codes spec. Returns `Ok(())` or a human-readable error.
pub fn validate_expected_codes(codes: &str) -> Result<(), String> {
    expand_expected_codes(codes)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

pub fn validate(config: &LogicalConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let vip = &config.vip;
    if vip.id.is_empty() {
        errors.push(ValidationError {
            resource: "vip".into(),
            field: "id".into(),
            message: "id cannot be empty".into(),
            suggestion: None,
        });
    }
    if vip.protocol_port == 0 {
        errors.push(ValidationError {
            resource: "vip".into(),
            field: "protocol_port".into(),
            message: "port 0 cannot be bound".into(),
            suggestion: None,
        });
    }
    if vip.port.fixed_ips.is_empty() {
        errors.push(ValidationError {
            resource: "vip".into(),
            field: "port.fixed_ips".into(),
            message: "at least one fixed IP is required for the frontend bind".into(),
            suggestion: Some("add an entry like {ip_address: 10.0.0.5}".into()),
        });
    }
    for (i, fixed_ip) in vip.port.fixed_ips.iter().enumerate() {
        if let Err(msg) = validate_ip_address(&fixed_ip.ip_address) {
            errors.push(ValidationError {
                resource: "vip".into(),
                field: format!("port.fixed_ips[{i}].ip_address"),
                message: msg,
                suggestion: None,
            });
        }
    }

    if config.pool.id.is_empty() {
        errors.push(ValidationError {
            resource: "pool".into(),
            field: "id".into(),
            message: "id cannot be empty".into(),
            suggestion: None,
        });
    }

    for (i, member) in config.members.iter().enumerate() {
        let resource = if member.id.is_empty() {
            format!("members[{i}]")
        } else {
            format!("member {}", member.id)
        };

        if member.id.is_empty() {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "id".into(),
                message: "id cannot be empty".into(),
                suggestion: None,
            });
        }
        if member.address.is_empty() {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "address".into(),
                message: "address cannot be empty".into(),
                suggestion: None,
            });
        }
        if member.protocol_port == 0 {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "protocol_port".into(),
                message: "port 0 is not a reachable backend port".into(),
                suggestion: None,
            });
        }
        if let Err(msg) = validate_weight(member.weight) {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "weight".into(),
                message: msg,
                suggestion: None,
            });
        }
    }

    for (i, monitor) in config.healthmonitors.iter().enumerate() {
        let resource = format!("healthmonitors[{i}]");

        if monitor.delay == 0 {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "delay".into(),
                message: "check interval must be at least 1 second".into(),
                suggestion: None,
            });
        }
        if monitor.max_retries == 0 {
            errors.push(ValidationError {
                resource: resource.clone(),
                field: "max_retries".into(),
                message: "at least one failure is needed to mark a member down".into(),
                suggestion: None,
            });
        }

        if monitor.kind.is_http() {
            if let Err(msg) = validate_url_path(&monitor.url_path) {
                errors.push(ValidationError {
                    resource: resource.clone(),
                    field: "url_path".into(),
                    message: msg,
                    suggestion: if !monitor.url_path.is_empty()
                        && !monitor.url_path.starts_with('/')
                    {
                        Some(format!("did you mean '/{}'?", monitor.url_path))
                    } else {
                        None
                    },
                });
            }
            if let Err(msg) = validate_expected_codes(&monitor.expected_codes) {
                errors.push(ValidationError {
                    resource: resource.clone(),
                    field: "expected_codes".into(),
                    message: msg,
                    suggestion: Some("use codes like '200' or ranges like '200-204'".into()),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &LogicalConfig) -> String {
    let eligible = config.eligible_members().count();
    let bind = config
        .vip
        .port
        .fixed_ips
        .first()
        .map_or("(no fixed ip)".to_string(), |ip| {
            format!("{}:{}", ip.ip_address, config.vip.protocol_port)
        });

    let mut lines = vec![
        format!(
            "  frontend {}  {} on {}",
            config.vip.id, config.vip.protocol, bind
        ),
        format!(
            "  backend {}  {} via {}",
            config.pool.id, config.pool.protocol, config.pool.lb_method
        ),
        format!(
            "    members: {} ({} eligible)",
            config.members.len(),
            eligible
        ),
    ];

    match config.active_monitor() {
        Some(monitor) => lines.push(format!(
            "    health check: {} every {}s, fall after {}",
            monitor.kind, monitor.delay, monitor.max_retries
        )),
        None => lines.push("    health check: none".to_string()),
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
