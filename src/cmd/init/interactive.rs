//! Interactive wizard for step-by-step state generation.

use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{Confirm, Input, Select};
use uuid::Uuid;

use crate::cli::{InitArgs, StateFormat};
use crate::config::model::*;
use crate::config::validation::{
    validate, validate_expected_codes, validate_ip_address, validate_url_path, validate_weight,
};
use crate::error::LbrenderError;

use super::serialize::serialize_config;

/// Map a `dialoguer::Error` to a `LbrenderError`.
fn map_prompt_err(e: dialoguer::Error) -> LbrenderError {
    LbrenderError::Io(std::io::Error::other(e.to_string()))
}

pub fn run(args: &InitArgs) -> Result<(), LbrenderError> {
    // Ensure we're running in an interactive terminal
    if !console::Term::stdout().is_term() {
        return Err(LbrenderError::Io(std::io::Error::other(
            "interactive mode requires a terminal (TTY). Use lbrender init without -i for non-interactive mode.",
        )));
    }

    println!(
        "\n  {} State Wizard\n  {}\n",
        style("lbrender").cyan().bold(),
        style("─────────────────────────").dim()
    );

    // Step 1: Output settings
    println!("  {}\n", style("Step 1: Output").bold());
    let format = prompt_format(args)?;
    let output = prompt_output(args, &format)?;

    // Step 2: Frontend
    println!("\n  {}\n", style("Step 2: Virtual IP").bold());
    let vip = prompt_vip()?;

    // Step 3: Pool
    println!("\n  {}\n", style("Step 3: Pool").bold());
    let pool = prompt_pool()?;

    // Step 4: Members
    println!("\n  {}\n", style("Step 4: Members").bold());
    let members = prompt_members()?;

    // Step 5: Health monitor
    println!("\n  {}\n", style("Step 5: Health monitor").bold());
    let healthmonitors = prompt_monitors()?;

    let config = LogicalConfig {
        vip,
        pool,
        members,
        healthmonitors,
    };

    // Validate the assembled state
    if let Err(errors) = validate(&config) {
        eprintln!(
            "\n  {} State has validation errors:",
            style("!").red().bold()
        );
        for e in &errors {
            eprintln!("    {e}");
        }
        return Err(LbrenderError::StateValidation { errors });
    }

    // Step 6: Review
    println!("\n  {}\n", style("Step 6: Review").bold());
    print_summary(&config, &format, &output);

    let confirm = Confirm::new()
        .with_prompt(format!("Write state to {}?", output.display()))
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if !confirm {
        println!("  Aborted.");
        return Ok(());
    }

    // Handle existing file
    if output.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact()
            .map_err(map_prompt_err)?;
        if !overwrite {
            println!("  Aborted.");
            return Ok(());
        }
    }

    let content = serialize_config(&config, &format)?;
    std::fs::write(&output, content)?;
    println!(
        "\n  {} Created {}",
        style("✓").green().bold(),
        output.display()
    );
    Ok(())
}

fn prompt_format(args: &InitArgs) -> Result<StateFormat, LbrenderError> {
    let formats = &["yaml", "json", "toml"];
    let default_idx = match args.format {
        StateFormat::Yaml => 0,
        StateFormat::Json => 1,
        StateFormat::Toml => 2,
    };

    let selection = Select::new()
        .with_prompt("State format")
        .items(formats)
        .default(default_idx)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(match selection {
        0 => StateFormat::Yaml,
        1 => StateFormat::Json,
        2 => StateFormat::Toml,
        _ => unreachable!(),
    })
}

fn prompt_output(args: &InitArgs, format: &StateFormat) -> Result<PathBuf, LbrenderError> {
    let default_path = args.output.as_ref().map_or_else(
        || format!("lbrender.{}", format.extension()),
        |p| p.display().to_string(),
    );

    let path_str: String = Input::new()
        .with_prompt("Output file path")
        .default(default_path)
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok(PathBuf::from(path_str))
}

fn prompt_protocol(prompt: &str) -> Result<Protocol, LbrenderError> {
    let protocols = &["TCP", "HTTP", "HTTPS"];
    let selection = Select::new()
        .with_prompt(prompt)
        .items(protocols)
        .default(1)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(match selection {
        0 => Protocol::Tcp,
        1 => Protocol::Http,
        2 => Protocol::Https,
        _ => unreachable!(),
    })
}

fn prompt_port(prompt: &str, default: u16) -> Result<u16, LbrenderError> {
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|input: &u16| -> Result<(), String> {
            if *input == 0 {
                Err("port 0 cannot be bound".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)
}

fn prompt_vip() -> Result<Vip, LbrenderError> {
    let ip_address: String = Input::new()
        .with_prompt("VIP address (e.g. 10.0.0.5)")
        .validate_with(|input: &String| -> Result<(), String> { validate_ip_address(input) })
        .interact_text()
        .map_err(map_prompt_err)?;

    let protocol_port = prompt_port("VIP port", 80)?;
    let protocol = prompt_protocol("VIP protocol")?;

    let limit_connections = Confirm::new()
        .with_prompt("Cap concurrent connections?")
        .default(false)
        .interact()
        .map_err(map_prompt_err)?;

    let connection_limit = if limit_connections {
        Input::new()
            .with_prompt("Connection limit")
            .default(4096_i64)
            .validate_with(|input: &i64| -> Result<(), String> {
                if *input < 0 {
                    Err("use a non-negative limit (or skip the cap for unlimited)".into())
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(map_prompt_err)?
    } else {
        -1
    };

    Ok(Vip {
        id: Uuid::new_v4().to_string(),
        protocol,
        protocol_port,
        connection_limit,
        port: NetworkPort {
            fixed_ips: vec![FixedIp { ip_address }],
        },
    })
}

fn prompt_pool() -> Result<Pool, LbrenderError> {
    let protocol = prompt_protocol("Pool protocol")?;

    let methods = &["round robin", "least connections", "source IP"];
    let selection = Select::new()
        .with_prompt("Balancing method")
        .items(methods)
        .default(0)
        .interact()
        .map_err(map_prompt_err)?;

    let lb_method = match selection {
        0 => LbMethod::RoundRobin,
        1 => LbMethod::LeastConnections,
        2 => LbMethod::SourceIp,
        _ => unreachable!(),
    };

    Ok(Pool {
        id: Uuid::new_v4().to_string(),
        protocol,
        lb_method,
    })
}

fn prompt_members() -> Result<Vec<Member>, LbrenderError> {
    let mut members = Vec::new();
    loop {
        if !members.is_empty() {
            let add_another = Confirm::new()
                .with_prompt("Add another member?")
                .default(false)
                .interact()
                .map_err(map_prompt_err)?;
            if !add_another {
                break;
            }
        }
        let idx = members.len() + 1;
        println!(
            "\n  {} Member {} {}",
            style("──").dim(),
            idx,
            style("──").dim()
        );
        members.push(prompt_single_member()?);
    }
    Ok(members)
}

fn prompt_single_member() -> Result<Member, LbrenderError> {
    let address: String = Input::new()
        .with_prompt("Member address (e.g. 10.0.0.10)")
        .validate_with(|input: &String| -> Result<(), String> { validate_ip_address(input) })
        .interact_text()
        .map_err(map_prompt_err)?;

    let protocol_port = prompt_port("Member port", 8080)?;

    let weight: u32 = Input::new()
        .with_prompt("Weight")
        .default(1)
        .validate_with(|input: &u32| -> Result<(), String> { validate_weight(*input) })
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok(Member {
        id: Uuid::new_v4().to_string(),
        address,
        protocol_port,
        weight,
        status: ResourceStatus::Active,
        admin_state_up: true,
    })
}

fn prompt_monitors() -> Result<Vec<HealthMonitor>, LbrenderError> {
    let enabled = Confirm::new()
        .with_prompt("Add a health monitor?")
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if !enabled {
        return Ok(Vec::new());
    }

    let kinds = &["PING", "TCP", "HTTP", "HTTPS"];
    let selection = Select::new()
        .with_prompt("Check type")
        .items(kinds)
        .default(2)
        .interact()
        .map_err(map_prompt_err)?;

    let kind = match selection {
        0 => MonitorType::Ping,
        1 => MonitorType::Tcp,
        2 => MonitorType::Http,
        3 => MonitorType::Https,
        _ => unreachable!(),
    };

    let delay: u64 = Input::new()
        .with_prompt("Seconds between checks")
        .default(5)
        .validate_with(|input: &u64| -> Result<(), String> {
            if *input == 0 {
                Err("interval must be at least 1 second".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let max_retries: u32 = Input::new()
        .with_prompt("Failures before marking a member down")
        .default(3)
        .validate_with(|input: &u32| -> Result<(), String> {
            if *input == 0 {
                Err("at least one failure is needed".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let timeout: u64 = Input::new()
        .with_prompt("Check timeout (seconds)")
        .default(2)
        .interact_text()
        .map_err(map_prompt_err)?;

    let mut monitor = HealthMonitor {
        kind,
        delay,
        max_retries,
        timeout,
        status: ResourceStatus::Active,
        admin_state_up: true,
        http_method: "GET".into(),
        url_path: "/".into(),
        expected_codes: "200".into(),
    };

    if kind.is_http() {
        monitor.http_method = {
            let methods = &["GET", "HEAD", "OPTIONS"];
            let selection = Select::new()
                .with_prompt("HTTP method")
                .items(methods)
                .default(0)
                .interact()
                .map_err(map_prompt_err)?;
            methods[selection].to_string()
        };

        monitor.url_path = Input::new()
            .with_prompt("URL path")
            .default("/".to_string())
            .validate_with(|input: &String| -> Result<(), String> { validate_url_path(input) })
            .interact_text()
            .map_err(map_prompt_err)?;

        monitor.expected_codes = Input::new()
            .with_prompt("Expected status codes (e.g. 200 or 200-204)")
            .default("200".to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                validate_expected_codes(input)
            })
            .interact_text()
            .map_err(map_prompt_err)?;
    }

    Ok(vec![monitor])
}

fn print_summary(config: &LogicalConfig, format: &StateFormat, output: &Path) {
    println!(
        "  {}",
        style("┌─────────────────────────────────────────────┐").dim()
    );
    println!(
        "  {}  Format:   {:<35}{}",
        style("│").dim(),
        format.extension(),
        style("│").dim()
    );
    println!(
        "  {}  Output:   {:<35}{}",
        style("│").dim(),
        output.display(),
        style("│").dim()
    );

    let bind = config
        .vip
        .port
        .fixed_ips
        .first()
        .map_or("(none)".to_string(), |ip| {
            format!("{}:{}", ip.ip_address, config.vip.protocol_port)
        });
    println!(
        "  {}  Frontend: {:<35}{}",
        style("│").dim(),
        format!("{} on {}", config.vip.protocol, bind),
        style("│").dim()
    );
    println!(
        "  {}  Backend:  {:<35}{}",
        style("│").dim(),
        format!("{} via {}", config.pool.protocol, config.pool.lb_method),
        style("│").dim()
    );

    for member in &config.members {
        println!(
            "  {}    {} {}:{} (weight {})",
            style("│").dim(),
            style("\u{25CB}").dim(),
            member.address,
            member.protocol_port,
            member.weight
        );
    }

    let monitor_status = match config.active_monitor() {
        Some(monitor) => format!("{} every {}s", monitor.kind, monitor.delay),
        None => "none".to_string(),
    };
    println!(
        "  {}  Checks:   {:<35}{}",
        style("│").dim(),
        monitor_status,
        style("│").dim()
    );
    println!(
        "  {}\n",
        style("└─────────────────────────────────────────────┘").dim()
    );
}
