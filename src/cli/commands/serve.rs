//! Web server command.

use console::style;

use geoproxy::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    println!(
        "{} Proxying geocoding requests to {}",
        style("→").cyan(),
        settings.provider.api_url
    );
    println!(
        "{} Starting geoproxy server at http://{}:{}",
        style("→").cyan(),
        url_host(&host),
        port
    );
    println!("  Press Ctrl+C to stop");

    geoproxy::server::serve(settings, &host, port).await
}

/// Default port when only a host is given.
const DEFAULT_PORT: u16 = 3030;

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" or "localhost" -> host:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
/// - IPv6: "::1" or "[::1]:3030" (brackets are stripped from the host)
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    let bind = bind.trim();
    if bind.is_empty() {
        anyhow::bail!("Bind address must not be empty");
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some(rest) = bind.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .ok_or_else(|| anyhow::anyhow!("Unclosed '[' in bind address: {}", bind))?;
        let port = match after {
            "" => DEFAULT_PORT,
            _ => after
                .strip_prefix(':')
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| anyhow::anyhow!("Invalid port in bind address: {}", bind))?,
        };
        return Ok((host.to_string(), port));
    }

    // More than one colon without brackets is a bare IPv6 address.
    if bind.matches(':').count() > 1 {
        return Ok((bind.to_string(), DEFAULT_PORT));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
        anyhow::bail!("Invalid port in bind address: {}", bind);
    }

    Ok((bind.to_string(), DEFAULT_PORT))
}

/// Host as it appears in a URL.
fn url_host(host: &str) -> String {
    if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_only() {
        assert_eq!(
            parse_bind_address("8080").unwrap(),
            ("127.0.0.1".to_string(), 8080)
        );
    }

    #[test]
    fn test_host_only() {
        assert_eq!(
            parse_bind_address("0.0.0.0").unwrap(),
            ("0.0.0.0".to_string(), 3030)
        );
    }

    #[test]
    fn test_host_and_port() {
        assert_eq!(
            parse_bind_address("0.0.0.0:9000").unwrap(),
            ("0.0.0.0".to_string(), 9000)
        );
    }

    #[test]
    fn test_hostname_with_port() {
        assert_eq!(
            parse_bind_address("localhost:8080").unwrap(),
            ("localhost".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address("localhost").unwrap(),
            ("localhost".to_string(), 3030)
        );
    }

    #[test]
    fn test_bare_ipv6_host() {
        assert_eq!(parse_bind_address("::1").unwrap(), ("::1".to_string(), 3030));
        assert_eq!(parse_bind_address("::").unwrap(), ("::".to_string(), 3030));
    }

    #[test]
    fn test_bracketed_ipv6() {
        assert_eq!(
            parse_bind_address("[::1]:9000").unwrap(),
            ("::1".to_string(), 9000)
        );
        assert_eq!(
            parse_bind_address("[::1]").unwrap(),
            ("::1".to_string(), 3030)
        );
        assert!(parse_bind_address("[::1").is_err());
        assert!(parse_bind_address("[::1]:http").is_err());
    }

    #[test]
    fn test_url_host_brackets_ipv6() {
        assert_eq!(url_host("::1"), "[::1]");
        assert_eq!(url_host("localhost"), "localhost");
    }

    #[test]
    fn test_invalid_port() {
        assert!(parse_bind_address("localhost:http").is_err());
        assert!(parse_bind_address("").is_err());
    }
}
