//! Relay URL validation.
//!
//! Every relay request must carry an absolute `http://` or `https://` URL.
//! When host blocking is enabled, URLs resolving syntactically to localhost or
//! to private, loopback, link-local or multicast addresses are refused as well
//! (SSRF protection). Host names are not resolved.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::Url;

use crate::error_handling::RelayError;

/// Validates the `url` query parameter of a relay request.
///
/// # Arguments
///
/// * `raw` - The parameter value, `None` when absent
/// * `block_private_hosts` - Also refuse localhost and private addresses
///
/// # Errors
///
/// - `MissingParameter` if the parameter is absent or empty
/// - `InvalidProtocol` if it does not parse or its scheme is not http/https
/// - `BlockedHost` if host blocking is enabled and the host is internal
///
/// # Examples
///
/// ```
/// use countries_dashboard::relay::validate_image_url;
///
/// assert!(validate_image_url(Some("https://flagcdn.com/fr.svg"), false).is_ok());
/// assert!(validate_image_url(Some("ftp://example.com/image.png"), false).is_err());
/// assert!(validate_image_url(None, false).is_err());
/// assert!(validate_image_url(Some("http://127.0.0.1/x.png"), true).is_err());
/// ```
pub fn validate_image_url(raw: Option<&str>, block_private_hosts: bool) -> Result<Url, RelayError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(RelayError::MissingParameter),
    };

    let url = Url::parse(raw).map_err(|_| RelayError::InvalidProtocol(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::InvalidProtocol(raw.to_string()));
    }

    if block_private_hosts {
        check_host(&url)?;
    }

    Ok(url)
}

fn check_host(url: &Url) -> Result<(), RelayError> {
    match url.host() {
        Some(url::Host::Domain(domain)) => {
            if is_localhost_domain(domain) {
                return Err(RelayError::BlockedHost(format!(
                    "localhost domain '{}' is not allowed",
                    domain
                )));
            }
        }
        Some(url::Host::Ipv4(ip)) => {
            if is_private_ipv4(ip) {
                return Err(RelayError::BlockedHost(format!(
                    "private IPv4 address '{}' is not allowed",
                    ip
                )));
            }
        }
        Some(url::Host::Ipv6(ip)) => {
            if is_private_ipv6(ip) {
                return Err(RelayError::BlockedHost(format!(
                    "private IPv6 address '{}' is not allowed",
                    ip
                )));
            }
        }
        None => {
            return Err(RelayError::BlockedHost("URL has no host".to_string()));
        }
    }
    Ok(())
}

fn is_localhost_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    domain == "localhost" || domain.ends_with(".localhost")
}

/// Loopback, RFC 1918, link-local, this-network, multicast, reserved and
/// broadcast ranges.
fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_multicast()
        || ip.is_broadcast()
        || ip.octets()[0] == 0
        || ip.octets()[0] >= 240
}

/// Loopback, unspecified, multicast, unique local (fc00::/7), link-local
/// (fe80::/10) and IPv4-mapped private addresses.
fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || (first & 0xfe00) == 0xfc00
        || (first & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_parameter() {
        assert!(matches!(
            validate_image_url(None, false),
            Err(RelayError::MissingParameter)
        ));
        assert!(matches!(
            validate_image_url(Some(""), false),
            Err(RelayError::MissingParameter)
        ));
    }

    #[test]
    fn test_scheme_must_be_http_or_https() {
        assert!(validate_image_url(Some("http://example.com/a.png"), false).is_ok());
        assert!(validate_image_url(Some("https://example.com/a.png"), false).is_ok());
        for bad in [
            "ftp://example.com/image.png",
            "file:///etc/passwd",
            "data:image/png;base64,AAAA",
            "//example.com/a.png",
            "example.com/a.png",
        ] {
            assert!(
                matches!(
                    validate_image_url(Some(bad), false),
                    Err(RelayError::InvalidProtocol(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_scheme_check_is_case_insensitive_after_parsing() {
        // The URL parser lower-cases schemes
        assert!(validate_image_url(Some("HTTPS://example.com/a.png"), false).is_ok());
    }

    #[test]
    fn test_private_hosts_allowed_when_blocking_disabled() {
        assert!(validate_image_url(Some("http://127.0.0.1:8080/a.png"), false).is_ok());
        assert!(validate_image_url(Some("http://localhost/a.png"), false).is_ok());
    }

    #[test]
    fn test_private_hosts_blocked_when_enabled() {
        for blocked in [
            "http://localhost/a.png",
            "http://api.localhost/a.png",
            "http://127.0.0.1/a.png",
            "http://10.1.2.3/a.png",
            "http://172.16.0.1/a.png",
            "http://192.168.1.1/a.png",
            "http://169.254.169.254/latest/meta-data",
            "http://0.0.0.0/a.png",
            "http://[::1]/a.png",
            "http://[fd00::1]/a.png",
            "http://[fe80::1]/a.png",
            "http://[::ffff:192.168.0.1]/a.png",
        ] {
            assert!(
                matches!(
                    validate_image_url(Some(blocked), true),
                    Err(RelayError::BlockedHost(_))
                ),
                "{} should be blocked",
                blocked
            );
        }
    }

    #[test]
    fn test_public_hosts_pass_when_blocking_enabled() {
        assert!(validate_image_url(Some("https://flagcdn.com/w320/fr.png"), true).is_ok());
        assert!(validate_image_url(Some("http://192.0.2.1/a.png"), true).is_ok());
        assert!(validate_image_url(Some("http://[2001:db8::1]/a.png"), true).is_ok());
    }
}
