use std::io;
use std::net::IpAddr;

/// Resolve a target address to an IP, preferring IPv4 when both families
/// are available.
///
/// Literal IPs short-circuit the lookup entirely.
pub async fn resolve_ip(address: &str) -> io::Result<IpAddr> {
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(ip);
    }

    let mut v4 = None;
    let mut v6 = None;
    for addr in tokio::net::lookup_host((address, 0)).await? {
        match addr.ip() {
            ip @ IpAddr::V4(_) if v4.is_none() => v4 = Some(ip),
            ip @ IpAddr::V6(_) if v6.is_none() => v6 = Some(ip),
            _ => {}
        }
    }

    v4.or(v6).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no address found for '{address}'"),
        )
    })
}
