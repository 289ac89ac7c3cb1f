//! Client IP inference from proxy headers

use http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Headers consulted for the client address, highest priority first
pub const CLIENT_IP_HEADERS: [&str; 5] = [
	"client-ip",
	"x-forwarded-for",
	"x-forwarded",
	"forwarded-for",
	"forwarded",
];

/// Extracts the client IP from the first usable header, falling back to the
/// socket peer address.
///
/// Proxy chains (`client, proxy1, proxy2`) contribute their first hop. The
/// standard `Forwarded` header contributes its `for=` parameter. Candidates
/// that do not parse as an address are skipped.
pub fn client_ip_from(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> Option<IpAddr> {
	for name in CLIENT_IP_HEADERS {
		let Some(raw) = headers.get(name).and_then(|v| v.to_str().ok()) else {
			continue;
		};
		let Some(first_hop) = raw.split(',').next() else {
			continue;
		};
		let candidate = if name == "forwarded" {
			forwarded_for(first_hop)
		} else {
			Some(first_hop)
		};
		if let Some(ip) = candidate.and_then(parse_ip) {
			return Some(ip);
		}
	}

	remote_addr.map(|addr| addr.ip())
}

/// Picks the `for=` parameter out of one `Forwarded` element.
fn forwarded_for(element: &str) -> Option<&str> {
	element.split(';').find_map(|pair| {
		let (key, value) = pair.split_once('=')?;
		key.trim().eq_ignore_ascii_case("for").then_some(value)
	})
}

/// Accepts bare addresses, `ip:port`, `[v6]:port` and quoted forms.
fn parse_ip(candidate: &str) -> Option<IpAddr> {
	let trimmed = candidate.trim().trim_matches('"');
	if let Ok(ip) = trimmed.parse::<IpAddr>() {
		return Some(ip);
	}
	if let Ok(addr) = trimmed.parse::<SocketAddr>() {
		return Some(addr.ip());
	}
	trimmed
		.strip_prefix('[')
		.and_then(|rest| rest.split(']').next())
		.and_then(|inner| inner.parse::<IpAddr>().ok())
}
