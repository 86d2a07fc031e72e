//! Network address generators: email, IPv4, MAC and URL.

use entity_core::FieldValue;
use rand::Rng;
use std::net::Ipv4Addr;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const TLDS: &[&str] = &["com", "org", "net"];
const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

fn lower_alpha<R: Rng>(rng: &mut R, min: usize, max: usize) -> String {
    let len = rng.random_range(min..=max);
    (0..len)
        .map(|_| LOWER[rng.random_range(0..LOWER.len())] as char)
        .collect()
}

/// `local@domain.tld` with lowercase ASCII parts.
pub fn generate_email<R: Rng>(rng: &mut R) -> FieldValue {
    let local = lower_alpha(rng, 1, 10);
    let domain = lower_alpha(rng, 3, 10);
    let tld = TLDS[rng.random_range(0..TLDS.len())];
    FieldValue::String(format!("{local}@{domain}.{tld}"))
}

/// Dotted-quad IPv4 address with a unicast first octet (1-223).
pub fn generate_ipv4<R: Rng>(rng: &mut R) -> FieldValue {
    let addr = Ipv4Addr::new(
        rng.random_range(1..=223),
        rng.random(),
        rng.random(),
        rng.random(),
    );
    FieldValue::String(addr.to_string())
}

/// Six lowercase hex octets joined by `:`, with the multicast bit cleared.
pub fn generate_mac<R: Rng>(rng: &mut R) -> FieldValue {
    let mut bytes = [0u8; 6];
    rng.fill(&mut bytes);
    bytes[0] &= 0xFE;
    let octets: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    FieldValue::String(octets.join(":"))
}

/// `scheme://host.com` with a scheme of http, https or ftp.
pub fn generate_url<R: Rng>(rng: &mut R) -> FieldValue {
    let scheme = URL_SCHEMES[rng.random_range(0..URL_SCHEMES.len())];
    let host = lower_alpha(rng, 3, 12);
    FieldValue::String(format!("{scheme}://{host}.com"))
}
