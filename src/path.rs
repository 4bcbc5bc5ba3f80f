//! Mapping between DNS names and hierarchical store keys.
//!
//! Labels are stored most-significant first, so `www.example.com` under the
//! prefix `skydns` lives at `/skydns/com/example/www` and every name nests
//! under the keys of its parent domains.

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// Joins labels into a dotted name, each label prepended to the ones before
/// it: `build_dns_name(&["www.example.com", "1a2b"])` is
/// `1a2b.www.example.com`.
pub fn build_dns_name(labels: &[&str]) -> String {
    labels.iter().fold(String::new(), |acc, label| {
        if acc.is_empty() {
            label.to_string()
        } else {
            format!("{label}.{acc}")
        }
    })
}

/// Store key for `name` under `prefix`.
pub fn path(prefix: &str, name: &str) -> String {
    let mut segments: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();
    segments.extend(name.split('.').filter(|l| !l.is_empty()).rev());
    format!("/{}", segments.join("/"))
}

/// Inverse of [`path`]. Returns `None` when `key` is not under `prefix`.
pub fn domain(prefix: &str, key: &str) -> Option<String> {
    let prefix: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();
    let mut segments = key.split('/').filter(|s| !s.is_empty());

    for expected in &prefix {
        if segments.next() != Some(*expected) {
            return None;
        }
    }

    let mut labels: Vec<&str> = segments.collect();
    labels.reverse();
    Some(labels.join("."))
}

/// 32-bit FNV-1a of `value`, as lowercase hex without padding.
///
/// Only used to give each stored value a distinct leaf label.
pub fn content_hash(value: &str) -> String {
    let hash = value.bytes().fold(FNV32_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV32_PRIME)
    });
    format!("{hash:x}")
}
