use std::env;
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_ETCD_ENDPOINT: &str = "http://federation-dns-server-etcd:4001";
pub const DEFAULT_PATH_PREFIX: &str = "skydns";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub etcd_endpoints: Vec<String>,
    pub etcd_path_prefix: String,
    pub domain: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Defaults for serving `zone_name`.
    pub fn for_zone(zone_name: &str) -> Self {
        Config {
            etcd_endpoints: vec![DEFAULT_ETCD_ENDPOINT.to_string()],
            etcd_path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            domain: zone_name.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_env(zone_name: &str) -> Result<Self, Error> {
        Self::from_lookup(zone_name, |key| env::var(key).ok())
    }

    fn from_lookup<F>(zone_name: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::for_zone(zone_name);

        if let Some(endpoints) = lookup("SKYDNS_ETCD_ENDPOINTS") {
            let endpoints: Vec<String> = endpoints
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
            if endpoints.is_empty() {
                return Err(Error::Config(
                    "SKYDNS_ETCD_ENDPOINTS contains no endpoints".to_string(),
                ));
            }
            config.etcd_endpoints = endpoints;
        }
        if let Some(prefix) = lookup("SKYDNS_ETCD_PATH_PREFIX") {
            config.etcd_path_prefix = prefix;
        }
        if let Some(domain) = lookup("SKYDNS_DOMAIN") {
            config.domain = domain;
        }
        if let Some(timeout) = lookup("SKYDNS_REQUEST_TIMEOUT") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("invalid SKYDNS_REQUEST_TIMEOUT: {timeout}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_requested_zone() {
        let config = Config::from_lookup("example.com", lookup_from(&[])).unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.etcd_path_prefix, DEFAULT_PATH_PREFIX);
        assert_eq!(config.etcd_endpoints, vec![DEFAULT_ETCD_ENDPOINT.to_string()]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(
            "example.com",
            lookup_from(&[
                ("SKYDNS_ETCD_ENDPOINTS", "http://a:2379, http://b:2379"),
                ("SKYDNS_ETCD_PATH_PREFIX", "federation"),
                ("SKYDNS_DOMAIN", "fed.example.org"),
                ("SKYDNS_REQUEST_TIMEOUT", "7"),
            ]),
        )
        .unwrap();
        assert_eq!(config.etcd_endpoints, vec!["http://a:2379", "http://b:2379"]);
        assert_eq!(config.etcd_path_prefix, "federation");
        assert_eq!(config.domain, "fed.example.org");
        assert_eq!(config.request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(
            "example.com",
            lookup_from(&[("SKYDNS_REQUEST_TIMEOUT", "soon")]),
        )
        .unwrap_err();
        assert_matches!(err, Error::Config(_));

        let err = Config::from_lookup(
            "example.com",
            lookup_from(&[("SKYDNS_ETCD_ENDPOINTS", " , ")]),
        )
        .unwrap_err();
        assert_matches!(err, Error::Config(_));
    }

    #[test]
    fn test_mock_default() {
        let config = Config::default();
        assert_eq!(config.domain, "example.com");
    }
}
