use std::fmt;
use std::net::IpAddr;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RrsType {
    A,
    AAAA,
    CNAME,
}

impl RrsType {
    /// Type implied by a single stored host: any IP literal is served as an
    /// A record, anything else as a CNAME.
    pub fn infer(host: &str) -> Self {
        if host.parse::<IpAddr>().is_ok() {
            RrsType::A
        } else {
            RrsType::CNAME
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RrsType::A => "A",
            RrsType::AAAA => "AAAA",
            RrsType::CNAME => "CNAME",
        }
    }
}

impl fmt::Display for RrsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All answers served for one name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRecordSet {
    pub name: String,
    pub rrdatas: Vec<String>,
    pub ttl: u32,
    pub rrs_type: RrsType,
}

impl ResourceRecordSet {
    pub fn new(name: &str, rrdatas: Vec<String>, ttl: u32, rrs_type: RrsType) -> Self {
        ResourceRecordSet {
            name: name.to_string(),
            rrdatas,
            ttl,
            rrs_type,
        }
    }
}

impl fmt::Display for ResourceRecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name,
            self.ttl,
            self.rrs_type,
            self.rrdatas.join(",")
        )
    }
}
