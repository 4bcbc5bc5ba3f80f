use log::{error, info};
use skydns_provider::core::provider::{ResourceRecordChangeset, ResourceRecordSets, Zone};
use skydns_provider::core::record::{ResourceRecordSet, RrsType};
use skydns_provider::{Config, Error, SkyDnsProvider};
use std::env;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: skydns-provider <zone> get <name>\n       \
                     skydns-provider <zone> add <name> <ttl> <rrdata>...\n       \
                     skydns-provider <zone> remove <name>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Get(String),
    Add(ResourceRecordSet),
    Remove(String),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, Error> {
        match args {
            [cmd, name] if cmd == "get" => Ok(Command::Get(name.clone())),
            [cmd, name] if cmd == "remove" => Ok(Command::Remove(name.clone())),
            [cmd, name, ttl, rrdatas @ ..] if cmd == "add" && !rrdatas.is_empty() => {
                let ttl: u32 = ttl
                    .parse()
                    .map_err(|_| Error::InvalidInput(format!("invalid ttl: {ttl}")))?;
                let rrs_type = rrdatas
                    .last()
                    .map(|host| RrsType::infer(host))
                    .unwrap_or(RrsType::A);
                Ok(Command::Add(ResourceRecordSet::new(
                    name,
                    rrdatas.to_vec(),
                    ttl,
                    rrs_type,
                )))
            }
            _ => Err(Error::InvalidInput(USAGE.to_string())),
        }
    }
}

async fn run(provider: &SkyDnsProvider, command: Command) -> Result<(), Error> {
    let rrsets = provider.zone().resource_record_sets();
    match command {
        Command::Get(name) => match rrsets.get(&name).await? {
            Some(rrset) => println!("{rrset}"),
            None => println!("{name}: no records"),
        },
        Command::Add(rrset) => {
            let mut changeset = rrsets.start_changeset();
            changeset.add(rrset);
            changeset.apply().await?;
        }
        Command::Remove(name) => {
            let removal = rrsets.new_record_set(&name, Vec::new(), 0, RrsType::A);
            let mut changeset = rrsets.start_changeset();
            changeset.remove(removal);
            changeset.apply().await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((zone_name, rest)) = args.split_first() else {
        return Err(Error::InvalidInput(USAGE.to_string()).into());
    };
    let command = Command::parse(rest)?;

    let config = Config::from_env(zone_name)?;
    let provider = SkyDnsProvider::from_config(&config)?;
    info!("Serving zone {}", provider.zone().name());

    if let Err(e) = run(&provider, command).await {
        error!("Command failed: {e}");
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_get_and_remove() {
        assert_eq!(
            Command::parse(&args("get www.example.com")).unwrap(),
            Command::Get("www.example.com".to_string())
        );
        assert_eq!(
            Command::parse(&args("remove www.example.com")).unwrap(),
            Command::Remove("www.example.com".to_string())
        );
    }

    #[test]
    fn test_parse_add() {
        let command = Command::parse(&args("add lb.example.com 300 10.0.0.1 10.0.0.2")).unwrap();
        assert_matches!(command, Command::Add(rrset) => {
            assert_eq!(rrset.name, "lb.example.com");
            assert_eq!(rrset.ttl, 300);
            assert_eq!(rrset.rrdatas, vec!["10.0.0.1", "10.0.0.2"]);
            assert_eq!(rrset.rrs_type, RrsType::A);
        });

        let command = Command::parse(&args("add alias.example.com 60 svc.example.com")).unwrap();
        assert_matches!(command, Command::Add(rrset) if rrset.rrs_type == RrsType::CNAME);
    }

    #[test]
    fn test_parse_invalid() {
        assert_matches!(Command::parse(&args("")), Err(Error::InvalidInput(_)));
        assert_matches!(
            Command::parse(&args("add www.example.com 300")),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            Command::parse(&args("add www.example.com soon 10.0.0.1")),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            Command::parse(&args("list www.example.com")),
            Err(Error::InvalidInput(_))
        );
    }
}
