use network::Network;

#[derive(Debug, PartialEq, Default)]
pub struct Config {
	pub network: Network,
	pub quiet: bool,
}

pub fn parse(matches: &clap::ArgMatches) -> Result<Config, String> {
	let network = match (matches.is_present("testnet"), matches.is_present("regtest"), matches.is_present("inu")) {
		(true, false, false) => Network::Testnet,
		(false, true, false) => Network::Regtest,
		(false, false, true) => Network::Inu,
		(false, false, false) => Network::Mainnet,
		_ => return Err("Only one network option can be used".into()),
	};

	let config = Config {
		network,
		quiet: matches.is_present("quiet"),
	};

	Ok(config)
}
