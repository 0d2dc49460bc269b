use super::{decode_hex, parse_height};
use crate::config::Config;
use chain::IndexedBlockHeader;
use clap::ArgMatches;
use network::ChainParams;
use verification::HeaderAcceptor;

pub fn check(cfg: &Config, matches: &ArgMatches) -> Result<(), String> {
	let header: IndexedBlockHeader = decode_hex(matches.value_of("HEADER").unwrap_or_default())?;
	let height = parse_height(matches.value_of("height"))?.ok_or("Missing height")?;
	check_header(cfg, &header, height)?;
	println!("{}", header.hash);
	Ok(())
}

fn check_header(cfg: &Config, header: &IndexedBlockHeader, height: u32) -> Result<(), String> {
	let chain_params = ChainParams::for_network(cfg.network);
	HeaderAcceptor::new(header, &chain_params, height)
		.check()
		.map_err(|e| format!("Header {} rejected at height {}: {}", header.hash, height, e))?;

	info!("Header {} accepted at height {} on {}", header.hash, height, cfg.network);
	Ok(())
}
