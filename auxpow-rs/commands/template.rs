use super::decode_hex;
use crate::config::Config;
use chain::{BlockHeader, IndexedBlockHeader};
use clap::ArgMatches;
use ser::serialize;

pub fn template(cfg: &Config, matches: &ArgMatches) -> Result<(), String> {
	let raw: BlockHeader = match matches.value_of("HEADER") {
		Some(hex) => decode_hex(hex)?,
		None => cfg.network.genesis_header(),
	};

	let header = merge_mining_template(raw);
	info!("Auxpow template for {} on {}", header.hash, cfg.network);
	println!("{}", serialize(&header));
	Ok(())
}

fn merge_mining_template(raw: BlockHeader) -> IndexedBlockHeader {
	let mut header = IndexedBlockHeader::from_raw(raw);
	header.init_auxpow();
	header
}
