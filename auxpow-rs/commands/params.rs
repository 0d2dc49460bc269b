use super::parse_height;
use crate::config::Config;
use clap::ArgMatches;
use network::{ChainParams, ConsensusParams};

pub fn params(cfg: &Config, matches: &ArgMatches) -> Result<(), String> {
	let chain_params = ChainParams::for_network(cfg.network);
	info!("Consensus rules of {} (magic {:#010x})", cfg.network, chain_params.magic());

	match parse_height(matches.value_of("height"))? {
		Some(height) => println!("{}", describe(chain_params.consensus(height))),
		None => {
			for epoch in chain_params.epochs() {
				println!("{}", describe(epoch));
			}
		}
	}

	Ok(())
}

fn describe(consensus: &ConsensusParams) -> String {
	format!(
		"from {}: legacy={} auxpow={} chain_id={:#x} strict_chain_id={} digishield={} min_difficulty={} timespan={} spacing={} maturity={} pow_limit={:?}",
		consensus.height_effective,
		consensus.allow_legacy_blocks,
		consensus.allow_auxpow(),
		consensus.auxpow_chain_id,
		consensus.strict_chain_id,
		consensus.digishield_difficulty_calculation,
		consensus.pow_allow_min_difficulty_blocks,
		consensus.pow_target_timespan,
		consensus.pow_target_spacing,
		consensus.coinbase_maturity,
		consensus.pow_limit_compact(),
	)
}
