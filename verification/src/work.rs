use crate::error::Error;
use chain::{BlockHeader, BlockHeaderProvider};
use network::{ConsensusParams, Network};
use primitives::compact::Compact;
use primitives::U256;

/// First parent height after which every block is a retarget block.
const DIGISHIELD_HEIGHT: u32 = 145_000;

/// First parent height after which a digishield retarget may fall back to the minimum difficulty.
const DIGISHIELD_MIN_DIFFICULTY_HEIGHT: u32 = 157_500;

/// Returns the bits a block at `height` with timestamp `time` must carry.
///
/// `store` gives the ancestors of the block, `consensus` the rules in force at `height`.
pub fn work_required(
	time: u32,
	height: u32,
	store: &dyn BlockHeaderProvider,
	consensus: &ConsensusParams,
) -> Result<Compact, Error> {
	let max_bits = consensus.pow_limit_compact();
	if height == 0 {
		return Ok(max_bits);
	}

	let last_height = height - 1;
	let last = ancestor(store, last_height)?;

	if allow_digishield_min_difficulty(last_height, &last, time, consensus) {
		return Ok(max_bits);
	}

	let interval = if last_height >= DIGISHIELD_HEIGHT || consensus.network == Network::Inu {
		1
	} else {
		consensus.difficulty_adjustment_interval().max(1)
	};

	if height % interval != 0 {
		if consensus.pow_allow_min_difficulty_blocks {
			if is_late(&last, time, consensus) {
				return Ok(max_bits);
			}
			return last_regular_bits(store, last_height, last, interval, max_bits);
		}
		return Ok(last.bits);
	}

	// the first retarget after genesis looks one block less back
	let blocks_to_go_back = if height == interval { interval - 1 } else { interval };
	let first = ancestor(store, last_height.saturating_sub(blocks_to_go_back))?;

	Ok(retarget(&last, height, first.time, consensus))
}

/// New target scaled by the time the last interval took, clamped to the adjustment limits.
fn retarget(last: &BlockHeader, height: u32, first_time: u32, consensus: &ConsensusParams) -> Compact {
	let retarget_timespan = i64::from(consensus.pow_target_timespan.max(1));
	let actual_timespan = i64::from(last.time) - i64::from(first_time);

	let (modulated, min_timespan, max_timespan) = if consensus.digishield_difficulty_calculation {
		(
			retarget_timespan + (actual_timespan - retarget_timespan) / 8,
			retarget_timespan - retarget_timespan / 4,
			retarget_timespan + retarget_timespan / 2,
		)
	} else if height > 10_000 {
		(actual_timespan, retarget_timespan / 4, retarget_timespan * 4)
	} else if height > 5_000 {
		(actual_timespan, retarget_timespan / 8, retarget_timespan * 4)
	} else {
		(actual_timespan, retarget_timespan / 16, retarget_timespan * 4)
	};
	let modulated = modulated.max(min_timespan).min(max_timespan) as u64;

	let old_target = last.bits.to_u256().unwrap_or(consensus.pow_limit);
	let new_target = old_target
		.checked_mul(U256::from(modulated))
		.map(|target| target / U256::from(retarget_timespan as u64));

	match new_target {
		Some(target) if target <= consensus.pow_limit => Compact::from_u256(target),
		_ => consensus.pow_limit_compact(),
	}
}

/// Digishield blocks of min difficulty chains may drop to the limit after a long gap.
fn allow_digishield_min_difficulty(
	last_height: u32,
	last: &BlockHeader,
	time: u32,
	consensus: &ConsensusParams,
) -> bool {
	consensus.pow_allow_min_difficulty_blocks && last_height >= DIGISHIELD_MIN_DIFFICULTY_HEIGHT && is_late(last, time, consensus)
}

fn is_late(last: &BlockHeader, time: u32, consensus: &ConsensusParams) -> bool {
	u64::from(time) > u64::from(last.time) + u64::from(consensus.pow_target_spacing) * 2
}

/// Bits of the closest ancestor that is a retarget block or was not mined at the minimum difficulty.
fn last_regular_bits(
	store: &dyn BlockHeaderProvider,
	mut height: u32,
	mut header: BlockHeader,
	interval: u32,
	max_bits: Compact,
) -> Result<Compact, Error> {
	while height > 0 && height % interval != 0 && header.bits == max_bits {
		height -= 1;
		header = ancestor(store, height)?;
	}
	Ok(header.bits)
}

fn ancestor(store: &dyn BlockHeaderProvider, height: u32) -> Result<BlockHeader, Error> {
	store.block_header(height).ok_or(Error::MissingAncestor(height))
}

#[cfg(test)]
mod tests {
	use super::work_required;
	use crate::Error;
	use network::{ChainParams, Network};
	use primitives::compact::Compact;
	use test_data::HeaderChain;

	const T0: u32 = 1_400_000_000;

	fn required(network: Network, chain: &HeaderChain, time: u32) -> Result<Compact, Error> {
		let params = ChainParams::for_network(network);
		let height = chain.next_height();
		work_required(time, height, chain, params.consensus(height))
	}

	/// Chain ending at `end - 1`, whose first header at `start` is `timespan` seconds older than its last.
	fn span(start: u32, end: u32, timespan: u32, bits: u32) -> HeaderChain {
		let count = end - start;
		HeaderChain::new(start)
			.push(T0, Compact::new(bits))
			.extend(count - 2, 1, Compact::new(bits))
			.push(T0 + timespan, Compact::new(bits))
	}

	#[test]
	fn test_genesis_gets_pow_limit() {
		let params = ChainParams::for_network(Network::Mainnet);
		let empty = HeaderChain::new(0);
		assert_eq!(work_required(T0, 0, &empty, params.consensus(0)), Ok(Compact::new(0x1e0f_ffff)));
		assert_eq!(work_required(T0, 1, &empty, params.consensus(1)), Err(Error::MissingAncestor(0)));
	}

	#[test]
	fn test_bits_kept_between_retargets() {
		let chain = HeaderChain::new(990).extend(10, 60, Compact::new(0x1c0a_1b2c));
		// long gaps do not matter without min difficulty blocks
		assert_eq!(required(Network::Mainnet, &chain, T0 + 100_000), Ok(Compact::new(0x1c0a_1b2c)));
	}

	#[test]
	fn test_pre_digishield_retarget() {
		let bits = 0x1c0a_1b2c;
		// 240 blocks of 4 hours, counted back from the parent of block 12000
		let retarget = |timespan| required(Network::Mainnet, &span(11_759, 12_000, timespan, bits), T0 + timespan + 60);

		assert_eq!(retarget(4 * 60 * 60), Ok(Compact::new(0x1c0a_1b2c)));
		assert_eq!(retarget(8 * 60 * 60), Ok(Compact::new(0x1c14_3658)));
		// clamped to four times the target
		assert_eq!(retarget(40 * 60 * 60), Ok(Compact::new(0x1c28_6cb0)));
		// and to a quarter of it
		assert_eq!(retarget(60), Ok(Compact::new(0x1c02_86cb)));
	}

	#[test]
	fn test_early_retarget_limits() {
		let bits = 0x1c0a_1b2c;
		// a sixteenth before block 5000, an eighth before block 10000
		assert_eq!(
			required(Network::Mainnet, &span(4_559, 4_800, 60, bits), T0 + 120),
			Ok(Compact::new(0x1c00_a1b2))
		);
		assert_eq!(
			required(Network::Mainnet, &span(6_959, 7_200, 60, bits), T0 + 120),
			Ok(Compact::new(0x1c01_4365))
		);
	}

	#[test]
	fn test_first_retarget_after_genesis() {
		// block 240 looks back 239 blocks, to genesis
		let chain = span(0, 240, 4 * 60 * 60, 0x1c0a_1b2c);
		assert_eq!(required(Network::Mainnet, &chain, T0 + 14_460), Ok(Compact::new(0x1c0a_1b2c)));

		let short = HeaderChain::new(1).extend(239, 60, Compact::new(0x1c0a_1b2c));
		assert_eq!(required(Network::Mainnet, &short, T0 + 14_460), Err(Error::MissingAncestor(0)));
	}

	#[test]
	fn test_digishield_retargets_every_block() {
		let bits = 0x1b3c_4d5e;
		let retarget = |timespan| required(Network::Mainnet, &span(144_998, 145_000, timespan, bits), T0 + 1_000);

		assert_eq!(retarget(60), Ok(Compact::new(0x1b3c_4d5e)));
		// amplitude filtered, then clamped to one and a half times the target
		assert_eq!(retarget(600), Ok(Compact::new(0x1b5a_740d)));
		assert_eq!(retarget(0), Ok(Compact::new(0x1b35_4457)));

		// still every block after the boundary
		let chain = span(200_000, 200_002, 60, bits);
		assert_eq!(required(Network::Mainnet, &chain, T0 + 120), Ok(Compact::new(0x1b3c_4d5e)));
	}

	#[test]
	fn test_testnet_min_difficulty_before_digishield() {
		let limit = Compact::new(0x1e0f_ffff);
		let regular = Compact::new(0x1d00_ffff);
		let chain = HeaderChain::new(960).extend(30, 60, regular).extend(11, 60, limit);
		assert_eq!(chain.next_height(), 1001);
		let tip_time = chain.tip().unwrap().time;

		// more than two spacings late
		assert_eq!(required(Network::Testnet, &chain, tip_time + 121), Ok(limit));
		// otherwise back to the last block not mined at the limit
		assert_eq!(required(Network::Testnet, &chain, tip_time + 120), Ok(regular));

		// the walk stops at a retarget block
		let chain = HeaderChain::new(960).extend(41, 60, limit);
		assert_eq!(required(Network::Testnet, &chain, T0 + 60 * 40 + 60), Ok(limit));
	}

	#[test]
	fn test_testnet_min_difficulty_with_digishield() {
		let bits = 0x1b3c_4d5e;

		// block 157500 still retargets normally
		let chain = span(157_498, 157_500, 60, bits);
		assert_eq!(required(Network::Testnet, &chain, T0 + 1_000), Ok(Compact::new(bits)));

		// from 157501 a late block may use the limit
		let chain = span(157_499, 157_501, 60, bits);
		assert_eq!(required(Network::Testnet, &chain, T0 + 60 + 121), Ok(Compact::new(0x1e0f_ffff)));
		assert_eq!(required(Network::Testnet, &chain, T0 + 60 + 120), Ok(Compact::new(bits)));

		// never between 145000 and 157500
		let chain = span(150_000, 150_002, 60, bits);
		assert_eq!(required(Network::Testnet, &chain, T0 + 10_000), Ok(Compact::new(bits)));
	}

	#[test]
	fn test_inu_retargets_from_genesis() {
		let chain = span(98, 100, 30, 0x1f00_ffff);
		assert_eq!(required(Network::Inu, &chain, T0 + 90), Ok(Compact::new(0x1f00_f332)));

		// never easier than the limit
		let chain = span(98, 100, 600, 0x2003_ffff);
		assert_eq!(required(Network::Inu, &chain, T0 + 660), Ok(Compact::new(0x2003_ffff)));
	}
}
