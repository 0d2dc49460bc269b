use crate::Network;
use primitives::compact::Compact;
use primitives::U256;

/// Chain id every network of this chain carries in its block versions.
pub const AUXPOW_CHAIN_ID: i32 = 0x0062;

#[derive(Debug, Clone, PartialEq)]
/// Parameters that influence chain consensus from `height_effective` onward.
pub struct ConsensusParams {
	/// Network.
	pub network: Network,
	/// First block height these parameters apply to.
	pub height_effective: u32,
	/// Easiest target a block may claim.
	pub pow_limit: U256,
	/// Expected time between blocks, in seconds.
	pub pow_target_spacing: u32,
	/// Time span over which the difficulty is retargeted, in seconds.
	pub pow_target_timespan: u32,
	/// Retarget every block with the digishield algorithm.
	pub digishield_difficulty_calculation: bool,
	/// Allow a block at minimum difficulty after a long gap.
	pub pow_allow_min_difficulty_blocks: bool,
	/// Fixed block rewards instead of the random ones of the early chain.
	pub simplified_rewards: bool,
	pub subsidy_halving_interval: u32,
	/// Number of blocks after creation that a coinbase transaction becomes spendable
	pub coinbase_maturity: u32,
	/// Chain id expected in the version of our own blocks.
	pub auxpow_chain_id: i32,
	/// Reject blocks with a foreign chain id and parent blocks with ours.
	pub strict_chain_id: bool,
	/// Accept legacy (pre chain id) block versions. Auxpow is forbidden while this is set.
	pub allow_legacy_blocks: bool,
	/// Block height at which BIP34 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0034.mediawiki
	pub bip34_height: u32,
	/// Block height at which BIP66 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0066.mediawiki
	pub bip66_height: u32,
	/// Version bits activation
	pub rule_change_activation_threshold: u32,
	/// Number of blocks with the same set of rules
	pub miner_confirmation_window: u32,
}

impl ConsensusParams {
	/// Parameters in force from the genesis block of `network`.
	pub fn new(network: Network) -> Self {
		match network {
			Network::Mainnet => ConsensusParams {
				network,
				height_effective: 0,
				pow_limit: U256::max_value() >> 20,
				pow_target_spacing: 60,        // 1 minute
				pow_target_timespan: 4 * 60 * 60, // pre-digishield: 4 hours
				digishield_difficulty_calculation: false,
				pow_allow_min_difficulty_blocks: false,
				simplified_rewards: false,
				subsidy_halving_interval: 100_000,
				coinbase_maturity: 30,
				auxpow_chain_id: AUXPOW_CHAIN_ID,
				strict_chain_id: true,
				allow_legacy_blocks: true,
				bip34_height: 1_034_383, // 80d1364201e5df97e696c03bdd24dc885e8617b9de51e453c10a4f629b1e797a
				bip66_height: 1_034_383,
				rule_change_activation_threshold: 9576, // 95% of 10,080
				miner_confirmation_window: 10080,       // one week
			},
			Network::Testnet => ConsensusParams {
				network,
				height_effective: 0,
				pow_limit: U256::max_value() >> 20,
				pow_target_spacing: 60,
				pow_target_timespan: 4 * 60 * 60,
				digishield_difficulty_calculation: false,
				pow_allow_min_difficulty_blocks: true,
				simplified_rewards: false,
				subsidy_halving_interval: 100_000,
				coinbase_maturity: 30,
				auxpow_chain_id: AUXPOW_CHAIN_ID,
				strict_chain_id: false,
				allow_legacy_blocks: true,
				bip34_height: 708_658, // 21b8b97dcdb94caa67c7f8f6dbf22e61e0cfe0e46e1fff3528b22864659e9b38
				bip66_height: 708_658,
				rule_change_activation_threshold: 2880, // 2 days
				miner_confirmation_window: 10080,
			},
			Network::Regtest => ConsensusParams {
				network,
				height_effective: 0,
				pow_limit: U256::max_value() >> 1,
				pow_target_spacing: 1, // 1 second blocks
				pow_target_timespan: 4 * 60 * 60,
				digishield_difficulty_calculation: false,
				pow_allow_min_difficulty_blocks: true,
				simplified_rewards: true,
				subsidy_halving_interval: 150,
				coinbase_maturity: 60,
				auxpow_chain_id: AUXPOW_CHAIN_ID,
				strict_chain_id: true,
				allow_legacy_blocks: true,
				bip34_height: 100_000_000, // not activated on regtest
				bip66_height: 1251,
				rule_change_activation_threshold: 540, // 75%
				miner_confirmation_window: 720,
			},
			Network::Inu => ConsensusParams {
				network,
				height_effective: 0,
				pow_limit: U256::max_value() >> 6,
				pow_target_spacing: 60,
				pow_target_timespan: 60,
				digishield_difficulty_calculation: true,
				pow_allow_min_difficulty_blocks: false,
				simplified_rewards: false,
				subsidy_halving_interval: 1_000_000,
				coinbase_maturity: 60,
				auxpow_chain_id: AUXPOW_CHAIN_ID,
				strict_chain_id: false,
				allow_legacy_blocks: false,
				bip34_height: 1,
				bip66_height: 1,
				rule_change_activation_threshold: 9576,
				miner_confirmation_window: 10080,
			},
		}
	}

	/// Every rule set of `network`, ordered by effective height.
	pub fn epochs(network: Network) -> Vec<Self> {
		let genesis = ConsensusParams::new(network);
		match network {
			Network::Mainnet => {
				let digishield = ConsensusParams {
					height_effective: 145_000,
					simplified_rewards: true,
					digishield_difficulty_calculation: true,
					pow_target_timespan: 60, // post-digishield: 1 minute
					coinbase_maturity: 240,
					..genesis.clone()
				};
				let auxpow = ConsensusParams {
					height_effective: 371_337,
					allow_legacy_blocks: false,
					..digishield.clone()
				};
				vec![genesis, digishield, auxpow]
			}
			Network::Testnet => {
				let digishield = ConsensusParams {
					height_effective: 145_000,
					pow_target_timespan: 60,
					digishield_difficulty_calculation: true,
					simplified_rewards: true,
					pow_allow_min_difficulty_blocks: false,
					coinbase_maturity: 240,
					..genesis.clone()
				};
				let min_difficulty = ConsensusParams {
					height_effective: 157_500,
					pow_allow_min_difficulty_blocks: true,
					..digishield.clone()
				};
				let auxpow = ConsensusParams {
					height_effective: 158_100,
					allow_legacy_blocks: false,
					..min_difficulty.clone()
				};
				vec![genesis, digishield, min_difficulty, auxpow]
			}
			Network::Regtest => {
				let digishield = ConsensusParams {
					height_effective: 10,
					pow_target_timespan: 1, // retarget every second, like the spacing
					digishield_difficulty_calculation: true,
					..genesis.clone()
				};
				let auxpow = ConsensusParams {
					height_effective: 20,
					allow_legacy_blocks: false,
					..digishield.clone()
				};
				vec![genesis, digishield, auxpow]
			}
			// merge mined from its genesis block on
			Network::Inu => vec![genesis],
		}
	}

	/// Auxpow blocks are accepted exactly when legacy blocks are not.
	pub fn allow_auxpow(&self) -> bool {
		!self.allow_legacy_blocks
	}

	pub fn pow_limit_compact(&self) -> Compact {
		Compact::from_u256(self.pow_limit)
	}

	/// Number of blocks between two retargets of the pre-digishield algorithm.
	pub fn difficulty_adjustment_interval(&self) -> u32 {
		self.pow_target_timespan / self.pow_target_spacing.max(1)
	}
}

impl Default for ConsensusParams {
	fn default() -> Self {
		ConsensusParams::new(Network::default())
	}
}
