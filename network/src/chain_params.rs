//! Consensus rule schedule of a network.

use crate::{ConsensusParams, Error, Magic, Network};

/// Rule sets of a network, sorted by effective height.
///
/// Immutable once built; share it behind an `Arc` between validating threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainParams {
	network: Network,
	epochs: Vec<ConsensusParams>,
}

impl ChainParams {
	/// Schedule from a custom list of epochs, in any order.
	pub fn new(network: Network, mut epochs: Vec<ConsensusParams>) -> Result<Self, Error> {
		if epochs.is_empty() {
			return Err(Error::NoEpochs);
		}

		if let Some(epoch) = epochs.iter().find(|epoch| epoch.network != network) {
			return Err(Error::NetworkMismatch {
				expected: network,
				actual: epoch.network,
			});
		}

		epochs.sort_by_key(|epoch| epoch.height_effective);
		if let Some(pair) = epochs.windows(2).find(|pair| pair[0].height_effective == pair[1].height_effective) {
			return Err(Error::DuplicateHeight(pair[0].height_effective));
		}

		Ok(ChainParams { network, epochs })
	}

	/// Built-in schedule of `network`.
	pub fn for_network(network: Network) -> Self {
		ChainParams {
			network,
			epochs: ConsensusParams::epochs(network),
		}
	}

	pub fn network(&self) -> Network {
		self.network
	}

	pub fn magic(&self) -> Magic {
		self.network.magic()
	}

	pub fn epochs(&self) -> &[ConsensusParams] {
		&self.epochs
	}

	/// Rule set in force at `height`: the epoch with the greatest effective height not above it.
	///
	/// Heights below every epoch resolve to the first one.
	pub fn consensus(&self, height: u32) -> &ConsensusParams {
		let position = self.epochs.partition_point(|epoch| epoch.height_effective <= height);
		&self.epochs[position.saturating_sub(1)]
	}

	/// Copy of the regtest schedule with different block timing in every epoch.
	pub fn with_pow_timing(&self, spacing: u32, timespan: u32, digishield: bool) -> Result<Self, Error> {
		match self.network {
			Network::Regtest => (),
			network => return Err(Error::TimingOverride(network)),
		}

		let epochs = self
			.epochs
			.iter()
			.map(|epoch| ConsensusParams {
				pow_target_spacing: spacing,
				pow_target_timespan: timespan,
				digishield_difficulty_calculation: digishield,
				..epoch.clone()
			})
			.collect();

		Ok(ChainParams {
			network: self.network,
			epochs,
		})
	}
}

impl From<Network> for ChainParams {
	fn from(network: Network) -> Self {
		ChainParams::for_network(network)
	}
}
