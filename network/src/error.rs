use crate::Network;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
	/// Network name not recognised.
	UnknownNetwork(String),
	/// A rule schedule needs at least one epoch.
	NoEpochs,
	/// Two epochs start at the same height.
	DuplicateHeight(u32),
	/// Epoch built for another network.
	NetworkMismatch { expected: Network, actual: Network },
	/// Timing overrides are only allowed on the test networks.
	TimingOverride(Network),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::UnknownNetwork(name) => write!(f, "Unknown network: {}", name),
			Error::NoEpochs => write!(f, "Consensus schedule has no epochs"),
			Error::DuplicateHeight(height) => write!(f, "Two consensus epochs start at height {}", height),
			Error::NetworkMismatch { expected, actual } => {
				write!(f, "Consensus epoch for {} in a {} schedule", actual, expected)
			}
			Error::TimingOverride(network) => write!(f, "Cannot override pow timing on {}", network),
		}
	}
}

impl std::error::Error for Error {}
