extern crate bitcrypto;
extern crate chain;
extern crate primitives;

mod chain_params;
mod consensus;
mod error;
mod network;

pub use primitives::{compact, U256};

pub use chain_params::ChainParams;
pub use consensus::{ConsensusParams, AUXPOW_CHAIN_ID};
pub use error::Error;
pub use network::{Magic, Network};
