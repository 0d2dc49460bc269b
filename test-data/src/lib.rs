//! Builders for headers and auxpows used in tests and benches.

extern crate bitcrypto;
extern crate chain;
extern crate primitives;
extern crate serialization as ser;

mod auxpow;
mod header;
mod header_chain;

pub use auxpow::AuxPowBuilder;
pub use header::HeaderBuilder;
pub use header_chain::HeaderChain;

use chain::BlockHeader;

/// Chain id used by the builders unless told otherwise.
pub const CHAIN_ID: i32 = 0x62;

/// Mainnet genesis header.
pub fn genesis() -> BlockHeader {
	let raw = "010000000000000000000000000000000000000000000000000000000000000000000000696ad20e2dd4365c7459b4a4a5af743d5e92c6da3229e6532cd605f6533f2a5b24a6a152f0ff0f1e67860100";
	ser::deserialize(&ser::bytes::Bytes::from(raw)[..]).expect("genesis header is valid")
}

pub fn auxpow_builder() -> AuxPowBuilder {
	AuxPowBuilder::default()
}

pub fn header_builder() -> HeaderBuilder {
	HeaderBuilder::default()
}
