//! Networks the node can run on.

use crate::error::Error;
use bitcrypto::{FromStr, Hash, SHA256D};
use chain::{BlockHeader, BlockVersion};
use primitives::compact::Compact;
use std::fmt;

const MAGIC_MAINNET: u32 = 0xC0C0_C0C0;
const MAGIC_TESTNET: u32 = 0xDCB7_C1FC;
const MAGIC_REGTEST: u32 = 0xDAB5_BFFA;
const MAGIC_INU: u32 = 0xBE9E_C0D0;

/// Merkle root of the genesis blocks of the dogecoin networks, the hash of their single coinbase.
const GENESIS_MERKLE_ROOT: [u8; 32] = [
	0x69, 0x6a, 0xd2, 0x0e, 0x2d, 0xd4, 0x36, 0x5c,
	0x74, 0x59, 0xb4, 0xa4, 0xa5, 0xaf, 0x74, 0x3d,
	0x5e, 0x92, 0xc6, 0xda, 0x32, 0x29, 0xe6, 0x53,
	0x2c, 0xd6, 0x05, 0xf6, 0x53, 0x3f, 0x2a, 0x5b,
];

const INU_GENESIS_MERKLE_ROOT: [u8; 32] = [
	0x61, 0xb2, 0x79, 0x60, 0xa2, 0xc7, 0x3a, 0x41,
	0x90, 0x71, 0xbf, 0x0d, 0x25, 0xde, 0x2a, 0x89,
	0xe4, 0xad, 0x82, 0x49, 0x00, 0x82, 0x13, 0x66,
	0x8e, 0x1d, 0x19, 0x6a, 0x16, 0xe3, 0xe1, 0xcd,
];

/// Network magic type.
pub type Magic = u32;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Network {
	/// The original and main network for Dogecoin transactions, where value is exchanged.
	Mainnet,
	/// The main test network.
	Testnet,
	/// The private testing network which runs in-process.
	Regtest,
	/// Standalone chain merge mined from its genesis block.
	Inu,
}

impl Network {
	pub fn magic(&self) -> Magic {
		match *self {
			Network::Mainnet => MAGIC_MAINNET,
			Network::Testnet => MAGIC_TESTNET,
			Network::Regtest => MAGIC_REGTEST,
			Network::Inu => MAGIC_INU,
		}
	}

	pub fn name(&self) -> &'static str {
		match *self {
			Network::Mainnet => "main",
			Network::Testnet => "test",
			Network::Regtest => "regtest",
			Network::Inu => "inu",
		}
	}

	/// Header of the first block.
	///
	/// Dogecoin genesis blocks predate chain ids and carry version 1, inu starts with one.
	pub fn genesis_header(&self) -> BlockHeader {
		let (version, time, bits, nonce) = match *self {
			Network::Mainnet => (1, 1_386_325_540, 0x1e0f_fff0, 99943),
			Network::Testnet => (1, 1_391_503_289, 0x1e0f_fff0, 997_879),
			Network::Regtest => (1, 1_296_688_602, 0x207f_ffff, 2),
			Network::Inu => (0x0062_0004, 1_577_221_282, 0x2003_ffff, 0xbced_8c00),
		};
		let merkle_root = match *self {
			Network::Inu => INU_GENESIS_MERKLE_ROOT,
			_ => GENESIS_MERKLE_ROOT,
		};

		BlockHeader {
			version: BlockVersion::from(version),
			previous_header_hash: SHA256D::default(),
			merkle_root_hash: SHA256D::from_inner(merkle_root),
			time,
			bits: Compact::new(bits),
			nonce,
		}
	}
}

impl Default for Network {
	fn default() -> Self {
		Network::Mainnet
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Network {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"main" | "mainnet" => Ok(Network::Mainnet),
			"test" | "testnet" => Ok(Network::Testnet),
			"regtest" => Ok(Network::Regtest),
			"inu" => Ok(Network::Inu),
			_ => Err(Error::UnknownNetwork(s.to_owned())),
		}
	}
}
