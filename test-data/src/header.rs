use crate::{AuxPowBuilder, CHAIN_ID};
use bitcrypto::{dhash256, SHA256D};
use chain::{BlockHeader, BlockVersion, IndexedBlockHeader};
use primitives::compact::Compact;

/// Builds headers of the aux chain, optionally merge mined.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
	version: BlockVersion,
	parent: SHA256D,
	time: u32,
	bits: Compact,
	nonce: u32,
	auxpow_flag: bool,
	auxpow: Option<AuxPowBuilder>,
}

impl Default for HeaderBuilder {
	fn default() -> Self {
		HeaderBuilder {
			version: BlockVersion::new(4, CHAIN_ID).unwrap_or_default(),
			parent: dhash256(b"previous block"),
			time: 1_600_000_000,
			bits: Compact::new(0x1b01_0000),
			nonce: 0,
			auxpow_flag: false,
			auxpow: None,
		}
	}
}

impl HeaderBuilder {
	pub fn version(mut self, version: BlockVersion) -> Self {
		self.version = version;
		self
	}

	pub fn parent(mut self, parent: SHA256D) -> Self {
		self.parent = parent;
		self
	}

	pub fn time(mut self, time: u32) -> Self {
		self.time = time;
		self
	}

	pub fn bits(mut self, bits: Compact) -> Self {
		self.bits = bits;
		self
	}

	pub fn nonce(mut self, nonce: u32) -> Self {
		self.nonce = nonce;
		self
	}

	/// Sets the auxpow version flag without attaching an auxpow.
	pub fn auxpow_flag(mut self) -> Self {
		self.auxpow_flag = true;
		self
	}

	/// Attaches an auxpow built for the final header hash and chain id.
	pub fn merge_mined(mut self, builder: AuxPowBuilder) -> Self {
		self.auxpow_flag = true;
		self.auxpow = Some(builder);
		self
	}

	pub fn build(self) -> IndexedBlockHeader {
		let mut version = self.version;
		version.set_auxpow(self.auxpow_flag);
		let raw = BlockHeader {
			version,
			previous_header_hash: self.parent,
			merkle_root_hash: dhash256(b"transactions"),
			time: self.time,
			bits: self.bits,
			nonce: self.nonce,
		};

		let mut header = IndexedBlockHeader::from_raw(raw);
		let hash = header.hash;
		header.auxpow = self.auxpow.map(|builder| builder.aux_hash(hash).chain_id(version.chain_id()).build());
		header
	}
}
