use crate::block_version::BlockVersion;
use bitcrypto::{dhash256, SHA256D};
use primitives::compact::Compact;
use ser::{serialize, Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{fmt, io};

/// The 80 byte header shared by this chain and the parent chain.
#[derive(PartialEq, Clone, Default)]
pub struct BlockHeader {
	pub version: BlockVersion,
	pub previous_header_hash: SHA256D,
	pub merkle_root_hash: SHA256D,
	pub time: u32,
	pub bits: Compact,
	pub nonce: u32,
}

impl BlockHeader {
	/// Double SHA256 of the serialized header. This is the block id, not the proof of work hash.
	pub fn hash(&self) -> SHA256D {
		block_header_hash(self)
	}
}

impl fmt::Debug for BlockHeader {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("BlockHeader")
			.field("version", &self.version)
			.field("previous_header_hash", &self.previous_header_hash)
			.field("merkle_root_hash", &self.merkle_root_hash)
			.field("time", &self.time)
			.field("bits", &self.bits)
			.field("nonce", &self.nonce)
			.finish()
	}
}

impl Serializable for BlockHeader {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.version)
			.append(&self.previous_header_hash)
			.append(&self.merkle_root_hash)
			.append(&self.time)
			.append(&self.bits)
			.append(&self.nonce);
	}

	fn serialized_size(&self) -> usize {
		80
	}
}

impl Deserializable for BlockHeader {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(BlockHeader {
			version: reader.read()?,
			previous_header_hash: reader.read()?,
			merkle_root_hash: reader.read()?,
			time: reader.read()?,
			bits: reader.read()?,
			nonce: reader.read()?,
		})
	}
}

pub(crate) fn block_header_hash(block_header: &BlockHeader) -> SHA256D {
	dhash256(&serialize(block_header))
}
