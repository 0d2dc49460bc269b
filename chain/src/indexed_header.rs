use crate::auxpow::AuxPow;
use crate::block_header::{block_header_hash, BlockHeader};
use bitcrypto::{Hash, HashEngine, SHA256D};
use ser::{Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{cmp, fmt, io};

/// Block header of this chain with its hash and the auxpow that may follow it on the wire.
#[derive(Clone)]
pub struct IndexedBlockHeader {
	pub hash: SHA256D,
	pub raw: BlockHeader,
	pub auxpow: Option<AuxPow>,
}

impl fmt::Debug for IndexedBlockHeader {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("IndexedBlockHeader")
			.field("hash", &self.hash)
			.field("raw", &self.raw)
			.field("auxpow", &self.auxpow)
			.finish()
	}
}

impl From<BlockHeader> for IndexedBlockHeader {
	fn from(header: BlockHeader) -> Self {
		Self::from_raw(header)
	}
}

impl IndexedBlockHeader {
	pub fn new(hash: SHA256D, header: BlockHeader) -> Self {
		IndexedBlockHeader {
			hash,
			raw: header,
			auxpow: None,
		}
	}

	/// Explicit conversion of the raw BlockHeader into IndexedBlockHeader.
	///
	/// Hashes the contents of block header.
	pub fn from_raw(header: BlockHeader) -> Self {
		IndexedBlockHeader::new(block_header_hash(&header), header)
	}

	/// Attaches or removes the auxpow, keeping the version flag and the hash in sync.
	pub fn set_auxpow(&mut self, auxpow: Option<AuxPow>) {
		self.raw.version.set_auxpow(auxpow.is_some());
		self.hash = block_header_hash(&self.raw);
		self.auxpow = auxpow;
	}

	/// Flags the header as merge mined and attaches an unsolved auxpow committing to it.
	///
	/// Mining then only has to solve the parent header.
	pub fn init_auxpow(&mut self) {
		self.raw.version.set_auxpow(true);
		self.hash = block_header_hash(&self.raw);
		self.auxpow = Some(AuxPow::template(&self.hash));
	}
}

impl cmp::PartialEq for IndexedBlockHeader {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash && self.auxpow == other.auxpow
	}
}

impl Serializable for IndexedBlockHeader {
	fn serialize(&self, stream: &mut Stream) {
		debug_assert_eq!(
			self.raw.version.is_auxpow(),
			self.auxpow.is_some(),
			"auxpow flag and attached auxpow disagree in header {}",
			self.hash
		);
		stream.append(&self.raw);
		if self.raw.version.is_auxpow() {
			if let Some(ref auxpow) = self.auxpow {
				stream.append(auxpow);
			}
		}
	}
}

impl Deserializable for IndexedBlockHeader {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		let mut engine = SHA256D::engine();
		let raw: BlockHeader = reader.read_with_proxy(|bytes| engine.input(bytes))?;
		let auxpow = if raw.version.is_auxpow() {
			Some(reader.read()?)
		} else {
			None
		};

		Ok(IndexedBlockHeader {
			hash: SHA256D::from_engine(engine),
			raw,
			auxpow,
		})
	}
}
