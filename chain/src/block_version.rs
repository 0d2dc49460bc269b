use ser::{Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{fmt, io};

/// Flag bit marking a block that carries an auxiliary proof of work.
pub const VERSION_AUXPOW: i32 = 1 << 8;

/// Multiplier of the chain id embedded in the upper half of the version.
pub const VERSION_CHAIN_START: i32 = 1 << 16;

/// Block version field of a merge-mining aware chain.
///
/// The low byte is the base version, bit 8 flags an attached auxpow and the
/// upper 16 bits carry the chain id of the chain the block belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BlockVersion(i32);

impl BlockVersion {
	/// Version with the given base version and chain id and the auxpow flag cleared.
	///
	/// Returns `None` if `base_version` would spill into the auxpow flag.
	pub fn new(base_version: i32, chain_id: i32) -> Option<Self> {
		if base_version < 1 || base_version >= VERSION_AUXPOW {
			return None;
		}
		Some(BlockVersion(base_version | chain_id.wrapping_mul(VERSION_CHAIN_START)))
	}

	pub fn base_version(self) -> i32 {
		self.0 % VERSION_AUXPOW
	}

	pub fn chain_id(self) -> i32 {
		self.0 >> 16
	}

	pub fn set_chain_id(&mut self, chain_id: i32) {
		self.0 %= VERSION_CHAIN_START;
		self.0 |= chain_id.wrapping_mul(VERSION_CHAIN_START);
	}

	pub fn is_auxpow(self) -> bool {
		self.0 & VERSION_AUXPOW != 0
	}

	pub fn set_auxpow(&mut self, auxpow: bool) {
		if auxpow {
			self.0 |= VERSION_AUXPOW;
		} else {
			self.0 &= !VERSION_AUXPOW;
		}
	}

	/// Blocks mined before chain ids existed: plain version 1, and version 2 without chain id.
	pub fn is_legacy(self) -> bool {
		self.0 == 1 || (self.0 == 2 && self.chain_id() == 0)
	}
}

impl From<i32> for BlockVersion {
	fn from(version: i32) -> Self {
		BlockVersion(version)
	}
}

impl From<BlockVersion> for i32 {
	fn from(version: BlockVersion) -> Self {
		version.0
	}
}

impl fmt::Debug for BlockVersion {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:08x}", self.0)
	}
}

impl Serializable for BlockVersion {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.0);
	}

	fn serialized_size(&self) -> usize {
		4
	}
}

impl Deserializable for BlockVersion {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		reader.read::<i32>().map(BlockVersion)
	}
}

#[cfg(test)]
mod tests {
	use super::{BlockVersion, VERSION_AUXPOW};

	#[test]
	fn test_version_parts() {
		let mut version = BlockVersion::new(2, 0x62).unwrap();
		assert_eq!(i32::from(version), 0x0062_0002);
		assert_eq!(version.base_version(), 2);
		assert_eq!(version.chain_id(), 0x62);
		assert!(!version.is_auxpow());
		assert!(!version.is_legacy());

		version.set_auxpow(true);
		assert_eq!(i32::from(version), 0x0062_0102);
		assert!(version.is_auxpow());
		assert_eq!(version.base_version(), 2);
		assert_eq!(version.chain_id(), 0x62);

		version.set_auxpow(false);
		assert_eq!(i32::from(version), 0x0062_0002);
	}

	#[test]
	fn test_version_rejects_base_in_flag_bits() {
		assert_eq!(BlockVersion::new(0, 1), None);
		assert_eq!(BlockVersion::new(VERSION_AUXPOW, 1), None);
		assert!(BlockVersion::new(VERSION_AUXPOW - 1, 1).is_some());
	}

	#[test]
	fn test_set_chain_id_keeps_low_bits() {
		let mut version = BlockVersion::from(0x0001_0103);
		version.set_chain_id(0x62);
		assert_eq!(i32::from(version), 0x0062_0103);
		assert!(version.is_auxpow());
	}

	#[test]
	fn test_legacy_versions() {
		assert!(BlockVersion::from(1).is_legacy());
		assert!(BlockVersion::from(2).is_legacy());
		assert!(!BlockVersion::from(3).is_legacy());
		assert!(!BlockVersion::from(0x0062_0001).is_legacy());
		assert!(!BlockVersion::from(0x0000_0102).is_legacy());
	}
}
