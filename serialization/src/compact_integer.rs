use crate::reader::{Deserializable, Error, Reader};
use crate::stream::{Serializable, Stream};
use std::{fmt, io};

/// A type of variable-length integer commonly used in the Bitcoin P2P protocol and Bitcoin serialized data structures.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CompactInteger(u64);

impl fmt::Display for CompactInteger {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl From<CompactInteger> for usize {
	fn from(i: CompactInteger) -> Self {
		i.0 as usize
	}
}

impl From<CompactInteger> for u64 {
	fn from(i: CompactInteger) -> Self {
		i.0
	}
}

impl From<usize> for CompactInteger {
	fn from(i: usize) -> Self {
		CompactInteger(i as u64)
	}
}

impl From<u64> for CompactInteger {
	fn from(i: u64) -> Self {
		CompactInteger(i)
	}
}

impl Serializable for CompactInteger {
	fn serialize(&self, stream: &mut Stream) {
		match self.0 {
			0..=0xfc => {
				stream.append(&(self.0 as u8));
			}
			0xfd..=0xffff => {
				stream.append(&0xfdu8).append(&(self.0 as u16));
			}
			0x10000..=0xffff_ffff => {
				stream.append(&0xfeu8).append(&(self.0 as u32));
			}
			_ => {
				stream.append(&0xffu8).append(&self.0);
			}
		}
	}

	fn serialized_size(&self) -> usize {
		match self.0 {
			0..=0xfc => 1,
			0xfd..=0xffff => 3,
			0x10000..=0xffff_ffff => 5,
			_ => 9,
		}
	}
}

impl Deserializable for CompactInteger {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		// non-canonical encodings are rejected so that every value has exactly one wire form
		let result = match reader.read::<u8>()? {
			i @ 0..=0xfc => i.into(),
			0xfd => match reader.read::<u16>()? {
				i if i < 0xfd => return Err(Error::MalformedData),
				i => i.into(),
			},
			0xfe => match reader.read::<u32>()? {
				i if i <= 0xffff => return Err(Error::MalformedData),
				i => i.into(),
			},
			_ => match reader.read::<u64>()? {
				i if i <= 0xffff_ffff => return Err(Error::MalformedData),
				i => i,
			},
		};

		Ok(CompactInteger(result))
	}
}
