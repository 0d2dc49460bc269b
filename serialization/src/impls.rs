use crate::compact_integer::CompactInteger;
use crate::reader::{Deserializable, Error, Reader};
use crate::stream::{Serializable, Stream};
use bitcrypto::{Hash, SHA256D};
use byteorder::{LittleEndian, ReadBytesExt};
use primitives::bytes::Bytes;
use primitives::compact::Compact;
use std::io;

macro_rules! impl_ser_for_le_int {
	($ty: ty, $size: expr, $read: ident) => {
		impl Serializable for $ty {
			#[inline]
			fn serialize(&self, stream: &mut Stream) {
				stream.append_slice(&self.to_le_bytes());
			}

			#[inline]
			fn serialized_size(&self) -> usize {
				$size
			}
		}

		impl Deserializable for $ty {
			#[inline]
			fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
			where
				T: io::Read,
			{
				Ok(reader.$read::<LittleEndian>()?)
			}
		}
	};
}

impl_ser_for_le_int!(u16, 2, read_u16);
impl_ser_for_le_int!(u32, 4, read_u32);
impl_ser_for_le_int!(i32, 4, read_i32);
impl_ser_for_le_int!(u64, 8, read_u64);
impl_ser_for_le_int!(i64, 8, read_i64);

impl Serializable for u8 {
	#[inline]
	fn serialize(&self, stream: &mut Stream) {
		stream.append_slice(&[*self]);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		1
	}
}

impl Deserializable for u8 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_u8()?)
	}
}

impl Serializable for SHA256D {
	fn serialize(&self, stream: &mut Stream) {
		stream.append_slice(&self[..]);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		32
	}
}

impl Deserializable for SHA256D {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let mut s = [0u8; 32];
		reader.read_slice(&mut s)?;
		Ok(SHA256D::from_inner(s))
	}
}

impl Serializable for Compact {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&u32::from(*self));
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		4
	}
}

impl Deserializable for Compact {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		reader.read::<u32>().map(Compact::new)
	}
}

impl Serializable for Bytes {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&CompactInteger::from(self.len())).append_slice(self);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		CompactInteger::from(self.len()).serialized_size() + self.len()
	}
}

impl Deserializable for Bytes {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let len: usize = reader.read::<CompactInteger>()?.into();
		if len > crate::reader::MAX_LIST_SIZE {
			return Err(Error::MalformedData);
		}
		reader.read_bytes(len).map(Bytes::from)
	}
}
