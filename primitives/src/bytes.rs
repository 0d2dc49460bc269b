//! Wrapper around `Vec<u8>`

use crate::hex::{FromHex, FromHexError, ToHex};
use std::{fmt, io, ops, str};

#[derive(Default, PartialEq, Clone, Eq, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
	pub fn new() -> Self {
		Bytes::default()
	}

	pub fn take(self) -> Vec<u8> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Offset of the first occurrence of `needle`, scanning raw bytes.
	pub fn find(&self, needle: &[u8]) -> Option<usize> {
		self.find_from(0, needle)
	}

	/// Offset of the first occurrence of `needle` at or after `start`.
	pub fn find_from(&self, start: usize, needle: &[u8]) -> Option<usize> {
		if needle.is_empty() || start > self.0.len() {
			return None;
		}
		self.0[start..].windows(needle.len()).position(|window| window == needle).map(|pos| pos + start)
	}
}

impl<'a> From<&'a [u8]> for Bytes {
	fn from(v: &[u8]) -> Self {
		Bytes(v.into())
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(v: Vec<u8>) -> Self {
		Bytes(v)
	}
}

impl From<Bytes> for Vec<u8> {
	fn from(bytes: Bytes) -> Self {
		bytes.0
	}
}

impl From<&'static str> for Bytes {
	fn from(s: &'static str) -> Self {
		s.parse().unwrap()
	}
}

impl str::FromStr for Bytes {
	type Err = FromHexError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.from_hex().map(Bytes)
	}
}

impl io::Write for Bytes {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.write(buf)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.0.flush()
	}
}

impl fmt::Debug for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

impl fmt::Display for Bytes {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_hex::<String>())
	}
}

impl ops::Deref for Bytes {
	type Target = Vec<u8>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl ops::DerefMut for Bytes {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl AsMut<[u8]> for Bytes {
	fn as_mut(&mut self) -> &mut [u8] {
		&mut self.0
	}
}

#[cfg(test)]
mod tests {
	use super::Bytes;

	#[test]
	fn test_bytes_from_hex() {
		let bytes: Bytes = "0145".into();
		assert_eq!(bytes, vec![0x01, 0x45].into());
	}

	#[test]
	fn test_bytes_debug_formatter() {
		let bytes: Bytes = "0145".into();
		assert_eq!(format!("{:?}", bytes), "0145".to_owned());
	}

	#[test]
	fn test_bytes_find() {
		let bytes: Bytes = "00fabe6d6d01fabe6d6d".into();
		assert_eq!(bytes.find(&[0xfa, 0xbe, 0x6d, 0x6d]), Some(1));
		assert_eq!(bytes.find_from(2, &[0xfa, 0xbe, 0x6d, 0x6d]), Some(6));
		assert_eq!(bytes.find_from(7, &[0xfa, 0xbe, 0x6d, 0x6d]), None);
		assert_eq!(bytes.find(&[0x02]), None);
	}

	#[test]
	fn test_bytes_find_past_end() {
		let bytes: Bytes = "0001".into();
		assert_eq!(bytes.find_from(3, &[0x01]), None);
		assert_eq!(bytes.find(&[0x00, 0x01, 0x02]), None);
	}
}
