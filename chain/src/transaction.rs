//! Bitcoin transaction.
//! https://en.bitcoin.it/wiki/Protocol_documentation#tx

use crate::constants::SEQUENCE_FINAL;
use bitcrypto::{dhash256, SHA256D};
use primitives::bytes::Bytes;
use ser::{serialize, Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{fmt, io};

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct OutPoint {
	pub hash: SHA256D,
	pub index: u32,
}

impl OutPoint {
	pub fn null() -> Self {
		OutPoint {
			hash: SHA256D::default(),
			index: u32::max_value(),
		}
	}

	pub fn is_null(&self) -> bool {
		self.hash == SHA256D::default() && self.index == u32::max_value()
	}
}

#[derive(Debug, PartialEq, Default, Clone)]
pub struct TransactionInput {
	pub previous_output: OutPoint,
	pub script_sig: Bytes,
	pub sequence: u32,
}

impl TransactionInput {
	pub fn coinbase(script_sig: Bytes) -> Self {
		TransactionInput {
			previous_output: OutPoint::null(),
			script_sig,
			sequence: SEQUENCE_FINAL,
		}
	}
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct TransactionOutput {
	pub value: u64,
	pub script_pubkey: Bytes,
}

#[derive(PartialEq, Default, Clone)]
pub struct Transaction {
	pub version: i32,
	pub inputs: Vec<TransactionInput>,
	pub outputs: Vec<TransactionOutput>,
	pub lock_time: u32,
}

impl fmt::Debug for Transaction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Transaction")
			.field("hash", &self.hash())
			.field("version", &self.version)
			.field("inputs", &self.inputs)
			.field("outputs", &self.outputs)
			.field("lock_time", &self.lock_time)
			.finish()
	}
}

impl Transaction {
	pub fn hash(&self) -> SHA256D {
		dhash256(&serialize(self))
	}

	pub fn is_coinbase(&self) -> bool {
		self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
	}
}

impl Serializable for OutPoint {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.hash).append(&self.index);
	}

	fn serialized_size(&self) -> usize {
		36
	}
}

impl Deserializable for OutPoint {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(OutPoint {
			hash: reader.read()?,
			index: reader.read()?,
		})
	}
}

impl Serializable for TransactionInput {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.previous_output).append(&self.script_sig).append(&self.sequence);
	}

	fn serialized_size(&self) -> usize {
		self.previous_output.serialized_size() + self.script_sig.serialized_size() + 4
	}
}

impl Deserializable for TransactionInput {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(TransactionInput {
			previous_output: reader.read()?,
			script_sig: reader.read()?,
			sequence: reader.read()?,
		})
	}
}

impl Serializable for TransactionOutput {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.value).append(&self.script_pubkey);
	}

	fn serialized_size(&self) -> usize {
		8 + self.script_pubkey.serialized_size()
	}
}

impl Deserializable for TransactionOutput {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(TransactionOutput {
			value: reader.read()?,
			script_pubkey: reader.read()?,
		})
	}
}

// Transactions embedded in an auxpow are always in the pre-segwit encoding.
impl Serializable for Transaction {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.version)
			.append_list(&self.inputs)
			.append_list(&self.outputs)
			.append(&self.lock_time);
	}
}

impl Deserializable for Transaction {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(Transaction {
			version: reader.read()?,
			inputs: reader.read_list()?,
			outputs: reader.read_list()?,
			lock_time: reader.read()?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{OutPoint, Transaction, TransactionInput};
	use bitcrypto::{FromStr, SHA256D};
	use primitives::bytes::Bytes;
	use ser::{deserialize, serialize, Error as ReaderError};

	// coinbase of the dogecoin mainnet genesis block
	const GENESIS_COINBASE: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff10\
		04ffff001d0104084e696e746f6e646fffffffff010058850c020000004341040184710fa689ad5023690c80f3a49c8f13f8d45b8c857fbcb\
		c8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf21b179c45070ac7b03a9ac00000000";

	#[test]
	fn test_genesis_coinbase_hash() {
		let bytes: Bytes = GENESIS_COINBASE.into();
		let tx: Transaction = deserialize(&bytes[..]).unwrap();
		assert!(tx.is_coinbase());
		assert_eq!(tx.outputs[0].value, 88 * 100_000_000);
		assert_eq!(
			tx.hash(),
			SHA256D::from_str("5b2a3f53f605d62c53e62932dac6925e3d74afa5a4b459745c36d42d0ed26a69").unwrap()
		);
		assert_eq!(serialize(&tx), bytes);
	}

	#[test]
	fn test_coinbase_input() {
		let input = TransactionInput::coinbase("0101".into());
		assert!(input.previous_output.is_null());
		assert_eq!(input.sequence, 0xffff_ffff);
		assert!(!OutPoint::default().is_null());
	}

	#[test]
	fn test_transaction_without_inputs_is_not_coinbase() {
		let tx = Transaction::default();
		assert!(!tx.is_coinbase());
		assert_eq!(serialize(&tx), "00000000000000000000".into());
	}

	#[test]
	fn test_truncated_transaction() {
		let bytes: Bytes = GENESIS_COINBASE.into();
		assert_eq!(
			deserialize::<_, Transaction>(&bytes[..bytes.len() - 1]),
			Err(ReaderError::UnexpectedEnd)
		);
	}
}
