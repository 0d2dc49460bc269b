use primitives::compact::Compact;
use std::fmt;

/// How bad a rejected auxpow is.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorClass {
	/// Malformed in a way honest software can produce.
	Structural,
	/// Looks crafted to reuse work or to forge a commitment.
	Misbehaving,
}

/// Reasons an auxpow does not prove work for an aux block.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AuxPowError {
	/// Coinbase is not the first transaction of the parent block.
	NotAGenerate,
	/// Parent block carries the aux chain id.
	ParentHasOurChainId,
	/// Chain merkle branch longer than 30 hashes.
	ChainBranchTooLong,
	/// Coinbase branch does not lead to the parent merkle root.
	MerkleRootMismatch,
	/// Coinbase has no input to carry the commitment.
	MissingCoinbaseInput,
	/// Chain merkle root not found in the coinbase script.
	MissingChainMerkleRoot,
	MultipleMergedMiningHeaders,
	/// Merged mining header not directly followed by the chain merkle root.
	MergedMiningHeaderNotAdjacent,
	/// Without merged mining header the chain merkle root must start within 20 bytes.
	ChainMerkleRootTooDeep,
	/// Tree size and nonce do not fit after the chain merkle root.
	MissingSizeAndNonce,
	/// Committed tree size differs from the chain branch length.
	SizeMismatch,
	/// Aux block not in the slot picked by the committed nonce.
	WrongIndex,
}

impl AuxPowError {
	pub fn class(&self) -> ErrorClass {
		match *self {
			AuxPowError::NotAGenerate
			| AuxPowError::ChainBranchTooLong
			| AuxPowError::MissingCoinbaseInput
			| AuxPowError::MissingSizeAndNonce => ErrorClass::Structural,
			AuxPowError::ParentHasOurChainId
			| AuxPowError::MerkleRootMismatch
			| AuxPowError::MissingChainMerkleRoot
			| AuxPowError::MultipleMergedMiningHeaders
			| AuxPowError::MergedMiningHeaderNotAdjacent
			| AuxPowError::ChainMerkleRootTooDeep
			| AuxPowError::SizeMismatch
			| AuxPowError::WrongIndex => ErrorClass::Misbehaving,
		}
	}
}

impl fmt::Display for AuxPowError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let msg = match *self {
			AuxPowError::NotAGenerate => "auxpow is not a generate",
			AuxPowError::ParentHasOurChainId => "auxpow parent has our chain id",
			AuxPowError::ChainBranchTooLong => "auxpow chain merkle branch too long",
			AuxPowError::MerkleRootMismatch => "auxpow merkle root incorrect",
			AuxPowError::MissingCoinbaseInput => "auxpow coinbase has no inputs",
			AuxPowError::MissingChainMerkleRoot => "auxpow missing chain merkle root in parent coinbase",
			AuxPowError::MultipleMergedMiningHeaders => "multiple merged mining headers in coinbase",
			AuxPowError::MergedMiningHeaderNotAdjacent => "merged mining header is not just before chain merkle root",
			AuxPowError::ChainMerkleRootTooDeep => {
				"auxpow chain merkle root must start in the first 20 bytes of the parent coinbase"
			}
			AuxPowError::MissingSizeAndNonce => "auxpow missing chain merkle tree size and nonce in parent coinbase",
			AuxPowError::SizeMismatch => "auxpow merkle branch size does not match parent coinbase",
			AuxPowError::WrongIndex => "auxpow wrong index",
		};
		f.write_str(msg)
	}
}

impl std::error::Error for AuxPowError {}

#[derive(Debug, PartialEq, Clone)]
/// All possible verification errors of a block header
pub enum Error {
	/// Legacy block version after legacy blocks were retired.
	LateLegacyBlock,
	/// Auxpow block before merge mining started.
	EarlyAuxPowBlock,
	/// Block version carries a foreign chain id.
	WrongChainId { expected: i32, actual: i32 },
	/// Compact target is negative, zero, overflows or exceeds the pow limit.
	InvalidBits,
	/// Version flags an auxpow that is not attached.
	MissingAuxPow,
	/// Auxpow attached to a version without the flag.
	UnexpectedAuxPow,
	/// Invalid auxpow.
	AuxPow(AuxPowError),
	/// Header does not extend the tip of the given ancestors.
	UnknownParent,
	/// Ancestor needed for the difficulty at this height is missing.
	MissingAncestor(u32),
	/// Bits differ from the required difficulty beyond the low four bits.
	Difficulty { expected: Compact, actual: Compact },
}

impl From<AuxPowError> for Error {
	fn from(err: AuxPowError) -> Self {
		Error::AuxPow(err)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::LateLegacyBlock => write!(f, "Legacy blocks are not allowed"),
			Error::EarlyAuxPowBlock => write!(f, "Auxpow blocks are not allowed yet"),
			Error::WrongChainId { expected, actual } => {
				write!(f, "Block does not have our chain id (got {}, expected {})", actual, expected)
			}
			Error::InvalidBits => write!(f, "Invalid target bits"),
			Error::MissingAuxPow => write!(f, "No auxpow on a block with auxpow in version"),
			Error::UnexpectedAuxPow => write!(f, "Auxpow on a block with non-auxpow version"),
			Error::AuxPow(err) => write!(f, "Invalid auxpow: {}", err),
			Error::UnknownParent => write!(f, "Block does not extend the known chain"),
			Error::MissingAncestor(height) => write!(f, "Missing ancestor at height {}", height),
			Error::Difficulty { expected, actual } => write!(
				f,
				"Proof of work bits are too inexact: {:#010x} != {:#010x}",
				u32::from(*actual),
				u32::from(*expected)
			),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::AuxPow(err) => Some(err),
			_ => None,
		}
	}
}
