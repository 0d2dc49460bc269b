use crate::error::Error;
use crate::verify_auxpow::AuxPowVerifier;
use crate::work::work_required;
use chain::{BlockHeaderProvider, IndexedBlockHeader};
use network::{ChainParams, ConsensusParams};

/// Contextual checks of a header whose height is known.
pub struct HeaderAcceptor<'a> {
	pub version: HeaderVersion<'a>,
	pub chain_id: HeaderChainId<'a>,
	pub bits: HeaderBits<'a>,
	pub auxpow: HeaderAuxPow<'a>,
	pub work: Option<HeaderWork<'a>>,
}

impl<'a> HeaderAcceptor<'a> {
	pub fn new(header: &'a IndexedBlockHeader, chain_params: &'a ChainParams, height: u32) -> Self {
		trace!(target: "verification", "Header verification {} at {}", header.hash, height);
		let consensus = chain_params.consensus(height);
		HeaderAcceptor {
			version: HeaderVersion::new(header, consensus),
			chain_id: HeaderChainId::new(header, consensus),
			bits: HeaderBits::new(header, consensus),
			auxpow: HeaderAuxPow::new(header, consensus),
			work: None,
		}
	}

	/// Also requires the bits the difficulty rules derive from the ancestors in `store`.
	pub fn with_ancestors(
		header: &'a IndexedBlockHeader,
		chain_params: &'a ChainParams,
		height: u32,
		store: &'a dyn BlockHeaderProvider,
	) -> Self {
		let mut acceptor = HeaderAcceptor::new(header, chain_params, height);
		acceptor.work = Some(HeaderWork::new(header, store, height, chain_params.consensus(height)));
		acceptor
	}

	pub fn check(&self) -> Result<(), Error> {
		self.version.check()?;
		self.chain_id.check()?;
		self.bits.check()?;
		self.auxpow.check()?;
		if let Some(ref work) = self.work {
			work.check()?;
		}
		Ok(())
	}
}

/// Legacy versions before merge mining, auxpow after.
pub struct HeaderVersion<'a> {
	header: &'a IndexedBlockHeader,
	consensus: &'a ConsensusParams,
}

impl<'a> HeaderVersion<'a> {
	fn new(header: &'a IndexedBlockHeader, consensus: &'a ConsensusParams) -> Self {
		HeaderVersion { header, consensus }
	}

	fn check(&self) -> Result<(), Error> {
		let version = self.header.raw.version;
		if version.is_legacy() && !self.consensus.allow_legacy_blocks {
			return Err(Error::LateLegacyBlock);
		}

		if self.consensus.allow_legacy_blocks && version.is_auxpow() {
			return Err(Error::EarlyAuxPowBlock);
		}

		Ok(())
	}
}

pub struct HeaderChainId<'a> {
	header: &'a IndexedBlockHeader,
	consensus: &'a ConsensusParams,
}

impl<'a> HeaderChainId<'a> {
	fn new(header: &'a IndexedBlockHeader, consensus: &'a ConsensusParams) -> Self {
		HeaderChainId { header, consensus }
	}

	fn check(&self) -> Result<(), Error> {
		let version = self.header.raw.version;
		if !version.is_legacy() && self.consensus.strict_chain_id && version.chain_id() != self.consensus.auxpow_chain_id {
			return Err(Error::WrongChainId {
				expected: self.consensus.auxpow_chain_id,
				actual: version.chain_id(),
			});
		}

		Ok(())
	}
}

/// Target range only, the hash function of the proof of work is not evaluated.
pub struct HeaderBits<'a> {
	header: &'a IndexedBlockHeader,
	consensus: &'a ConsensusParams,
}

impl<'a> HeaderBits<'a> {
	fn new(header: &'a IndexedBlockHeader, consensus: &'a ConsensusParams) -> Self {
		HeaderBits { header, consensus }
	}

	fn check(&self) -> Result<(), Error> {
		match self.header.raw.bits.to_u256() {
			Some(target) if !target.is_zero() && target <= self.consensus.pow_limit => Ok(()),
			_ => Err(Error::InvalidBits),
		}
	}
}

pub struct HeaderAuxPow<'a> {
	header: &'a IndexedBlockHeader,
	consensus: &'a ConsensusParams,
}

impl<'a> HeaderAuxPow<'a> {
	fn new(header: &'a IndexedBlockHeader, consensus: &'a ConsensusParams) -> Self {
		HeaderAuxPow { header, consensus }
	}

	fn check(&self) -> Result<(), Error> {
		let version = self.header.raw.version;
		match self.header.auxpow {
			None if version.is_auxpow() => Err(Error::MissingAuxPow),
			None => Ok(()),
			Some(_) if !version.is_auxpow() => Err(Error::UnexpectedAuxPow),
			Some(ref auxpow) => {
				AuxPowVerifier::new(auxpow, &self.header.hash, version.chain_id(), self.consensus).check()?;
				Ok(())
			}
		}
	}
}

/// Bits must match the required difficulty up to their low four bits.
pub struct HeaderWork<'a> {
	header: &'a IndexedBlockHeader,
	store: &'a dyn BlockHeaderProvider,
	height: u32,
	consensus: &'a ConsensusParams,
}

impl<'a> HeaderWork<'a> {
	fn new(
		header: &'a IndexedBlockHeader,
		store: &'a dyn BlockHeaderProvider,
		height: u32,
		consensus: &'a ConsensusParams,
	) -> Self {
		HeaderWork {
			header,
			store,
			height,
			consensus,
		}
	}

	fn check(&self) -> Result<(), Error> {
		if let Some(parent_height) = self.height.checked_sub(1) {
			let parent = self.store.block_header(parent_height).ok_or(Error::MissingAncestor(parent_height))?;
			if parent.hash() != self.header.raw.previous_header_hash {
				return Err(Error::UnknownParent);
			}
		}

		let required = work_required(self.header.raw.time, self.height, self.store, self.consensus)?;
		let actual = self.header.raw.bits;
		if actual != required {
			if u32::from(actual) >> 4 != u32::from(required) >> 4 {
				return Err(Error::Difficulty {
					expected: required,
					actual,
				});
			}
			debug!(
				target: "verification",
				"Inexact proof of work bits {:#010x} != {:#010x} for {}",
				u32::from(actual),
				u32::from(required),
				self.header.hash
			);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::HeaderAcceptor;
	use crate::{AuxPowError, Error};
	use bitcrypto::{FromStr, SHA256D};
	use chain::{AuxPow, BlockVersion, IndexedBlockHeader};
	use network::{ChainParams, Network};
	use primitives::bytes::Bytes;
	use primitives::compact::Compact;
	use ser::{deserialize, serialize};
	use test_data::{auxpow_builder, header_builder, HeaderChain, CHAIN_ID};

	// merge mined header at a mainnet auxpow height, with a two level chain tree
	const MERGE_MINED_HEADER: &str = concat!(
		// header, version 0x00620104
		"040162002b7a2b95bdacf7fa588463886a7b31961288a398ba8153c171b7b2108ce4a07d12b8ba1e66062cdebb1608be",
		"f4746922bc449aa6940ad02ce72e4448f890119a40bdb254eb7e261b00000000",
		// parent coinbase
		"01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff380389ab06fabe",
		"6d6d394fe0ae8238342a190b2bf5973fe1b03ca99f1e32f62e181558bee5db9654c2040000002a0000002f6d65726765",
		"642fffffffff0100f90295000000001976a914000102030405060708090a0b0c0d0e0f1011121388ac00000000",
		// parent block hash
		"a8ca2254b2f0c08cd64dcd24ad36029001fbc5f19f9959f98f13d3ebe02d8ace",
		// coinbase branch
		"011750f1282cd504e31dcf82468dfe9270477197a1c3c0b1bc13d96c711c3ae51c00000000",
		// chain branch
		"027893a512722cfb70dd28dffc179b9ef9146b480551cd76505306fb7059ccce9540018e39ae074d6bc9db9bef682ace",
		"251994148a8c1e5aa5b17d7f10be73135f02000000",
		// parent header
		"020000006a21c630eb161fc6bb8e3f0976868cccc5d923f530526d0ebce85132e132586ef751d8abef01ecbcd0c41b0e",
		"46484959f01855a179e64e58cb23f68201b260daa4bdb2541111011b07000000",
	);

	// regtest: legacy blocks until 20, auxpow from 20
	const PRE_AUXPOW: u32 = 15;
	const AUXPOW: u32 = 25;

	fn accept(header: &IndexedBlockHeader, height: u32) -> Result<(), Error> {
		let params = ChainParams::for_network(Network::Regtest);
		HeaderAcceptor::new(header, &params, height).check()
	}

	fn legacy_version() -> BlockVersion {
		BlockVersion::from(1)
	}

	#[test]
	fn test_legacy_header_before_auxpow() {
		let header = header_builder().version(legacy_version()).build();
		assert_eq!(accept(&header, PRE_AUXPOW), Ok(()));
		assert_eq!(accept(&header, AUXPOW), Err(Error::LateLegacyBlock));

		// version 2 without chain id is legacy too
		let header = header_builder().version(BlockVersion::from(2)).build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::LateLegacyBlock));
	}

	#[test]
	fn test_auxpow_header_before_merge_mining() {
		let header = header_builder().merge_mined(auxpow_builder()).build();
		assert_eq!(accept(&header, PRE_AUXPOW), Err(Error::EarlyAuxPowBlock));
		assert_eq!(accept(&header, AUXPOW), Ok(()));
	}

	#[test]
	fn test_header_without_auxpow_after_merge_mining() {
		// chain id versions without auxpow stay valid, the parent work is then the header itself
		let header = header_builder().build();
		assert_eq!(accept(&header, PRE_AUXPOW), Ok(()));
		assert_eq!(accept(&header, AUXPOW), Ok(()));
	}

	#[test]
	fn test_wrong_chain_id() {
		let header = header_builder().version(BlockVersion::new(4, 0x10).unwrap()).build();
		assert_eq!(
			accept(&header, AUXPOW),
			Err(Error::WrongChainId {
				expected: CHAIN_ID,
				actual: 0x10,
			})
		);

		// testnet does not enforce the chain id
		let params = ChainParams::for_network(Network::Testnet);
		assert_eq!(HeaderAcceptor::new(&header, &params, 158_100).check(), Ok(()));
	}

	#[test]
	fn test_invalid_bits() {
		let header = header_builder().bits(Compact::new(0x1d80_ffff)).build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::InvalidBits));

		let header = header_builder().bits(Compact::new(0x0000_0000)).build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::InvalidBits));

		let header = header_builder().bits(Compact::new(0xff12_3456)).build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::InvalidBits));

		// above the regtest limit
		let header = header_builder().bits(Compact::new(0x2100_ffff)).build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::InvalidBits));

		let header = header_builder().bits(Compact::new(0x207f_ffff)).build();
		assert_eq!(accept(&header, AUXPOW), Ok(()));

		// the mainnet limit is tighter
		let params = ChainParams::for_network(Network::Mainnet);
		assert_eq!(HeaderAcceptor::new(&header, &params, 400_000).check(), Err(Error::InvalidBits));
	}

	#[test]
	fn test_missing_auxpow() {
		let header = header_builder().auxpow_flag().build();
		assert_eq!(accept(&header, AUXPOW), Err(Error::MissingAuxPow));
	}

	#[test]
	fn test_unexpected_auxpow() {
		let mut header = header_builder().build();
		header.auxpow = Some(AuxPow::template(&header.hash));
		assert_eq!(accept(&header, AUXPOW), Err(Error::UnexpectedAuxPow));
	}

	#[test]
	fn test_invalid_auxpow() {
		let header = header_builder().merge_mined(auxpow_builder().chain_height(5).chain_index(3)).build();
		assert_matches!(accept(&header, AUXPOW), Err(Error::AuxPow(AuxPowError::WrongIndex)));

		let header = header_builder().merge_mined(auxpow_builder().parent_chain_id(CHAIN_ID)).build();
		assert_matches!(accept(&header, AUXPOW), Err(Error::AuxPow(AuxPowError::ParentHasOurChainId)));
	}

	#[test]
	fn test_auxpow_commits_to_flagged_header() {
		let header = header_builder().merge_mined(auxpow_builder().chain_height(3).merkle_nonce(5)).build();
		assert_eq!(accept(&header, AUXPOW), Ok(()));

		// clearing the flag changes the hash the auxpow has to commit to
		let mut stripped = header.clone();
		stripped.raw.version.set_auxpow(false);
		stripped.hash = stripped.raw.hash();
		assert_eq!(accept(&stripped, AUXPOW), Err(Error::UnexpectedAuxPow));
	}

	#[test]
	fn test_template_header() {
		let mut header = IndexedBlockHeader::from_raw(header_builder().build().raw);
		header.init_auxpow();
		assert_eq!(accept(&header, AUXPOW), Ok(()));

		let decoded: IndexedBlockHeader = deserialize(&serialize(&header)[..]).unwrap();
		assert_eq!(accept(&decoded, AUXPOW), Ok(()));
	}

	#[test]
	fn test_literal_merge_mined_header() {
		let bytes: Bytes = MERGE_MINED_HEADER.into();
		let header: IndexedBlockHeader = deserialize(&bytes[..]).unwrap();
		assert_eq!(
			header.hash,
			SHA256D::from_str("8c65d681eb79c2e318400337dd7213c47e27e633788c24a3c472fb449c34a04f").unwrap()
		);
		assert_eq!(header.raw.version.chain_id(), CHAIN_ID);
		assert_eq!(header.raw.bits, Compact::new(0x1b26_7eeb));

		let auxpow = header.auxpow.as_ref().unwrap();
		assert_eq!(
			auxpow.parent_hash,
			SHA256D::from_str("ce8a2de0ebd3138ff959999ff1c5fb01900236ad24cd4dd68cc0f0b25422caa8").unwrap()
		);
		assert_eq!(auxpow.parent_hash, auxpow.parent_header.hash());
		assert_eq!(auxpow.coinbase_branch.len(), 1);
		assert_eq!(auxpow.chain_branch.len(), 2);
		assert_eq!(auxpow.chain_branch.index, 2);
		assert_eq!(serialize(&header), bytes);

		let params = ChainParams::for_network(Network::Mainnet);
		assert_eq!(HeaderAcceptor::new(&header, &params, 400_000).check(), Ok(()));
		assert_eq!(HeaderAcceptor::new(&header, &params, 371_336).check(), Err(Error::EarlyAuxPowBlock));
	}

	#[test]
	fn test_inu_accepts_auxpow_from_genesis() {
		let params = ChainParams::for_network(Network::Inu);
		let header = header_builder().merge_mined(auxpow_builder()).build();
		assert_eq!(HeaderAcceptor::new(&header, &params, 0).check(), Ok(()));

		// foreign chain ids pass, for the block and its parent
		let header = header_builder()
			.version(BlockVersion::new(4, 0x10).unwrap())
			.merge_mined(auxpow_builder().parent_chain_id(0x10))
			.build();
		assert_eq!(HeaderAcceptor::new(&header, &params, 0).check(), Ok(()));

		let header = header_builder().version(legacy_version()).build();
		assert_eq!(HeaderAcceptor::new(&header, &params, 0).check(), Err(Error::LateLegacyBlock));
	}

	#[test]
	fn test_work_follows_ancestors() {
		// regtest digishield keeps the parent bits
		let params = ChainParams::for_network(Network::Regtest);
		let bits = Compact::new(0x1b01_0000);
		let chain = HeaderChain::new(23).extend(2, 1, bits);
		let check = |header: &IndexedBlockHeader, height| HeaderAcceptor::with_ancestors(header, &params, height, &chain).check();

		let header = chain.next_header().merge_mined(auxpow_builder()).build();
		assert_eq!(check(&header, 25), Ok(()));

		// low four bits are tolerated
		let header = chain.next_header().bits(Compact::new(0x1b01_0008)).build();
		assert_eq!(check(&header, 25), Ok(()));

		let header = chain.next_header().bits(Compact::new(0x1b02_0000)).build();
		assert_eq!(
			check(&header, 25),
			Err(Error::Difficulty {
				expected: bits,
				actual: Compact::new(0x1b02_0000),
			})
		);

		let header = header_builder().build();
		assert_eq!(check(&header, 25), Err(Error::UnknownParent));
		assert_eq!(check(&header, 30), Err(Error::MissingAncestor(29)));

		// without ancestors the bits are only range checked
		let header = chain.next_header().bits(Compact::new(0x1b02_0000)).build();
		assert_eq!(HeaderAcceptor::new(&header, &params, 25).check(), Ok(()));
	}

	#[test]
	fn test_work_at_digishield_boundary() {
		let params = ChainParams::for_network(Network::Mainnet);
		let bits = Compact::new(0x1b3c_4d5e);
		// parent mined ten minutes after its own parent
		let chain = HeaderChain::new(144_998).push(1_400_000_000, bits).push(1_400_000_600, bits);

		let header = chain.next_header().bits(Compact::new(0x1b5a_740d)).build();
		assert_eq!(HeaderAcceptor::with_ancestors(&header, &params, 145_000, &chain).check(), Ok(()));

		let header = chain.next_header().bits(bits).build();
		assert_eq!(
			HeaderAcceptor::with_ancestors(&header, &params, 145_000, &chain).check(),
			Err(Error::Difficulty {
				expected: Compact::new(0x1b5a_740d),
				actual: bits,
			})
		);
	}
}
