use crate::BlockHeader;

/// Headers of the chain a new header extends, looked up by height.
pub trait BlockHeaderProvider {
	fn block_header(&self, height: u32) -> Option<BlockHeader>;
}
