use crate::{header_builder, HeaderBuilder};
use chain::{BlockHeader, BlockHeaderProvider};
use primitives::compact::Compact;

/// Segment of a chain starting at an arbitrary height, each header linked to the one before.
#[derive(Debug, Clone)]
pub struct HeaderChain {
	start: u32,
	headers: Vec<BlockHeader>,
}

impl HeaderChain {
	pub fn new(start: u32) -> Self {
		HeaderChain {
			start,
			headers: Vec::new(),
		}
	}

	/// Appends a header at the next height.
	pub fn push(mut self, time: u32, bits: Compact) -> Self {
		let header = self.next_header().time(time).bits(bits).build().raw;
		self.headers.push(header);
		self
	}

	/// Appends `count` headers `spacing` seconds apart, all with the same bits.
	pub fn extend(mut self, count: u32, spacing: u32, bits: Compact) -> Self {
		for _ in 0..count {
			let time = self.tip().map_or(1_400_000_000, |tip| tip.time + spacing);
			self = self.push(time, bits);
		}
		self
	}

	pub fn tip(&self) -> Option<&BlockHeader> {
		self.headers.last()
	}

	/// Height the next header is built for.
	pub fn next_height(&self) -> u32 {
		self.start + self.headers.len() as u32
	}

	/// Builder for a header on top of the tip.
	pub fn next_header(&self) -> HeaderBuilder {
		match self.tip() {
			Some(tip) => header_builder().parent(tip.hash()).time(tip.time + 60),
			None => header_builder(),
		}
	}
}

impl BlockHeaderProvider for HeaderChain {
	fn block_header(&self, height: u32) -> Option<BlockHeader> {
		let index = height.checked_sub(self.start)?;
		self.headers.get(index as usize).cloned()
	}
}
