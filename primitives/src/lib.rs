extern crate rustc_hex as hex;
#[macro_use]
extern crate uint;

pub mod bytes;
pub mod compact;

construct_uint! {
	pub struct U256(4);
}
