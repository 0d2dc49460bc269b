extern crate bitcrypto;
extern crate byteorder;
extern crate primitives;

mod compact_integer;
mod impls;
mod reader;
mod stream;

pub use primitives::{bytes, compact};

pub use compact_integer::CompactInteger;
pub use reader::{deserialize, Deserializable, Error, Reader, MAX_LIST_SIZE};
pub use stream::{serialize, serialized_list_size, Serializable, Stream};
