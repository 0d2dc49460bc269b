mod check;
mod params;
mod template;

pub use self::check::check;
pub use self::params::params;
pub use self::template::template;

use primitives::bytes::Bytes;
use ser::{deserialize, Deserializable};

fn decode_hex<T>(hex: &str) -> Result<T, String>
where
	T: Deserializable,
{
	let bytes: Bytes = hex.trim().parse().map_err(|e| format!("Invalid hex: {}", e))?;
	deserialize(&bytes[..]).map_err(|e| e.to_string())
}

fn parse_height(value: Option<&str>) -> Result<Option<u32>, String> {
	value
		.map(|height| height.parse().map_err(|_| format!("Invalid height: {}", height)))
		.transpose()
}
