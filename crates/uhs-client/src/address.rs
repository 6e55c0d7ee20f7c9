//! Bech32 wallet addresses.
//!
//! An address is the bech32 encoding, under the `usd` human-readable part,
//! of one address-type byte followed by a 32-byte public key.
//!
//! ```
//! use uhs_client::address::{decode_address, encode_address};
//!
//! let pubkey = [7u8; 32];
//! let address = encode_address(&pubkey).expect("encodable");
//! assert!(address.starts_with("usd1"));
//! assert_eq!(decode_address(&address).expect("decodable"), pubkey);
//! ```

use bech32::{Bech32, Hrp};

use crate::types::{PubKey, PUBLIC_KEY_ADDRESS};

/// Human-readable part of every wallet address.
pub const BECH32_HRP: &str = "usd";

/// Errors from address encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The text is not valid bech32.
    #[error("invalid bech32: {0}")]
    Bech32(String),

    /// The human-readable part is not [`BECH32_HRP`].
    #[error("unexpected address prefix: {0}")]
    WrongPrefix(String),

    /// The payload is not a type byte plus 32 key bytes.
    #[error("unexpected address length: {0} bytes")]
    WrongLength(usize),

    /// The address type byte is not a public-key address.
    #[error("unsupported address type: {0:#04x}")]
    UnsupportedType(u8),
}

fn hrp() -> Result<Hrp, AddressError> {
    Hrp::parse(BECH32_HRP).map_err(|e| AddressError::Bech32(e.to_string()))
}

/// Encodes a public key as a wallet address.
///
/// # Errors
///
/// Returns [`AddressError::Bech32`] if encoding fails.
pub fn encode_address(pubkey: &PubKey) -> Result<String, AddressError> {
    let mut data = Vec::with_capacity(1 + pubkey.len());
    data.push(PUBLIC_KEY_ADDRESS);
    data.extend_from_slice(pubkey);
    bech32::encode::<Bech32>(hrp()?, &data).map_err(|e| AddressError::Bech32(e.to_string()))
}

/// Decodes a wallet address back to its public key.
///
/// # Errors
///
/// Returns an [`AddressError`] if the text is not bech32, uses another
/// prefix, has the wrong length or is not a public-key address.
pub fn decode_address(address: &str) -> Result<PubKey, AddressError> {
    let (found, data) =
        bech32::decode(address).map_err(|e| AddressError::Bech32(e.to_string()))?;
    if found != hrp()? {
        return Err(AddressError::WrongPrefix(found.to_string()));
    }
    let (&kind, key) = data
        .split_first()
        .ok_or(AddressError::WrongLength(0))?;
    if kind != PUBLIC_KEY_ADDRESS {
        return Err(AddressError::UnsupportedType(kind));
    }
    key.try_into()
        .map_err(|_| AddressError::WrongLength(data.len()))
}
