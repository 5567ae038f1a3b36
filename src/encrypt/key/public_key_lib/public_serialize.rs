use super::Compress;
use crate::{Error, Result};

/// A SEC-encoded public key: `0x02`/`0x03` + x, or `0x04` + x + y.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeySerialize {
    Compress([u8; 33]),
    Uncompress([u8; 65]),
}

impl AsRef<[u8]> for PublicKeySerialize {
    fn as_ref(&self) -> &[u8] {
        match self {
            PublicKeySerialize::Compress(a) => &a[..],
            PublicKeySerialize::Uncompress(a) => &a[..],
        }
    }
}

impl TryFrom<[u8; 33]> for PublicKeySerialize {
    type Error = Error;

    fn try_from(sec: [u8; 33]) -> Result<Self> {
        if sec[0] != 0x03 && sec[0] != 0x02 {
            return Err(Error::malformed(format!("compressed SEC prefix {:#04x}", sec[0])));
        }

        Ok(Self::Compress(sec))
    }
}

impl TryFrom<[u8; 65]> for PublicKeySerialize {
    type Error = Error;

    fn try_from(sec: [u8; 65]) -> Result<Self> {
        if sec[0] != 0x04 {
            return Err(Error::malformed(format!("uncompressed SEC prefix {:#04x}", sec[0])));
        }

        Ok(Self::Uncompress(sec))
    }
}

impl TryFrom<&[u8]> for PublicKeySerialize {
    type Error = Error;

    /// Picks the form from the length; the prefix must agree with it.
    fn try_from(sec: &[u8]) -> Result<Self> {
        if let Ok(compressed) = <[u8; 33]>::try_from(sec) {
            return compressed.try_into();
        }
        if let Ok(uncompressed) = <[u8; 65]>::try_from(sec) {
            return uncompressed.try_into();
        }
        Err(Error::malformed(format!("SEC of {} bytes", sec.len())))
    }
}

impl PublicKeySerialize {
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn compress(&self) -> Compress {
        match self {
            PublicKeySerialize::Compress(_) => Compress::On,
            PublicKeySerialize::Uncompress(_) => Compress::Off,
        }
    }

    /// The 32-byte big-endian x coordinate.
    pub fn x_bytes(&self) -> &[u8] {
        &self.as_ref()[1..33]
    }
}
