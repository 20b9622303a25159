//! BSON binary values and their subtype tag.

use uuid::Uuid;

use super::error::InvalidArgument;

/// The 8-bit subtype tag carried by every binary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarySubtype {
    /// Generic binary data (0x00)
    Generic,
    /// Function (0x01)
    Function,
    /// Binary, old format (0x02, deprecated)
    BinaryOld,
    /// UUID, old format (0x03, deprecated; 16-byte payload only)
    UuidOld,
    /// UUID (0x04; 16-byte payload only)
    Uuid,
    /// MD5 digest (0x05)
    Md5,
    /// User-defined (0x80 and above)
    UserDefined(u8),
    /// Values 0x06..=0x7F are reserved by the format; kept so that any
    /// decoded subtype byte round-trips unchanged.
    Reserved(u8),
}

impl From<u8> for BinarySubtype {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => BinarySubtype::Generic,
            0x01 => BinarySubtype::Function,
            0x02 => BinarySubtype::BinaryOld,
            0x03 => BinarySubtype::UuidOld,
            0x04 => BinarySubtype::Uuid,
            0x05 => BinarySubtype::Md5,
            b if b >= 0x80 => BinarySubtype::UserDefined(b),
            b => BinarySubtype::Reserved(b),
        }
    }
}

impl From<BinarySubtype> for u8 {
    fn from(subtype: BinarySubtype) -> u8 {
        match subtype {
            BinarySubtype::Generic => 0x00,
            BinarySubtype::Function => 0x01,
            BinarySubtype::BinaryOld => 0x02,
            BinarySubtype::UuidOld => 0x03,
            BinarySubtype::Uuid => 0x04,
            BinarySubtype::Md5 => 0x05,
            BinarySubtype::UserDefined(b) => b,
            BinarySubtype::Reserved(b) => b,
        }
    }
}

impl BinarySubtype {
    /// True for the two UUID subtypes, which require 16-byte payloads.
    pub fn is_uuid(&self) -> bool {
        matches!(self, BinarySubtype::Uuid | BinarySubtype::UuidOld)
    }
}

/// BSON binary data: a subtype tag plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub subtype: BinarySubtype,
    pub data: Vec<u8>,
}

impl Binary {
    /// Creates a binary value, enforcing the 16-byte payload rule for the
    /// UUID subtypes.
    pub fn new(subtype: BinarySubtype, data: Vec<u8>) -> Result<Binary, InvalidArgument> {
        if subtype.is_uuid() && data.len() != 16 {
            return Err(InvalidArgument::BinaryPayloadLength {
                subtype: subtype.into(),
                len: data.len(),
            });
        }
        Ok(Binary { subtype, data })
    }

    /// Creates a generic-subtype binary value. Never fails.
    pub fn generic(data: Vec<u8>) -> Binary {
        Binary {
            subtype: BinarySubtype::Generic,
            data,
        }
    }

    /// Creates a UUID-subtype binary value from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Binary {
        Binary {
            subtype: BinarySubtype::Uuid,
            data: uuid.as_bytes().to_vec(),
        }
    }

    /// Reads the payload back as a UUID when this is a UUID-subtype value
    /// with a well-formed 16-byte payload.
    pub fn as_uuid(&self) -> Option<Uuid> {
        if !self.subtype.is_uuid() {
            return None;
        }
        Uuid::from_slice(&self.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_subtype_requires_16_bytes() {
        assert_eq!(
            Binary::new(BinarySubtype::Uuid, vec![0u8; 15]),
            Err(InvalidArgument::BinaryPayloadLength {
                subtype: 0x04,
                len: 15
            })
        );
        assert_eq!(
            Binary::new(BinarySubtype::UuidOld, vec![0u8; 17]),
            Err(InvalidArgument::BinaryPayloadLength {
                subtype: 0x03,
                len: 17
            })
        );
        assert!(Binary::new(BinarySubtype::Uuid, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn generic_any_length() {
        assert!(Binary::new(BinarySubtype::Generic, vec![]).is_ok());
        assert!(Binary::new(BinarySubtype::Generic, vec![0u8; 15]).is_ok());
    }

    #[test]
    fn subtype_byte_roundtrip() {
        for byte in [0x00u8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x42, 0x80, 0xff] {
            let subtype = BinarySubtype::from(byte);
            assert_eq!(u8::from(subtype), byte);
        }
    }

    #[test]
    fn uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let bin = Binary::from_uuid(uuid);
        assert_eq!(bin.subtype, BinarySubtype::Uuid);
        assert_eq!(bin.as_uuid(), Some(uuid));
        assert_eq!(Binary::generic(vec![1, 2, 3]).as_uuid(), None);
    }
}
