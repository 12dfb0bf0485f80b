use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use crate::prefs::color::Color;

/// Serializes a color as a json record with the fields
/// `red`, `green`, `blue` and `opacity`.
pub fn encode(color: &Color) -> Result<Vec<u8>, EncodeError> {
    serde_json::to_vec(color).map_err(EncodeError)
}

/// Decodes bytes produced by [`encode`]. The input is not trusted: anything
/// that is not a record of the four expected fields fails with a
/// [`DecodeError`]. Channel values are taken as stored, without range checks.
pub fn decode(bytes: &[u8]) -> Result<Color, DecodeError> {
    serde_json::from_slice(bytes).map_err(DecodeError)
}

#[derive(Debug)]
pub struct EncodeError(serde_json::Error);

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "could not encode color: {}", self.0)
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[derive(Debug)]
pub struct DecodeError(serde_json::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "malformed color record: {}", self.0)
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::{decode, encode};
    use crate::prefs::color::Color;

    #[test]
    fn encode_then_decode_reproduces_the_channels_exactly() {
        let color = Color::new(1.0, 154.0 / 255.0, 158.0 / 255.0, 0.25);

        let decoded = decode(&encode(&color).unwrap()).unwrap();

        assert_eq!(decoded, color);
    }

    #[test]
    fn encode_does_not_clamp_out_of_range_channels() {
        let color = Color::new(1.5, -0.25, 0.0, 1.0);

        let decoded = decode(&encode(&color).unwrap()).unwrap();

        assert_eq!(decoded, color);
    }

    #[test]
    fn decode_reads_a_record_written_by_other_implementations() {
        // Byte-for-byte what a json encoder elsewhere produces for a color,
        // including a field order we never emit ourselves.
        let bytes = br#"{"opacity":1,"blue":0.6196078431372549,"green":0.6039215686274509,"red":1}"#;

        let color = decode(bytes).unwrap();

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.6039215686274509);
        assert_eq!(color.blue, 0.6196078431372549);
        assert_eq!(color.opacity, 1.0);
    }

    #[test]
    fn decode_tolerates_unknown_extra_fields() {
        let bytes = br#"{"red":0,"green":0,"blue":0,"opacity":1,"colorSpace":"sRGB"}"#;

        assert!(decode(bytes).is_ok());
    }

    #[test]
    fn decode_fails_on_unrelated_bytes() {
        assert!(decode(b"not json at all").is_err());
        assert!(decode(&[0x00, 0xFF, 0x12]).is_err());
        assert!(decode(b"").is_err());
    }

    #[test]
    fn decode_fails_on_a_missing_field() {
        let bytes = br#"{"red":0.5,"green":0.5,"blue":0.5}"#;

        assert!(decode(bytes).is_err());
    }

    #[test]
    fn decode_fails_on_a_wrong_field_type() {
        let bytes = br#"{"red":"0.5","green":0.5,"blue":0.5,"opacity":1}"#;

        assert!(decode(bytes).is_err());
    }
}
