use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    /// Standard padded base64 of the whole file.
    pub content: String,
    pub byte_len: u64,
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Reads the whole file and base64-encodes it.
pub async fn encode_file(path: &Path) -> Result<EncodedFile, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        ApiError::new(
            FailureKind::FileRead,
            format!("{}: {}", path.display(), err),
        )
    })?;
    Ok(EncodedFile {
        content: encode_bytes(&bytes),
        byte_len: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding_and_no_prefix() {
        assert_eq!(encode_bytes(b"hi"), "aGk=");
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(&[0xff, 0xfe, 0x00]), "//4A");
    }
}
