use base64::Engine;

/// Encoded JPEG image representing an identity in the report.
///
/// Opaque to the identity domain: it is stored once at creation and
/// handed back untouched for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    jpeg: Vec<u8>,
}

impl Thumbnail {
    pub fn from_jpeg(jpeg: Vec<u8>) -> Self {
        Self { jpeg }
    }

    pub fn jpeg_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.jpeg)
    }

    /// `data:` URI suitable for an inline `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.to_base64())
    }
}
