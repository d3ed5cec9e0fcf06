use bytes::Bytes;

/// Bytes of a file at some revision, with a content type for serving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalContent {
    pub bytes: Bytes,
    pub content_type: String,
}

impl HistoricalContent {
    pub fn new(path: &str, bytes: Bytes) -> Self {
        HistoricalContent {
            bytes,
            content_type: content_type_for(path),
        }
    }
}

/// Content type guessed from the path's extension
pub fn content_type_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
