//! File type checks for uploads: a declared type (content type or
//! extension) must agree with the leading bytes of the content.

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Bytes needed to recognize any supported format.
pub const SNIFF_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Png,
    Pdf,
}

impl FileFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    fn signature(&self) -> &'static [u8] {
        match self {
            Self::Png => PNG_SIGNATURE,
            Self::Pdf => PDF_SIGNATURE,
        }
    }

    /// Whether the client claims this format, by content type or, when the
    /// content type is missing or generic, by extension.
    pub fn is_declared(&self, content_type: Option<&str>, filename: Option<&str>) -> bool {
        let declared_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim())
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

        match declared_type {
            Some(ct) => ct.eq_ignore_ascii_case(self.mime()),
            None => filename.is_some_and(|f| {
                mime_guess::from_path(f)
                    .iter_raw()
                    .any(|m| m == self.mime())
            }),
        }
    }

    /// Whether `head` starts with this format's magic bytes.
    pub fn matches_signature(&self, head: &[u8]) -> bool {
        head.starts_with(self.signature())
    }
}
