//! Passthrough lumps: plain text and unclassified data

/// Text lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiText {
    text: String,
}

impl AsciiText {
    /// Interpret bytes as ASCII; other bytes become U+FFFD
    pub fn parse(data: &[u8]) -> Self {
        let text = data
            .iter()
            .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
            .collect();
        Self { text }
    }

    /// Decoded text, NUL padding included
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text with trailing NUL padding removed
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches('\0')
    }
}

/// Unclassified lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLump {
    data: Vec<u8>,
}

impl UnknownLump {
    /// Keep the bytes as they are
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Lowercase hex of the first `limit` bytes, space separated
    pub fn hex_preview(&self, limit: usize) -> String {
        let clipped = &self.data[..self.data.len().min(limit)];
        let encoded = hex::encode(clipped);
        let mut preview = String::with_capacity(encoded.len() + clipped.len());
        for (i, digit) in encoded.chars().enumerate() {
            if i > 0 && i % 2 == 0 {
                preview.push(' ');
            }
            preview.push(digit);
        }
        preview
    }
}
