use std::fmt;

use clap::ValueEnum;

/// Character set the transcript is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputEncoding {
    #[value(name = "utf-8")]
    Utf8,
    Latin1,
    Ascii,
}

/// A character the target encoding has no byte for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmappable {
    pub ch: char,
    /// Character offset into the encoded text.
    pub position: usize,
}

impl OutputEncoding {
    pub fn encode(self, text: &str) -> Result<Vec<u8>, Unmappable> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => encode_single_byte(text, 0xFF),
            Self::Ascii => encode_single_byte(text, 0x7F),
        }
    }
}

fn encode_single_byte(text: &str, max: u32) -> Result<Vec<u8>, Unmappable> {
    let mut out = Vec::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) if u32::from(byte) <= max => out.push(byte),
            _ => return Err(Unmappable { ch, position }),
        }
    }
    Ok(out)
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
        };
        f.write_str(name)
    }
}
