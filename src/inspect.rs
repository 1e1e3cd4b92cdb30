use std::{fs::read, path::Path};

use anyhow::Result;
use base64::{Engine, prelude::BASE64_STANDARD};
use codec::RtpPacket;

use crate::config::{Config, Format};

/// Outcome of an inspection run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub parsed: usize,
    pub rejected: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Decodes input files one after another into a single reused packet.
pub struct Inspector {
    packet: RtpPacket<Vec<u8>>,
    format: Format,
    report: Report,
}

impl Inspector {
    pub fn new(config: &Config) -> Self {
        let mut packet = RtpPacket::default();
        packet.set_strict(config.codec.strict);

        Self {
            format: config.input.format,
            report: Report::default(),
            packet,
        }
    }

    /// Parse one packet and return its rendering.
    ///
    /// The packet takes the decoded bytes as its backing, the previous
    /// buffer is dropped.
    pub fn inspect_bytes(&mut self, bytes: &[u8]) -> Result<String> {
        let result = self.decode(bytes).and_then(|buffer| {
            self.packet.parse(buffer)?;
            Ok(self.packet.to_string())
        });

        match result {
            Ok(_) => self.report.parsed += 1,
            Err(_) => self.report.rejected += 1,
        }

        result
    }

    pub fn inspect_file(&mut self, path: &Path) -> Result<String> {
        match read(path) {
            Ok(bytes) => self.inspect_bytes(&bytes),
            Err(e) => {
                self.report.rejected += 1;
                Err(e.into())
            }
        }
    }

    /// The last packet that was parsed.
    pub fn packet(&self) -> &RtpPacket<Vec<u8>> {
        &self.packet
    }

    pub fn report(&self) -> Report {
        self.report
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(match self.format {
            Format::Raw => bytes.to_vec(),
            Format::Base64 => BASE64_STANDARD.decode(bytes.trim_ascii())?,
        })
    }
}

/// Inspect every input file of the configuration and print what was found
/// to stdout.
pub fn inspect(config: &Config) -> Report {
    let mut inspector = Inspector::new(config);

    for path in &config.input.files {
        match inspector.inspect_file(path) {
            Ok(text) => {
                log::info!("rtp packet parsed: file={:?}", path);

                println!("{}:\n{}", path.display(), text);
            }
            Err(e) => {
                log::warn!("rtp packet rejected: file={:?}, err={}", path, e);
            }
        }
    }

    inspector.report()
}
