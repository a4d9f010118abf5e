//! Incremental hex dump: bytes go in as arbitrary chunks, fixed 16-byte rows come out.

use crate::hex::render_hex;
use std::fmt;

/// Number of bytes in a full row.
pub const ROW_LEN: usize = 16;

/// One row of a hex dump: up to [`ROW_LEN`] bytes and the offset of the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDumpUnit {
    offset: u32,
    bytes: Vec<u8>,
}

impl HexDumpUnit {
    /// # Panics
    ///
    /// Panics if `bytes` is empty or longer than [`ROW_LEN`]; the factory never
    /// produces such a unit.
    pub fn new(offset: u32, bytes: &[u8]) -> Self {
        assert!(
            !bytes.is_empty() && bytes.len() <= ROW_LEN,
            "hex dump unit must hold 1..={} bytes, got {}",
            ROW_LEN,
            bytes.len()
        );
        Self {
            offset,
            bytes: bytes.to_vec(),
        }
    }

    /// Byte offset of the first byte in the row.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Bytes of the row, 1 to 16 of them.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn printable(b: u8) -> char {
    if (32..=127).contains(&b) {
        b as char
    } else {
        '.'
    }
}

impl fmt::Display for HexDumpUnit {
    /// `00000010: 41 42 .. 47|48 ..    | ABCDEFGH..`
    ///
    /// Missing bytes of a short row are padded so the `|` columns line up; the
    /// character column only covers the bytes that are present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", render_hex(self.offset, u32::BITS))?;
        for slot in 0..ROW_LEN {
            match self.bytes.get(slot) {
                Some(&b) => f.write_str(&render_hex(u32::from(b), u8::BITS))?,
                None => f.write_str("  ")?,
            }
            f.write_str(if slot == ROW_LEN / 2 - 1 { "|" } else { " " })?;
        }
        f.write_str("| ")?;
        for &b in &self.bytes {
            write!(f, "{}", printable(b))?;
        }
        Ok(())
    }
}

/// Buffers incoming bytes and cuts them into [`HexDumpUnit`]s.
///
/// Feed the stream with [`update`](Self::update) and call
/// [`finalize`](Self::finalize) once at the end to flush the last partial row.
#[derive(Debug)]
pub struct HexDumpUnitFactory {
    buffer: [u8; ROW_LEN],
    used: usize,
    produced: u32,
}

impl Default for HexDumpUnitFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl HexDumpUnitFactory {
    /// Factory for a new stream, starting at offset 0.
    pub fn new() -> Self {
        Self {
            buffer: [0; ROW_LEN],
            used: 0,
            produced: 0,
        }
    }

    /// Appends `chunk` and returns every row it completed, possibly none.
    pub fn update(&mut self, chunk: &[u8]) -> Vec<HexDumpUnit> {
        let mut units = Vec::with_capacity((self.used + chunk.len()) / ROW_LEN);
        for &b in chunk {
            self.buffer[self.used] = b;
            self.used += 1;
            if self.used == ROW_LEN {
                units.push(self.emit());
            }
        }
        log::trace!("hexdump: {} bytes in, {} rows out", chunk.len(), units.len());
        units
    }

    /// Emits the buffered partial row, if any. Calling it again returns `None`.
    pub fn finalize(&mut self) -> Option<HexDumpUnit> {
        (self.used > 0).then(|| self.emit())
    }

    fn emit(&mut self) -> HexDumpUnit {
        // Offsets are a 32-bit field and wrap for inputs past 4 GiB.
        let offset = self.produced.wrapping_mul(ROW_LEN as u32);
        let unit = HexDumpUnit::new(offset, &self.buffer[..self.used]);
        self.produced = self.produced.wrapping_add(1);
        self.used = 0;
        unit
    }
}
