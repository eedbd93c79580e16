use std::io::{self, BufWriter, Write};

/// Destination for the persisted hex words, one per encoded line.
pub trait HexSink {
    fn write_word(&mut self, hex: &str) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes `XXXX\n` lines to any byte stream.
pub struct HexWriter<W: Write> {
    inner: BufWriter<W>,
    words: usize,
}

impl<W: Write> HexWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            words: 0,
        }
    }

    pub fn words(&self) -> usize {
        self.words
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> HexSink for HexWriter<W> {
    fn write_word(&mut self, hex: &str) -> io::Result<()> {
        writeln!(self.inner, "{hex}")?;
        self.words += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl HexSink for Vec<String> {
    fn write_word(&mut self, hex: &str) -> io::Result<()> {
        self.push(hex.to_string());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
