use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding text into a `minus` pager
///
/// Output is buffered by the pager; keep a clone of `pager()` around and hand
/// it to `minus::page_all` once the command has produced everything.
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn new() -> Self {
        PagerWriter {
            pager: Pager::new(),
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Default for PagerWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
