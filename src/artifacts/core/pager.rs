use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding the minus pager
///
/// minus only accepts `&str`, while `write!` may hand over a buffer that ends
/// in the middle of a multi-byte character. Such trailing bytes are held back
/// until the rest of the character arrives.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            // an incomplete sequence at the end is fine, garbage is not
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        let rest = self.pending.split_off(valid_up_to);
        let text = String::from_utf8(std::mem::replace(&mut self.pending, rest))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if !text.is_empty() {
            self.pager.push_str(text).map_err(io::Error::other)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
