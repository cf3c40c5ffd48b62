use std::io::{self, Write};

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// One-character liveness indicator, advanced once per fetched transaction.
#[derive(Debug)]
pub struct Spinner<W: Write> {
    out: W,
    index: usize,
    drawn: bool,
}

impl<W: Write> Spinner<W> {
    pub fn new(out: W) -> Self {
        Self { out, index: 0, drawn: false }
    }

    /// Replace the previous frame with the next one.
    pub fn tick(&mut self) -> io::Result<()> {
        if self.drawn {
            self.out.write_all(b"\x08")?;
        }
        write!(self.out, "{}", FRAMES[self.index % FRAMES.len()])?;
        self.index += 1;
        self.drawn = true;
        self.out.flush()
    }

    /// Erase the current frame, if any.
    pub fn clear(&mut self) -> io::Result<()> {
        if !self.drawn {
            return Ok(());
        }
        self.drawn = false;
        self.out.write_all(b"\x08 \x08")?;
        self.out.flush()
    }

    pub fn ticks(&self) -> usize {
        self.index
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
