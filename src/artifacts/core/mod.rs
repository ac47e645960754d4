//! Output plumbing shared by the commands that print long listings

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Adapts the `minus` pager to `std::io::Write`
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        Self { pager }
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

/// Where a listing goes: straight to stdout, or into a pager shown once the
/// listing is complete
pub enum Output {
    Stdout(io::Stdout),
    Paged(Pager, PagerWriter),
}

impl Output {
    /// Page only when a person is looking at the terminal and `NO_PAGER`
    /// is unset
    pub fn detect() -> Self {
        let stdout = io::stdout();

        if stdout.is_terminal() && std::env::var_os("NO_PAGER").is_none() {
            let pager = Pager::new();
            let writer = PagerWriter::new(pager.clone());
            Output::Paged(pager, writer)
        } else {
            Output::Stdout(stdout)
        }
    }

    pub fn finish(self) -> io::Result<()> {
        match self {
            Output::Stdout(mut stdout) => stdout.flush(),
            Output::Paged(pager, _) => minus::page_all(pager).map_err(io::Error::other),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(stdout) => stdout.write(buf),
            Output::Paged(_, writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => stdout.flush(),
            Output::Paged(_, writer) => writer.flush(),
        }
    }
}
