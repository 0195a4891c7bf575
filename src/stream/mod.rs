use std::io;
use log::debug;
use crate::error::{Result, ToneError};
use crate::sine::WaveformBuffer;

/// Endless read-only byte source looping over one waveform buffer.
pub struct PlaybackStream {
    buffer: WaveformBuffer,
    position: usize,
    open: bool,
}

impl PlaybackStream {
    pub fn new(buffer: WaveformBuffer) -> Self {
        Self {
            buffer,
            position: 0,
            open: false,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Err(ToneError::EmptyBuffer);
        }
        self.position = 0;
        self.open = true;
        debug!("STREAM: Opened over {} bytes", self.buffer.len());
        Ok(())
    }

    /// Fills all of `data` while open, wrapping around the buffer as often
    /// as needed. Returns 0 when closed.
    pub fn read(&mut self, data: &mut [u8]) -> usize {
        if !self.open || self.buffer.is_empty() {
            return 0;
        }
        let source = self.buffer.as_bytes();
        let mut total = 0;
        while total < data.len() {
            let chunk = (source.len() - self.position).min(data.len() - total);
            data[total..total + chunk].copy_from_slice(&source[self.position..self.position + chunk]);
            self.position = (self.position + chunk) % source.len();
            total += chunk;
        }
        total
    }

    pub fn stop(&mut self) {
        self.position = 0;
        if self.open {
            debug!("STREAM: Closed");
        }
        self.open = false;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl io::Read for PlaybackStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(PlaybackStream::read(self, buf))
    }
}

impl io::Write for PlaybackStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "playback stream is read-only"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    fn stream_over(bytes: &[u8]) -> PlaybackStream {
        PlaybackStream::new(WaveformBuffer::from(bytes.to_vec()))
    }

    #[test]
    fn empty_buffer_is_rejected_at_start() {
        let mut stream = stream_over(&[]);
        assert!(matches!(stream.start(), Err(ToneError::EmptyBuffer)));
        assert!(!stream.is_open());
    }

    #[test]
    fn read_tiles_buffer_across_several_wraps() {
        let content: Vec<u8> = (0..7).collect();
        let mut stream = stream_over(&content);
        stream.start().unwrap();

        let mut data = vec![0u8; 25];
        assert_eq!(stream.read(&mut data), 25);

        let tiled: Vec<u8> = content.iter().copied().cycle().take(25).collect();
        assert_eq!(data, tiled);
        assert_eq!(stream.position(), 25 % 7);
    }

    #[test]
    fn consecutive_reads_continue_where_the_last_stopped() {
        let mut stream = stream_over(&[1, 2, 3, 4]);
        stream.start().unwrap();
        let mut first = [0u8; 3];
        let mut second = [0u8; 3];
        stream.read(&mut first);
        stream.read(&mut second);
        assert_eq!(first, [1, 2, 3]);
        assert_eq!(second, [4, 1, 2]);
    }

    #[test]
    fn start_and_stop_reset_the_cursor() {
        let mut stream = stream_over(&[9, 8, 7, 6, 5]);
        stream.start().unwrap();
        let mut data = [0u8; 3];
        stream.read(&mut data);
        assert_eq!(stream.position(), 3);

        stream.stop();
        assert_eq!(stream.position(), 0);
        assert!(!stream.is_open());
        stream.stop();
        assert_eq!(stream.position(), 0);

        stream.start().unwrap();
        let mut first = [0u8; 4];
        stream.read(&mut first);
        stream.start().unwrap();
        stream.start().unwrap();
        let mut again = [0u8; 4];
        stream.read(&mut again);
        assert_eq!(first, again);
        assert_eq!(first, [9, 8, 7, 6]);
    }

    #[test]
    fn closed_stream_yields_nothing() {
        let mut stream = stream_over(&[1, 2, 3]);
        let mut data = [0u8; 4];
        assert_eq!(stream.read(&mut data), 0);
        stream.start().unwrap();
        stream.stop();
        assert_eq!(stream.read(&mut data), 0);
    }

    #[test]
    fn io_traits_read_but_refuse_writes() {
        let mut stream = stream_over(&[1, 2]);
        stream.start().unwrap();
        let mut data = [0u8; 5];
        assert_eq!(Read::read(&mut stream, &mut data).unwrap(), 5);
        assert_eq!(data, [1, 2, 1, 2, 1]);

        let err = Write::write(&mut stream, &[0, 0]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
    }
}
