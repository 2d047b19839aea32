//! Shared sinks for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// An in-memory sink that can be cloned into a logger and inspected later.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    max_chunk: Option<usize>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept at most `max_chunk` bytes per `write` call and yield between
    /// calls, so a record reaches the buffer in many pieces.
    #[allow(dead_code)]
    pub fn chunked(max_chunk: usize) -> Self {
        Self {
            bytes: Arc::default(),
            max_chunk: Some(max_chunk.max(1)),
        }
    }

    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8(bytes.clone()).unwrap()
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = self.max_chunk.map_or(buf.len(), |max| buf.len().min(max));
        self.bytes.lock().unwrap().extend_from_slice(&buf[..len]);
        if self.max_chunk.is_some() {
            std::thread::yield_now();
        }
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
