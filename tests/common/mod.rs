//! Shared integration-test harness for running the `sevlog` binary and
//! capturing sink output in memory.

#![allow(dead_code)]

use std::io::{self, Write};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use sevlog::Sink;

/// Runs the binary with `args` and waits for it to exit.
#[allow(clippy::missing_panics_doc)]
pub fn run_sevlog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sevlog"))
        .args(args)
        .env_remove("SEVLOG_THRESHOLD")
        .env_remove("SEVLOG_FORMAT")
        .env_remove("SEVLOG_CONFIG")
        .env_remove("SEVLOG_DIAGNOSTICS")
        .output()
        .expect("failed to spawn sevlog")
}

/// In-memory writer whose contents can be read back after logging.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a clone of this capture in a sink.
    pub fn sink(&self, name: &str) -> Arc<Sink> {
        Arc::new(Sink::new(name, Box::new(self.clone())))
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
