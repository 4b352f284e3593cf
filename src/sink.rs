//! Output sinks.
//!
//! A [`Sink`] owns a writable destination behind its own lock, so two
//! emissions racing on the same sink produce two whole lines rather than
//! interleaved fragments. Sinks never report write failures to the caller:
//! a failure sets the sink's error flag and is traced, and the emission
//! moves on to the next sink.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered, immutable snapshot of the configured sinks.
pub type SinkList = Arc<[Arc<Sink>]>;

/// What to do with a sink once a line has been written to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Flush and keep the sink open.
    Flush,
    /// Flush and close. Later writes fail and set the error flag.
    Close,
}

/// A writable log destination.
pub struct Sink {
    name: String,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
    error: AtomicBool,
    failures: AtomicU64,
    lines: AtomicU64,
}

// Box<dyn Write> is not Debug.
impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .field("error", &self.has_error())
            .field("lines", &self.lines_written())
            .finish_non_exhaustive()
    }
}

impl Sink {
    /// Wraps an arbitrary writer. `name` only appears in diagnostics.
    #[must_use]
    pub fn new(name: impl Into<String>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Some(writer)),
            error: AtomicBool::new(false),
            failures: AtomicU64::new(0),
            lines: AtomicU64::new(0),
        }
    }

    /// Standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new("stdout", Box::new(io::stdout()))
    }

    /// Standard error. This is what a logger falls back to when no sinks
    /// are configured.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new("stderr", Box::new(io::stderr()))
    }

    /// Discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new("null", Box::new(io::sink()))
    }

    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(path.display().to_string(), Box::new(file)))
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes one complete line, then flushes or closes the sink.
    ///
    /// Failures are recorded on the sink and never returned.
    pub fn write_line(&self, line: &[u8], disposition: Disposition) {
        match self.try_write_line(line, disposition) {
            Ok(()) => {
                self.lines.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.error.store(true, Ordering::Release);
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    target: "sevlog::sink",
                    sink = %self.name,
                    error = %e,
                    "log write failed"
                );
            }
        }
    }

    fn try_write_line(&self, line: &[u8], disposition: Disposition) -> io::Result<()> {
        let mut guard = self.lock();
        let Some(writer) = guard.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "sink is closed",
            ));
        };

        let written = writer.write_all(line).and_then(|()| writer.flush());

        if disposition == Disposition::Close {
            // Dropping the writer after an explicit flush closes it; the
            // sink is closed even if this last write failed.
            if let Some(mut writer) = guard.take() {
                let _ = writer.flush();
            }
        }

        written
    }

    /// Returns whether any write on this sink has failed since the last
    /// [`clear_error`](Self::clear_error).
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.load(Ordering::Acquire)
    }

    /// Resets the error flag.
    pub fn clear_error(&self) {
        self.error.store(false, Ordering::Release);
    }

    /// Total number of failed writes.
    #[must_use]
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total number of lines written successfully.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    /// Returns whether the sink has been closed by a fatal emission.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn Write + Send>>> {
        // A panic while holding the lock leaves at worst a partial line.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use super::*;

    /// In-memory writer for capturing sink output in tests.
    #[derive(Clone, Default)]
    pub struct TestWriter(Arc<StdMutex<Vec<u8>>>);

    impl TestWriter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn contents(&self) -> String {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Writer that fails every write.
    pub struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_line_flushes_through() {
        let tw = TestWriter::new();
        let sink = Sink::new("mem", Box::new(tw.clone()));
        sink.write_line(b"hello \n", Disposition::Flush);
        assert_eq!(tw.contents(), "hello \n");
        assert_eq!(sink.lines_written(), 1);
        assert!(!sink.has_error());
        assert!(!sink.is_closed());
    }

    #[test]
    fn close_rejects_later_writes() {
        let tw = TestWriter::new();
        let sink = Sink::new("mem", Box::new(tw.clone()));
        sink.write_line(b"last\n", Disposition::Close);
        assert!(sink.is_closed());
        assert_eq!(tw.contents(), "last\n");

        sink.write_line(b"after\n", Disposition::Flush);
        assert_eq!(tw.contents(), "last\n");
        assert!(sink.has_error());
        assert_eq!(sink.failure_count(), 1);
    }

    #[test]
    fn failures_set_and_clear_the_error_flag() {
        let sink = Sink::new("broken", Box::new(FailingWriter));
        sink.write_line(b"x\n", Disposition::Flush);
        sink.write_line(b"y\n", Disposition::Flush);
        assert!(sink.has_error());
        assert_eq!(sink.failure_count(), 2);
        assert_eq!(sink.lines_written(), 0);

        sink.clear_error();
        assert!(!sink.has_error());
        assert_eq!(sink.failure_count(), 2);
    }

    #[test]
    fn file_sink_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let sink = Sink::from_file(&path).unwrap();
        assert_eq!(sink.name(), path.display().to_string());
        sink.write_line(b"appended\n", Disposition::Flush);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "existing\nappended\n"
        );
    }

    #[test]
    fn concurrent_writers_never_interleave_lines() {
        let tw = TestWriter::new();
        let sink = Arc::new(Sink::new("mem", Box::new(tw.clone())));

        std::thread::scope(|s| {
            for t in 0..8 {
                let sink = Arc::clone(&sink);
                s.spawn(move || {
                    let line = format!("{}\n", t.to_string().repeat(200));
                    for _ in 0..50 {
                        sink.write_line(line.as_bytes(), Disposition::Flush);
                    }
                });
            }
        });

        let contents = tw.contents();
        assert_eq!(contents.lines().count(), 400);
        for line in contents.lines() {
            let first = line.chars().next().unwrap();
            assert!(line.chars().all(|c| c == first), "torn line: {line}");
            assert_eq!(line.len(), 200);
        }
    }

    #[test]
    fn debug_does_not_expose_writer() {
        let sink = Sink::noop();
        let dbg = format!("{sink:?}");
        assert!(dbg.contains("null"), "{dbg}");
    }
}
