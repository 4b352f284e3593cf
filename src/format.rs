//! Line layout.
//!
//! A rendered line is made of the fields enabled in a [`FormatMask`], always
//! in the order date, time, origin, tag, message. Every enabled field is
//! followed by one space and consecutive fields are separated by `- `, so
//! `{tag, message}` renders as `INFO  - Port 8080 already in use. \n`. An
//! empty mask renders a bare `\n`.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use bitflags::bitflags;
use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::ConfigError;
use crate::level::Level;

bitflags! {
    /// Set of optional fields included in a rendered line.
    ///
    /// Any bit pattern is accepted; bits outside [`FormatMask::ALL`] are
    /// retained but never rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatMask: u32 {
        /// Local date, `YYYY-MM-DD`.
        const DATE = 0x01;
        /// Local time, `HH:MM:SS`.
        const TIME = 0x02;
        /// Call origin, `file:line`.
        const ORIGIN = 0x04;
        /// Five-column severity tag.
        const TAG = 0x08;
        /// The formatted message.
        const MESSAGE = 0x10;
        /// Every field.
        const ALL = Self::DATE.bits()
            | Self::TIME.bits()
            | Self::ORIGIN.bits()
            | Self::TAG.bits()
            | Self::MESSAGE.bits();
    }
}

impl FormatMask {
    /// No fields at all. Lines still get their terminating newline.
    pub const NONE: Self = Self::empty();
}

const FIELD_NAMES: [(FormatMask, &str); 5] = [
    (FormatMask::DATE, "date"),
    (FormatMask::TIME, "time"),
    (FormatMask::ORIGIN, "origin"),
    (FormatMask::TAG, "tag"),
    (FormatMask::MESSAGE, "message"),
];

impl Default for FormatMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Enabled field names in line order joined by `,`, or `none`.
///
/// The output parses back into the same mask, minus unknown bits.
impl fmt::Display for FormatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = FIELD_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name);
        let Some(first) = names.next() else {
            return f.write_str("none");
        };
        f.write_str(first)?;
        names.try_for_each(|name| write!(f, ",{name}"))
    }
}

impl FromStr for FormatMask {
    type Err = ConfigError;

    /// Parses `all`, `none`, or a list of field names separated by `,` or `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = Self::NONE;
        for name in s.split([',', '|']).map(str::trim).filter(|n| !n.is_empty()) {
            mask |= field_from_name(name)?;
        }
        Ok(mask)
    }
}

/// Resolves a single field name (or the `all`/`none` shorthands).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for unknown names.
pub fn field_from_name(name: &str) -> Result<FormatMask, ConfigError> {
    let field = match name.to_ascii_lowercase().as_str() {
        "all" => FormatMask::ALL,
        "none" => FormatMask::NONE,
        "date" => FormatMask::DATE,
        "time" => FormatMask::TIME,
        "origin" | "file" => FormatMask::ORIGIN,
        "tag" | "level" => FormatMask::TAG,
        "message" | "msg" => FormatMask::MESSAGE,
        _ => {
            return Err(ConfigError::InvalidValue {
                field: "format".to_owned(),
                value: name.to_owned(),
                expected: "all, none, date, time, origin, tag or message".to_owned(),
            });
        }
    };
    Ok(field)
}

/// Source location a record was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    /// Source file name.
    pub file: &'static str,
    /// One-based line number.
    pub line: u32,
}

impl Origin {
    /// Usually built by the `origin!` macro from `file!()` and `line!()`.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Everything needed to render one line.
///
/// The message is kept as [`fmt::Arguments`] so it is only expanded when a
/// line is actually rendered.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Local wall-clock time, captured once per emission.
    pub timestamp: NaiveDateTime,
    pub origin: Origin,
    /// Severity of the call, not the threshold.
    pub level: Level,
    /// Unexpanded message; expanded straight into the line buffer.
    pub message: fmt::Arguments<'a>,
}

/// Appends the line for `record` to `out`, newline included.
///
/// A `Display` impl that fails while expanding the message truncates that
/// field only; the line is still terminated.
pub fn render_line(mask: FormatMask, record: &Record<'_>, out: &mut String) {
    let mut fields = FieldWriter {
        out,
        started: false,
    };

    if mask.contains(FormatMask::DATE) {
        let ts = &record.timestamp;
        fields.field(format_args!(
            "{:04}-{:02}-{:02}",
            ts.year(),
            ts.month(),
            ts.day()
        ));
    }
    if mask.contains(FormatMask::TIME) {
        let ts = &record.timestamp;
        fields.field(format_args!(
            "{:02}:{:02}:{:02}",
            ts.hour(),
            ts.minute(),
            ts.second()
        ));
    }
    if mask.contains(FormatMask::ORIGIN) {
        fields.field(format_args!("{}", record.origin));
    }
    if mask.contains(FormatMask::TAG) {
        fields.field(format_args!("{}", record.level.tag()));
    }
    if mask.contains(FormatMask::MESSAGE) {
        fields.field(record.message);
    }

    fields.out.push('\n');
}

/// Renders `record` into a fresh string.
#[must_use]
pub fn render(mask: FormatMask, record: &Record<'_>) -> String {
    let mut out = String::with_capacity(128);
    render_line(mask, record, &mut out);
    out
}

struct FieldWriter<'o> {
    out: &'o mut String,
    started: bool,
}

impl FieldWriter<'_> {
    fn field(&mut self, value: fmt::Arguments<'_>) {
        if self.started {
            self.out.push_str("- ");
        }
        self.started = true;
        let _ = self.out.write_fmt(value);
        self.out.push(' ');
    }
}
