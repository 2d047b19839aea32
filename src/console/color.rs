//! Colors: ordered attribute lists rendered as one escape directive.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::console::attribute::Attribute;
use crate::console::template::{format_template, Arg};

/// The escape character that opens every control sequence.
pub const ESCAPE: char = '\x1b';

/// A console color. Every color may carry several attributes, e.g. a
/// foreground color plus an emphasis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color {
    attributes: Vec<Attribute>,
}

impl Color {
    /// Create a color from an ordered list of attributes.
    pub fn new<I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    /// A color with no attributes. Wrapping with it still appends a reset.
    pub fn plain() -> Self {
        Self::default()
    }

    /// 256-color palette foreground (`38;5;n`).
    pub fn fg_256(index: u8) -> Self {
        Self::new([Attribute::FG_EXTENDED, Attribute(5), Attribute(index.into())])
    }

    /// 24-bit foreground (`38;2;r;g;b`).
    pub fn fg_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new([
            Attribute::FG_EXTENDED,
            Attribute(2),
            Attribute(r.into()),
            Attribute(g.into()),
            Attribute(b.into()),
        ])
    }

    /// Returns a copy of this color with `attribute` appended.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// The parameter string of the escape sequence, without the leading
    /// `ESC[` and the trailing `m`. Empty when there are no attributes.
    pub fn escape_sequence(&self) -> String {
        let mut sequence = String::with_capacity(self.attributes.len() * 3);
        for (index, attribute) in self.attributes.iter().enumerate() {
            if index > 0 {
                sequence.push(';');
            }
            let _ = write!(sequence, "{}", attribute.code());
        }
        sequence
    }

    /// Appends `ESC[<seq>m<message>ESC[0m` to `out`.
    pub(crate) fn wrap_into<D: fmt::Display + ?Sized>(&self, out: &mut String, message: &D) {
        let _ = write!(
            out,
            "{ESCAPE}[{}m{message}{ESCAPE}[{}m",
            self.escape_sequence(),
            Attribute::RESET.code(),
        );
    }

    /// Formats `args` and wraps the result in this color, reset included.
    ///
    /// ```
    /// use tintlog::console::{Attribute, Color};
    ///
    /// let red = Color::new([Attribute::BOLD, Attribute::FG_RED]);
    /// assert_eq!(red.wrap(format_args!("{}!", "hi")), "\x1b[1;31mhi!\x1b[0m");
    /// ```
    pub fn wrap(&self, args: fmt::Arguments<'_>) -> String {
        let mut out = String::new();
        self.wrap_into(&mut out, &args);
        out
    }

    /// Like [`wrap`](Self::wrap) for a template only known at run time.
    /// Mismatched arguments are rendered inline instead of failing.
    pub fn wrap_template(&self, template: &str, args: &[Arg<'_>]) -> String {
        let message = format_template(template, args);
        let mut out = String::new();
        self.wrap_into(&mut out, message.as_str());
        out
    }

    /// Writes the wrapped message to `sink` with a single `write_all`, so the
    /// opening and closing sequences can never be split by another writer.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W, args: fmt::Arguments<'_>) -> io::Result<()> {
        sink.write_all(self.wrap(args).as_bytes())
    }

    /// Writes the wrapped message to standard output (no newline).
    pub fn print(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, args)?;
        handle.flush()
    }

    /// Returns a wrapper bound to this color.
    ///
    /// ```
    /// use tintlog::console::{Attribute, Color};
    ///
    /// let green = Color::new([Attribute::FG_GREEN]).wrap_fn();
    /// assert_eq!(green(format_args!("ok")), "\x1b[32mok\x1b[0m");
    /// ```
    pub fn wrap_fn(&self) -> impl Fn(fmt::Arguments<'_>) -> String + Send + Sync + 'static {
        let color = self.clone();
        move |args| color.wrap(args)
    }

    /// Returns a printer to standard output bound to this color. Write
    /// errors are dropped.
    pub fn print_fn(&self) -> impl Fn(fmt::Arguments<'_>) + Send + Sync + 'static {
        self.print_to_fn(io::stdout())
    }

    /// Returns a printer bound to this color and `sink`. Each call is one
    /// `write_all` followed by a flush; write errors are dropped.
    pub fn print_to_fn<W>(&self, sink: W) -> impl Fn(fmt::Arguments<'_>) + Send + Sync + 'static
    where
        W: Write + Send + 'static,
    {
        let color = self.clone();
        let sink = Mutex::new(sink);
        move |args| {
            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            if color.write_to(&mut *sink, args).is_ok() {
                let _ = sink.flush();
            }
        }
    }
}

impl From<Attribute> for Color {
    fn from(attribute: Attribute) -> Self {
        Self::new([attribute])
    }
}

impl FromIterator<Attribute> for Color {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self::new(iter)
    }
}
