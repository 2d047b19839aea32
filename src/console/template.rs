//! Runtime `%`-directive templates.
//!
//! Compile-time messages go through `format_args!`; this module covers
//! templates that only exist at run time (CLI input, config files). Rendering
//! never fails: problems are written inline where they occur.
//!
//! | Situation              | Rendered as               |
//! |------------------------|---------------------------|
//! | missing argument       | `%!d(MISSING)`            |
//! | wrong kind / bad verb  | `%!d(string=abc)`         |
//! | `%` at end of template | `%!(NOVERB)`              |
//! | unused arguments       | `%!(EXTRA int=1, bool=true)` |

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::Chars;

/// Width and precision are clamped to this value.
const MAX_WIDTH: usize = 1 << 12;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// One template argument.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// Wrap any displayable value.
    pub fn display(value: &'a dyn fmt::Display) -> Self {
        Arg::Display(value)
    }

    /// Name of the argument kind used in inline diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Float(_) => "float64",
            Arg::Bool(_) => "bool",
            Arg::Char(_) => "char",
            Arg::Display(_) => "value",
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Uint(n) => write!(f, "{n}"),
            Arg::Float(x) => write!(f, "{x}"),
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::Char(c) => write!(f, "{c}"),
            Arg::Display(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Arg::Str(s.as_str())
    }
}

impl<'a> From<&'a Cow<'a, str>> for Arg<'a> {
    fn from(s: &'a Cow<'a, str>) -> Self {
        Arg::Str(s.as_ref())
    }
}

macro_rules! arg_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )+
    };
}

arg_from!(Int as i64: i8, i16, i32, i64, isize);
arg_from!(Uint as u64: u8, u16, u32, u64, usize);
arg_from!(Float as f64: f32, f64);

impl From<bool> for Arg<'_> {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

#[derive(Debug, Default)]
struct Directive {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Substitute `args` into `template`.
///
/// Supported verbs: `%v %s %q %d %x %X %o %b %f %e %t %c` and `%%`, with the
/// flags `-`, `+`, ` ` and `0`, a width and a `.precision`.
pub fn format_template(template: &str, args: &[Arg<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.left = true,
                '+' => directive.plus = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                _ => break,
            }
            chars.next();
        }
        directive.width = parse_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            directive.precision = Some(parse_number(&mut chars).unwrap_or(0));
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                render(&mut out, verb, &directive, arg);
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }

    if let Some(extra) = args.get(next_arg..).filter(|rest| !rest.is_empty()) {
        out.push_str("%!(EXTRA ");
        for (index, arg) in extra.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{arg:?}");
        }
        out.push(')');
    }

    out
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let current = value.unwrap_or(0);
        value = Some((current * 10 + digit as usize).min(MAX_WIDTH));
    }
    value
}

fn render(out: &mut String, verb: char, directive: &Directive, arg: &Arg<'_>) {
    let rendered = match verb {
        'v' => match arg {
            Arg::Int(n) => Some(signed(*n < 0, n.unsigned_abs().to_string(), directive)),
            Arg::Uint(n) => Some(signed(false, n.to_string(), directive)),
            Arg::Float(x) => Some(float(*x, 'v', directive)),
            _ => Some(text(arg.to_string(), directive)),
        },
        's' => match arg {
            Arg::Str(_) | Arg::Display(_) | Arg::Char(_) => Some(text(arg.to_string(), directive)),
            _ => None,
        },
        'q' => match arg {
            Arg::Str(s) => Some(Rendered::text(format!("{s:?}"))),
            Arg::Char(c) => Some(Rendered::text(format!("{c:?}"))),
            Arg::Display(d) => Some(Rendered::text(format!("{:?}", d.to_string()))),
            _ => None,
        },
        'd' | 'x' | 'X' | 'o' | 'b' => match arg {
            Arg::Int(n) => radix(verb, n.unsigned_abs()).map(|d| signed(*n < 0, d, directive)),
            Arg::Uint(n) => radix(verb, *n).map(|d| signed(false, d, directive)),
            Arg::Str(s) if verb == 'x' || verb == 'X' => Some(Rendered::text(hex_bytes(s, verb))),
            _ => None,
        },
        'f' | 'e' => match arg {
            Arg::Float(x) => Some(float(*x, verb, directive)),
            _ => None,
        },
        't' => match arg {
            Arg::Bool(b) => Some(Rendered::text(b.to_string())),
            _ => None,
        },
        'c' => match arg {
            Arg::Char(c) => Some(Rendered::text(c.to_string())),
            Arg::Int(n) => Some(Rendered::text(code_point(u32::try_from(*n).ok()).to_string())),
            Arg::Uint(n) => Some(Rendered::text(code_point(u32::try_from(*n).ok()).to_string())),
            _ => None,
        },
        _ => None,
    };

    match rendered {
        Some(rendered) => rendered.pad_into(out, directive),
        None => {
            let _ = write!(out, "%!{verb}({arg:?})");
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Fill {
    /// Zeros pad from the left edge.
    Text,
    /// Zeros pad after the sign.
    Signed,
    /// Spaces only (`Inf`, `NaN`).
    Spaces,
}

struct Rendered {
    body: String,
    fill: Fill,
}

impl Rendered {
    fn text(body: String) -> Self {
        Self { body, fill: Fill::Text }
    }

    fn pad_into(self, out: &mut String, directive: &Directive) {
        let len = self.body.chars().count();
        let fill = directive.width.unwrap_or(0).saturating_sub(len);
        if fill == 0 {
            out.push_str(&self.body);
        } else if directive.left {
            out.push_str(&self.body);
            out.extend(std::iter::repeat(' ').take(fill));
        } else if directive.zero && self.fill != Fill::Spaces {
            let sign_len = self
                .body
                .chars()
                .next()
                .filter(|c| self.fill == Fill::Signed && matches!(c, '-' | '+' | ' '))
                .map_or(0, char::len_utf8);
            out.push_str(&self.body[..sign_len]);
            out.extend(std::iter::repeat('0').take(fill));
            out.push_str(&self.body[sign_len..]);
        } else {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(&self.body);
        }
    }
}

fn text(body: String, directive: &Directive) -> Rendered {
    match directive.precision {
        Some(max) => Rendered::text(body.chars().take(max).collect()),
        None => Rendered::text(body),
    }
}

fn signed(negative: bool, digits: String, directive: &Directive) -> Rendered {
    let sign = if negative {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    };
    Rendered {
        body: format!("{sign}{digits}"),
        fill: Fill::Signed,
    }
}

fn radix(verb: char, magnitude: u64) -> Option<String> {
    match verb {
        'd' => Some(magnitude.to_string()),
        'x' => Some(format!("{magnitude:x}")),
        'X' => Some(format!("{magnitude:X}")),
        'o' => Some(format!("{magnitude:o}")),
        'b' => Some(format!("{magnitude:b}")),
        _ => None,
    }
}

fn float(value: f64, verb: char, directive: &Directive) -> Rendered {
    if !value.is_finite() {
        let body = if value.is_nan() {
            "NaN"
        } else if value.is_sign_negative() {
            "-Inf"
        } else {
            "+Inf"
        };
        return Rendered {
            body: body.to_string(),
            fill: Fill::Spaces,
        };
    }
    let magnitude = value.abs();
    let digits = match (verb, directive.precision) {
        ('v', None) => magnitude.to_string(),
        ('e', precision) => exponent(magnitude, precision.unwrap_or(DEFAULT_FLOAT_PRECISION)),
        (_, precision) => format!("{:.*}", precision.unwrap_or(DEFAULT_FLOAT_PRECISION), magnitude),
    };
    signed(value.is_sign_negative() && value != 0.0, digits, directive)
}

/// `1.500000e+03` rather than Rust's `1.5e3`.
fn exponent(magnitude: f64, precision: usize) -> String {
    let raw = format!("{magnitude:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}

fn hex_bytes(s: &str, verb: char) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        let _ = if verb == 'X' {
            write!(out, "{byte:02X}")
        } else {
            write!(out, "{byte:02x}")
        };
    }
    out
}

fn code_point(value: Option<u32>) -> char {
    value
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(template: &str, args: &[Arg<'_>]) -> String {
        format_template(template, args)
    }

    #[test]
    fn test_basic_substitution() {
        assert_eq!(fmt("hello %s", &["world".into()]), "hello world");
        assert_eq!(fmt("%d items, %v ok", &[3.into(), true.into()]), "3 items, true ok");
        assert_eq!(fmt("100%% done", &[]), "100% done");
        assert_eq!(fmt("no directives", &[]), "no directives");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(fmt("%x %X %o %b", &[255.into(), 255u8.into(), 8.into(), 5.into()]), "ff FF 10 101");
        assert_eq!(fmt("%d", &[(-42i32).into()]), "-42");
        assert_eq!(fmt("%x", &[(-255i64).into()]), "-ff");
        assert_eq!(fmt("%+d % d", &[7.into(), 7.into()]), "+7  7");
        assert_eq!(fmt("%.2f", &[1.23456.into()]), "1.23");
        assert_eq!(fmt("%f", &[1.5.into()]), "1.500000");
        assert_eq!(fmt("%e", &[1500.0.into()]), "1.500000e+03");
        assert_eq!(fmt("%.1e", &[0.00025.into()]), "2.5e-04");
        assert_eq!(fmt("%v", &[2.5f32.into()]), "2.5");
    }

    #[test]
    fn test_width_and_flags() {
        assert_eq!(fmt("[%5d]", &[42.into()]), "[   42]");
        assert_eq!(fmt("[%-5d]", &[42.into()]), "[42   ]");
        assert_eq!(fmt("[%05d]", &[(-42).into()]), "[-0042]");
        assert_eq!(fmt("[%6s]", &["ab".into()]), "[    ab]");
        assert_eq!(fmt("[%06s]", &["ab".into()]), "[0000ab]");
        assert_eq!(fmt("[%-06s]", &["ab".into()]), "[ab    ]");
        assert_eq!(fmt("[%04s]", &[" x".into()]), "[00 x]");
        assert_eq!(fmt("[%+06d]", &[7.into()]), "[+00007]");
        assert_eq!(fmt("[%06f]", &[f64::INFINITY.into()]), "[  +Inf]");
        assert_eq!(fmt("[%v]", &[f64::NAN.into()]), "[NaN]");
        assert_eq!(fmt("[%.3s]", &["abcdef".into()]), "[abc]");
        assert_eq!(fmt("[%-4s|]", &["é".into()]), "[é   |]");
    }

    #[test]
    fn test_other_verbs() {
        assert_eq!(fmt("%q", &["a\"b".into()]), r#""a\"b""#);
        assert_eq!(fmt("%t", &[false.into()]), "false");
        assert_eq!(fmt("%c%c", &['h'.into(), 105u32.into()]), "hi");
        assert_eq!(fmt("%x", &["hi".into()]), "6869");
        let owned = String::from("shown");
        let path = std::path::Path::new("/tmp/x");
        assert_eq!(
            fmt("%s %v", &[(&owned).into(), Arg::display(&path.display())]),
            "shown /tmp/x"
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(fmt("%s and %d", &["one".into()]), "one and %!d(MISSING)");
        assert_eq!(fmt("%v", &[]), "%!v(MISSING)");
    }

    #[test]
    fn test_extra_arguments() {
        assert_eq!(
            fmt("only %s", &["a".into(), 1.into(), "b".into()]),
            "only a%!(EXTRA int=1, string=b)"
        );
        assert_eq!(fmt("", &[true.into()]), "%!(EXTRA bool=true)");
    }

    #[test]
    fn test_wrong_kind_and_unknown_verb() {
        assert_eq!(fmt("%d", &["abc".into()]), "%!d(string=abc)");
        assert_eq!(fmt("%t", &[1.into()]), "%!t(int=1)");
        assert_eq!(fmt("%z", &[3.into()]), "%!z(int=3)");
        assert_eq!(fmt("%f", &[2.into()]), "%!f(int=2)");
    }

    #[test]
    fn test_dangling_percent() {
        assert_eq!(fmt("50%", &[]), "50%!(NOVERB)");
        assert_eq!(fmt("50%-5", &[]), "50%!(NOVERB)");
    }

    #[test]
    fn test_huge_width_is_clamped() {
        let out = fmt("%99999999999999999999d", &[1.into()]);
        assert_eq!(out.len(), MAX_WIDTH);
    }
}
