//! Date/time pattern translation.
//!
//! Rule declarations write date patterns in the `yyyy-MM-dd HH:mm:ss` letter
//! language. [`DatePattern`] translates such a pattern once into a `chrono`
//! format string plus an anchored shape expression, so values can be parsed
//! into a comparable [`NaiveDateTime`].
//!
//! | Letter | Meaning              | chrono | Shape |
//! |--------|----------------------|--------|-------|
//! | `y` `u`| year (`yy` = 2-digit)| `%Y` / `%y` | `yyyy` exactly 4 digits, `yy` exactly 2 |
//! | `M`    | month (`MMM` name)   | `%m` / `%b` / `%B` | `MM` exactly 2 digits, `M` 1-2 |
//! | `d`    | day of month         | `%d` | as `M` |
//! | `E`    | weekday name         | `%a` / `%A` | letters |
//! | `H` `k`| hour 0-23            | `%H` | as `M` |
//! | `h` `K`| hour 1-12            | `%I` | as `M` |
//! | `a`    | am/pm marker         | `%p` | letters |
//! | `m`    | minute               | `%M` | as `M` |
//! | `s`    | second               | `%S` | as `M` |
//! | `S`    | fraction of second   | `%3f` / `%6f` / `%9f` / `%f` | one digit per letter |
//!
//! Text in single quotes is literal; `''` is a literal quote.
//!
//! Resolution:
//! - A pattern needs date fields. Time-only patterns do not compile.
//! - Without time fields a value is anchored to start of day.
//! - A missing minute or second is zero, so `yyyy-MM-dd HH` reads `10` as `10:00`.
//! - A day of 29-31 past the end of its month is clamped to the last day
//!   (`2023-02-30` reads as `2023-02-28`). Month 13 or day 32 never parse.
//! - Two-digit years fall in 2000-2099.
//! - Leap seconds (`:60`) are rejected.

use std::fmt;

use chrono::format::{Parsed, StrftimeItems, parse as parse_items};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Errors raised while compiling a date pattern or its bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern uses a letter with no translation.
    #[error("unsupported pattern letter '{letter}' in \"{pattern}\"")]
    UnknownLetter {
        /// The offending letter.
        letter: char,
        /// The full pattern.
        pattern: String,
    },

    /// A quoted literal is never closed.
    #[error("unterminated quote in \"{pattern}\"")]
    UnterminatedQuote {
        /// The full pattern.
        pattern: String,
    },

    /// The pattern carries neither date nor time fields.
    #[error("pattern \"{pattern}\" has no date or time fields")]
    NoFields {
        /// The full pattern.
        pattern: String,
    },

    /// The pattern carries time fields but no date fields.
    #[error("pattern \"{pattern}\" has no date fields")]
    TimeOnly {
        /// The full pattern.
        pattern: String,
    },

    /// The pattern's shape expression exceeds the regex size limit.
    #[error("pattern \"{pattern}\" is too long")]
    TooLong {
        /// The full pattern.
        pattern: String,
    },

    /// A range bound does not parse with the pattern.
    #[error("bound \"{bound}\" does not match pattern \"{pattern}\"")]
    InvalidBound {
        /// The bound text.
        bound: String,
        /// The full pattern.
        pattern: String,
    },
}

/// Errors raised while parsing a value with a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    /// The value does not have the pattern's shape.
    #[error("\"{value}\" does not match pattern \"{pattern}\"")]
    Shape {
        /// The rejected value.
        value: String,
        /// The full pattern.
        pattern: String,
    },

    /// chrono rejected a field.
    #[error(transparent)]
    Field(#[from] chrono::ParseError),

    /// The fields do not name one calendar date-time.
    #[error("\"{value}\" does not name a valid date-time")]
    Unresolved {
        /// The rejected value.
        value: String,
    },
}

/// Which calendar fields a pattern carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Date fields only; values are anchored to start of day.
    Date,
    /// Both date and time fields.
    DateTime,
}

/// A compiled date pattern.
///
/// # Examples
///
/// ```
/// use sentinel_validator::validators::{DatePattern, PatternKind};
///
/// let pattern = DatePattern::compile("yyyy-MM-dd").unwrap();
/// assert_eq!(pattern.kind(), PatternKind::Date);
/// assert_eq!(pattern.chrono_format(), "%Y-%m-%d");
///
/// let midnight = pattern.parse("2025-01-01").unwrap();
/// assert_eq!(midnight.to_string(), "2025-01-01 00:00:00");
/// assert!(pattern.parse("2025-1-1").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DatePattern {
    source: String,
    format: String,
    shape: Regex,
    kind: PatternKind,
}

impl DatePattern {
    /// Translates `pattern` into a chrono format and a shape expression.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] on unknown letters, an unterminated quote, or
    /// a pattern without date fields.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut shape = String::from("^");
        let mut has_date = false;
        let mut has_time = false;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut format, &mut shape, '\'');
                    continue;
                }
                loop {
                    match chars.next() {
                        Some('\'') if chars.peek() == Some(&'\'') => {
                            chars.next();
                            push_literal(&mut format, &mut shape, '\'');
                        }
                        Some('\'') => break,
                        Some(literal) => push_literal(&mut format, &mut shape, literal),
                        None => {
                            return Err(PatternError::UnterminatedQuote {
                                pattern: pattern.to_string(),
                            });
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut format, &mut shape, c);
                continue;
            }

            let mut count = 1_usize;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }

            let (directive, field_shape) = match c {
                'y' | 'u' if count == 2 => ("%y", digits(2, 2)),
                'y' | 'u' if count >= 4 => ("%Y", digits(count, count)),
                'y' | 'u' => ("%Y", digits(count, 9)),
                'M' if count >= 4 => ("%B", LETTERS.to_string()),
                'M' if count == 3 => ("%b", LETTERS.to_string()),
                'E' if count >= 4 => ("%A", LETTERS.to_string()),
                'E' => ("%a", LETTERS.to_string()),
                'a' => ("%p", LETTERS.to_string()),
                'M' | 'd' | 'H' | 'k' | 'h' | 'K' | 'm' | 's' => {
                    let directive = match c {
                        'M' => "%m",
                        'd' => "%d",
                        'H' | 'k' => "%H",
                        'h' | 'K' => "%I",
                        'm' => "%M",
                        _ => "%S",
                    };
                    let width = if count == 1 { digits(1, 2) } else { digits(2, 2) };
                    (directive, width)
                }
                'S' => {
                    let directive = match count {
                        3 => "%3f",
                        6 => "%6f",
                        9 => "%9f",
                        _ => "%f",
                    };
                    (directive, digits(count, count))
                }
                letter => {
                    return Err(PatternError::UnknownLetter {
                        letter,
                        pattern: pattern.to_string(),
                    });
                }
            };
            format.push_str(directive);
            shape.push_str(&field_shape);

            match c {
                'y' | 'u' | 'M' | 'd' | 'E' => has_date = true,
                _ => has_time = true,
            }
        }
        shape.push('$');

        let kind = match (has_date, has_time) {
            (true, true) => PatternKind::DateTime,
            (true, false) => PatternKind::Date,
            (false, true) => {
                return Err(PatternError::TimeOnly {
                    pattern: pattern.to_string(),
                });
            }
            (false, false) => {
                return Err(PatternError::NoFields {
                    pattern: pattern.to_string(),
                });
            }
        };

        let shape = Regex::new(&shape).map_err(|_| PatternError::TooLong {
            pattern: pattern.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            format,
            shape,
            kind,
        })
    }

    /// The pattern as declared.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The translated chrono format string.
    #[must_use]
    pub fn chrono_format(&self) -> &str {
        &self.format
    }

    /// Which calendar fields the pattern carries.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Parses `value` into a comparable date-time.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] when `value` does not have the pattern's
    /// shape, a field is out of range, or the fields do not resolve to one
    /// date-time.
    pub fn parse(&self, value: &str) -> Result<NaiveDateTime, DateParseError> {
        if !self.shape.is_match(value) {
            return Err(DateParseError::Shape {
                value: value.to_string(),
                pattern: self.source.clone(),
            });
        }

        let mut parsed = Parsed::new();
        parse_items(&mut parsed, value, StrftimeItems::new(&self.format))?;

        let unresolved = || DateParseError::Unresolved {
            value: value.to_string(),
        };
        let date = resolve_date(&parsed).ok_or_else(unresolved)?;
        let time = match self.kind {
            PatternKind::Date => NaiveTime::MIN,
            PatternKind::DateTime => resolve_time(&parsed).ok_or_else(unresolved)?,
        };
        Ok(date.and_time(time))
    }
}

impl PartialEq for DatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for DatePattern {}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

const LETTERS: &str = r"\p{L}+";

fn digits(min: usize, max: usize) -> String {
    if min == max {
        format!("[0-9]{{{min}}}")
    } else {
        format!("[0-9]{{{min},{max}}}")
    }
}

fn push_literal(format: &mut String, shape: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
    shape.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

fn resolve_date(parsed: &Parsed) -> Option<NaiveDate> {
    let year = match (parsed.year(), parsed.year_mod_100()) {
        (Some(year), _) => year,
        (None, Some(short)) => 2000 + short,
        (None, None) => return None,
    };
    let month = parsed.month()?;
    let day = parsed.day()?;

    let date = NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        (28..day)
            .rev()
            .find_map(|last| NaiveDate::from_ymd_opt(year, month, last))
    })?;

    match parsed.weekday() {
        Some(weekday) if weekday != date.weekday() => None,
        _ => Some(date),
    }
}

fn resolve_time(parsed: &Parsed) -> Option<NaiveTime> {
    let hour = parsed.hour_div_12()? * 12 + parsed.hour_mod_12()?;
    let minute = parsed.minute().unwrap_or(0);
    let second = parsed.second().unwrap_or(0);
    let nanosecond = parsed.nanosecond().unwrap_or(0);
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond)
}

// ============================================================================
// TESTS
// ============================================================================
