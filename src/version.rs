// src/version.rs
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::StartupError;

/// A semantic version: `major.minor.patch[-pre.release][+build]`.
///
/// Build metadata is kept for display but ignored by equality and ordering.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Vec<String>,
    pub build: Option<String>,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, StartupError> {
        let invalid = |reason: &str| StartupError::InvalidVersion {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let mut p = Parser::new(input.trim());

        let major = p.parse_number().map_err(|e| invalid(e.as_str()))?;
        p.expect('.').map_err(|e| invalid(e.as_str()))?;
        let minor = p.parse_number().map_err(|e| invalid(e.as_str()))?;
        p.expect('.').map_err(|e| invalid(e.as_str()))?;
        let patch = p.parse_number().map_err(|e| invalid(e.as_str()))?;

        let mut pre_release = Vec::new();
        if p.consume_char('-') {
            pre_release = p.parse_dotted().map_err(|e| invalid(e.as_str()))?;
            if pre_release.iter().any(|id| is_padded_number(id)) {
                return Err(invalid("leading zero in pre-release"));
            }
        }
        let build = if p.consume_char('+') {
            let ids = p.parse_dotted().map_err(|e| invalid(e.as_str()))?;
            Some(ids.join("."))
        } else {
            None
        };
        if !p.eof() {
            return Err(invalid("trailing input"));
        }

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
            build,
        })
    }
}

impl FromStr for Version {
    type Err = StartupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release.join("."))?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| cmp_pre_release(&self.pre_release, &other.pre_release))
    }
}

fn is_padded_number(id: &str) -> bool {
    id.len() > 1 && id.starts_with('0') && id.bytes().all(|b| b.is_ascii_digit())
}

// A release sorts after any of its pre-releases.
fn cmp_pre_release(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    for (x, y) in a.iter().zip(b) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(nx), Ok(ny)) => nx.cmp(&ny),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    fn parse_number(&mut self) -> Result<u64, String> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else {
                break;
            }
        }
        let digits = &self.s[start..self.i];
        if digits.is_empty() {
            return Err("number expected".into());
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err("leading zero".into());
        }
        digits.parse::<u64>().map_err(|_| "number out of range".into())
    }

    fn parse_identifier(&mut self) -> Result<String, String> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c == '-' || c.is_ascii_alphanumeric() {
                self.i += 1;
            } else {
                break;
            }
        }
        if self.i == start {
            return Err("identifier expected".into());
        }
        Ok(self.s[start..self.i].to_string())
    }

    // One or more identifiers separated by '.'.
    fn parse_dotted(&mut self) -> Result<Vec<String>, String> {
        let mut ids = vec![self.parse_identifier()?];
        while self.consume_char('.') {
            ids.push(self.parse_identifier()?);
        }
        Ok(ids)
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(format!("expected '{c}'"))
        }
    }

    fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
