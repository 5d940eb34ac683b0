use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::set::Set;

/// Renders the members as comma-separated ascending runs: `{1..3, 5}`.
///
/// Runs of two or more consecutive members print as `lo..hi`, both ends
/// included; single members print bare. The empty set prints as `{}`.
impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, run) in self.runs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let (lo, hi) = run.into_inner();
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}..{hi}")?;
            }
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parses the form produced by `Display`.
///
/// Elements and runs may come in any order and may overlap.
impl FromStr for Set {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| Error::MissingBraces {
                input: s.to_string(),
            })?;

        let mut set = Set::new();
        if inner.trim().is_empty() {
            return Ok(set);
        }

        for item in inner.split(',') {
            match item.split_once("..") {
                Some((lo, hi)) => {
                    let (lo, hi) = (parse_integer(lo)?, parse_integer(hi)?);
                    if lo > hi {
                        return Err(Error::DescendingRun { lo, hi });
                    }
                    set.insert_range(lo..=hi);
                }
                None => {
                    set.insert(parse_integer(item)?);
                }
            }
        }

        Ok(set)
    }
}

fn parse_integer(token: &str) -> Result<usize> {
    let token = token.trim();
    token.parse().map_err(|source| Error::InvalidInteger {
        token: token.to_string(),
        source,
    })
}
