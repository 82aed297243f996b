//! Algebraic cell labels.
//!
//! Rectangular boards label a cell with its column letter(s) followed by its
//! row number. Columns use bijective base-26 (`a`..`z`, `aa`, `ab`, ..) so
//! boards wider than 26 columns still get unique labels. Rows count up from
//! the bottom of the board, so the zero-based `y = 0` (top row) on a board of
//! height 9 is row `9`.

use crate::GeometryError;
use std::cmp::Ordering;
use tracing::instrument;

/// Returns the column letters for a zero-based column index.
pub fn column_label(x: usize) -> String {
    let mut n = x + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'a' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Parses column letters back into a zero-based column index.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for b in letters.bytes() {
        if !b.is_ascii_lowercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add((b - b'a') as usize + 1)?;
    }
    Some(n - 1)
}

/// Splits a label into its leading letters and trailing row number.
///
/// Rejects empty parts, leading zeroes, and anything that is not
/// lowercase ASCII letters followed by ASCII digits.
pub fn split_label(label: &str) -> Option<(&str, usize)> {
    let split = label.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = label.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((letters, digits.parse().ok()?))
}

/// Converts zero-based coordinates into an algebraic label.
#[instrument(level = "trace")]
pub fn coords_to_algebraic(x: usize, y: usize, width: usize, height: usize) -> Result<String, GeometryError> {
    if x >= width || y >= height {
        return Err(GeometryError::out_of_bounds(x, y));
    }
    Ok(format!("{}{}", column_label(x), height - y))
}

/// Converts an algebraic label into zero-based coordinates.
#[instrument(level = "trace")]
pub fn algebraic_to_coords(label: &str, width: usize, height: usize) -> Result<(usize, usize), GeometryError> {
    let (letters, row) = split_label(label).ok_or_else(|| GeometryError::malformed(label))?;
    let x = column_index(letters).ok_or_else(|| GeometryError::malformed(label))?;
    if x >= width || row == 0 || row > height {
        return Err(GeometryError::malformed(label));
    }
    Ok((x, height - row))
}

/// Natural ordering for labels.
///
/// Labels are compared run by run: digit runs numerically, letter runs by
/// length and then alphabetically, anything else byte-wise. This keeps
/// `a2` before `a10` and `z1` before `aa1`, which is what move lists expect.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let ra = runs(a);
    let rb = runs(b);
    for (x, y) in ra.iter().zip(rb.iter()) {
        let ord = match (x, y) {
            (Run::Digits(p), Run::Digits(q)) => {
                let p = p.trim_start_matches('0');
                let q = q.trim_start_matches('0');
                p.len().cmp(&q.len()).then_with(|| p.cmp(q))
            }
            (Run::Letters(p), Run::Letters(q)) => p.len().cmp(&q.len()).then_with(|| p.cmp(q)),
            (Run::Other(p), Run::Other(q)) => p.cmp(q),
            _ => x.rank().cmp(&y.rank()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len()).then_with(|| a.cmp(b))
}

/// Sorts labels in place with [`compare_labels`].
pub fn sort_labels<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by(|a, b| compare_labels(a.as_ref(), b.as_ref()));
}

enum Run<'a> {
    Digits(&'a str),
    Letters(&'a str),
    Other(&'a str),
}

impl Run<'_> {
    fn rank(&self) -> u8 {
        match self {
            Run::Other(_) => 0,
            Run::Letters(_) => 1,
            Run::Digits(_) => 2,
        }
    }
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let bytes = s.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        let class = byte_class(bytes[start]);
        let mut end = start + 1;
        while end < bytes.len() && byte_class(bytes[end]) == class {
            end += 1;
        }
        let part = &s[start..end];
        out.push(match class {
            2 => Run::Digits(part),
            1 => Run::Letters(part),
            _ => Run::Other(part),
        });
        start = end;
    }
    out
}

fn byte_class(b: u8) -> u8 {
    if b.is_ascii_digit() {
        2
    } else if b.is_ascii_alphabetic() {
        1
    } else {
        0
    }
}
