//! A very simplistic parser for plain-text two-line element catalogs.
//!
//! Catalogs are read strictly as consecutive line triplets (name, line 1,
//! line 2). Blank lines count as lines. A trailing partial entry is left
//! unconsumed in the returned remainder rather than treated as an error.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    combinator::{eof, not},
    error::ErrorKind,
    multi::fold_many0,
};
use satmap_types::prelude::*;

pub type Result<I, O, E = TleParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TleParseError<I> {
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// Parse every complete triplet of lines, in file order.
///
/// The remainder holds the 1 or 2 trailing lines of an incomplete entry, if any.
pub fn parse_tle_catalog(catalog: &str) -> Result<&str, Vec<UnstructuredTle>> {
    fold_many0(tle, Vec::new, |mut tles: Vec<UnstructuredTle>, tle| {
        tles.push(tle);
        tles
    })(catalog)
}

/// Number of lines in `s`, counted the way the catalog parser splits them
pub fn count_lines(s: &str) -> usize {
    fold_many0(line, || 0, |n, _| n + 1)(s)
        .map(|(_, n)| n)
        .unwrap_or_default()
}

fn tle(s: &str) -> Result<&str, UnstructuredTle> {
    let (s, name) = line(s)?;
    let (s, line1) = line(s)?;
    let (s, line2) = line(s)?;
    Ok((
        s,
        UnstructuredTle {
            satellite_name: name.trim().to_string(),
            line1: line1.trim_end().to_string(),
            line2: line2.trim_end().to_string(),
        },
    ))
}

/// A single line, terminated by `\r\n`, `\n`, a lone `\r` or the end of input.
/// Never matches empty input so the fold always makes progress.
fn line(s: &str) -> Result<&str, &str> {
    let (s, _) = not(eof)(s)?;
    let (s, content) = take_till(|c: char| c == '\r' || c == '\n')(s)?;
    let (s, _) = alt((tag("\r\n"), tag("\n"), tag("\r"), eof))(s)?;
    Ok((s, content))
}

impl<I> nom::error::ParseError<I> for TleParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        TleParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TLE_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578
        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    #[test]
    fn parse_single_line() {
        assert_eq!(line("GEO1\nrest"), Ok(("rest", "GEO1")));
        assert_eq!(line("GEO1\r\nrest"), Ok(("rest", "GEO1")));
        assert_eq!(line("GEO1"), Ok(("", "GEO1")));
        assert_eq!(line("\nrest"), Ok(("rest", "")));
        assert_eq!(line("GEO1\rrest"), Ok(("rest", "GEO1")));
        assert_eq!(line("\r\rrest"), Ok(("\rrest", "")));
        assert!(line("").is_err());
    }

    #[test]
    fn parse_tle() {
        let (s, tles) = parse_tle_catalog(TLE_SET).unwrap();
        assert!(s.is_empty());
        assert_eq!(tles.len(), 2);
        assert_eq!(tles[0].satellite_name, "GEO1");
        assert_eq!(tles[1].satellite_name, "GEO2");
        assert!(tles[0].line1.starts_with("1 37481U"));
        assert!(tles[1].line2.starts_with("2 39120"));
    }

    #[test]
    fn parse_tle_without_trailing_newline() {
        let (s, tles) = parse_tle_catalog(TLE_SET.trim_end()).unwrap();
        assert!(s.is_empty());
        assert_eq!(tles.len(), 2);
    }

    #[test]
    fn parse_tle_crlf() {
        let crlf = TLE_SET.replace('\n', "\r\n");
        let (s, tles) = parse_tle_catalog(&crlf).unwrap();
        assert!(s.is_empty());
        assert_eq!(tles.len(), 2);
        assert!(!tles[0].line2.ends_with('\r'));
    }

    #[test]
    fn parse_tle_bare_cr() {
        let cr = TLE_SET.replace('\n', "\r");
        let (s, tles) = parse_tle_catalog(&cr).unwrap();
        assert!(s.is_empty());
        assert_eq!(tles.len(), 2);
        assert_eq!(tles[1].satellite_name, "GEO2");
        assert!(tles[1].line2.starts_with("2 39120"));
    }

    #[test]
    fn stray_cr_does_not_end_the_catalog() {
        let catalog = format!("A\r1\n2\n{TLE_SET}");
        assert_eq!(count_lines(&catalog), 9);
        let (s, tles) = parse_tle_catalog(&catalog).unwrap();
        assert!(s.is_empty());
        assert_eq!(tles.len(), 3);
        assert_eq!(tles[0].satellite_name, "A");
        assert_eq!(tles[0].line1, "1");
        assert_eq!(tles[2].satellite_name, "GEO2");
    }

    #[test]
    fn line_counts() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("a"), 1);
        assert_eq!(count_lines("a\n"), 1);
        assert_eq!(count_lines("a\r\nb\rc\n\n"), 4);
        assert_eq!(count_lines(TLE_SET), 6);
    }

    #[test]
    fn trailing_partial_entry_is_dropped() {
        for extra in ["GEO3\n", "GEO3\n1 00000U\n"] {
            let catalog = format!("{TLE_SET}{extra}");
            let (s, tles) = parse_tle_catalog(&catalog).unwrap();
            assert_eq!(tles.len(), 2);
            assert_eq!(s, extra);
            assert_eq!(count_lines(s), count_lines(extra));
        }
    }

    #[test]
    fn blank_lines_count_as_lines() {
        let catalog = "A\n1\n2\n\nB\n1\n2\n";
        let (s, tles) = parse_tle_catalog(catalog).unwrap();
        assert_eq!(tles.len(), 2);
        assert_eq!(tles[1].satellite_name, "");
        assert_eq!(tles[1].line1, "B");
        assert_eq!(tles[1].line2, "1");
        assert_eq!(s, "2\n");
    }

    #[test]
    fn empty_catalog() {
        let (s, tles) = parse_tle_catalog("").unwrap();
        assert!(s.is_empty());
        assert!(tles.is_empty());
    }

    #[test]
    fn name_is_trimmed() {
        let (_, tles) = parse_tle_catalog("GPS BIIR-2  (PRN 13)   \n1\n2\n").unwrap();
        assert_eq!(tles[0].satellite_name, "GPS BIIR-2  (PRN 13)");
    }
}
