//! Layout file: one tile per line, `kind,x,y,z`
//!
//! Reading rules:
//!
//! - Lines that do not split into exactly four comma-separated fields are
//!   skipped (blank lines, comments, stray text).
//! - A four-field line whose field fails to parse, or whose coordinate lies
//!   outside `-MAX_COORD..=MAX_COORD`, fails the whole load.
//! - A file without a single usable line is [`LayoutError::Empty`].
//!
//! Writing emits every record in order and overwrites the file.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::types::{TilePlacement, MAX_COORD};

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// The file does not exist
    #[error("layout file not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read or written
    #[error("layout file I/O error: {0}")]
    Io(#[from] io::Error),

    /// A four-field record holds a value that is not an integer in range
    #[error("line {line}: invalid {field} {value:?}")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// No line held a four-field record
    #[error("layout file has no tile records")]
    Empty,
}

impl LayoutError {
    /// True when the file simply is not there
    pub fn is_absent(&self) -> bool {
        matches!(self, LayoutError::NotFound(_))
    }
}

const FIELD_NAMES: [&str; 4] = ["kind", "x", "y", "z"];

/// Parse layout records from text.
///
/// # Examples
///
/// ```
/// use mahjong_store::parse_layout;
///
/// let tiles = parse_layout("5,0,0,0\nnot a tile\n5,60,0,0\n").unwrap();
/// assert_eq!(tiles.len(), 2);
/// assert_eq!(tiles[1].x, 60);
/// assert!(parse_layout("5,0,zero,0").is_err());
/// ```
pub fn parse_layout(text: &str) -> Result<Vec<TilePlacement>, LayoutError> {
    let mut tiles = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 4 {
            continue;
        }

        let bad = |field: usize| LayoutError::Parse {
            line: i + 1,
            field: FIELD_NAMES[field],
            value: fields[field].to_string(),
        };
        let coord = |field: usize| {
            fields[field]
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|v| v.abs() <= MAX_COORD)
                .ok_or_else(|| bad(field))
        };
        let kind = fields[0].trim().parse().map_err(|_| bad(0))?;
        let x = coord(1)?;
        let y = coord(2)?;
        let z = coord(3)?;

        tiles.push(TilePlacement::new(kind, x, y, z));
    }

    if tiles.is_empty() {
        return Err(LayoutError::Empty);
    }
    Ok(tiles)
}

/// Read and parse a layout file
pub fn load_layout(path: impl AsRef<Path>) -> Result<Vec<TilePlacement>, LayoutError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LayoutError::NotFound(path.to_path_buf()),
        _ => LayoutError::Io(e),
    })?;
    parse_layout(&text)
}

/// Write records as `kind,x,y,z` lines
pub fn write_layout<W: Write>(mut out: W, tiles: &[TilePlacement]) -> io::Result<()> {
    for t in tiles {
        writeln!(out, "{},{},{},{}", t.kind, t.x, t.y, t.z)?;
    }
    out.flush()
}

/// Overwrite `path` with the given records
pub fn save_layout(path: impl AsRef<Path>, tiles: &[TilePlacement]) -> Result<(), LayoutError> {
    let file = fs::File::create(path.as_ref())?;
    write_layout(BufWriter::new(file), tiles)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "\n# pyramid\n1,0,0,0\n1,2,3\n2,60,0,0,9\n2,120,0,1\n";
        let tiles = parse_layout(text).unwrap();
        assert_eq!(
            tiles,
            vec![
                TilePlacement::new(1, 0, 0, 0),
                TilePlacement::new(2, 120, 0, 1)
            ]
        );
    }

    #[test]
    fn test_bad_field_fails_whole_load() {
        let err = parse_layout("1,0,0,0\n1,0,oops,0\n").unwrap_err();
        match err {
            LayoutError::Parse { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "y");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_out_of_range_is_a_parse_error() {
        assert!(matches!(
            parse_layout("300,0,0,0"),
            Err(LayoutError::Parse { field: "kind", .. })
        ));
        assert!(matches!(
            parse_layout("-1,0,0,0"),
            Err(LayoutError::Parse { field: "kind", .. })
        ));
    }

    #[test]
    fn test_coordinates_beyond_bound_are_parse_errors() {
        let edge = format!("1,{},{},{}", -MAX_COORD, MAX_COORD, MAX_COORD);
        assert_eq!(
            parse_layout(&edge).unwrap(),
            vec![TilePlacement::new(1, -MAX_COORD, MAX_COORD, MAX_COORD)]
        );

        match parse_layout("1,0,0,500000000\n1,100,0,0\n").unwrap_err() {
            LayoutError::Parse { line, field, .. } => {
                assert_eq!(line, 1);
                assert_eq!(field, "z");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_layout(&format!("1,{},0,0", -MAX_COORD - 1)),
            Err(LayoutError::Parse { field: "x", .. })
        ));
        assert!(matches!(
            parse_layout(&format!("1,0,{},0", i32::MIN)),
            Err(LayoutError::Parse { field: "y", .. })
        ));
    }

    #[test]
    fn test_whitespace_around_fields_is_tolerated() {
        let tiles = parse_layout("  3, -10 , 20,1  \r\n").unwrap();
        assert_eq!(tiles, vec![TilePlacement::new(3, -10, 20, 1)]);
    }

    #[test]
    fn test_no_usable_line_is_empty() {
        assert!(matches!(parse_layout(""), Err(LayoutError::Empty)));
        assert!(matches!(parse_layout("hello\n\n"), Err(LayoutError::Empty)));
    }

    #[test]
    fn test_write_emits_one_line_per_tile() {
        let mut out = Vec::new();
        write_layout(
            &mut out,
            &[
                TilePlacement::new(7, 0, 80, 0),
                TilePlacement::new(7, -5, 75, 1),
            ],
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7,0,80,0\n7,-5,75,1\n");
    }

    #[test]
    fn test_missing_file_is_absent() {
        let path = std::env::temp_dir().join("mahjong-store-no-such-layout.txt");
        let _ = fs::remove_file(&path);
        let err = load_layout(&path).unwrap_err();
        assert!(err.is_absent());
    }
}
