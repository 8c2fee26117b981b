//! Plain-text tile maps.
//!
//! ```text
//! # comment lines and trailing comments are ignored
//! 8 8 32          # width height tile-size
//! 1 1 1 1 1 1 1 1
//! 1 0 0 0 0 0 0 1
//! ...
//! ```
//!
//! Tile ids may be spread over lines in any layout; exactly
//! `width * height` of them must follow the header.

use std::{fmt::Write as _, fs, path::Path};

use crate::world::{Grid, MapError, TileId};

/// Read and parse a map file.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<Grid, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let grid = parse_map(&text)?;
    log::info!(
        "map {}: {}×{} tiles, tile size {}",
        path.display(),
        grid.width(),
        grid.height(),
        grid.tile_size()
    );
    if !grid.is_enclosed() {
        log::warn!("map {} has gaps in its border; rays may escape", path.display());
    }
    Ok(grid)
}

/// Parse map text (see module docs for the format).
pub fn parse_map(text: &str) -> Result<Grid, MapError> {
    let tokens: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| {
            let body = line.split('#').next().unwrap_or("");
            body.split_whitespace().map(move |t| (i + 1, t))
        })
        .collect();

    let last_line = text.lines().count().max(1);
    let mut it = tokens.into_iter();

    let width = header_dim(it.next(), last_line, "width")?;
    let height = header_dim(it.next(), last_line, "height")?;
    let tile_size = match it.next() {
        Some((line, tok)) => tok.parse::<f32>().map_err(|_| MapError::Parse {
            line,
            msg: format!("bad tile size `{tok}`"),
        })?,
        None => {
            return Err(MapError::Parse {
                line: last_line,
                msg: "missing tile size in header".into(),
            });
        }
    };

    let tiles = it
        .map(|(line, tok)| {
            tok.parse::<TileId>().map_err(|_| MapError::Parse {
                line,
                msg: format!("bad tile id `{tok}`"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} tile ids for {width}×{height}", tiles.len());
    Grid::new(width, height, tile_size, tiles)
}

fn header_dim(tok: Option<(usize, &str)>, last_line: usize, what: &str) -> Result<usize, MapError> {
    match tok {
        Some((line, t)) => t.parse::<usize>().map_err(|_| MapError::Parse {
            line,
            msg: format!("bad map {what} `{t}`"),
        }),
        None => Err(MapError::Parse {
            line: last_line,
            msg: format!("missing map {what} in header"),
        }),
    }
}

/// Serialise `grid` back to the text format, one map row per line.
pub fn format_map(grid: &Grid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} {}", grid.width(), grid.height(), grid.tile_size());
    for row in grid.tiles().chunks(grid.width()) {
        let line: Vec<String> = row.iter().map(|t| t.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/*====================================================================*/
/*                               Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
# tiny room
3 3 16   # w h size
1 1 1
1 0 1
1 2 1
";

    #[test]
    fn parses_header_comments_and_tiles() {
        let g = parse_map(SMALL).unwrap();
        assert_eq!((g.width(), g.height(), g.tile_size()), (3, 3, 16.0));
        assert_eq!(g.tile_at(1, 1), Some(0));
        assert_eq!(g.tile_at(1, 2), Some(2));
    }

    #[test]
    fn wrong_tile_count_is_reported() {
        let err = parse_map("2 2 8\n1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::DimensionMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn huge_header_is_an_error() {
        let err = parse_map("18446744073709551615 2 1\n").unwrap_err();
        assert!(matches!(err, MapError::TooLarge { height: 2, .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn bad_token_names_its_line() {
        let err = parse_map("2 2 8\n1 1\n1 x\n").unwrap_err();
        assert_eq!(
            err,
            MapError::Parse {
                line: 3,
                msg: "bad tile id `x`".into()
            }
        );
        assert!(matches!(
            parse_map("# nothing\n"),
            Err(MapError::Parse { .. })
        ));
        assert!(matches!(parse_map("4 -1 8"), Err(MapError::Parse { line: 1, .. })));
    }

    #[test]
    fn formatted_map_parses_back() {
        let g = Grid::demo();
        assert_eq!(parse_map(&format_map(&g)).unwrap(), g);
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.map");
        std::fs::write(&path, SMALL).unwrap();
        let g = load_map(&path).unwrap();
        assert!(g.is_enclosed());

        let err = load_map(dir.path().join("missing.map")).unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }
}
