//! Plain-text edge lists and merge sequences.
//!
//! Both use one pair per line, written as two bracketed coordinates:
//!
//! ```text
//! [0,0] [0,1]
//! [5,5] [5,6]
//! ```

use std::io::{self, Write};

use crate::cluster::MergeEvent;
use crate::error::{Error, Result};
use crate::point::Point;

/// Parse an edge list, one `[x1,y1] [x2,y2]` pair per line.
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub fn parse_edge_list(text: &str) -> Result<Vec<(Point, Point)>> {
    let mut edges = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [a, b] => edges.push((parse_point(a, line_no)?, parse_point(b, line_no)?)),
            _ => {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("expected two points, found {} tokens", tokens.len()),
                })
            }
        }
    }
    Ok(edges)
}

fn parse_point(token: &str, line: usize) -> Result<Point> {
    let err = |message: String| Error::Parse { line, message };

    let inner = token
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| err(format!("expected [x,y], found {token:?}")))?;
    let (x, y) = inner
        .split_once(',')
        .ok_or_else(|| err(format!("missing comma in {token:?}")))?;

    let coord = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| err(format!("bad coordinate {s:?}: {e}")))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

/// Write one `[x1,y1] [x2,y2]` line per merge event, in order.
pub fn write_merge_events<W: Write>(mut out: W, events: &[MergeEvent]) -> io::Result<()> {
    for event in events {
        writeln!(out, "{} {}", event.a, event.b)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edges() {
        let text = "[0,0] [0,1]\n\n  [5,5]\t[5,6]  \n[-1.5,2] [3,-4]\n";
        let edges = parse_edge_list(text).unwrap();

        assert_eq!(
            edges,
            vec![
                (Point::new(0.0, 0.0), Point::new(0.0, 1.0)),
                (Point::new(5.0, 5.0), Point::new(5.0, 6.0)),
                (Point::new(-1.5, 2.0), Point::new(3.0, -4.0)),
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_input() {
        let err = parse_edge_list("[0,0] [0,1]\n[1,1]\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        let err = parse_edge_list("[0,0] (0,1)").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = parse_edge_list("[0,0] [0;1]").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = parse_edge_list("[0,0] [x,1]").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn writes_events() {
        let events = [
            MergeEvent {
                a: Point::new(0.0, 0.0),
                b: Point::new(0.0, 1.0),
                distance: 1.0,
            },
            MergeEvent {
                a: Point::new(5.0, 5.0),
                b: Point::new(-5.5, 6.0),
                distance: 10.5,
            },
        ];
        let mut out = Vec::new();
        write_merge_events(&mut out, &events).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[0,0] [0,1]\n[5,5] [-5.5,6]\n"
        );
    }
}
