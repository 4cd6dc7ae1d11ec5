//! Run-length encoded (RLE) patterns, the usual text format for Life boards.

use crate::Cell;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const MAX_LINE_LEN: usize = 70;
/// Longest alive run accepted when decoding, every cell of it is allocated
const MAX_ALIVE_RUN: i64 = 1 << 16;
const RULE: &str = "B3/S23";
const ACCEPTED_RULES: [&str; 2] = ["b3/s23", "23/3"];

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rule\s*=\s*([^\s,]+)").expect("valid rule regex"));
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^x\s*=\s*(\d+)").expect("valid width regex"));
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d*)([^\d\s])").expect("valid item regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RleError {
    /// Only Conway's B3/S23 can be simulated.
    #[error("unsupported rule `{0}`, expected B3/S23")]
    UnsupportedRule(String),

    /// Run count does not fit a coordinate, or an alive run is longer than
    /// the header's width or 65536 cells.
    #[error("line {line}: invalid run count `{run}`")]
    InvalidRun { line: usize, run: String },

    /// Anything other than `b`, `o`, `$` or `!` in the pattern body.
    #[error("line {line}: unexpected `{token}` in pattern")]
    UnexpectedToken { line: usize, token: char },
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
}
impl RunEncoder {
    fn new() -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
        }
    }

    fn push_run(&mut self, run: i128, tag: char) {
        let item = match run {
            0 => return,
            1 => tag.to_string(),
            n => format!("{n}{tag}"),
        };
        if self.line_len + item.len() > MAX_LINE_LEN {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += item.len();
        self.sequence.push_str(&item);
    }

    fn end(mut self) -> String {
        self.push_run(1, '!');
        self.sequence
    }
}

/// Encodes live cells, moving the pattern's top-left corner to (0, 0)
///
/// The cells may come in any order and must not contain duplicates. Spans are
/// computed in `i128`, so a board stretching across the whole `i64` range
/// still gets its true size.
pub fn encode(cells: &[Cell], name: Option<&str>) -> String {
    let mut sorted: Vec<(i128, i128)> = cells
        .iter()
        .map(|c| (i128::from(c.y), i128::from(c.x)))
        .collect();
    sorted.sort_unstable();

    let left = sorted.iter().map(|&(_, x)| x).min().unwrap_or_default();
    let top = sorted.first().map(|&(y, _)| y).unwrap_or_default();
    let (width, height) = match (sorted.iter().map(|&(_, x)| x).max(), sorted.last()) {
        (Some(right), Some(&(bottom, _))) => (right - left + 1, bottom - top + 1),
        _ => (0, 0),
    };

    let mut out = String::new();
    if let Some(name) = name {
        out.push_str(&format!("#N {name}\n"));
    }
    out.push_str(&format!("x = {width}, y = {height}, rule = {RULE}\n"));

    let (mut last_y, mut last_x) = (top, left - 1);
    let mut alive_run = 0;
    let mut seq = RunEncoder::new();
    for &(y, x) in &sorted {
        if last_y == y && last_x + 1 == x {
            alive_run += 1;
            last_x = x;
            continue;
        }

        let lines_run = y - last_y;
        let dead_run = match lines_run {
            0 => x - last_x - 1,
            _ => x - left,
        };
        // order matters: finish the alive run before moving on
        seq.push_run(alive_run, 'o');
        seq.push_run(lines_run, '$');
        seq.push_run(dead_run, 'b');

        alive_run = 1;
        (last_y, last_x) = (y, x);
    }
    seq.push_run(alive_run, 'o');

    out.push_str(&seq.end());
    out.push('\n');
    out
}

/// Decodes a pattern, placing its top-left corner at (0, 0)
///
/// Alive runs longer than the header's width, or than 65536 cells when the
/// header gives none, are rejected before anything is allocated for them.
pub fn decode(text: &str) -> Result<Vec<Cell>, RleError> {
    let mut alive = Vec::new();
    let mut cursor = Cell::zero();
    let mut width = None;

    'lines: for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        if line.starts_with('x') {
            check_header(line)?;
            width = WIDTH_RE
                .captures(line)
                .and_then(|c| c[1].parse::<i64>().ok());
            continue;
        }

        for (_, [run, tag]) in ITEM_RE.captures_iter(line).map(|c| c.extract()) {
            let run = match run {
                "" => 1,
                digits => digits.parse::<i64>().map_err(|_| RleError::InvalidRun {
                    line: line_no,
                    run: digits.to_owned(),
                })?,
            };
            match tag {
                "!" => break 'lines,
                "o" => {
                    let overruns_width = width.is_some_and(|w| cursor.x.saturating_add(run) > w);
                    if run > MAX_ALIVE_RUN || overruns_width {
                        return Err(RleError::InvalidRun {
                            line: line_no,
                            run: run.to_string(),
                        });
                    }
                    alive.extend((0..run).map(|dx| cursor.translate(dx, 0)));
                    cursor = cursor.translate(run, 0);
                }
                "b" => cursor = cursor.translate(run, 0),
                "$" => cursor = Cell::new(0, cursor.y).translate(0, run),
                other => {
                    return Err(RleError::UnexpectedToken {
                        line: line_no,
                        token: other.chars().next().unwrap_or_default(),
                    });
                }
            }
        }
    }

    tracing::debug!(alive = alive.len(), "decoded rle pattern");
    Ok(alive)
}

fn check_header(line: &str) -> Result<(), RleError> {
    let Some(captures) = RULE_RE.captures(line) else {
        return Ok(());
    };
    let rule = &captures[1];
    if ACCEPTED_RULES.contains(&rule.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(RleError::UnsupportedRule(rule.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i64, i64)]) -> Vec<Cell> {
        coords.iter().copied().map(Cell::from).collect()
    }

    const GLIDER: &str = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";

    #[test]
    fn decodes_glider() {
        let alive = decode(GLIDER).unwrap();

        assert_eq!(alive, cells(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]));
    }

    #[test]
    fn encodes_glider() {
        let glider = cells(&[(2, 2), (1, 0), (0, 2), (2, 1), (1, 2)]);

        assert_eq!(encode(&glider, Some("Glider")), GLIDER);
    }

    #[test]
    fn encode_normalizes_negative_coordinates() {
        let blinker = cells(&[(-6, -10), (-6, -9), (-6, -8)]);

        assert_eq!(encode(&blinker, None), "x = 1, y = 3, rule = B3/S23\no$o$o!\n");
    }

    #[test]
    fn encode_empty_board() {
        assert_eq!(encode(&[], None), "x = 0, y = 0, rule = B3/S23\n!\n");
    }

    #[test]
    fn encode_wraps_long_lines() {
        let row: Vec<_> = (0..60).map(|x| Cell::new(x * 2, 0)).collect();

        let encoded = encode(&row, None);

        assert!(encoded.lines().all(|line| line.len() <= MAX_LINE_LEN));
        assert_eq!(decode(&encoded).unwrap(), row);
    }

    #[test]
    fn decode_stops_at_terminator() {
        let alive = decode("2o!\nooo").unwrap();

        assert_eq!(alive, cells(&[(0, 0), (1, 0)]));
    }

    #[test]
    fn decode_accepts_legacy_rule_notation() {
        assert!(decode("x = 1, y = 1, rule = 23/3\no!").is_ok());
        assert!(decode("x = 1, y = 1, rule = b3/s23\no!").is_ok());
        assert!(decode("x = 1, y = 1\no!").is_ok());
    }

    #[test]
    fn decode_rejects_other_rules() {
        let err = decode("x = 1, y = 1, rule = B36/S23\no!").unwrap_err();

        assert_eq!(err, RleError::UnsupportedRule("B36/S23".into()));
    }

    #[test]
    fn decode_rejects_stray_tokens() {
        let err = decode("x = 2, y = 1\noq!").unwrap_err();

        assert_eq!(err, RleError::UnexpectedToken { line: 2, token: 'q' });
    }

    #[test]
    fn encode_spans_whole_coordinate_range() {
        let edges = cells(&[(i64::MAX, 0), (i64::MIN, 0)]);

        assert_eq!(
            encode(&edges, None),
            "x = 18446744073709551616, y = 1, rule = B3/S23\no18446744073709551614bo!\n"
        );
    }

    #[test]
    fn encode_spans_rows_across_range() {
        let edges = cells(&[(0, i64::MIN), (0, i64::MAX)]);

        let encoded = encode(&edges, None);

        assert!(encoded.starts_with("x = 1, y = 18446744073709551616,"));
        assert!(encoded.ends_with("o18446744073709551615$o!\n"));
    }

    #[test]
    fn decode_caps_alive_runs() {
        let err = decode("50000000o!").unwrap_err();

        assert_eq!(err, RleError::InvalidRun { line: 1, run: "50000000".into() });
        assert_eq!(decode("65536o!").unwrap().len(), 65536);
    }

    #[test]
    fn decode_bounds_alive_runs_by_header_width() {
        let err = decode("x = 3, y = 1, rule = B3/S23\nb3o!").unwrap_err();

        assert_eq!(err, RleError::InvalidRun { line: 2, run: "3".into() });
        assert_eq!(
            decode("x = 3, y = 1, rule = B3/S23\nb2o!").unwrap(),
            cells(&[(1, 0), (2, 0)])
        );
    }

    #[test]
    fn decode_rejects_huge_runs() {
        let err = decode("99999999999999999999o!").unwrap_err();

        assert!(matches!(err, RleError::InvalidRun { line: 1, .. }));
    }
}
