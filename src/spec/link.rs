//! Link segment mini-language.
//!
//! A custom `link_scenario` value is a `;`-separated list of segments.
//! Each segment is a `:`-separated list of fields, the first being the
//! segment duration and every other one a tag letter followed by a value:
//!
//! ```text
//! 1000:U1.5:D2.0:L20;500:U0.5
//! ```
//!
//! | tag | field | value |
//! |-----|-------|-------|
//! | `U` | upload rate (Gbps) | decimal |
//! | `D` | download rate (Gbps) | decimal |
//! | `L` | latency | integer |
//! | `J` | jitter | integer |
//! | `Q` | max queue delay | integer |
//! | `S` | low-latency queue threshold | integer |
//! | `B` | packets lost per burst | integer |
//! | `P` | packets between losses | integer |
//!
//! Fields may come in any order after the duration; repeating a tag
//! overwrites the earlier value. A single trailing `;` is allowed.

use crate::spec::error::ValueError;
use crate::spec::types::LinkSegment;
use crate::utils::value::{parse_decimal, parse_u64};

const SEGMENT_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ':';

/// Forward-only cursor over a segment list
struct Cursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Consume up to, not including, the next separator or end of text
    fn read_field(&mut self) -> &'a str {
        let rest = &self.text[self.position..];
        let end = rest
            .find([FIELD_SEPARATOR, SEGMENT_SEPARATOR])
            .unwrap_or(rest.len());
        self.position += end;
        &rest[..end]
    }
}

fn parse_tagged_field(segment: &mut LinkSegment, field: &str) -> Result<(), ValueError> {
    let mut chars = field.chars();
    let tag = chars.next().ok_or(ValueError::EmptySegmentField)?;
    let value = chars.as_str();

    match tag {
        'U' => segment.up_rate_gbps = parse_decimal(value)?,
        'D' => segment.down_rate_gbps = parse_decimal(value)?,
        'L' => segment.latency = parse_u64(value)?,
        'J' => segment.jitter = parse_u64(value)?,
        'Q' => segment.queue_delay_max = parse_u64(value)?,
        'S' => segment.l4s_max = parse_u64(value)?,
        'B' => segment.nb_loss_in_burst = parse_u64(value)?,
        'P' => segment.packets_between_losses = parse_u64(value)?,
        other => return Err(ValueError::UnknownSegmentTag(other)),
    }
    Ok(())
}

/// Parse one segment, stopping before its `;` or at end of text
fn read_segment(cursor: &mut Cursor<'_>) -> Result<LinkSegment, ValueError> {
    let mut segment = LinkSegment {
        duration: parse_u64(cursor.read_field())?,
        ..Default::default()
    };

    while cursor.peek() == Some(FIELD_SEPARATOR) {
        cursor.advance();
        parse_tagged_field(&mut segment, cursor.read_field())?;
    }

    Ok(segment)
}

/// Parse a single segment such as `1000:U1.5:L20`
pub fn parse_link_segment(text: &str) -> Result<LinkSegment, ValueError> {
    let mut cursor = Cursor::new(text);
    let segment = read_segment(&mut cursor)?;
    match cursor.peek() {
        None => Ok(segment),
        Some(ch) => Err(ValueError::UnexpectedChar(ch)),
    }
}

/// Parse a full segment list into a non-empty vector.
///
/// Errors carry the index of the failing segment.
pub fn parse_link_segments(text: &str) -> Result<Vec<LinkSegment>, ValueError> {
    if text.is_empty() {
        return Err(ValueError::EmptyLinkScenario);
    }

    // Upper bound: one segment per separator, plus the last one.
    let capacity = text.matches(SEGMENT_SEPARATOR).count() + 1;
    let mut segments = Vec::new();
    segments.try_reserve_exact(capacity)?;

    let mut cursor = Cursor::new(text);
    loop {
        let index = segments.len();
        let segment = read_segment(&mut cursor).map_err(|source| ValueError::Segment {
            index,
            source: Box::new(source),
        })?;
        segments.push(segment);

        match cursor.advance() {
            None => break,
            Some(SEGMENT_SEPARATOR) if cursor.is_at_end() => break,
            Some(SEGMENT_SEPARATOR) => {}
            Some(ch) => return Err(ValueError::UnexpectedChar(ch)),
        }
    }

    log::debug!("Parsed {} link segments (capacity {})", segments.len(), capacity);
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_segments() {
        let segments = parse_link_segments("1000:U1.5:D2.0:L20;500:U0.5").unwrap();
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].duration, 1000);
        assert!(close(segments[0].up_rate_gbps, 1.5));
        assert!(close(segments[0].down_rate_gbps, 2.0));
        assert_eq!(segments[0].latency, 20);
        assert_eq!(segments[0].jitter, 0);

        assert_eq!(
            segments[1],
            LinkSegment {
                duration: 500,
                up_rate_gbps: 0.5,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_all_tags() {
        let segment = parse_link_segment("250:U1:D2:L3:J4:Q5:S6:B7:P8").unwrap();
        assert_eq!(
            segment,
            LinkSegment {
                duration: 250,
                up_rate_gbps: 1.0,
                down_rate_gbps: 2.0,
                latency: 3,
                jitter: 4,
                queue_delay_max: 5,
                l4s_max: 6,
                nb_loss_in_burst: 7,
                packets_between_losses: 8,
            }
        );
    }

    #[test]
    fn test_duration_only_and_trailing_separator() {
        let segments = parse_link_segments("1000").unwrap();
        assert_eq!(segments, vec![LinkSegment { duration: 1000, ..Default::default() }]);

        let segments = parse_link_segments("1000:L5;2000;").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].duration, 2000);
    }

    #[test]
    fn test_repeated_tag_overwrites() {
        let segment = parse_link_segment("10:L5:J1:L7").unwrap();
        assert_eq!(segment.latency, 7);
        assert_eq!(segment.jitter, 1);
    }

    #[test]
    fn test_field_order_is_free() {
        let a = parse_link_segment("10:P3:U0.25:B2").unwrap();
        let b = parse_link_segment("10:B2:P3:U0.25").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_link_segments(""), Err(ValueError::EmptyLinkScenario)));

        // Duration must come first and carries no tag
        assert!(matches!(
            parse_link_segments("U1.5:1000"),
            Err(ValueError::Segment { index: 0, .. })
        ));

        let err = parse_link_segments("1000:U1;500:X3").unwrap_err();
        match err {
            ValueError::Segment { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, ValueError::UnknownSegmentTag('X')));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_link_segments("1000:Lx").is_err());
        assert!(parse_link_segments("1000:U1.").is_err());
        assert!(parse_link_segments("1000:").is_err());
        assert!(parse_link_segments("1000::L2").is_err());
        assert!(parse_link_segments("1000;;500").is_err());
        assert!(parse_link_segments(";").is_err());
        assert!(parse_link_segments("1000:l20").is_err());
        assert!(parse_link_segments("1000 :L20").is_err());
    }

    #[test]
    fn test_single_segment_rejects_list() {
        assert!(matches!(
            parse_link_segment("1000;500"),
            Err(ValueError::UnexpectedChar(';'))
        ));
    }
}
