//! Position engine: capture and restore
//!
//! Two inverse operations over an ordered record sequence:
//!
//! - [`capture`] turns a raw scroll offset into a [`TrackedPosition`]
//! - [`resolve_target`] turns a [`TrackedPosition`] back into a raw offset,
//!   snapping to a whole line when the anchor is a text record
//!
//! Both are pure; the controller owns the side effects.

use tracing::{debug, trace};

use crate::position::TrackedPosition;
use crate::record::{PositionalRecord, TextGeometry};

/// Locate the record under `scroll_offset`
///
/// The anchor is the last record whose top edge is at or before the offset.
/// An offset past every record anchors to the last one. An offset before
/// the first record (or an empty sequence) yields [`TrackedPosition::NONE`].
pub fn capture(scroll_offset: f32, records: &[PositionalRecord]) -> TrackedPosition {
    if records.is_empty() {
        return TrackedPosition::NONE;
    }

    // First record strictly below the offset; records are sorted.
    let next = records.partition_point(|r| r.reveal_offset <= scroll_offset);
    let Some(index) = next.checked_sub(1) else {
        return TrackedPosition::NONE;
    };

    let record = &records[index];
    let alignment = if record.size > 0.0 {
        (scroll_offset - record.reveal_offset) / record.size
    } else {
        0.0
    };

    debug!(
        offset = scroll_offset,
        index,
        alignment,
        "captured scroll offset"
    );

    TrackedPosition::new(index as i32, alignment)
}

/// Compute the offset that restores `tracked` against `records`
///
/// Returns `None` when there is nothing to restore (`tracked` has no
/// anchor). An empty record sequence resolves to `0.0`, resetting the
/// viewport: a previously valid anchor has become invalid. An index past
/// the end is clamped to the last record.
pub fn resolve_target(tracked: TrackedPosition, records: &[PositionalRecord]) -> Option<f32> {
    let index = tracked.record_index()?;

    let Some(last) = records.len().checked_sub(1) else {
        debug!("no records to restore against, resetting to top");
        return Some(0.0);
    };

    let index = if index >= records.len() {
        debug!(index, records = records.len(), "anchor beyond last record, clamping");
        last
    } else {
        index
    };

    let record = &records[index];
    let target = record.reveal_offset + record.size * tracked.alignment;

    let target = match record.text {
        Some(ref text) => snap_to_line(target, text),
        None => target,
    };

    debug!(index, target, "resolved restore target");
    Some(target)
}

/// Snap `target` onto a line boundary inside a text block
///
/// Targets at or above the text's top edge are left alone (they sit in
/// merged padding). Inside the first line the target moves to the text top.
/// Further down it moves to the nearer line start; ties go forward unless
/// the next line start would reach the end of the text.
pub fn snap_to_line(target: f32, text: &TextGeometry) -> f32 {
    let line_height = text.line_height;
    if line_height <= 0.0 {
        return target;
    }

    let penetration = target - text.text_reveal_offset;
    if penetration <= 0.0 {
        return target;
    }

    if penetration < line_height {
        trace!(target, snapped = target - penetration, "snapping to first line");
        return target - penetration;
    }

    let before = penetration % line_height;
    let after = line_height - before;

    if before < after {
        trace!(target, by = before, "snapping back");
        target - before
    } else if target + after >= text.end_offset() {
        trace!(target, "forward snap would pass text end, snapping back");
        target - before
    } else {
        trace!(target, by = after, "snapping forward");
        target + after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(sizes: &[f32]) -> Vec<PositionalRecord> {
        let mut offset = 0.0;
        sizes
            .iter()
            .map(|&size| {
                let record = PositionalRecord::block(offset, size);
                offset += size;
                record
            })
            .collect()
    }

    fn five_lines() -> TextGeometry {
        TextGeometry {
            line_height: 20.0,
            text_extent: 100.0,
            text_reveal_offset: 100.0,
        }
    }

    #[test]
    fn test_capture_empty() {
        assert_eq!(capture(120.0, &[]), TrackedPosition::NONE);
    }

    #[test]
    fn test_capture_before_first_record() {
        let mut records = blocks(&[50.0, 50.0]);
        for r in &mut records {
            r.reveal_offset += 10.0;
        }
        let pos = capture(4.0, &records);
        assert_eq!(pos.index, -1);
        assert_eq!(pos.alignment, 0.0);
    }

    #[test]
    fn test_capture_inside_record() {
        let records = blocks(&[100.0, 200.0, 50.0]);
        let pos = capture(150.0, &records);
        assert_eq!(pos.index, 1);
        assert!((pos.alignment - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_capture_on_boundary_picks_following_record() {
        let records = blocks(&[100.0, 100.0]);
        let pos = capture(100.0, &records);
        assert_eq!(pos.index, 1);
        assert_eq!(pos.alignment, 0.0);
    }

    #[test]
    fn test_capture_past_last_record_clamps() {
        let records = blocks(&[100.0, 100.0]);
        let pos = capture(260.0, &records);
        assert_eq!(pos.index, 1);
        assert!((pos.alignment - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_capture_zero_size_record() {
        let records = vec![
            PositionalRecord::block(0.0, 40.0),
            PositionalRecord::block(40.0, 0.0),
        ];
        let pos = capture(55.0, &records);
        assert_eq!(pos.index, 1);
        assert_eq!(pos.alignment, 0.0);
    }

    #[test]
    fn test_round_trip_within_a_pixel() {
        let records = blocks(&[120.0, 33.0, 480.0, 7.5, 260.0]);
        let total: f32 = records.last().map(|r| r.end_offset()).unwrap();
        let mut offset = 0.0;
        while offset < total {
            let pos = capture(offset, &records);
            let back = resolve_target(pos, &records).unwrap();
            assert!((back - offset).abs() < 1.0, "{} restored as {}", offset, back);
            offset += 13.7;
        }
    }

    #[test]
    fn test_resolve_unanchored_is_noop() {
        let records = blocks(&[100.0]);
        assert_eq!(resolve_target(TrackedPosition::NONE, &records), None);
    }

    #[test]
    fn test_resolve_empty_resets_to_top() {
        assert_eq!(resolve_target(TrackedPosition::new(4, 0.5), &[]), Some(0.0));
    }

    #[test]
    fn test_resolve_clamps_index() {
        let records = blocks(&[100.0, 100.0, 100.0]);
        let at_len = resolve_target(TrackedPosition::new(3, 0.5), &records);
        assert_eq!(at_len, Some(250.0));
        let past_len = resolve_target(TrackedPosition::new(40, 0.0), &records);
        assert_eq!(past_len, Some(200.0));
    }

    #[test]
    fn test_proportional_reanchoring() {
        let before = vec![PositionalRecord::block(0.0, 100.0)];
        let pos = capture(30.0, &before);

        let after = vec![PositionalRecord::block(0.0, 200.0)];
        let target = resolve_target(pos, &after).unwrap();
        assert!((target - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_snap_within_first_line() {
        assert_eq!(snap_to_line(105.0, &five_lines()), 100.0);
    }

    #[test]
    fn test_snap_forward_to_next_line() {
        assert_eq!(snap_to_line(138.0, &five_lines()), 140.0);
    }

    #[test]
    fn test_snap_back_when_forward_reaches_text_end() {
        let text = TextGeometry {
            text_extent: 40.0,
            ..five_lines()
        };
        assert_eq!(snap_to_line(138.0, &text), 120.0);
    }

    #[test]
    fn test_snap_back_to_nearer_line() {
        assert_eq!(snap_to_line(145.0, &five_lines()), 140.0);
    }

    #[test]
    fn test_snap_tie_goes_forward() {
        assert_eq!(snap_to_line(150.0, &five_lines()), 160.0);
    }

    #[test]
    fn test_no_snap_above_text_top() {
        assert_eq!(snap_to_line(100.0, &five_lines()), 100.0);
        assert_eq!(snap_to_line(92.0, &five_lines()), 92.0);
    }

    #[test]
    fn test_no_snap_without_line_height() {
        let text = TextGeometry {
            line_height: 0.0,
            ..five_lines()
        };
        assert_eq!(snap_to_line(133.0, &text), 133.0);
    }

    #[test]
    fn test_resolve_applies_snap_on_text_records() {
        // Padded block at 90 with text starting at 100
        let records = vec![PositionalRecord::text(90.0, 120.0, five_lines())];
        let pos = TrackedPosition::new(0, 48.0 / 120.0);
        assert_eq!(resolve_target(pos, &records), Some(140.0));
    }

    #[test]
    fn test_resolve_tie_reaching_text_end_snaps_back() {
        // Padded block at 90, text spans 100..200
        let records = vec![PositionalRecord::text(90.0, 160.0, five_lines())];

        // 190 is halfway into the last line; forward would land on 200
        let last_line = TrackedPosition::new(0, 0.625);
        assert_eq!(resolve_target(last_line, &records), Some(180.0));

        // One line earlier the same tie still goes forward
        let inner_line = TrackedPosition::new(0, 0.5);
        assert_eq!(resolve_target(inner_line, &records), Some(180.0));
    }
}
