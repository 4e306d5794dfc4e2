//! Stack compaction for points and bars.
//!
//! A container has a fixed extent along its stacking axis. When the pieces in
//! it would overflow, consecutive pieces overlap by the same amount so the last
//! one still ends at the far edge. The result is a margin ratio in percent of
//! one piece extent: piece `i` is offset `ratio * i` percent from the
//! alignment edge.
use crate::layout::Alignment;

/// Ratio used when the stack fits without overlap.
pub const FULL_RATIO: f64 = 100.0;

/// Lower bound of the ratio. Very tall stacks degrade to a 1% step.
pub const MIN_RATIO: f64 = 1.0;

/// Spacing of one container's stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Packing {
    pub alignment: Alignment,
    pub count: usize,
    /// Offset step between consecutive pieces, in percent of piece extent.
    pub ratio: f64,
}

impl Packing {
    /// Computes the spacing for `count` items of `item_extent` inside a
    /// container of `container_extent`.
    pub fn compute(
        container_extent: f64,
        item_extent: f64,
        count: usize,
        alignment: Alignment,
    ) -> Self {
        Self {
            alignment,
            count,
            ratio: margin_ratio(container_extent, item_extent, count),
        }
    }

    /// Offset of item `index` from the alignment edge, in percent of the item
    /// extent, truncated to two decimals.
    pub fn offset_percent(&self, index: usize) -> f64 {
        truncate_hundredths(self.ratio * index as f64)
    }

    /// Offsets for every item in the stack, bottom of the stack first.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|index| self.offset_percent(index))
    }

    /// Distance from the alignment edge to the far edge of the last item.
    pub fn stack_extent(&self, item_extent: f64) -> f64 {
        match self.count {
            0 => 0.0,
            n => self.offset_percent(n - 1) / 100.0 * item_extent + item_extent,
        }
    }

    pub fn overlaps(&self) -> bool {
        self.ratio < FULL_RATIO
    }
}

/// Margin ratio for a stack of `count` items.
pub fn margin_ratio(container_extent: f64, item_extent: f64, count: usize) -> f64 {
    if count < 2 || item_extent <= 0.0 {
        return FULL_RATIO;
    }

    let overflow = item_extent * count as f64 - container_extent;
    if overflow <= 0.0 {
        return FULL_RATIO;
    }

    let ratio = FULL_RATIO - (overflow / (count - 1) as f64 / item_extent) * 100.0;
    ratio.clamp(MIN_RATIO, FULL_RATIO)
}

/// Rounds toward zero at two decimals.
///
/// A half-ulp nudge keeps values such as `17.56` from printing as `17.55`.
pub fn truncate_hundredths(value: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    let scaled = value * 100.0;
    let nudged = scaled + scaled * f64::EPSILON;
    nudged.floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_stack_keeps_full_spacing() {
        for count in 0..=5 {
            assert_eq!(margin_ratio(500.0, 100.0, count), FULL_RATIO);
        }
    }

    #[test]
    fn overflowing_stack_overlaps_evenly() {
        // 6 pieces of 100 in 500: overflow 100 shared by 5 gaps.
        let packing = Packing::compute(500.0, 100.0, 6, Alignment::Top);
        assert!((packing.ratio - 80.0).abs() < 1e-9);
        let offsets: Vec<_> = packing.offsets().collect();
        assert_eq!(offsets, vec![0.0, 80.0, 160.0, 240.0, 320.0, 400.0]);
        assert!(packing.overlaps());
    }

    #[test]
    fn last_item_never_passes_far_edge() {
        for container in [150.0, 333.0, 480.0, 500.0, 1000.0] {
            for item in [17.0, 33.3, 50.0, 88.0] {
                for count in 1..40 {
                    let packing = Packing::compute(container, item, count, Alignment::Bottom);
                    assert!(packing.ratio > 0.0 && packing.ratio <= FULL_RATIO);
                    if item * count as f64 <= container {
                        assert_eq!(packing.ratio, FULL_RATIO);
                    }
                    if packing.ratio > MIN_RATIO {
                        let far = packing.stack_extent(item);
                        assert!(
                            far <= container.max(item) + 1e-9,
                            "far edge {far} exceeds {container} for n={count} h={item}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn ratio_is_clamped_to_floor() {
        let ratio = margin_ratio(10.0, 100.0, 50);
        assert_eq!(ratio, MIN_RATIO);
    }

    #[test]
    fn degenerate_item_extent_is_ignored() {
        assert_eq!(margin_ratio(100.0, 0.0, 10), FULL_RATIO);
        assert_eq!(Packing::compute(100.0, 50.0, 0, Alignment::Top).stack_extent(50.0), 0.0);
    }

    #[test]
    fn truncation_rounds_down() {
        assert_eq!(truncate_hundredths(17.56), 17.56);
        assert_eq!(truncate_hundredths(33.339), 33.33);
        assert_eq!(truncate_hundredths(0.0), 0.0);
    }
}
