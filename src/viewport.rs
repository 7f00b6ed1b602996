// Viewport intersection geometry
//
// Plain arithmetic over content rows. An element occupies rows
// [top, top + height) in content coordinates, the viewport shows
// [scroll, scroll + rows). A lead margin shrinks the viewport's bottom edge
// so elements only count as visible once they are fully past the fold by
// that margin.

/// Row extent of one watched element in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub top: usize,
    pub height: usize,
}

impl Extent {
    pub fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }
}

/// Fraction of the element's rows inside the (lead-shrunk) viewport, 0.0..=1.0
///
/// Zero-height elements report 0.0 rather than dividing by zero.
pub fn visible_ratio(extent: Extent, scroll: usize, viewport_rows: usize, lead_rows: usize) -> f64 {
    if extent.height == 0 {
        return 0.0;
    }

    let view_top = scroll;
    let view_bottom = scroll + viewport_rows.saturating_sub(lead_rows);

    let elem_top = extent.top;
    let elem_bottom = extent.top + extent.height;

    let overlap_top = elem_top.max(view_top);
    let overlap_bottom = elem_bottom.min(view_bottom);

    if overlap_bottom <= overlap_top {
        return 0.0;
    }

    (overlap_bottom - overlap_top) as f64 / extent.height as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_visible_element_reports_one() {
        let ratio = visible_ratio(Extent::new(2, 4), 0, 20, 0);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn element_above_viewport_reports_zero() {
        assert_eq!(visible_ratio(Extent::new(0, 5), 10, 20, 0), 0.0);
    }

    #[test]
    fn element_below_viewport_reports_zero() {
        assert_eq!(visible_ratio(Extent::new(50, 5), 0, 20, 0), 0.0);
    }

    #[test]
    fn partial_overlap_is_proportional() {
        // Element rows 18..22, viewport rows 0..20: 2 of 4 rows visible
        let ratio = visible_ratio(Extent::new(18, 4), 0, 20, 0);
        assert!((ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn lead_margin_shrinks_the_bottom_edge() {
        // Same element, but the bottom 2 rows of the viewport don't count
        let without_lead = visible_ratio(Extent::new(18, 4), 0, 20, 0);
        let with_lead = visible_ratio(Extent::new(18, 4), 0, 20, 2);
        assert!(without_lead > 0.0);
        assert_eq!(with_lead, 0.0);
    }

    #[test]
    fn scrolling_brings_elements_into_view() {
        let extent = Extent::new(40, 4);
        assert_eq!(visible_ratio(extent, 0, 20, 0), 0.0);
        let ratio = visible_ratio(extent, 30, 20, 0);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_height_element_is_never_visible() {
        assert_eq!(visible_ratio(Extent::new(5, 0), 0, 20, 0), 0.0);
    }

    #[test]
    fn lead_larger_than_viewport_hides_everything() {
        assert_eq!(visible_ratio(Extent::new(0, 5), 0, 10, 20), 0.0);
    }
}
