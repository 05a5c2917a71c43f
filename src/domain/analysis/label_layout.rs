//! Label Layout - Repulsion-based placement of biplot annotations.
//!
//! Category labels in a biplot sit next to their points and frequently
//! collide, since categories with similar profiles land close together.
//! The layout pushes overlapping label boxes apart, and away from plotted
//! points, until nothing overlaps or the iteration budget runs out.
//!
//! All geometry is in pixel space with `y` growing downwards.

use serde::Deserialize;

/// Smallest distance, in pixels, a push moves a label.
const MIN_STEP: f64 = 0.5;

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a square centered on a point.
    pub fn around(center: (f64, f64), radius: f64) -> Self {
        Self::new(center.0 - radius, center.1 - radius, radius * 2.0, radius * 2.0)
    }

    /// Returns the center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the rectangle grown by `padding` on every side.
    pub fn inflate(&self, padding: f64) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }

    /// Returns the (horizontal, vertical) overlap with another rectangle, if any.
    pub fn overlap(&self, other: &Rect) -> Option<(f64, f64)> {
        let dx = (self.x + self.width).min(other.x + other.width) - self.x.max(other.x);
        let dy = (self.y + self.height).min(other.y + other.height) - self.y.max(other.y);
        if dx > 0.0 && dy > 0.0 {
            Some((dx, dy))
        } else {
            None
        }
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn clamp_within(&mut self, bounds: &Rect) {
        let max_x = (bounds.x + bounds.width - self.width).max(bounds.x);
        let max_y = (bounds.y + bounds.height - self.height).max(bounds.y);
        self.x = self.x.clamp(bounds.x, max_x);
        self.y = self.y.clamp(bounds.y, max_y);
    }
}

/// A label to place next to its anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub text: String,
    /// The plotted point the label belongs to.
    pub anchor: (f64, f64),
    /// Estimated rendered size of the text.
    pub size: (f64, f64),
    /// Initial offset of the label's top-left corner from the anchor.
    pub offset: (f64, f64),
}

impl LabelRequest {
    /// Creates a request with the label's top-left corner at `anchor + offset`.
    pub fn new(
        text: impl Into<String>,
        anchor: (f64, f64),
        size: (f64, f64),
        offset: (f64, f64),
    ) -> Self {
        Self {
            text: text.into(),
            anchor,
            size,
            offset,
        }
    }

    fn initial_rect(&self) -> Rect {
        Rect::new(
            self.anchor.0 + self.offset.0,
            self.anchor.1 + self.offset.1,
            self.size.0,
            self.size.1,
        )
    }
}

/// A label after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub anchor: (f64, f64),
    pub bounds: Rect,
    /// True when the label drifted far enough to need a line back to its point.
    pub needs_leader: bool,
}

/// Outcome of a layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub labels: Vec<PlacedLabel>,
    /// Iterations actually run.
    pub iterations: usize,
    /// False if overlaps remained when the iteration budget ran out.
    pub resolved: bool,
}

/// Tuning for the repulsion layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelLayout {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Fraction of a label-label overlap removed per iteration.
    pub text_force: f64,
    /// Fraction of a label-point overlap removed per iteration.
    pub point_force: f64,
    /// Half-size of the exclusion square around each plotted point.
    pub point_radius: f64,
    /// Extra clearance kept between label boxes.
    pub text_padding: f64,
    /// Drift from the initial position beyond which a leader line is drawn.
    pub leader_threshold: f64,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            text_force: 0.75,
            point_force: 0.75,
            point_radius: 6.0,
            text_padding: 2.0,
            leader_threshold: 12.0,
        }
    }
}

impl LabelLayout {
    /// Places labels so they overlap neither each other nor the plotted points.
    ///
    /// Deterministic: identical input always yields identical output.
    pub fn arrange(&self, requests: &[LabelRequest], points: &[(f64, f64)], bounds: Rect) -> LayoutResult {
        let mut boxes: Vec<Rect> = requests
            .iter()
            .map(|request| {
                let mut rect = request.initial_rect();
                rect.clamp_within(&bounds);
                rect
            })
            .collect();
        let obstacles: Vec<Rect> = points
            .iter()
            .map(|&point| Rect::around(point, self.point_radius))
            .collect();

        let mut iterations = 0;
        let mut resolved = false;

        while iterations < self.max_iterations {
            let mut shifts = vec![(0.0, 0.0); boxes.len()];
            let mut collided = false;

            for i in 0..boxes.len() {
                for j in (i + 1)..boxes.len() {
                    let padded = boxes[i].inflate(self.text_padding);
                    if let Some(overlap) = padded.overlap(&boxes[j]) {
                        collided = true;
                        let (push_x, push_y) =
                            separation(boxes[i].center(), boxes[j].center(), overlap, self.text_force / 2.0);
                        shifts[i].0 -= push_x;
                        shifts[i].1 -= push_y;
                        shifts[j].0 += push_x;
                        shifts[j].1 += push_y;
                    }
                }

                for obstacle in &obstacles {
                    if let Some(overlap) = boxes[i].overlap(obstacle) {
                        collided = true;
                        let (push_x, push_y) =
                            separation(obstacle.center(), boxes[i].center(), overlap, self.point_force);
                        shifts[i].0 += push_x;
                        shifts[i].1 += push_y;
                    }
                }
            }

            if !collided {
                resolved = true;
                break;
            }

            for (rect, (dx, dy)) in boxes.iter_mut().zip(shifts) {
                rect.translate(dx, dy);
                rect.clamp_within(&bounds);
            }
            iterations += 1;
        }

        let labels = requests
            .iter()
            .zip(boxes)
            .map(|(request, bounds)| {
                let start = request.initial_rect();
                let drift = ((bounds.x - start.x).powi(2) + (bounds.y - start.y).powi(2)).sqrt();
                PlacedLabel {
                    text: request.text.clone(),
                    anchor: request.anchor,
                    bounds,
                    needs_leader: drift > self.leader_threshold,
                }
            })
            .collect();

        LayoutResult {
            labels,
            iterations,
            resolved,
        }
    }
}

/// Push for `to` away from `from`, along the axis of least overlap.
///
/// Coincident centers fall back to pushing `to` right (or down).
fn separation(from: (f64, f64), to: (f64, f64), overlap: (f64, f64), force: f64) -> (f64, f64) {
    let (overlap_x, overlap_y) = overlap;
    if overlap_x <= overlap_y {
        let direction = if to.0 < from.0 { -1.0 } else { 1.0 };
        (direction * (overlap_x * force + MIN_STEP), 0.0)
    } else {
        let direction = if to.1 < from.1 { -1.0 } else { 1.0 };
        (0.0, direction * (overlap_y * force + MIN_STEP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canvas() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn label(text: &str, anchor: (f64, f64)) -> LabelRequest {
        LabelRequest::new(text, anchor, (60.0, 12.0), (8.0, -14.0))
    }

    fn any_overlap(labels: &[PlacedLabel]) -> bool {
        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                if labels[i].bounds.overlap(&labels[j].bounds).is_some() {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn rect_overlap_requires_positive_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap(&Rect::new(5.0, 8.0, 10.0, 10.0)), Some((5.0, 2.0)));
        assert_eq!(a.overlap(&Rect::new(10.0, 0.0, 5.0, 5.0)), None);
    }

    #[test]
    fn isolated_label_stays_put() {
        let layout = LabelLayout::default();
        let result = layout.arrange(&[label("1", (100.0, 100.0))], &[(100.0, 100.0)], canvas());

        assert!(result.resolved);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.labels[0].bounds, Rect::new(108.0, 86.0, 60.0, 12.0));
        assert!(!result.labels[0].needs_leader);
    }

    #[test]
    fn coincident_labels_are_separated() {
        let layout = LabelLayout::default();
        let anchor = (300.0, 300.0);
        let result = layout.arrange(
            &[label("1", anchor), label("2", anchor), label("3", anchor)],
            &[anchor],
            canvas(),
        );

        assert!(result.resolved);
        assert!(!any_overlap(&result.labels));
    }

    #[test]
    fn labels_are_pushed_off_foreign_points() {
        let layout = LabelLayout::default();
        // The second point sits right where the first label starts.
        let result = layout.arrange(
            &[label("Sempre", (100.0, 100.0))],
            &[(100.0, 100.0), (130.0, 92.0)],
            canvas(),
        );

        let obstacle = Rect::around((130.0, 92.0), layout.point_radius);
        assert!(result.resolved);
        assert!(result.labels[0].bounds.overlap(&obstacle).is_none());
    }

    #[test]
    fn far_moves_request_leader_lines() {
        let layout = LabelLayout {
            leader_threshold: 1.0,
            ..LabelLayout::default()
        };
        let anchor = (200.0, 200.0);
        let result = layout.arrange(&[label("a", anchor), label("b", anchor)], &[], canvas());

        assert!(result.labels.iter().any(|l| l.needs_leader));
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let layout = LabelLayout {
            max_iterations: 1,
            ..LabelLayout::default()
        };
        let anchor = (200.0, 200.0);
        let requests: Vec<_> = (0..8).map(|i| label(&i.to_string(), anchor)).collect();
        let result = layout.arrange(&requests, &[], canvas());

        assert_eq!(result.iterations, 1);
        assert!(!result.resolved);
    }

    proptest! {
        #[test]
        fn labels_never_leave_bounds(
            anchors in proptest::collection::vec((0.0f64..800.0, 0.0f64..600.0), 1..12)
        ) {
            let requests: Vec<_> = anchors
                .iter()
                .enumerate()
                .map(|(i, &a)| label(&i.to_string(), a))
                .collect();
            let result = LabelLayout::default().arrange(&requests, &anchors, canvas());

            for placed in &result.labels {
                prop_assert!(canvas().contains(&placed.bounds));
            }
        }

        #[test]
        fn layout_is_deterministic(
            anchors in proptest::collection::vec((0.0f64..800.0, 0.0f64..600.0), 1..8)
        ) {
            let requests: Vec<_> = anchors
                .iter()
                .enumerate()
                .map(|(i, &a)| label(&i.to_string(), a))
                .collect();
            let layout = LabelLayout { max_iterations: 200, ..LabelLayout::default() };

            prop_assert_eq!(
                layout.arrange(&requests, &anchors, canvas()),
                layout.arrange(&requests, &anchors, canvas())
            );
        }
    }
}
