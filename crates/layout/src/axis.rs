//! Main/cross axis roles for a flex container.

use core_types::Rect;
use css::{FlexDirection, FlexWrap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn property(self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }

    /// Pick the value that belongs to this dimension.
    pub fn pick<T>(self, width: T, height: T) -> T {
        match self {
            Dimension::Width => width,
            Dimension::Height => height,
        }
    }

    pub fn of(self, rect: &Rect) -> f32 {
        self.pick(rect.width, rect.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn property(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// Which dimension and edges each axis maps to, and in which direction
/// positions advance along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRoles {
    pub main_size: Dimension,
    pub main_start: Edge,
    pub main_end: Edge,
    pub main_sign: f32,
    pub cross_size: Dimension,
    pub cross_start: Edge,
    pub cross_end: Edge,
    pub cross_sign: f32,
}

impl AxisRoles {
    pub fn new(direction: FlexDirection, wrap: FlexWrap) -> Self {
        let (main_size, main_start, main_end, cross_size, cross_start, cross_end) = match direction {
            FlexDirection::Row => (
                Dimension::Width,
                Edge::Left,
                Edge::Right,
                Dimension::Height,
                Edge::Top,
                Edge::Bottom,
            ),
            FlexDirection::RowReverse => (
                Dimension::Width,
                Edge::Right,
                Edge::Left,
                Dimension::Height,
                Edge::Top,
                Edge::Bottom,
            ),
            FlexDirection::Column => (
                Dimension::Height,
                Edge::Top,
                Edge::Bottom,
                Dimension::Width,
                Edge::Left,
                Edge::Right,
            ),
            FlexDirection::ColumnReverse => (
                Dimension::Height,
                Edge::Bottom,
                Edge::Top,
                Dimension::Width,
                Edge::Left,
                Edge::Right,
            ),
        };
        let main_sign = if direction.is_reverse() { -1.0 } else { 1.0 };
        let (cross_start, cross_end, cross_sign) = if wrap == FlexWrap::WrapReverse {
            (cross_end, cross_start, -1.0)
        } else {
            (cross_start, cross_end, 1.0)
        };
        Self {
            main_size,
            main_start,
            main_end,
            main_sign,
            cross_size,
            cross_start,
            cross_end,
            cross_sign,
        }
    }

    /// Coordinate of the main-start edge: 0, or the far edge when reversed.
    pub fn main_origin(&self, container_main: f32) -> f32 {
        if self.main_sign < 0.0 { container_main } else { 0.0 }
    }

    pub fn cross_origin(&self, container_cross: f32) -> f32 {
        if self.cross_sign < 0.0 { container_cross } else { 0.0 }
    }

    /// Build a rectangle from a start-edge coordinate and a length on each
    /// axis, honouring the axis signs.
    pub fn rect(&self, main_start: f32, main_len: f32, cross_start: f32, cross_len: f32) -> Rect {
        let main_pos = leading_edge(main_start, main_len, self.main_sign);
        let cross_pos = leading_edge(cross_start, cross_len, self.cross_sign);
        match self.main_size {
            Dimension::Width => Rect::new(main_pos, cross_pos, main_len, cross_len),
            Dimension::Height => Rect::new(cross_pos, main_pos, cross_len, main_len),
        }
    }
}

fn leading_edge(start: f32, len: f32, sign: f32) -> f32 {
    if sign < 0.0 { start - len } else { start }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_reverse_starts_from_the_right() {
        let axis = AxisRoles::new(FlexDirection::RowReverse, FlexWrap::NoWrap);
        assert_eq!(axis.main_size, Dimension::Width);
        assert_eq!(axis.main_start, Edge::Right);
        assert_eq!(axis.main_sign, -1.0);
        assert_eq!(axis.main_origin(500.0), 500.0);
        assert_eq!(axis.rect(500.0, 100.0, 0.0, 20.0), Rect::new(400.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn column_swaps_dimensions() {
        let axis = AxisRoles::new(FlexDirection::Column, FlexWrap::Wrap);
        assert_eq!(axis.main_size.property(), "height");
        assert_eq!(axis.cross_start.property(), "left");
        assert_eq!(axis.rect(10.0, 30.0, 5.0, 40.0), Rect::new(5.0, 10.0, 40.0, 30.0));
    }

    #[test]
    fn wrap_reverse_flips_cross_edges() {
        let axis = AxisRoles::new(FlexDirection::Row, FlexWrap::WrapReverse);
        assert_eq!(axis.cross_start, Edge::Bottom);
        assert_eq!(axis.cross_end, Edge::Top);
        assert_eq!(axis.cross_sign, -1.0);
        assert_eq!(axis.cross_origin(90.0), 90.0);
    }
}
