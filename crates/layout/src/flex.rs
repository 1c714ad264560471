//! Flexbox placement over plain numbers.
//!
//! `compute` knows nothing about documents: the caller reads a container and
//! its element children into [`FlexContainer`] / [`FlexItem`] and writes the
//! resulting rectangles back. All rectangles are relative to the container.

use crate::axis::{AxisRoles, Dimension};
use core_types::Rect;
use css::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
use std::ops::Range;

/// Slack for float comparisons when deciding whether an item still fits.
const EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexContainer {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// `None` means auto.
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexItem {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Box left behind by an earlier layout of this element (a nested flex
    /// container), used where the style gives no size.
    pub measured: Option<Rect>,
    pub flex: Option<f32>,
    pub align_self: AlignSelf,
}

impl FlexItem {
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn flexible(factor: f32) -> Self {
        Self {
            flex: Some(factor),
            ..Self::default()
        }
    }
}

/// One flex line: a run of consecutive items.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexLine {
    pub items: Range<usize>,
    /// Main-axis space left after the line's inflexible items.
    pub main_space: f32,
    /// Lower cross coordinate of the line, relative to the container.
    pub cross_start: f32,
    pub cross_size: f32,
}

impl FlexLine {
    fn starting_at(index: usize, main_space: f32) -> Self {
        Self {
            items: index..index,
            main_space,
            cross_start: 0.0,
            cross_size: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlexLayout {
    pub width: f32,
    pub height: f32,
    pub items: Vec<Rect>,
    pub lines: Vec<FlexLine>,
}

/// Working state for one item while it is being placed.
#[derive(Clone, Copy, Debug)]
struct Placement {
    main: f32,
    cross: f32,
    cross_auto: bool,
    flex: Option<f32>,
    align: AlignItems,
    main_start: f32,
    cross_start: f32,
}

impl Placement {
    fn new(item: &FlexItem, axis: &AxisRoles, align_items: AlignItems) -> Self {
        let explicit_main = axis.main_size.pick(item.width, item.height);
        let explicit_cross = axis.cross_size.pick(item.width, item.height);
        let measured_main = item.measured.map(|r| axis.main_size.of(&r));
        let measured_cross = item.measured.map(|r| axis.cross_size.of(&r));
        Self {
            main: explicit_main.or(measured_main).unwrap_or(0.0).max(0.0),
            cross: explicit_cross.or(measured_cross).unwrap_or(0.0).max(0.0),
            cross_auto: explicit_cross.is_none(),
            flex: item.flex,
            align: item.align_self.resolve(align_items),
            main_start: 0.0,
            cross_start: 0.0,
        }
    }
}

pub fn compute(container: &FlexContainer, items: &[FlexItem]) -> FlexLayout {
    let axis = AxisRoles::new(container.direction, container.wrap);
    let mut placements: Vec<Placement> = items
        .iter()
        .map(|item| Placement::new(item, &axis, container.align_items))
        .collect();

    let explicit_main = axis.main_size.pick(container.width, container.height);
    let explicit_cross = axis.cross_size.pick(container.width, container.height);
    let main_size = explicit_main
        .unwrap_or_else(|| placements.iter().map(|p| p.main).sum::<f32>())
        .min(f32::MAX);

    let mut lines = partition_lines(&mut placements, main_size, container.wrap);
    let main_origin = axis.main_origin(main_size);
    for line in &lines {
        let slice = &mut placements[line.items.clone()];
        if line.main_space < 0.0 {
            shrink_line(slice, main_size, line.main_space, main_origin, axis.main_sign);
        } else {
            place_line(
                slice,
                line.main_space,
                container.justify_content,
                main_origin,
                axis.main_sign,
            );
        }
    }

    let cross_size = place_lines_cross(&mut lines, container, explicit_cross, &axis);
    for line in &lines {
        for placement in &mut placements[line.items.clone()] {
            align_in_line(placement, line, &axis);
        }
    }

    let rects: Vec<Rect> = placements
        .iter()
        .map(|p| axis.rect(p.main_start, p.main, p.cross_start, p.cross))
        .collect();
    let (width, height) = match axis.main_size {
        Dimension::Width => (main_size, cross_size),
        Dimension::Height => (cross_size, main_size),
    };

    #[cfg(any(test, feature = "debug-stats"))]
    log::trace!(
        target: "layout.flex",
        "{} item(s) in {} line(s), {}x{} main={}..{}",
        rects.len(),
        lines.len(),
        width,
        height,
        axis.main_start.property(),
        axis.main_end.property()
    );

    FlexLayout {
        width,
        height,
        items: rects,
        lines,
    }
}

/// Split items into lines. Items with a flex factor always join the current
/// line without using space. Under `nowrap` everything shares one line; the
/// wrapping modes clamp oversized items to the container first and open a
/// new line whenever an item does not fit in what is left.
fn partition_lines(placements: &mut [Placement], main_size: f32, wrap: FlexWrap) -> Vec<FlexLine> {
    let mut lines = Vec::new();
    let mut current = FlexLine::starting_at(0, main_size);
    for (index, placement) in placements.iter_mut().enumerate() {
        if placement.flex.is_none() && wrap != FlexWrap::NoWrap {
            placement.main = placement.main.min(main_size);
            if placement.main > current.main_space + EPSILON && !current.is_empty() {
                let next = FlexLine::starting_at(index, main_size);
                lines.push(std::mem::replace(&mut current, next));
            }
        }
        current.items.end = index + 1;
        if placement.flex.is_none() {
            current.main_space -= placement.main;
        }
        current.cross_size = current.cross_size.max(placement.cross);
    }
    lines.push(current);
    lines
}

/// Overfull line: flexible items collapse to zero and the rest scale by
/// `main / (main - remaining)`, packed from the main origin.
fn shrink_line(line: &mut [Placement], main_size: f32, remaining: f32, origin: f32, sign: f32) {
    // halved so the denominator stays finite for lengths near f32::MAX
    let scale = (main_size * 0.5) / (main_size * 0.5 - remaining * 0.5);
    let mut cursor = origin;
    for placement in line {
        if placement.flex.is_some() {
            placement.main = 0.0;
        }
        placement.main *= scale;
        placement.main_start = cursor;
        cursor += sign * placement.main;
    }
}

fn place_line(
    line: &mut [Placement],
    remaining: f32,
    justify: JustifyContent,
    origin: f32,
    sign: f32,
) {
    let flex_total: f32 = line.iter().filter_map(|p| p.flex).sum();
    let (lead, gap) = if flex_total > 0.0 {
        let share = remaining / flex_total;
        for placement in line.iter_mut() {
            if let Some(factor) = placement.flex {
                placement.main = (share * factor).min(remaining);
            }
        }
        (0.0, 0.0)
    } else {
        justify_offsets(justify, remaining, line.len())
    };

    let mut cursor = origin + sign * lead;
    for placement in line {
        placement.main_start = cursor;
        cursor += sign * (placement.main + gap);
    }
}

/// Leading offset and inter-item gap for `justify-content`.
fn justify_offsets(justify: JustifyContent, remaining: f32, count: usize) -> (f32, f32) {
    let n = count as f32;
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (remaining, 0.0),
        JustifyContent::Center => (remaining / 2.0, 0.0),
        JustifyContent::SpaceBetween if count > 1 => (0.0, remaining / (n - 1.0)),
        JustifyContent::SpaceBetween => (0.0, 0.0),
        JustifyContent::SpaceAround if count > 0 => {
            let gap = remaining / n;
            (gap / 2.0, gap)
        }
        JustifyContent::SpaceAround => (0.0, 0.0),
    }
}

/// Size and position every line on the cross axis; returns the container's
/// cross size.
fn place_lines_cross(
    lines: &mut [FlexLine],
    container: &FlexContainer,
    explicit_cross: Option<f32>,
    axis: &AxisRoles,
) -> f32 {
    if container.wrap == FlexWrap::NoWrap
        && let (Some(cross), [line]) = (explicit_cross, &mut *lines)
    {
        line.cross_size = cross;
    }

    let used = lines.iter().map(|l| l.cross_size).sum::<f32>().min(f32::MAX);
    let cross_size = explicit_cross.unwrap_or(used);
    let free = cross_size - used;
    let count = lines.len();

    let (lead, gap) = match container.align_content {
        AlignContent::Stretch => {
            if free > 0.0 && count > 0 {
                let share = free / count as f32;
                for line in lines.iter_mut() {
                    line.cross_size += share;
                }
            }
            (0.0, 0.0)
        }
        AlignContent::FlexStart => (0.0, 0.0),
        AlignContent::FlexEnd => (free, 0.0),
        AlignContent::Center => (free / 2.0, 0.0),
        AlignContent::SpaceBetween if free > 0.0 && count > 1 => (0.0, free / (count as f32 - 1.0)),
        AlignContent::SpaceAround if free > 0.0 && count > 0 => {
            let gap = free / count as f32;
            (gap / 2.0, gap)
        }
        AlignContent::SpaceBetween | AlignContent::SpaceAround => (0.0, 0.0),
    };

    let origin = axis.cross_origin(cross_size);
    let mut offset = lead;
    for line in lines.iter_mut() {
        let start = origin + axis.cross_sign * offset;
        line.cross_start = if axis.cross_sign < 0.0 {
            start - line.cross_size
        } else {
            start
        };
        offset += line.cross_size + gap;
    }
    cross_size
}

fn align_in_line(placement: &mut Placement, line: &FlexLine, axis: &AxisRoles) {
    let lead = match placement.align {
        AlignItems::Stretch if placement.cross_auto => {
            placement.cross = line.cross_size;
            0.0
        }
        AlignItems::FlexEnd => line.cross_size - placement.cross,
        AlignItems::Center => (line.cross_size - placement.cross) / 2.0,
        AlignItems::FlexStart | AlignItems::Baseline | AlignItems::Stretch => 0.0,
    };
    // cross_start is the line's lower coordinate; convert to the
    // sign-aware start edge the item is measured from.
    let line_edge = if axis.cross_sign < 0.0 {
        line.cross_start + line.cross_size
    } else {
        line.cross_start
    };
    placement.cross_start = line_edge + axis.cross_sign * lead;
}
