//! Sprite-sheet stream: slices an atlas on a regular grid.
//!
//! The grid is walked once at construction according to a [`GridTraversal`].
//! The visiting order is the animation order: frame 0 is the first cell
//! visited. Lookups afterwards are a division and an index.

use std::time::Duration;

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

use super::{resolve_index, EndBehavior, FrameStream, FrameTable};
use crate::components::frame::{AtlasHandle, Frame};
use crate::components::rect::IntRect;
use crate::core::time::serde_millis;
use crate::error::AnimError;

/// Which side of the atlas the columns are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Which side of the atlas the rows are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalDirection {
    #[default]
    TopToBottom,
    BottomToTop,
}

/// Which axis is exhausted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPrecedence {
    /// Every column of a row, then the next row.
    #[default]
    RowMajor,
    /// Every row of a column, then the next column.
    ColumnMajor,
}

/// Order in which grid cells receive frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTraversal {
    pub horizontal: HorizontalDirection,
    pub vertical: VerticalDirection,
    pub precedence: AxisPrecedence,
}

impl GridTraversal {
    pub fn new(
        horizontal: HorizontalDirection,
        vertical: VerticalDirection,
        precedence: AxisPrecedence,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            precedence,
        }
    }

    /// Cell rectangles of a `cells.x` × `cells.y` grid in visiting order.
    ///
    /// Reading right-to-left starts at `atlas_size.x - cell_size.x` and steps
    /// by `-cell_size.x`; bottom-to-top mirrors that on Y. Fails with
    /// [`AnimError::InvalidArgument`] when a cell count or offset does not fit
    /// in `i32`.
    pub fn slice(
        &self,
        atlas_size: UVec2,
        cell_size: IVec2,
        cells: UVec2,
    ) -> Result<Vec<IntRect>, AnimError> {
        let columns = grid_axis("column", atlas_size.x, cell_size.x, cells.x)?;
        let rows = grid_axis("row", atlas_size.y, cell_size.y, cells.y)?;
        let atlas = atlas_size.as_ivec2();
        let (origin_x, step_x) = match self.horizontal {
            HorizontalDirection::LeftToRight => (0, cell_size.x),
            HorizontalDirection::RightToLeft => (atlas.x - cell_size.x, -cell_size.x),
        };
        let (origin_y, step_y) = match self.vertical {
            VerticalDirection::TopToBottom => (0, cell_size.y),
            VerticalDirection::BottomToTop => (atlas.y - cell_size.y, -cell_size.y),
        };

        let cell = move |col: i32, row: i32| {
            IntRect::from_pos_size(
                IVec2::new(origin_x + col * step_x, origin_y + row * step_y),
                cell_size,
            )
        };

        Ok(match self.precedence {
            AxisPrecedence::RowMajor => (0..rows)
                .flat_map(|row| (0..columns).map(move |col| cell(col, row)))
                .collect(),
            AxisPrecedence::ColumnMajor => (0..columns)
                .flat_map(|col| (0..rows).map(move |row| cell(col, row)))
                .collect(),
        })
    }
}

/// Cell count on one axis, once every coordinate the walk can produce
/// (`atlas`, `atlas - cell`, `count * cell`, `atlas - count * cell`) is known
/// to fit in `i32`.
fn grid_axis(axis: &str, atlas: u32, cell: i32, count: u32) -> Result<i32, AnimError> {
    let overflow = || AnimError::invalid(format!("{axis} offsets overflow i32"));
    let count = i32::try_from(count)
        .map_err(|_| AnimError::invalid(format!("{axis} count {count} overflows i32")))?;
    let atlas = i32::try_from(atlas).map_err(|_| overflow())?;
    let span = count.checked_mul(cell).ok_or_else(overflow)?;
    atlas.checked_sub(cell).ok_or_else(overflow)?;
    atlas.checked_sub(span).ok_or_else(overflow)?;
    Ok(count)
}

fn default_looping() -> bool {
    true
}

/// Plain-value description of a sprite sheet, embeddable in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Size of one cell in pixels.
    pub cell_size: IVec2,
    /// Number of columns (x) and rows (y).
    pub cells: UVec2,
    /// Display time of each frame.
    #[serde(rename = "frame_time_ms", with = "serde_millis")]
    pub frame_time: Duration,
    #[serde(default = "default_looping")]
    pub looping: bool,
    #[serde(default)]
    pub traversal: GridTraversal,
    #[serde(default)]
    pub end: EndBehavior,
}

impl SheetConfig {
    /// Looping, left-to-right, top-to-bottom, row-major sheet.
    pub fn new(cell_size: IVec2, cells: UVec2, frame_time: Duration) -> Self {
        Self {
            cell_size,
            cells,
            frame_time,
            looping: true,
            traversal: GridTraversal::default(),
            end: EndBehavior::default(),
        }
    }

    /// A single horizontal strip of `count` cells.
    pub fn strip(cell_size: IVec2, count: u32, frame_time: Duration) -> Self {
        Self::new(cell_size, UVec2::new(count, 1), frame_time)
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_traversal(mut self, traversal: GridTraversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_end(mut self, end: EndBehavior) -> Self {
        self.end = end;
        self
    }
}

/// Frame stream cut out of a grid-shaped atlas.
///
/// A default-constructed stream is empty and answers every query with
/// [`AnimError::NotInitialized`] until [`create`](Self::create) succeeds.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheetStream {
    frame_time: Duration,
    looping: bool,
    end: EndBehavior,
    frames: Vec<Frame>,
}

impl SpriteSheetStream {
    /// Build a stream. See [`create`](Self::create).
    pub fn new(
        atlas: &AtlasHandle,
        cell_size: IVec2,
        cells: UVec2,
        frame_time: Duration,
        looping: bool,
        traversal: GridTraversal,
    ) -> Result<Self, AnimError> {
        let mut stream = Self::default();
        stream.create(atlas, cell_size, cells, frame_time, looping, traversal)?;
        Ok(stream)
    }

    pub fn from_config(atlas: &AtlasHandle, config: &SheetConfig) -> Result<Self, AnimError> {
        let mut stream = Self::new(
            atlas,
            config.cell_size,
            config.cells,
            config.frame_time,
            config.looping,
            config.traversal,
        )?;
        stream.end = config.end;
        Ok(stream)
    }

    /// (Re)build the frame table by slicing `atlas`.
    ///
    /// Fails with [`AnimError::InvalidArgument`] when the grid has no cells,
    /// its offsets overflow `i32`, or `frame_time` is zero. On failure the
    /// stream keeps its previous table.
    pub fn create(
        &mut self,
        atlas: &AtlasHandle,
        cell_size: IVec2,
        cells: UVec2,
        frame_time: Duration,
        looping: bool,
        traversal: GridTraversal,
    ) -> Result<(), AnimError> {
        let count = cells.x as u64 * cells.y as u64;
        if count == 0 {
            return Err(AnimError::invalid("frame count can't be 0"));
        }
        if frame_time.is_zero() {
            return Err(AnimError::invalid("frame time can't be 0"));
        }

        let areas = traversal.slice(atlas.size(), cell_size, cells)?;
        let bounds = atlas.bounds();
        if areas.iter().any(|area| !bounds.contains_rect(area)) {
            log::warn!(
                "sheet grid {}x{} of {}x{} cells exceeds atlas '{}' ({}x{})",
                cells.x,
                cells.y,
                cell_size.x,
                cell_size.y,
                atlas.name,
                atlas.width,
                atlas.height
            );
        }

        self.frames = areas
            .into_iter()
            .map(|area| Frame::textured(atlas, area))
            .collect();
        self.frame_time = frame_time;
        self.looping = looping;
        log::debug!(
            "built sheet stream on '{}': {} frames, {:?} per frame",
            atlas.name,
            self.frames.len(),
            frame_time
        );
        Ok(())
    }

    /// What a non-looping stream shows past its end.
    pub fn set_end_behavior(&mut self, end: EndBehavior) {
        self.end = end;
    }

    pub fn end_behavior(&self) -> EndBehavior {
        self.end
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_initialized(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Time to play every frame once. `None` if it overflows a `Duration`.
    pub fn total_duration(&self) -> Option<Duration> {
        let count = u32::try_from(self.frames.len()).ok()?;
        self.frame_time.checked_mul(count)
    }
}

impl FrameStream for SpriteSheetStream {
    fn frame_at(&self, elapsed: Duration) -> Result<Frame, AnimError> {
        if self.frames.is_empty() {
            return Err(AnimError::NotInitialized);
        }
        let index = resolve_index(
            elapsed,
            self.frame_time,
            self.frames.len(),
            self.looping,
            self.end,
        );
        Ok(match index {
            Some(i) => self.frames[i].clone(),
            None => Frame::blank(),
        })
    }
}

impl FrameTable for SpriteSheetStream {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::frame::{Atlas, AtlasId};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn atlas(width: u32, height: u32) -> AtlasHandle {
        Atlas::new(AtlasId(0), "sheet", width, height).into_handle()
    }

    fn strip_stream(looping: bool) -> SpriteSheetStream {
        SpriteSheetStream::new(
            &atlas(40, 10),
            IVec2::new(10, 10),
            UVec2::new(4, 1),
            ms(100),
            looping,
            GridTraversal::default(),
        )
        .unwrap()
    }

    fn all_traversals() -> Vec<GridTraversal> {
        let mut out = Vec::new();
        for h in [HorizontalDirection::LeftToRight, HorizontalDirection::RightToLeft] {
            for v in [VerticalDirection::TopToBottom, VerticalDirection::BottomToTop] {
                for p in [AxisPrecedence::RowMajor, AxisPrecedence::ColumnMajor] {
                    out.push(GridTraversal::new(h, v, p));
                }
            }
        }
        out
    }

    fn origins(stream: &SpriteSheetStream) -> Vec<(i32, i32)> {
        stream
            .frames()
            .iter()
            .map(|f| (f.area().left(), f.area().top()))
            .collect()
    }

    #[test]
    fn strip_scenario() {
        let stream = strip_stream(true);
        let frames = stream.frames().to_vec();
        assert_eq!(frames.len(), 4);
        assert_eq!(stream.frame_at(ms(0)).unwrap(), frames[0]);
        assert_eq!(stream.frame_at(ms(250)).unwrap(), frames[2]);
        assert_eq!(stream.frame_at(ms(450)).unwrap(), frames[0]);
        assert_eq!(frames[2].area(), IntRect::new(20, 0, 10, 10));
        assert_eq!(frames[2].tint(), crate::components::color::Color::WHITE);
    }

    #[test]
    fn row_major_reads_rows_first() {
        let stream = SpriteSheetStream::new(
            &atlas(30, 20),
            IVec2::new(10, 10),
            UVec2::new(3, 2),
            ms(50),
            true,
            GridTraversal::default(),
        )
        .unwrap();
        assert_eq!(
            origins(&stream),
            vec![(0, 0), (10, 0), (20, 0), (0, 10), (10, 10), (20, 10)]
        );
    }

    #[test]
    fn column_major_right_to_left_bottom_to_top() {
        let traversal = GridTraversal::new(
            HorizontalDirection::RightToLeft,
            VerticalDirection::BottomToTop,
            AxisPrecedence::ColumnMajor,
        );
        let stream = SpriteSheetStream::new(
            &atlas(30, 20),
            IVec2::new(10, 10),
            UVec2::new(3, 2),
            ms(50),
            true,
            traversal,
        )
        .unwrap();
        assert_eq!(
            origins(&stream),
            vec![(20, 10), (20, 0), (10, 10), (10, 0), (0, 10), (0, 0)]
        );
    }

    #[test]
    fn right_to_left_starts_at_atlas_edge() {
        let traversal = GridTraversal {
            horizontal: HorizontalDirection::RightToLeft,
            ..Default::default()
        };
        let stream = SpriteSheetStream::new(
            &atlas(40, 10),
            IVec2::new(10, 10),
            UVec2::new(4, 1),
            ms(100),
            true,
            traversal,
        )
        .unwrap();
        assert_eq!(origins(&stream), vec![(30, 0), (20, 0), (10, 0), (0, 0)]);
    }

    #[test]
    fn every_traversal_tiles_the_same_cells() {
        let sheet = atlas(48, 32);
        let cell = IVec2::new(12, 16);
        let cells = UVec2::new(4, 2);

        let mut reference = GridTraversal::default()
            .slice(sheet.size(), cell, cells)
            .unwrap();
        reference.sort_by_key(|r| (r.top(), r.left()));

        for traversal in all_traversals() {
            let stream =
                SpriteSheetStream::new(&sheet, cell, cells, ms(10), false, traversal).unwrap();
            assert_eq!(stream.frame_count(), 8);

            let mut areas: Vec<IntRect> = stream.frames().iter().map(|f| f.area()).collect();
            for (i, a) in areas.iter().enumerate() {
                assert!(sheet.bounds().contains_rect(a), "{traversal:?} spills: {a:?}");
                for b in &areas[i + 1..] {
                    assert!(!a.intersects(b), "{traversal:?} overlaps: {a:?} {b:?}");
                }
            }
            let covered: i64 = areas.iter().map(|a| a.area()).sum();
            assert_eq!(covered, sheet.bounds().area());

            areas.sort_by_key(|r| (r.top(), r.left()));
            assert_eq!(areas, reference, "{traversal:?}");
        }
    }

    #[test]
    fn rejects_empty_grid() {
        for cells in [UVec2::new(0, 3), UVec2::new(3, 0), UVec2::ZERO] {
            let err = SpriteSheetStream::new(
                &atlas(40, 10),
                IVec2::new(10, 10),
                cells,
                ms(100),
                true,
                GridTraversal::default(),
            )
            .unwrap_err();
            assert!(matches!(err, AnimError::InvalidArgument(_)));
        }
    }

    #[test]
    fn rejects_zero_frame_time() {
        let err = SpriteSheetStream::new(
            &atlas(40, 10),
            IVec2::new(10, 10),
            UVec2::new(4, 1),
            Duration::ZERO,
            true,
            GridTraversal::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnimError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_counts_beyond_i32() {
        for cells in [UVec2::new(0x8000_0000, 1), UVec2::new(1, u32::MAX)] {
            let err = SpriteSheetStream::new(
                &atlas(40, 10),
                IVec2::new(10, 10),
                cells,
                ms(100),
                true,
                GridTraversal::default(),
            )
            .unwrap_err();
            assert!(matches!(err, AnimError::InvalidArgument(_)), "{cells:?}");
        }
    }

    #[test]
    fn rejects_offsets_beyond_i32() {
        let huge = IVec2::new(i32::MAX / 2 + 1, 10);
        for traversal in all_traversals() {
            let err = SpriteSheetStream::new(
                &atlas(40, 10),
                huge,
                UVec2::new(2, 1),
                ms(100),
                true,
                traversal,
            )
            .unwrap_err();
            assert!(matches!(err, AnimError::InvalidArgument(_)), "{traversal:?}");
        }

        let reversed = GridTraversal {
            horizontal: HorizontalDirection::RightToLeft,
            ..Default::default()
        };
        let negative = IVec2::new(i32::MIN, 10);
        assert!(reversed
            .slice(UVec2::new(40, 10), negative, UVec2::new(1, 1))
            .is_err());
        assert!(GridTraversal::default()
            .slice(UVec2::new(u32::MAX, 10), IVec2::new(10, 10), UVec2::new(1, 1))
            .is_err());
    }

    #[test]
    fn large_grid_within_i32_builds() {
        let stream = SpriteSheetStream::new(
            &atlas(40, 10),
            IVec2::new(i32::MAX / 2, 10),
            UVec2::new(2, 1),
            ms(100),
            true,
            GridTraversal::default(),
        )
        .unwrap();
        assert_eq!(stream.frame_count(), 2);
        assert_eq!(stream.frames()[1].area().left(), i32::MAX / 2);
    }

    #[test]
    fn total_duration_overflow_is_none() {
        let stream = SpriteSheetStream::new(
            &atlas(40, 10),
            IVec2::new(10, 10),
            UVec2::new(4, 1),
            Duration::MAX,
            true,
            GridTraversal::default(),
        )
        .unwrap();
        assert_eq!(stream.total_duration(), None);
        assert_eq!(SpriteSheetStream::default().total_duration(), Some(Duration::ZERO));
    }

    #[test]
    fn failed_create_keeps_previous_table() {
        let mut stream = strip_stream(true);
        let before = stream.frames().to_vec();
        let result = stream.create(
            &atlas(40, 10),
            IVec2::new(10, 10),
            UVec2::new(0, 1),
            ms(100),
            false,
            GridTraversal::default(),
        );
        assert!(result.is_err());
        assert_eq!(stream.frames(), before.as_slice());
        assert!(stream.is_looping());
    }

    #[test]
    fn uninitialized_stream_errors() {
        let stream = SpriteSheetStream::default();
        assert!(!stream.is_initialized());
        assert!(matches!(
            stream.frame_at(ms(0)),
            Err(AnimError::NotInitialized)
        ));
    }

    #[test]
    fn non_looping_clamps_to_last() {
        let stream = strip_stream(false);
        let last = stream.frames()[3].clone();
        for t in [399, 400, 1_000, 3_600_000] {
            assert_eq!(stream.frame_at(ms(t)).unwrap(), last);
        }
    }

    #[test]
    fn non_looping_blank_end() {
        let mut stream = strip_stream(false);
        stream.set_end_behavior(EndBehavior::Blank);
        assert_eq!(stream.frame_at(ms(399)).unwrap(), stream.frames()[3]);
        assert_eq!(stream.frame_at(ms(400)).unwrap(), Frame::blank());
    }

    #[test]
    fn looping_is_periodic() {
        let stream = strip_stream(true);
        let period = stream.total_duration().unwrap();
        assert_eq!(period, ms(400));
        for t in (0..1_200).step_by(37) {
            let t = ms(t);
            assert_eq!(
                stream.frame_at(t).unwrap(),
                stream.frame_at(t + period).unwrap()
            );
        }
    }

    #[test]
    fn rebuilding_replaces_frames() {
        let mut stream = strip_stream(true);
        stream
            .create(
                &atlas(20, 20),
                IVec2::new(10, 10),
                UVec2::new(2, 2),
                ms(30),
                false,
                GridTraversal::default(),
            )
            .unwrap();
        assert_eq!(stream.frame_count(), 4);
        assert_eq!(stream.frame_time(), ms(30));
        assert!(!stream.is_looping());
        assert_eq!(stream.frame(3).unwrap().area(), IntRect::new(10, 10, 10, 10));
    }

    #[test]
    fn config_from_json() {
        let json = r#"{
            "cell_size": [16, 16],
            "cells": [4, 2],
            "frame_time_ms": 80,
            "looping": false,
            "traversal": { "horizontal": "right_to_left", "precedence": "column_major" },
            "end": "blank"
        }"#;
        let config: SheetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.frame_time, ms(80));
        assert_eq!(config.traversal.vertical, VerticalDirection::TopToBottom);
        assert_eq!(config.traversal.precedence, AxisPrecedence::ColumnMajor);

        let stream = SpriteSheetStream::from_config(&atlas(64, 32), &config).unwrap();
        assert_eq!(stream.end_behavior(), EndBehavior::Blank);
        assert_eq!(stream.frames()[0].area(), IntRect::new(48, 0, 16, 16));
        assert_eq!(stream.frames()[1].area(), IntRect::new(48, 16, 16, 16));
    }

    #[test]
    fn config_defaults_to_looping() {
        let json = r#"{ "cell_size": [8, 8], "cells": [2, 1], "frame_time_ms": 100 }"#;
        let config: SheetConfig = serde_json::from_str(json).unwrap();
        assert!(config.looping);
        assert_eq!(config, SheetConfig::strip(IVec2::new(8, 8), 2, ms(100)));
    }
}
