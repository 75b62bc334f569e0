// ABOUTME: Geometry callback used to measure a pane before splitting it.
// ABOUTME: Lets the hosting view report the pixel size it actually rendered.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use sv_core::{Axis, Rect};

/// Reports how many pixels a piece of content currently spans along an axis
pub trait ExtentSource<C> {
    /// `None` when the host has no measurement for this content
    fn extent(&self, content: &C, axis: Axis) -> Option<f32>;
}

impl<C, S> ExtentSource<C> for HashMap<C, Rect, S>
where
    C: Eq + Hash,
    S: BuildHasher,
{
    fn extent(&self, content: &C, axis: Axis) -> Option<f32> {
        self.get(content).map(|rect| rect.extent(axis))
    }
}
