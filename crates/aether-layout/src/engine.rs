//! The two-phase layout engine.
//!
//! 1. **Pack**: bottom-up, every element gets a [`CalculatedSizes`] built from
//!    its own constraints and, for containers, the coalesced sizes of its
//!    children.
//! 2. **Settle**: top-down, every container splits its box among its children
//!    along its orientation and stretches them across the other axis.

use aether_core::{
    ConstraintError, ElementId, LayoutError, Orientation, Position, Rect, Size, TreeId,
};
use tracing::{debug, trace, warn};

use crate::distribute::{distribute_on_axis, fit_off_axis, AxisItem};
use crate::sizes::CalculatedSizes;
use crate::tree::{Element, ElementKind, ElementTree};

/// Options for layout computation.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Validate every element's constraints while packing
    pub validate_constraints: bool,
    /// Deepest nesting accepted before the pass is aborted
    pub max_depth: usize,
    /// Report children whose minimum does not fit across the off-axis
    pub report_off_axis_overflow: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            validate_constraints: true,
            max_depth: 512,
            report_off_axis_overflow: true,
        }
    }
}

/// Where an element stands in the pack/settle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Never packed by this engine
    Unmeasured,
    /// Packed and unchanged since
    Packed,
    /// Changed after it was packed
    Stale,
    /// Packed and settled, unchanged since
    Settled,
}

/// A container whose children do not fit its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    /// The container that overflowed
    pub element: ElementId,
    /// Axis along which it overflowed
    pub orientation: Orientation,
    /// Missing pixels
    pub deficit: u64,
}

/// Outcome of a settle pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Containers that could not fit their children, in traversal order
    pub overflows: Vec<Overflow>,
    /// Number of elements whose box was written
    pub settled: usize,
}

impl LayoutReport {
    /// True when nothing overflowed.
    pub fn is_clean(&self) -> bool {
        self.overflows.is_empty()
    }

    /// Deficit reported for a container along an axis.
    pub fn deficit(&self, element: ElementId, orientation: Orientation) -> Option<u64> {
        self.overflows
            .iter()
            .find(|o| o.element == element && o.orientation == orientation)
            .map(|o| o.deficit)
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheSlot {
    sizes: CalculatedSizes,
    packed_at: u64,
    settled_at: Option<u64>,
}

/// Computes sizes and positions for an [`ElementTree`].
///
/// The cache is indexed by element id and bound to the tree last packed.
/// Packing a different tree drops it.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
    tree: Option<TreeId>,
    cache: Vec<Option<CacheSlot>>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        Self {
            options,
            tree: None,
            cache: Vec::new(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Measure `root` and everything below it.
    ///
    /// Elements unchanged since their last pack are served from the cache.
    pub fn pack(&mut self, tree: &ElementTree, root: ElementId) -> Result<CalculatedSizes, LayoutError> {
        if self.tree != Some(tree.id()) {
            if self.tree.is_some() {
                debug!(tree = %tree.id(), "switching trees, dropping layout cache");
            }
            self.cache.clear();
            self.tree = Some(tree.id());
        }
        if self.cache.len() < tree.len() {
            self.cache.resize(tree.len(), None);
        }
        let sizes = self.pack_element(tree, root, 0)?;
        debug!(%root, ?sizes, "pack complete");
        Ok(sizes)
    }

    /// Pack `root`, then settle it into a box of `available` size.
    pub fn layout(
        &mut self,
        tree: &mut ElementTree,
        root: ElementId,
        available: Size,
    ) -> Result<LayoutReport, LayoutError> {
        self.pack(tree, root)?;
        self.settle(tree, root, available)
    }

    /// Distribute `available` space over an already packed tree.
    ///
    /// All boxes are computed before any is written, so an error leaves the
    /// tree unchanged.
    pub fn settle(
        &mut self,
        tree: &mut ElementTree,
        root: ElementId,
        available: Size,
    ) -> Result<LayoutReport, LayoutError> {
        if self.tree != Some(tree.id()) {
            return Err(LayoutError::NotPacked { element: root });
        }
        let mut report = LayoutReport::default();
        let mut frames = Vec::new();
        self.settle_element(
            tree,
            root,
            Rect::new(Position::ORIGIN, available),
            0,
            &mut frames,
            &mut report,
        )?;

        for &(id, bounds) in &frames {
            tree.set_bounds(id, bounds)?;
            let revision = tree.element(id)?.revision();
            if let Some(Some(slot)) = self.cache.get_mut(id.index()) {
                slot.settled_at = Some(revision);
            }
        }
        report.settled = frames.len();

        for overflow in &report.overflows {
            warn!(
                element = %overflow.element,
                orientation = %overflow.orientation,
                deficit = overflow.deficit,
                "content overflows container"
            );
        }
        debug!(%root, settled = report.settled, overflows = report.overflows.len(), "settle complete");
        Ok(report)
    }

    /// Cached sizes of an element, or all zeros if it was never packed.
    ///
    /// Use [`LayoutEngine::state`] to tell a real zero from a cache miss.
    pub fn sizes(&self, id: ElementId) -> CalculatedSizes {
        self.slot(id).map(|slot| slot.sizes).unwrap_or_default()
    }

    pub fn state(&self, tree: &ElementTree, id: ElementId) -> LayoutState {
        if self.tree != Some(tree.id()) {
            return LayoutState::Unmeasured;
        }
        let (Some(slot), Some(element)) = (self.slot(id), tree.get(id)) else {
            return LayoutState::Unmeasured;
        };
        if slot.packed_at != element.revision() {
            LayoutState::Stale
        } else if slot.settled_at == Some(element.revision()) {
            LayoutState::Settled
        } else {
            LayoutState::Packed
        }
    }

    /// Drop the cached sizes of one element.
    pub fn invalidate(&mut self, id: ElementId) {
        if let Some(slot) = self.cache.get_mut(id.index()) {
            *slot = None;
        }
    }

    /// Drop every cached size.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.tree = None;
    }

    fn slot(&self, id: ElementId) -> Option<&CacheSlot> {
        self.cache.get(id.index()).and_then(Option::as_ref)
    }

    fn pack_element(
        &mut self,
        tree: &ElementTree,
        id: ElementId,
        depth: usize,
    ) -> Result<CalculatedSizes, LayoutError> {
        if depth > self.options.max_depth {
            return Err(LayoutError::MaxDepthExceeded {
                element: id,
                depth: self.options.max_depth,
            });
        }

        let element = tree.element(id)?;
        if let Some(slot) = self.slot(id) {
            if slot.packed_at == element.revision() {
                return Ok(slot.sizes);
            }
        }

        let constraints = element.constraints();
        if self.options.validate_constraints {
            constraints
                .validate()
                .map_err(|source| LayoutError::InvalidConstraints { element: id, source })?;
        }

        let own = CalculatedSizes::of_constraints(constraints);
        let sizes = match element.kind() {
            ElementKind::Leaf => own,
            ElementKind::Container { orientation, children } => {
                let mut content: Option<CalculatedSizes> = None;
                for &child in children {
                    let packed = self.pack_element(tree, child, depth + 1)?;
                    let margins = CalculatedSizes::of_directions(&tree.constraints(child)?.margins);
                    let footprint = packed
                        .checked_add(margins)
                        .ok_or(LayoutError::SizeOverflow { element: child })?;
                    content = Some(match content {
                        Some(total) => total
                            .checked_coalesce(footprint, *orientation)
                            .ok_or(LayoutError::SizeOverflow { element: id })?,
                        None => footprint,
                    });
                }
                let content = content
                    .unwrap_or(CalculatedSizes::UNBOUNDED)
                    .checked_add(CalculatedSizes::of_directions(&constraints.padding))
                    .ok_or(LayoutError::SizeOverflow { element: id })?;
                if self.options.validate_constraints {
                    check_content_fits(own, content)
                        .map_err(|source| LayoutError::InvalidConstraints { element: id, source })?;
                }
                CalculatedSizes::enclose(own, content)
            }
        };

        trace!(element = %element.label(), ?sizes, "packed");
        self.cache[id.index()] = Some(CacheSlot {
            sizes,
            packed_at: element.revision(),
            settled_at: None,
        });
        Ok(sizes)
    }

    fn require_packed(&self, element: &Element) -> Result<CalculatedSizes, LayoutError> {
        match self.slot(element.id()) {
            None => Err(LayoutError::NotPacked { element: element.id() }),
            Some(slot) if slot.packed_at != element.revision() => {
                Err(LayoutError::StalePack { element: element.id() })
            }
            Some(slot) => Ok(slot.sizes),
        }
    }

    fn settle_element(
        &self,
        tree: &ElementTree,
        id: ElementId,
        bounds: Rect,
        depth: usize,
        frames: &mut Vec<(ElementId, Rect)>,
        report: &mut LayoutReport,
    ) -> Result<(), LayoutError> {
        if depth > self.options.max_depth {
            return Err(LayoutError::MaxDepthExceeded {
                element: id,
                depth: self.options.max_depth,
            });
        }

        let element = tree.element(id)?;
        self.require_packed(element)?;
        trace!(element = %element.label(), ?bounds, "settled");
        frames.push((id, bounds));

        let ElementKind::Container { orientation, children } = element.kind() else {
            return Ok(());
        };
        if children.is_empty() {
            return Ok(());
        }

        let on = *orientation;
        let off = on.orthogonal();
        let padding = &element.constraints().padding;

        let own_on = bounds.size.along(on) as i64;
        let own_off = bounds.size.along(off) as i64;
        let pad_leading_on = padding.leading_fixed(on).resolve(own_on).max(0);
        let pad_trailing_on = padding.trailing_fixed(on).resolve(own_on).max(0);
        let pad_leading_off = padding.leading_fixed(off).resolve(own_off).max(0);
        let pad_trailing_off = padding.trailing_fixed(off).resolve(own_off).max(0);
        // May be negative when padding alone exceeds the box; the shortfall
        // then counts toward the on-axis deficit.
        let inner_on = own_on - pad_leading_on - pad_trailing_on;
        let content_on = inner_on.max(0);
        let content_off = (own_off - pad_leading_off - pad_trailing_off).max(0);

        let mut placements = Vec::with_capacity(children.len());
        let mut items = Vec::with_capacity(children.len());
        for &child in children {
            let child_element = tree.element(child)?;
            let sizes = self.require_packed(child_element)?;
            let constraints = child_element.constraints();
            let margins = &constraints.margins;

            let leading_on = margins.leading_fixed(on).resolve(content_on).max(0);
            let trailing_on = margins.trailing_fixed(on).resolve(content_on).max(0);
            let minimum = sizes.minimum(on).resolve(content_on).max(0);
            let maximum = sizes.maximum(on).map(|m| m.resolve(content_on).max(minimum));
            let desired = sizes.desired(on).resolve(content_on).max(minimum);
            let fill_weight = constraints
                .size_desired
                .for_orientation(on)
                .fill_weight()
                .unwrap_or(0);

            items.push(AxisItem {
                minimum,
                desired,
                maximum,
                margin: leading_on + trailing_on,
                fill_weight,
            });

            let leading_off = margins.leading_fixed(off).resolve(content_off).max(0);
            let trailing_off = margins.trailing_fixed(off).resolve(content_off).max(0);
            let minimum_off = sizes.minimum(off).resolve(content_off).max(0);
            let maximum_off = sizes.maximum(off).map(|m| m.resolve(content_off).max(0));
            let fit = fit_off_axis(content_off, minimum_off, maximum_off, leading_off + trailing_off);

            placements.push(Placement {
                child,
                leading_on,
                trailing_on,
                leading_off,
                extent_off: fit.extent,
                deficit_off: fit.deficit,
            });
        }

        let distribution = distribute_on_axis(inner_on, &items);
        if distribution.deficit > 0 {
            report.overflows.push(Overflow {
                element: id,
                orientation: on,
                deficit: distribution.deficit as u64,
            });
        }
        let deficit_off = placements.iter().map(|p| p.deficit_off).max().unwrap_or(0);
        if deficit_off > 0 && self.options.report_off_axis_overflow {
            report.overflows.push(Overflow {
                element: id,
                orientation: off,
                deficit: deficit_off as u64,
            });
        }

        let mut cursor = pad_leading_on;
        for (placement, &extent_on) in placements.iter().zip(&distribution.extents) {
            cursor += placement.leading_on;
            let position = Position::from_axes(
                on,
                to_offset(cursor, placement.child, on)?,
                to_offset(pad_leading_off + placement.leading_off, placement.child, off)?,
            );
            let size = Size::from_axes(
                on,
                to_extent(extent_on, placement.child, on)?,
                to_extent(placement.extent_off, placement.child, off)?,
            );
            self.settle_element(tree, placement.child, Rect::new(position, size), depth + 1, frames, report)?;
            cursor += extent_on + placement.trailing_on;
        }

        Ok(())
    }
}

/// Resolved placement data for one child, gathered before distribution.
struct Placement {
    child: ElementId,
    leading_on: i64,
    trailing_on: i64,
    leading_off: i64,
    extent_off: i64,
    deficit_off: i64,
}

/// A container's own maximum must hold the minimum of its content.
fn check_content_fits(own: CalculatedSizes, content: CalculatedSizes) -> Result<(), ConstraintError> {
    for axis in Orientation::ALL {
        if let Some(maximum) = own.maximum(axis) {
            let minimum = content.minimum(axis);
            if minimum.rectify() > maximum.rectify() {
                return Err(ConstraintError::ContentExceedsMaximum {
                    axis,
                    content: minimum,
                    maximum,
                });
            }
        }
    }
    Ok(())
}

fn to_extent(value: i64, element: ElementId, axis: Orientation) -> Result<u32, LayoutError> {
    u32::try_from(value).map_err(|_| LayoutError::SizeOutOfRange { element, axis, value })
}

fn to_offset(value: i64, element: ElementId, axis: Orientation) -> Result<i32, LayoutError> {
    i32::try_from(value).map_err(|_| LayoutError::SizeOutOfRange { element, axis, value })
}

/// Pack and settle `root` with a throwaway engine.
pub fn compute_layout(
    tree: &mut ElementTree,
    root: ElementId,
    available: Size,
    options: &LayoutOptions,
) -> Result<LayoutReport, LayoutError> {
    LayoutEngine::with_options(options.clone()).layout(tree, root, available)
}
