//! Element tree data structures.
//!
//! Elements live in an arena addressed by [`ElementId`]. A container owns the
//! membership of its children; each element records its parent as a plain id
//! used only for walking upward.

use std::sync::atomic::{AtomicU64, Ordering};

use aether_core::{
    Constraints, ElementId, Orientation, Position, Rect, Size, TreeError, TreeId, WindowId,
};
use smallvec::SmallVec;
use tracing::trace;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

fn next_tree_id() -> TreeId {
    TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
}

/// Child list of a container, in insertion order.
pub type Children = SmallVec<[ElementId; 4]>;

/// What an element is: a leaf box or a container laying out children.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Leaf,
    Container {
        orientation: Orientation,
        children: Children,
    },
}

/// A node in the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    name: Option<String>,
    kind: ElementKind,
    constraints: Constraints,
    /// Relative to the parent's origin
    position: Position,
    size: Size,
    parent: Option<ElementId>,
    window: Option<WindowId>,
    /// Bumped whenever this element or a descendant changes
    revision: u64,
}

impl Element {
    /// Create a leaf element.
    pub fn leaf() -> Self {
        Self::with_kind(ElementKind::Leaf)
    }

    /// Create a container laying its children out along `orientation`.
    pub fn container(orientation: Orientation) -> Self {
        Self::with_kind(ElementKind::Container {
            orientation,
            children: Children::new(),
        })
    }

    fn with_kind(kind: ElementKind) -> Self {
        Self {
            id: ElementId(0),
            name: None,
            kind,
            constraints: Constraints::default(),
            position: Position::ORIGIN,
            size: Size::ZERO,
            parent: None,
            window: None,
            revision: 0,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Settled box, relative to the parent.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ElementKind::Container { .. })
    }

    /// Layout axis, for containers.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.kind {
            ElementKind::Container { orientation, .. } => Some(orientation),
            ElementKind::Leaf => None,
        }
    }

    /// Children in layout order. Empty for leaves.
    pub fn children(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Container { children, .. } => children,
            ElementKind::Leaf => &[],
        }
    }

    /// Human-readable label for diagnostics.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.id, name),
            None => self.id.to_string(),
        }
    }
}

/// Arena holding every element of one or more trees.
///
/// Each arena carries its own [`TreeId`]; a clone gets a fresh one.
#[derive(Debug)]
pub struct ElementTree {
    id: TreeId,
    elements: Vec<Element>,
    next_revision: u64,
}

impl Clone for ElementTree {
    fn clone(&self) -> Self {
        Self {
            id: next_tree_id(),
            elements: self.elements.clone(),
            next_revision: self.next_revision,
        }
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            id: next_tree_id(),
            elements: Vec::new(),
            next_revision: 1,
        }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Number of elements in the arena.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a detached element and return its id.
    pub fn insert(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        element.id = id;
        element.parent = None;
        element.revision = self.bump();
        self.elements.push(element);
        id
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    /// Get an element by id, failing for unknown ids.
    pub fn element(&self, id: ElementId) -> Result<&Element, TreeError> {
        self.get(id).ok_or(TreeError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, TreeError> {
        self.elements
            .get_mut(id.index())
            .ok_or(TreeError::UnknownElement(id))
    }

    /// Iterate over all elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Children of an element. Empty for leaves and unknown ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(Element::parent)
    }

    /// The element and its ancestors, innermost first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.get(id).map(Element::id), move |&current| {
            self.parent(current)
        })
    }

    /// The element and all of its descendants in pre-order.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            result.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        result
    }

    /// Append `child` to the children of `parent`.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        self.element(child)?;
        if !self.element(parent)?.is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        if let Some(existing) = self.parent(child) {
            return Err(TreeError::AlreadyAttached { child, parent: existing });
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::CycleDetected { child, parent });
        }

        if let ElementKind::Container { children, .. } = &mut self.element_mut(parent)?.kind {
            children.push(child);
        }
        self.element_mut(child)?.parent = Some(parent);
        trace!(%parent, %child, "attached");
        self.touch(parent);
        Ok(())
    }

    /// Remove `child` from its parent. Returns the former parent, if any.
    pub fn detach(&mut self, child: ElementId) -> Result<Option<ElementId>, TreeError> {
        let Some(parent) = self.element(child)?.parent else {
            return Ok(None);
        };

        if let ElementKind::Container { children, .. } = &mut self.element_mut(parent)?.kind {
            children.retain(|id| *id != child);
        }
        self.element_mut(child)?.parent = None;
        trace!(%parent, %child, "detached");
        self.touch(parent);
        self.touch(child);
        Ok(Some(parent))
    }

    /// Get the constraints of an element.
    pub fn constraints(&self, id: ElementId) -> Result<&Constraints, TreeError> {
        Ok(&self.element(id)?.constraints)
    }

    /// Mutable access to constraints. Marks the element and its ancestors for re-packing.
    pub fn constraints_mut(&mut self, id: ElementId) -> Result<&mut Constraints, TreeError> {
        self.element(id)?;
        self.touch(id);
        Ok(&mut self.element_mut(id)?.constraints)
    }

    /// Replace the constraints of an element.
    pub fn set_constraints(&mut self, id: ElementId, constraints: Constraints) -> Result<(), TreeError> {
        *self.constraints_mut(id)? = constraints;
        Ok(())
    }

    /// Mark an element and every ancestor as needing a fresh pack.
    pub fn request_repack(&mut self, id: ElementId) -> Result<(), TreeError> {
        self.element(id)?;
        self.touch(id);
        Ok(())
    }

    /// Set the owning window of `root` and all of its descendants.
    pub fn propagate_window(
        &mut self,
        root: ElementId,
        window: Option<WindowId>,
    ) -> Result<usize, TreeError> {
        self.element(root)?;
        let ids = self.descendants(root);
        for &id in &ids {
            self.element_mut(id)?.window = window;
        }
        Ok(ids.len())
    }

    /// Box of an element in the coordinate space of its outermost ancestor.
    pub fn absolute_bounds(&self, id: ElementId) -> Result<Rect, TreeError> {
        let element = self.element(id)?;
        let origin = self
            .ancestors(id)
            .skip(1)
            .filter_map(|ancestor| self.get(ancestor))
            .fold(element.position, |acc, ancestor| acc.offset(ancestor.position));
        Ok(Rect::new(origin, element.size))
    }

    /// Store a settled box.
    pub(crate) fn set_bounds(&mut self, id: ElementId, bounds: Rect) -> Result<(), TreeError> {
        let element = self.element_mut(id)?;
        element.position = bounds.position;
        element.size = bounds.size;
        Ok(())
    }

    fn bump(&mut self) -> u64 {
        let revision = self.next_revision;
        self.next_revision += 1;
        revision
    }

    fn touch(&mut self, id: ElementId) {
        let revision = self.bump();
        let mut current = Some(id);
        while let Some(id) = current {
            match self.elements.get_mut(id.index()) {
                Some(element) => {
                    element.revision = revision;
                    current = element.parent;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.insert(Element::container(Orientation::Vertical).with_name("root"));
        let row = tree.insert(Element::container(Orientation::Horizontal).with_name("row"));
        let leaf = tree.insert(Element::leaf().with_name("leaf"));
        tree.attach(root, row).unwrap();
        tree.attach(row, leaf).unwrap();
        (tree, root, row, leaf)
    }

    #[test]
    fn test_attach_wires_both_sides() {
        let (tree, root, row, leaf) = sample_tree();
        assert_eq!(tree.children(root), &[row]);
        assert_eq!(tree.children(row), &[leaf]);
        assert_eq!(tree.parent(leaf), Some(row));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.ancestors(leaf).collect::<Vec<_>>(), vec![leaf, row, root]);
        assert_eq!(tree.descendants(root), vec![root, row, leaf]);
    }

    #[test]
    fn test_attach_rejects_invalid_wiring() {
        let (mut tree, root, row, leaf) = sample_tree();
        let other = tree.insert(Element::leaf());

        assert_eq!(tree.attach(leaf, other), Err(TreeError::NotAContainer(leaf)));
        assert_eq!(
            tree.attach(root, leaf),
            Err(TreeError::AlreadyAttached { child: leaf, parent: row })
        );
        assert_eq!(
            tree.attach(root, ElementId(99)),
            Err(TreeError::UnknownElement(ElementId(99)))
        );

        let detached = tree.insert(Element::container(Orientation::Horizontal));
        tree.attach(detached, root).unwrap();
        assert_eq!(
            tree.attach(row, detached),
            Err(TreeError::CycleDetected { child: detached, parent: row })
        );
        assert_eq!(
            tree.attach(detached, detached),
            Err(TreeError::CycleDetected { child: detached, parent: detached })
        );
    }

    #[test]
    fn test_detach() {
        let (mut tree, root, row, leaf) = sample_tree();
        assert_eq!(tree.detach(leaf), Ok(Some(row)));
        assert!(tree.children(row).is_empty());
        assert_eq!(tree.parent(leaf), None);
        assert_eq!(tree.detach(leaf), Ok(None));

        tree.attach(root, leaf).unwrap();
        assert_eq!(tree.children(root), &[row, leaf]);
    }

    #[test]
    fn test_mutation_bumps_ancestor_revisions() {
        let (mut tree, root, row, leaf) = sample_tree();
        let before: Vec<u64> = [root, row, leaf]
            .iter()
            .map(|id| tree.get(*id).unwrap().revision())
            .collect();

        tree.constraints_mut(leaf).unwrap().size_minimum.width = aether_core::Fixed::scalar(5);

        let after: Vec<u64> = [root, row, leaf]
            .iter()
            .map(|id| tree.get(*id).unwrap().revision())
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(a > b);
        }

        let sibling = tree.insert(Element::leaf());
        let row_revision = tree.get(row).unwrap().revision();
        let leaf_revision = tree.get(leaf).unwrap().revision();
        tree.request_repack(sibling).unwrap();
        assert_eq!(tree.get(row).unwrap().revision(), row_revision);
        assert_eq!(tree.get(leaf).unwrap().revision(), leaf_revision);
    }

    #[test]
    fn test_propagate_window() {
        let (mut tree, root, row, leaf) = sample_tree();
        let count = tree.propagate_window(root, Some(WindowId(7))).unwrap();
        assert_eq!(count, 3);
        for id in [root, row, leaf] {
            assert_eq!(tree.get(id).unwrap().window(), Some(WindowId(7)));
        }

        tree.propagate_window(row, None).unwrap();
        assert_eq!(tree.get(root).unwrap().window(), Some(WindowId(7)));
        assert_eq!(tree.get(leaf).unwrap().window(), None);
    }

    #[test]
    fn test_absolute_bounds() {
        let (mut tree, root, row, leaf) = sample_tree();
        tree.set_bounds(root, Rect::new(Position::new(5, 5), Size::new(800, 600))).unwrap();
        tree.set_bounds(row, Rect::new(Position::new(10, 20), Size::new(400, 100))).unwrap();
        tree.set_bounds(leaf, Rect::new(Position::new(3, 4), Size::new(50, 50))).unwrap();

        let bounds = tree.absolute_bounds(leaf).unwrap();
        assert_eq!(bounds.position, Position::new(18, 29));
        assert_eq!(bounds.size, Size::new(50, 50));
    }

    #[test]
    fn test_trees_and_clones_have_distinct_ids() {
        let (tree, _, _, leaf) = sample_tree();
        let other = ElementTree::new();
        let copy = tree.clone();
        assert_ne!(tree.id(), other.id());
        assert_ne!(tree.id(), copy.id());
        assert_eq!(copy.get(leaf).unwrap().revision(), tree.get(leaf).unwrap().revision());
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut tree = ElementTree::new();
        let container = tree.insert(Element::container(Orientation::Horizontal));
        assert_eq!(tree.get(container).unwrap().orientation(), Some(Orientation::Horizontal));
        assert!(tree.children(container).is_empty());
        assert_eq!(tree.get(container).unwrap().label(), "#0");
    }
}
