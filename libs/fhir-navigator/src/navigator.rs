//! Cursor over a flattened element tree
//!
//! A StructureDefinition snapshot lists its elements in depth-first pre-order, and
//! the only structural information is each element's dotted path. The navigator
//! keeps a shared, immutable element list plus an optional index and derives
//! parent/child/sibling relations from path comparison on every move:
//!
//! - the first child of element `i` is element `i + 1` when its path lies exactly
//!   one level below `i`'s path;
//! - the next sibling is the next element at the same depth before the scan leaves
//!   the parent's subtree;
//! - the parent is the nearest preceding element one level up.
//!
//! Slices share the path of the element they slice, so a slice and its entry are
//! siblings of each other.

use crate::error::{Error, Result};
use ferrum_context::FhirContext;
use ferrum_models::path::{get_parent_path, is_child_path, is_descendant_path, path_depth};
use ferrum_models::{ElementDefinition, StructureDefinition};
use std::sync::Arc;

/// Saved cursor state, see [`ElementNavigator::bookmark`]
///
/// A bookmark is tied to the element list it was taken from and can be restored
/// by any navigator sharing that list (the original or its shallow copies).
#[derive(Debug, Clone)]
pub struct Bookmark {
    elements: Arc<[ElementDefinition]>,
    position: Option<usize>,
}

/// Navigator over the elements of one StructureDefinition.
///
/// The cursor starts unset. Movement methods return `false` and leave the cursor
/// where it was when the requested relative does not exist; only [`current`]
/// fails, and only while the cursor is unset.
///
/// Cloning (or [`shallow_copy`]) shares the element list and copies the cursor,
/// giving an independent traversal point over the same definition.
///
/// [`current`]: ElementNavigator::current
/// [`shallow_copy`]: ElementNavigator::shallow_copy
#[derive(Debug, Clone)]
pub struct ElementNavigator {
    elements: Arc<[ElementDefinition]>,
    cursor: Option<usize>,
}

impl ElementNavigator {
    pub fn new(elements: impl Into<Arc<[ElementDefinition]>>) -> Self {
        Self {
            elements: elements.into(),
            cursor: None,
        }
    }

    /// Navigator over the snapshot of `sd`
    pub fn from_snapshot(sd: &StructureDefinition) -> Result<Self> {
        let elements = sd
            .snapshot_elements()
            .map_err(|_| Error::MissingSnapshot(sd.url.clone()))?;
        Ok(Self::new(elements))
    }

    /// Navigator over the definition `ctx` resolves for `type_name`
    pub fn for_type(ctx: &dyn FhirContext, type_name: &str) -> Result<Self> {
        Ok(Self::new(ctx.resolve_definition(type_name)?))
    }

    /// Independent cursor over the same elements, starting at the same position
    pub fn shallow_copy(&self) -> Self {
        self.clone()
    }

    pub fn elements(&self) -> &[ElementDefinition] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_positioned(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn current(&self) -> Result<&ElementDefinition> {
        self.cursor
            .map(|i| &self.elements[i])
            .ok_or(Error::NavigatorNotPositioned)
    }

    /// Path of the current element
    pub fn path(&self) -> Option<&str> {
        self.current().ok().map(|e| e.path.as_str())
    }

    /// Last path segment of the current element
    pub fn name(&self) -> Option<&str> {
        self.current().ok().map(ElementDefinition::name)
    }

    pub fn is_at_root(&self) -> bool {
        self.current().map(ElementDefinition::is_root).unwrap_or(false)
    }

    /// Position on the first element whose path equals `path` exactly.
    ///
    /// Unsets the cursor when there is no such element.
    pub fn jump_to_first(&mut self, path: &str) -> bool {
        self.cursor = self.elements.iter().position(|e| e.path == path);
        if self.cursor.is_none() {
            tracing::debug!(path, "no element with path");
        }
        self.cursor.is_some()
    }

    /// Follow a `contentReference` such as `#Observation.referenceRange`.
    ///
    /// The fragment is matched against element paths first, then element ids.
    /// Unsets the cursor when nothing matches.
    pub fn jump_to_name_reference(&mut self, reference: &str) -> bool {
        let target = match reference.rfind('#') {
            Some(pos) => &reference[pos + 1..],
            None => reference,
        };
        self.cursor = self
            .elements
            .iter()
            .position(|e| e.path == target)
            .or_else(|| {
                self.elements
                    .iter()
                    .position(|e| e.id.as_deref() == Some(target))
            });
        if self.cursor.is_none() {
            tracing::debug!(reference, "unresolved content reference");
        }
        self.cursor.is_some()
    }

    /// Position on the definition's root element
    pub fn move_to_root(&mut self) -> bool {
        match self.elements.iter().position(ElementDefinition::is_root) {
            Some(i) => {
                self.cursor = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn has_children(&self) -> bool {
        self.first_child().is_some()
    }

    pub fn move_to_first_child(&mut self) -> bool {
        self.move_if_found(self.first_child())
    }

    pub fn move_to_next_sibling(&mut self) -> bool {
        self.move_if_found(self.next_sibling())
    }

    pub fn move_to_previous_sibling(&mut self) -> bool {
        self.move_if_found(self.previous_sibling())
    }

    pub fn move_to_parent(&mut self) -> bool {
        self.move_if_found(self.parent())
    }

    /// Position on the first direct child matching `name` (see [`ElementDefinition::matches_name`])
    pub fn move_to_child(&mut self, name: &str) -> bool {
        let mut probe = self.shallow_copy();
        if !probe.move_to_first_child() {
            return false;
        }
        loop {
            if probe.current().is_ok_and(|e| e.matches_name(name)) {
                self.cursor = probe.cursor;
                return true;
            }
            if !probe.move_to_next_sibling() {
                return false;
            }
        }
    }

    /// Position on the next sibling matching `name`
    pub fn move_to_next_sibling_named(&mut self, name: &str) -> bool {
        let mut probe = self.shallow_copy();
        while probe.move_to_next_sibling() {
            if probe.current().is_ok_and(|e| e.matches_name(name)) {
                self.cursor = probe.cursor;
                return true;
            }
        }
        false
    }

    /// Indices of the direct children of the current element, in order
    pub fn children(&self) -> Vec<usize> {
        let mut probe = self.shallow_copy();
        let mut children = Vec::new();
        if probe.move_to_first_child() {
            children.extend(probe.cursor);
            while probe.move_to_next_sibling() {
                children.extend(probe.cursor);
            }
        }
        children
    }

    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            elements: Arc::clone(&self.elements),
            position: self.cursor,
        }
    }

    /// Restore a cursor saved with [`bookmark`](Self::bookmark).
    ///
    /// Fails, leaving the cursor unchanged, if the bookmark was taken over a
    /// different element list.
    pub fn return_to_bookmark(&mut self, bookmark: &Bookmark) -> bool {
        if !Arc::ptr_eq(&self.elements, &bookmark.elements) {
            tracing::debug!("bookmark belongs to another element list");
            return false;
        }
        self.cursor = bookmark.position;
        true
    }

    fn move_if_found(&mut self, target: Option<usize>) -> bool {
        match target {
            Some(i) => {
                tracing::trace!(from = ?self.cursor, to = i, path = %self.elements[i].path, "move");
                self.cursor = Some(i);
                true
            }
            None => false,
        }
    }

    fn first_child(&self) -> Option<usize> {
        let i = self.cursor?;
        let next = self.elements.get(i + 1)?;
        is_child_path(&self.elements[i].path, &next.path).then_some(i + 1)
    }

    fn next_sibling(&self) -> Option<usize> {
        let i = self.cursor?;
        let path = &self.elements[i].path;
        let parent = get_parent_path(path)?;
        let depth = path_depth(path);

        for (j, element) in self.elements.iter().enumerate().skip(i + 1) {
            if !is_descendant_path(parent, &element.path) {
                break;
            }
            if path_depth(&element.path) == depth {
                return Some(j);
            }
        }
        None
    }

    fn previous_sibling(&self) -> Option<usize> {
        let i = self.cursor?;
        let path = &self.elements[i].path;
        let parent = get_parent_path(path)?;
        let depth = path_depth(path);

        for j in (0..i).rev() {
            let candidate = &self.elements[j].path;
            if !is_descendant_path(parent, candidate) {
                break;
            }
            if path_depth(candidate) == depth {
                return Some(j);
            }
        }
        None
    }

    fn parent(&self) -> Option<usize> {
        let i = self.cursor?;
        let path = &self.elements[i].path;
        let depth = path_depth(path);
        if depth == 0 {
            return None;
        }

        let j = (0..i)
            .rev()
            .find(|&j| path_depth(&self.elements[j].path) < depth)?;
        is_child_path(&self.elements[j].path, path).then_some(j)
    }
}
