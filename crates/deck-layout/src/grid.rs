//! Sparse per-slide grid.
//!
//! Objects live in an arena owned by their [`Slide`] and are addressed by
//! [`ObjectId`] handles. Each occupied row holds the handles of its objects
//! keyed by column; a row "owns" an object while its handle sits in the row's
//! column map.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use deck_core::{Diagnostic, Diagnostics, LayoutError};

/// Handle of an object inside one slide's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// An object placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedObject {
    pub identifier: String,
    pub row: i32,
    pub col: i32,
}

/// Occupied extent of a slide, inclusive on both ends.
///
/// An empty slide has `min > max` on both axes ([`Bounds::EMPTY`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min_row: i32::MAX,
        max_row: i32::MIN,
        min_col: i32::MAX,
        max_col: i32::MIN,
    };

    /// Bounds covering a single cell.
    pub const fn cell(row: i32, col: i32) -> Self {
        Self {
            min_row: row,
            max_row: row,
            min_col: col,
            max_col: col,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_row > self.max_row || self.min_col > self.max_col
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Number of rows and columns spanned.
    pub fn size(&self) -> (u32, u32) {
        if self.is_empty() {
            return (0, 0);
        }
        (
            self.max_row.abs_diff(self.min_row) + 1,
            self.max_col.abs_diff(self.min_col) + 1,
        )
    }

    fn include(&mut self, row: i32, col: i32) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One occupied row: column → object handle.
#[derive(Debug, Clone)]
pub struct Row {
    columns: BTreeMap<i32, ObjectId>,
    min_col: i32,
    max_col: i32,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            columns: BTreeMap::new(),
            min_col: i32::MAX,
            max_col: i32::MIN,
        }
    }
}

impl Row {
    /// Occupied columns in ascending order.
    pub fn columns(&self) -> impl DoubleEndedIterator<Item = (i32, ObjectId)> + '_ {
        self.columns.iter().map(|(&col, &id)| (col, id))
    }

    pub fn get(&self, col: i32) -> Option<ObjectId> {
        self.columns.get(&col).copied()
    }

    pub fn min_col(&self) -> i32 {
        self.min_col
    }

    pub fn max_col(&self) -> i32 {
        self.max_col
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn refresh_bounds(&mut self) {
        self.min_col = self.columns.keys().next().copied().unwrap_or(i32::MAX);
        self.max_col = self.columns.keys().next_back().copied().unwrap_or(i32::MIN);
    }
}

/// Result of [`Slide::move_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum MoveOutcome {
    /// The object now sits at the requested cell.
    Moved,
    /// The cell belongs to another object; nothing changed.
    Rejected { occupant: ObjectId },
}

/// The grid of one slide.
#[derive(Debug, Clone)]
pub struct Slide<'p> {
    identifier: &'p str,
    index: usize,
    objects: Vec<PositionedObject>,
    rows: BTreeMap<i32, Row>,
    lookup: IndexMap<String, ObjectId>,
    bounds: Bounds,
}

impl<'p> Slide<'p> {
    /// Create an empty slide at position `index` of the slide list.
    pub fn new(identifier: &'p str, index: usize) -> Self {
        Self {
            identifier,
            index,
            objects: Vec::new(),
            rows: BTreeMap::new(),
            lookup: IndexMap::new(),
            bounds: Bounds::EMPTY,
        }
    }

    pub fn identifier(&self) -> &'p str {
        self.identifier
    }

    /// Position of the slide in its list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of objects on the slide.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Handle of the object named `identifier`.
    pub fn lookup(&self, identifier: &str) -> Option<ObjectId> {
        self.lookup.get(identifier).copied()
    }

    pub fn object(&self, id: ObjectId) -> Option<&PositionedObject> {
        self.objects.get(id.0)
    }

    /// Current `(row, col)` of the object named `identifier`.
    pub fn position_of(&self, identifier: &str) -> Option<(i32, i32)> {
        self.lookup(identifier)
            .and_then(|id| self.object(id))
            .map(|object| (object.row, object.col))
    }

    /// Object occupying a cell.
    pub fn cell(&self, row: i32, col: i32) -> Option<ObjectId> {
        self.rows.get(&row).and_then(|r| r.get(col))
    }

    /// Objects in the order they were first added.
    pub fn objects(&self) -> impl Iterator<Item = &PositionedObject> + '_ {
        self.lookup.values().map(move |id| &self.objects[id.0])
    }

    /// Occupied rows, highest row index first.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &Row)> + '_ {
        self.rows.iter().rev().map(|(&index, row)| (index, row))
    }

    /// Objects in render order: rows descending, columns ascending within a row.
    pub fn cells(&self) -> impl Iterator<Item = &PositionedObject> + '_ {
        self.rows()
            .flat_map(|(_, row)| row.columns())
            .map(move |(_, id)| &self.objects[id.0])
    }

    /// Place a new object at `(row, col)`.
    ///
    /// Refused if the identifier is already on this slide or the cell is taken.
    pub fn insert(&mut self, identifier: &str, row: i32, col: i32) -> Result<ObjectId, LayoutError> {
        if self.lookup.contains_key(identifier) {
            return Err(LayoutError::DuplicateObject {
                slide: self.identifier.to_string(),
                name: identifier.to_string(),
            });
        }
        if let Some(occupant) = self.cell(row, col) {
            return Err(LayoutError::CellOccupied {
                slide: self.identifier.to_string(),
                occupant: self.objects[occupant.0].identifier.clone(),
                row,
                col,
            });
        }

        let id = ObjectId(self.objects.len());
        self.objects.push(PositionedObject {
            identifier: identifier.to_string(),
            row,
            col,
        });
        self.lookup.insert(identifier.to_string(), id);
        self.attach(id);
        self.bounds.include(row, col);
        Ok(id)
    }

    /// Detach an object from its row without forgetting it.
    ///
    /// The row's own extent is refreshed (an emptied row is dropped) but the
    /// slide bounds are left for the caller to recompute. Returns `false` if
    /// the object was not attached.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get(id.0) else {
            return false;
        };
        let (row_index, col) = (object.row, object.col);
        let Some(row) = self.rows.get_mut(&row_index) else {
            return false;
        };
        if row.get(col) != Some(id) {
            return false;
        }

        row.columns.remove(&col);
        if row.is_empty() {
            self.rows.remove(&row_index);
        } else {
            row.refresh_bounds();
        }
        true
    }

    /// Move an object to `(row, col)`.
    ///
    /// A cell held by a different object rejects the move: coordinates and
    /// bounds stay as they were and a warning goes to `sink`.
    pub fn move_object<D: Diagnostics>(
        &mut self,
        id: ObjectId,
        row: i32,
        col: i32,
        sink: &mut D,
    ) -> MoveOutcome {
        if let Some(occupant) = self.cell(row, col) {
            if occupant == id {
                return MoveOutcome::Moved;
            }
            sink.report(
                Diagnostic::warning(format!(
                    "Conflict: cannot move '{}' to ({}, {}), cell is occupied by '{}'",
                    self.objects[id.0].identifier, row, col, self.objects[occupant.0].identifier
                ))
                .in_slide(self.identifier),
            );
            return MoveOutcome::Rejected { occupant };
        }

        self.remove(id);
        let object = &mut self.objects[id.0];
        object.row = row;
        object.col = col;
        self.attach(id);
        self.update_bounds();
        MoveOutcome::Moved
    }

    /// Recompute the slide extent from the occupied rows.
    pub fn update_bounds(&mut self) {
        let mut bounds = Bounds::EMPTY;
        for (&index, row) in &self.rows {
            if row.is_empty() {
                continue;
            }
            bounds.min_row = bounds.min_row.min(index);
            bounds.max_row = bounds.max_row.max(index);
            bounds.min_col = bounds.min_col.min(row.min_col);
            bounds.max_col = bounds.max_col.max(row.max_col);
        }
        self.bounds = bounds;
    }

    /// Write new coordinates and rebuild the grid from the identifier index.
    ///
    /// The caller guarantees the final placement has one object per cell.
    pub(crate) fn commit(&mut self, placements: &[(ObjectId, i32, i32)]) {
        for &(id, row, col) in placements {
            let object = &mut self.objects[id.0];
            object.row = row;
            object.col = col;
        }
        self.rows.clear();
        let ids: Vec<ObjectId> = self.lookup.values().copied().collect();
        for id in ids {
            self.attach(id);
        }
        self.update_bounds();
    }

    /// Insert a handle into the row named by its object's coordinates.
    fn attach(&mut self, id: ObjectId) {
        let (row_index, col) = (self.objects[id.0].row, self.objects[id.0].col);
        let row = self.rows.entry(row_index).or_default();
        let previous = row.columns.insert(col, id);
        debug_assert!(previous.is_none(), "cell ({}, {}) attached twice", row_index, col);
        row.min_col = row.min_col.min(col);
        row.max_col = row.max_col.max(col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Collector, Severity};

    fn slide_with(objects: &[(&str, i32, i32)]) -> Slide<'static> {
        let mut slide = Slide::new("Intro", 0);
        for &(name, row, col) in objects {
            slide.insert(name, row, col).unwrap();
        }
        slide
    }

    #[test]
    fn test_empty_slide_bounds() {
        let mut slide = Slide::new("Intro", 0);
        slide.update_bounds();
        assert_eq!(slide.bounds(), Bounds::EMPTY);
        assert!(slide.bounds().is_empty());
        assert_eq!(slide.bounds().size(), (0, 0));
    }

    #[test]
    fn test_single_object_bounds() {
        let mut slide = slide_with(&[("A", 2, 5)]);
        assert_eq!(slide.bounds(), Bounds::cell(2, 5));
        slide.update_bounds();
        assert_eq!(
            slide.bounds(),
            Bounds { min_row: 2, max_row: 2, min_col: 5, max_col: 5 }
        );
    }

    #[test]
    fn test_insert_refuses_duplicates_and_occupied_cells() {
        let mut slide = slide_with(&[("A", 0, 0)]);
        assert!(matches!(
            slide.insert("A", 1, 0),
            Err(LayoutError::DuplicateObject { .. })
        ));
        assert!(matches!(
            slide.insert("B", 0, 0),
            Err(LayoutError::CellOccupied { ref occupant, .. }) if occupant == "A"
        ));
        assert_eq!(slide.len(), 1);
    }

    #[test]
    fn test_move_to_empty_cell() {
        let mut slide = slide_with(&[("A", 0, 0), ("B", 1, 0)]);
        let mut sink = Collector::new();
        let a = slide.lookup("A").unwrap();

        assert_eq!(slide.move_object(a, -3, 4, &mut sink), MoveOutcome::Moved);
        assert_eq!(slide.position_of("A"), Some((-3, 4)));
        assert!(slide.bounds().contains(-3, 4));
        assert_eq!(slide.cell(0, 0), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_move_to_occupied_cell_is_rejected() {
        let mut slide = slide_with(&[("A", 0, 0), ("B", 1, 0)]);
        let mut sink = Collector::new();
        let a = slide.lookup("A").unwrap();
        let b = slide.lookup("B").unwrap();
        let before = slide.bounds();

        assert_eq!(
            slide.move_object(a, 1, 0, &mut sink),
            MoveOutcome::Rejected { occupant: b }
        );
        assert_eq!(slide.position_of("A"), Some((0, 0)));
        assert_eq!(slide.bounds(), before);
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_move_onto_own_cell_is_noop() {
        let mut slide = slide_with(&[("A", 0, 0)]);
        let mut sink = Collector::new();
        let a = slide.lookup("A").unwrap();
        assert_eq!(slide.move_object(a, 0, 0, &mut sink), MoveOutcome::Moved);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_remove_detaches_and_drops_empty_row() {
        let mut slide = slide_with(&[("A", 0, 0), ("B", 0, 3), ("C", 1, 0)]);
        let c = slide.lookup("C").unwrap();
        let b = slide.lookup("B").unwrap();

        assert!(slide.remove(c));
        assert!(!slide.remove(c));
        assert_eq!(slide.rows().count(), 1);
        // Slide bounds are stale until recomputed.
        assert_eq!(slide.bounds().max_row, 1);
        slide.update_bounds();
        assert_eq!(slide.bounds().max_row, 0);

        assert!(slide.remove(b));
        let (_, row) = slide.rows().next().unwrap();
        assert_eq!((row.min_col(), row.max_col()), (0, 0));
        // Detached objects stay known to the slide.
        assert_eq!(slide.len(), 3);
    }

    #[test]
    fn test_render_order() {
        let slide = slide_with(&[("A", 0, 1), ("B", 2, 0), ("C", 0, -1), ("D", 1, 0)]);
        let order: Vec<&str> = slide.cells().map(|o| o.identifier.as_str()).collect();
        assert_eq!(order, vec!["B", "D", "C", "A"]);

        let added: Vec<&str> = slide.objects().map(|o| o.identifier.as_str()).collect();
        assert_eq!(added, vec!["A", "B", "C", "D"]);
    }
}
