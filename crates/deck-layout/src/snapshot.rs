//! Owned, serializable view of a computed layout.

use crate::grid::{Bounds, Slide};
use crate::slides::SlideList;

/// Final coordinates of one object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSnapshot {
    pub identifier: String,
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideSnapshot {
    pub identifier: String,
    /// `None` for a slide without objects
    pub bounds: Option<Bounds>,
    /// Objects in render order
    pub objects: Vec<ObjectSnapshot>,
}

/// Layout of a whole presentation, detached from the AST it borrows from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub slides: Vec<SlideSnapshot>,
}

impl From<&Slide<'_>> for SlideSnapshot {
    fn from(slide: &Slide<'_>) -> Self {
        let bounds = slide.bounds();
        Self {
            identifier: slide.identifier().to_string(),
            bounds: (!bounds.is_empty()).then_some(bounds),
            objects: slide
                .cells()
                .map(|o| ObjectSnapshot {
                    identifier: o.identifier.clone(),
                    row: o.row,
                    col: o.col,
                })
                .collect(),
        }
    }
}

impl From<&SlideList<'_>> for LayoutSnapshot {
    fn from(list: &SlideList<'_>) -> Self {
        Self {
            slides: list.iter().map(SlideSnapshot::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_render_order() {
        let mut slide = Slide::new("Intro", 0);
        slide.insert("Title", 0, 0).unwrap();
        slide.insert("Logo", 1, 0).unwrap();
        let mut list = SlideList::new();
        list.push(slide);

        let snapshot = LayoutSnapshot::from(&list);
        let names: Vec<&str> = snapshot.slides[0]
            .objects
            .iter()
            .map(|o| o.identifier.as_str())
            .collect();
        assert_eq!(names, vec!["Logo", "Title"]);
        assert_eq!(snapshot.slides[0].bounds, Some(Bounds { min_row: 0, max_row: 1, min_col: 0, max_col: 0 }));
    }

    #[test]
    fn test_empty_slide_has_no_bounds() {
        let mut list = SlideList::new();
        list.push(Slide::new("Blank", 0));
        assert_eq!(LayoutSnapshot::from(&list).slides[0].bounds, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serializes() {
        let mut slide = Slide::new("Intro", 0);
        slide.insert("Title", 0, 0).unwrap();
        let mut list = SlideList::new();
        list.push(slide);

        let json = serde_json::to_value(LayoutSnapshot::from(&list)).unwrap();
        assert_eq!(json["slides"][0]["identifier"], "Intro");
        assert_eq!(json["slides"][0]["objects"][0]["row"], 0);
    }
}
