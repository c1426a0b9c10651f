//! Relative positioning between objects of one slide.
//!
//! Each `<child> <direction> of <parent>` directive places the child one cell
//! away from the parent's final position. Rules form a parent → child graph
//! that is resolved depth first; a cycle or a resulting cell collision leaves
//! the whole slide at its baseline placement.

use std::collections::HashMap;

use indexmap::IndexMap;

use deck_core::{Diagnostic, Diagnostics, Direction, Directive, DirectiveKind, LayoutError};

use crate::grid::{ObjectId, Slide};

/// A `<child> <direction> of <parent>` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub child: &'a str,
    pub parent: &'a str,
    pub direction: Direction,
}

impl<'a> Placement<'a> {
    pub fn new(child: &'a str, direction: Direction, parent: &'a str) -> Self {
        Self { child, parent, direction }
    }

    /// The placement described by a double relative directive, if it is one.
    pub fn from_directive(directive: &'a Directive) -> Option<Self> {
        match &directive.kind {
            DirectiveKind::DoubleRelative { child, parent, direction } => {
                Some(Self::new(child.as_str(), *direction, parent.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Resolved(i32, i32),
}

/// Per-child entry of the dependency map.
#[derive(Debug, Clone, Copy)]
struct DependencyInfo {
    parent: ObjectId,
    direction: Direction,
    state: VisitState,
}

/// Apply relative placements to a slide whose baseline grid is populated.
///
/// Returns the number of objects placed by a rule. On a cycle or a cell
/// collision nothing is committed, an error is reported to `sink` and
/// returned.
pub fn resolve_relative_positions<D: Diagnostics>(
    slide: &mut Slide<'_>,
    placements: &[Placement<'_>],
    sink: &mut D,
) -> Result<usize, LayoutError> {
    let dependencies = build_dependencies(slide, placements, sink);
    if dependencies.is_empty() {
        return Ok(0);
    }

    let resolved = match Resolver::new(slide, dependencies).run() {
        Ok(resolved) => resolved,
        Err(cycle) => {
            let err = LayoutError::CycleDetected {
                slide: slide.identifier().to_string(),
                cycle: cycle.iter().map(|&id| name_of(slide, id).to_string()).collect(),
            };
            sink.report(Diagnostic::error(err.to_string()).in_slide(slide.identifier()));
            return Err(err);
        }
    };

    if let Err(err) = check_overlap(slide, &resolved) {
        sink.report(Diagnostic::error(err.to_string()).in_slide(slide.identifier()));
        return Err(err);
    }

    slide.commit(&resolved);
    sink.report(
        Diagnostic::debug(format!("Resolved {} relative positions", resolved.len()))
            .in_slide(slide.identifier()),
    );
    Ok(resolved.len())
}

fn name_of<'s>(slide: &'s Slide<'_>, id: ObjectId) -> &'s str {
    slide.object(id).map(|o| o.identifier.as_str()).unwrap_or("?")
}

/// Map each child to its rule. The first rule seen for a child wins.
fn build_dependencies<D: Diagnostics>(
    slide: &Slide<'_>,
    placements: &[Placement<'_>],
    sink: &mut D,
) -> IndexMap<ObjectId, DependencyInfo> {
    let mut dependencies = IndexMap::new();

    for placement in placements {
        let (Some(child), Some(parent)) = (slide.lookup(placement.child), slide.lookup(placement.parent))
        else {
            sink.report(
                Diagnostic::debug(format!(
                    "Skipping '{} {} of {}': object not on slide",
                    placement.child, placement.direction, placement.parent
                ))
                .in_slide(slide.identifier()),
            );
            continue;
        };

        if dependencies.contains_key(&child) {
            sink.report(
                Diagnostic::warning(format!(
                    "Duplicate relative position for '{}': '{} of {}' ignored",
                    placement.child, placement.direction, placement.parent
                ))
                .in_slide(slide.identifier()),
            );
            continue;
        }

        dependencies.insert(
            child,
            DependencyInfo {
                parent,
                direction: placement.direction,
                state: VisitState::Unvisited,
            },
        );
    }

    dependencies
}

struct Resolver<'s, 'p> {
    slide: &'s Slide<'p>,
    dependencies: IndexMap<ObjectId, DependencyInfo>,
}

impl<'s, 'p> Resolver<'s, 'p> {
    fn new(slide: &'s Slide<'p>, dependencies: IndexMap<ObjectId, DependencyInfo>) -> Self {
        Self { slide, dependencies }
    }

    /// Final coordinates of every child, or the cycle that prevents them.
    fn run(mut self) -> Result<Vec<(ObjectId, i32, i32)>, Vec<ObjectId>> {
        let children: Vec<ObjectId> = self.dependencies.keys().copied().collect();
        let mut path = Vec::new();
        let mut resolved = Vec::with_capacity(children.len());
        for id in children {
            let (row, col) = self.resolve(id, &mut path)?;
            resolved.push((id, row, col));
        }
        Ok(resolved)
    }

    fn resolve(&mut self, id: ObjectId, path: &mut Vec<ObjectId>) -> Result<(i32, i32), Vec<ObjectId>> {
        let Some(info) = self.dependencies.get(&id).copied() else {
            // Not positioned by a rule: stays where the builder put it.
            return Ok(self.baseline(id));
        };

        match info.state {
            VisitState::Resolved(row, col) => return Ok((row, col)),
            VisitState::Visiting => {
                let start = path.iter().position(|&p| p == id).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(id);
                return Err(cycle);
            }
            VisitState::Unvisited => {}
        }

        self.set_state(id, VisitState::Visiting);
        path.push(id);
        let (parent_row, parent_col) = self.resolve(info.parent, path)?;
        path.pop();

        let (d_row, d_col) = info.direction.delta();
        let position = (parent_row + d_row, parent_col + d_col);
        self.set_state(id, VisitState::Resolved(position.0, position.1));
        Ok(position)
    }

    fn baseline(&self, id: ObjectId) -> (i32, i32) {
        self.slide
            .object(id)
            .map(|o| (o.row, o.col))
            .unwrap_or_default()
    }

    fn set_state(&mut self, id: ObjectId, state: VisitState) {
        if let Some(info) = self.dependencies.get_mut(&id) {
            info.state = state;
        }
    }
}

/// Refuse a placement that would put two objects in one cell.
fn check_overlap(slide: &Slide<'_>, resolved: &[(ObjectId, i32, i32)]) -> Result<(), LayoutError> {
    let moved: HashMap<ObjectId, (i32, i32)> =
        resolved.iter().map(|&(id, row, col)| (id, (row, col))).collect();

    let mut occupied: HashMap<(i32, i32), &str> = HashMap::new();
    for object in slide.objects() {
        let cell = slide
            .lookup(&object.identifier)
            .and_then(|id| moved.get(&id).copied())
            .unwrap_or((object.row, object.col));
        if let Some(first) = occupied.insert(cell, object.identifier.as_str()) {
            return Err(LayoutError::Overlap {
                slide: slide.identifier().to_string(),
                first: first.to_string(),
                second: object.identifier.clone(),
                row: cell.0,
                col: cell.1,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Collector, Severity};

    fn slide_with(names: &[&str]) -> Slide<'static> {
        let mut slide = Slide::new("Intro", 0);
        for (row, name) in names.iter().enumerate() {
            slide.insert(name, row as i32, 0).unwrap();
        }
        slide
    }

    #[test]
    fn test_chain_resolves_regardless_of_order() {
        // B at (0, 0); A above B; C left of A.
        let orders = [
            vec![
                Placement::new("A", Direction::Top, "B"),
                Placement::new("C", Direction::Left, "A"),
            ],
            vec![
                Placement::new("C", Direction::Left, "A"),
                Placement::new("A", Direction::Top, "B"),
            ],
        ];

        for placements in &orders {
            let mut slide = slide_with(&["B", "A", "C"]);
            let mut sink = Collector::new();
            let placed = resolve_relative_positions(&mut slide, placements, &mut sink).unwrap();

            assert_eq!(placed, 2);
            assert_eq!(slide.position_of("B"), Some((0, 0)));
            assert_eq!(slide.position_of("A"), Some((-1, 0)));
            assert_eq!(slide.position_of("C"), Some((-1, -1)));
            assert_eq!(slide.cell(-1, -1), slide.lookup("C"));
            assert_eq!(slide.bounds().min_row, -1);
            assert_eq!(slide.bounds().min_col, -1);
        }
    }

    #[test]
    fn test_two_node_cycle_keeps_baseline() {
        let mut slide = slide_with(&["A", "B"]);
        let mut sink = Collector::new();
        let placements = [
            Placement::new("A", Direction::Top, "B"),
            Placement::new("B", Direction::Top, "A"),
        ];

        let err = resolve_relative_positions(&mut slide, &placements, &mut sink).unwrap_err();
        assert_eq!(
            err,
            LayoutError::CycleDetected {
                slide: "Intro".to_string(),
                cycle: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
        assert_eq!(slide.position_of("A"), Some((0, 0)));
        assert_eq!(slide.position_of("B"), Some((1, 0)));
        assert_eq!(sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let mut slide = slide_with(&["A"]);
        let mut sink = Collector::new();
        let placements = [Placement::new("A", Direction::Left, "A")];

        let err = resolve_relative_positions(&mut slide, &placements, &mut sink).unwrap_err();
        assert!(matches!(err, LayoutError::CycleDetected { ref cycle, .. } if cycle.len() == 2));
        assert_eq!(slide.position_of("A"), Some((0, 0)));
    }

    #[test]
    fn test_first_rule_for_child_wins() {
        let mut slide = slide_with(&["B", "A"]);
        let mut sink = Collector::new();
        let placements = [
            Placement::new("A", Direction::Top, "B"),
            Placement::new("A", Direction::Bottom, "B"),
        ];

        assert_eq!(resolve_relative_positions(&mut slide, &placements, &mut sink), Ok(1));
        assert_eq!(slide.position_of("A"), Some((-1, 0)));
        assert_eq!(sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_dangling_names_are_skipped() {
        let mut slide = slide_with(&["A"]);
        let mut sink = Collector::new();
        let placements = [Placement::new("A", Direction::Right, "Ghost")];

        assert_eq!(resolve_relative_positions(&mut slide, &placements, &mut sink), Ok(0));
        assert_eq!(slide.position_of("A"), Some((0, 0)));
        assert_eq!(sink.count(Severity::Debug), 1);
        assert_eq!(sink.count(Severity::Warning), 0);
    }

    #[test]
    fn test_collision_after_resolution_is_rejected() {
        // C below A lands on B's cell.
        let mut slide = slide_with(&["A", "B", "C"]);
        let mut sink = Collector::new();
        let placements = [Placement::new("C", Direction::Bottom, "A")];

        let err = resolve_relative_positions(&mut slide, &placements, &mut sink).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Overlap {
                slide: "Intro".to_string(),
                first: "B".to_string(),
                second: "C".to_string(),
                row: 1,
                col: 0,
            }
        );
        assert_eq!(slide.position_of("C"), Some((2, 0)));
        assert_eq!(sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_from_directive() {
        let directive = Directive::new(DirectiveKind::DoubleRelative {
            child: "Logo".into(),
            parent: "Title".into(),
            direction: Direction::BottomRight,
        });
        assert_eq!(
            Placement::from_directive(&directive),
            Some(Placement::new("Logo", Direction::BottomRight, "Title"))
        );

        let add = Directive::new(DirectiveKind::Add { identifier: "Logo".into(), content: None });
        assert_eq!(Placement::from_directive(&add), None);
    }
}
