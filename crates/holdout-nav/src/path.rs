//! Waypoint route planning.
//!
//! With a nav grid available, routes are extracted from a BFS parent
//! walk and simplified. Without one, a line-of-sight fallback produces
//! a crude one- or two-waypoint route.

use holdout_core::constants::WAYPOINT_HEIGHT;
use holdout_core::types::Position;

use crate::grid::NavGrid;
use crate::query::has_line_of_sight;
use crate::world::StaticWorld;

/// Start/end closer than this collapse to the identity route.
const COINCIDENT_RANGE: f32 = 1e-4;

/// Find a waypoint route from `start` to `end`. The returned list is
/// finite and ends at `end`; an empty list means the goal is known to
/// be unreachable on the grid.
pub fn find_path(
    world: &StaticWorld,
    grid: Option<&NavGrid>,
    start: &Position,
    end: &Position,
) -> Vec<Position> {
    if start.range_to(end) < COINCIDENT_RANGE {
        return vec![*start];
    }

    if let Some(grid) = grid {
        if let (Some(start_cell), Some(end_cell)) = (grid.cell_at(start), grid.cell_at(end)) {
            if grid.is_walkable(start_cell) && grid.is_walkable(end_cell) {
                return match grid.route(start_cell, end_cell) {
                    Some(cells) => route_to_waypoints(grid, &cells, end),
                    None => Vec::new(),
                };
            }
        }
        // Endpoints outside the grid fall through to the LOS fallback.
    }

    fallback_path(world, start, end)
}

/// Grid-free fallback: straight shot when visible, otherwise route via
/// a ground-level midpoint. A crude substitute, not general navigation.
fn fallback_path(world: &StaticWorld, start: &Position, end: &Position) -> Vec<Position> {
    if has_line_of_sight(world, start, end) {
        return vec![*end];
    }
    let midpoint = Position::new(
        (start.x + end.x) * 0.5,
        WAYPOINT_HEIGHT,
        (start.z + end.z) * 0.5,
    );
    vec![midpoint, *end]
}

/// Convert a cell route into world waypoints, dropping collinear runs
/// and substituting the exact goal position for the final cell.
fn route_to_waypoints(
    grid: &NavGrid,
    cells: &[(usize, usize)],
    end: &Position,
) -> Vec<Position> {
    let mut waypoints = Vec::new();
    for (i, &cell) in cells.iter().enumerate() {
        let is_last = i + 1 == cells.len();
        if is_last {
            waypoints.push(*end);
            break;
        }
        // Keep only direction changes.
        if i + 1 < cells.len() && i > 0 {
            let prev = cells[i - 1];
            let next = cells[i + 1];
            let straight = (next.0 as isize - cell.0 as isize, next.1 as isize - cell.1 as isize)
                == (cell.0 as isize - prev.0 as isize, cell.1 as isize - prev.1 as isize);
            if straight {
                continue;
            }
        }
        waypoints.push(grid.cell_center(cell, WAYPOINT_HEIGHT));
    }
    if waypoints.is_empty() {
        waypoints.push(*end);
    }
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::StaticCollider;

    fn pillar_world() -> StaticWorld {
        StaticWorld::new(vec![StaticCollider::new(
            Position::new(5.0, 1.0, 5.0),
            1.5,
        )])
    }

    #[test]
    fn test_identity_route() {
        let world = StaticWorld::empty();
        let p = Position::new(3.0, 0.0, 3.0);
        assert_eq!(find_path(&world, None, &p, &p), vec![p]);
    }

    #[test]
    fn test_fallback_direct_when_visible() {
        let world = StaticWorld::empty();
        let start = Position::new(0.0, 1.0, 0.0);
        let end = Position::new(10.0, 1.0, 0.0);
        assert_eq!(find_path(&world, None, &start, &end), vec![end]);
    }

    #[test]
    fn test_fallback_midpoint_when_blocked() {
        let world = pillar_world();
        let start = Position::new(0.0, 1.0, 5.0);
        let end = Position::new(10.0, 1.0, 5.0);
        let path = find_path(&world, None, &start, &end);
        assert_eq!(path.len(), 2);
        assert!((path[0].x - 5.0).abs() < 1e-4);
        assert!((path[0].y - WAYPOINT_HEIGHT).abs() < 1e-4);
        assert_eq!(path[1], end);
    }

    #[test]
    fn test_grid_route_avoids_pillar() {
        let world = pillar_world();
        let grid = NavGrid::with_default_cell_size(&world, (0.0, 0.0), (10.0, 10.0));
        let start = Position::new(0.5, 0.0, 5.0);
        let end = Position::new(9.5, 0.0, 5.0);

        let path = find_path(&world, Some(&grid), &start, &end);
        assert!(!path.is_empty());
        assert_eq!(*path.last().unwrap(), end);
        // Waypoints stay off the pillar footprint.
        for wp in &path[..path.len() - 1] {
            assert!(wp.horizontal_range_to(&Position::new(5.0, 0.0, 5.0)) > 1.0);
        }
    }

    #[test]
    fn test_grid_unreachable_is_empty() {
        let colliders = (0..=10)
            .map(|row| StaticCollider::new(Position::new(5.0, 0.0, row as f32), 0.8))
            .collect();
        let world = StaticWorld::new(colliders);
        let grid = NavGrid::with_default_cell_size(&world, (0.0, 0.0), (10.0, 10.0));

        let start = Position::new(0.5, 0.0, 5.0);
        let end = Position::new(9.5, 0.0, 5.0);
        assert!(find_path(&world, Some(&grid), &start, &end).is_empty());
    }

    #[test]
    fn test_endpoint_outside_grid_uses_fallback() {
        let world = StaticWorld::empty();
        let grid = NavGrid::with_default_cell_size(&world, (0.0, 0.0), (10.0, 10.0));
        let start = Position::new(0.5, 0.0, 5.0);
        let end = Position::new(50.0, 0.0, 5.0);
        assert_eq!(find_path(&world, Some(&grid), &start, &end), vec![end]);
    }
}
