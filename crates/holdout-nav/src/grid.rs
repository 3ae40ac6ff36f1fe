//! Coarse walkable grid for path existence checks and route search.

use std::collections::VecDeque;

use holdout_core::constants::NAV_CELL_SIZE;
use holdout_core::types::Position;

use crate::world::StaticWorld;

/// Grid cell coordinate (column, row) on the ground plane.
pub type Cell = (usize, usize);

/// Walkable/blocked bitmap over the level's ground plane, built once
/// from the static collider set.
#[derive(Debug, Clone)]
pub struct NavGrid {
    origin_x: f32,
    origin_z: f32,
    cell_size: f32,
    width: usize,
    height: usize,
    walkable: Vec<bool>,
}

impl NavGrid {
    /// Build a grid covering `[min, max]` on the ground plane. A cell
    /// is blocked when its center falls inside a static collider's
    /// horizontal footprint.
    pub fn from_static_world(
        world: &StaticWorld,
        min: (f32, f32),
        max: (f32, f32),
        cell_size: f32,
    ) -> Self {
        let width = ((max.0 - min.0) / cell_size).ceil().max(1.0) as usize;
        let height = ((max.1 - min.1) / cell_size).ceil().max(1.0) as usize;
        let mut walkable = vec![true; width * height];

        for row in 0..height {
            for col in 0..width {
                let cx = min.0 + (col as f32 + 0.5) * cell_size;
                let cz = min.1 + (row as f32 + 0.5) * cell_size;
                let blocked = world.colliders().iter().any(|c| {
                    let dx = cx - c.position.x;
                    let dz = cz - c.position.z;
                    dx * dx + dz * dz <= c.radius * c.radius
                });
                if blocked {
                    walkable[row * width + col] = false;
                }
            }
        }

        Self {
            origin_x: min.0,
            origin_z: min.1,
            cell_size,
            width,
            height,
            walkable,
        }
    }

    /// Build with the default cell size.
    pub fn with_default_cell_size(world: &StaticWorld, min: (f32, f32), max: (f32, f32)) -> Self {
        Self::from_static_world(world, min, max, NAV_CELL_SIZE)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell containing a world position, or `None` outside the grid.
    pub fn cell_at(&self, position: &Position) -> Option<Cell> {
        let col = (position.x - self.origin_x) / self.cell_size;
        let row = (position.z - self.origin_z) / self.cell_size;
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((col, row))
    }

    /// World position of a cell center, at the given height.
    pub fn cell_center(&self, cell: Cell, y: f32) -> Position {
        Position::new(
            self.origin_x + (cell.0 as f32 + 0.5) * self.cell_size,
            y,
            self.origin_z + (cell.1 as f32 + 0.5) * self.cell_size,
        )
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        cell.0 < self.width && cell.1 < self.height && self.walkable[cell.1 * self.width + cell.0]
    }

    /// Whether any 4-connected route exists between two cells.
    /// BFS flood fill with early exit; existence only.
    pub fn path_exists(&self, start: Cell, end: Cell) -> bool {
        self.bfs(start, end).is_some()
    }

    /// Full 4-connected route between two cells, start cell excluded,
    /// end cell included. `None` when unreachable.
    pub fn route(&self, start: Cell, end: Cell) -> Option<Vec<Cell>> {
        let parents = self.bfs(start, end)?;
        let mut cells = Vec::new();
        let mut cursor = end;
        while cursor != start {
            cells.push(cursor);
            cursor = parents[cursor.1 * self.width + cursor.0];
        }
        cells.reverse();
        Some(cells)
    }

    /// BFS from `start` until `end` is reached. Returns the parent
    /// table on success.
    fn bfs(&self, start: Cell, end: Cell) -> Option<Vec<Cell>> {
        if !self.is_walkable(start) || !self.is_walkable(end) {
            return None;
        }
        if start == end {
            return Some(vec![start; self.width * self.height]);
        }

        let mut visited = vec![false; self.width * self.height];
        let mut parents = vec![start; self.width * self.height];
        let mut queue = VecDeque::new();
        visited[start.1 * self.width + start.0] = true;
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            for next in self.neighbors(cell) {
                let idx = next.1 * self.width + next.0;
                if visited[idx] || !self.walkable[idx] {
                    continue;
                }
                visited[idx] = true;
                parents[idx] = cell;
                if next == end {
                    return Some(parents);
                }
                queue.push_back(next);
            }
        }
        None
    }

    fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let (col, row) = (cell.0 as isize, cell.1 as isize);
        let (width, height) = (self.width as isize, self.height as isize);
        [(col - 1, row), (col + 1, row), (col, row - 1), (col, row + 1)]
            .into_iter()
            .filter(move |&(c, r)| c >= 0 && r >= 0 && c < width && r < height)
            .map(|(c, r)| (c as usize, r as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::StaticCollider;

    /// 10x10 unit grid with a pillar blocking the center.
    fn pillar_grid() -> NavGrid {
        let world = StaticWorld::new(vec![StaticCollider::new(
            Position::new(5.0, 0.0, 5.0),
            1.5,
        )]);
        NavGrid::with_default_cell_size(&world, (0.0, 0.0), (10.0, 10.0))
    }

    #[test]
    fn test_blocked_cells_marked() {
        let grid = pillar_grid();
        let center = grid.cell_at(&Position::new(5.0, 0.0, 5.0)).unwrap();
        assert!(!grid.is_walkable(center));
        let corner = grid.cell_at(&Position::new(0.5, 0.0, 0.5)).unwrap();
        assert!(grid.is_walkable(corner));
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = pillar_grid();
        assert!(grid.cell_at(&Position::new(-1.0, 0.0, 5.0)).is_none());
        assert!(grid.cell_at(&Position::new(5.0, 0.0, 11.0)).is_none());
    }

    #[test]
    fn test_path_exists_around_pillar() {
        let grid = pillar_grid();
        let start = grid.cell_at(&Position::new(0.5, 0.0, 5.0)).unwrap();
        let end = grid.cell_at(&Position::new(9.5, 0.0, 5.0)).unwrap();
        assert!(grid.path_exists(start, end));
    }

    #[test]
    fn test_path_exists_sealed_region() {
        // Wall of pillars splitting the grid in two.
        let colliders = (0..=10)
            .map(|row| StaticCollider::new(Position::new(5.0, 0.0, row as f32), 0.8))
            .collect();
        let world = StaticWorld::new(colliders);
        let grid = NavGrid::with_default_cell_size(&world, (0.0, 0.0), (10.0, 10.0));

        let start = grid.cell_at(&Position::new(0.5, 0.0, 5.0)).unwrap();
        let end = grid.cell_at(&Position::new(9.5, 0.0, 5.0)).unwrap();
        assert!(!grid.path_exists(start, end));
    }

    #[test]
    fn test_route_ends_at_goal() {
        let grid = pillar_grid();
        let start = grid.cell_at(&Position::new(0.5, 0.0, 5.0)).unwrap();
        let end = grid.cell_at(&Position::new(9.5, 0.0, 5.0)).unwrap();
        let route = grid.route(start, end).expect("route should exist");
        assert_eq!(*route.last().unwrap(), end);
        // Every step lands on a walkable cell.
        assert!(route.iter().all(|&c| grid.is_walkable(c)));
    }
}
