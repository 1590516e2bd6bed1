use waypoint_routing::solver::bfs::shortest_path;
use waypoint_routing::{Coord, PathingGrid};

// In this example a shortest path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Of the two equally short paths, the one going down first is returned.

fn main() {
    let pathing_grid = PathingGrid::new(3, &[Coord::new(1, 1)]);
    println!("{}", pathing_grid);
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    let path = shortest_path(&pathing_grid, start, end, None).unwrap();
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
