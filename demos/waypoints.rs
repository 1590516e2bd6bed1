use waypoint_routing::{
    path_cost, Coord, GridConfig, OrderPolicy, PathingGrid, RevisitPolicy, RoutingEngine, Snapshot,
};

/// Routes the same grid under every combination of policies. The grid is read from a JSON
/// snapshot with shape
///  _____
/// |S    |
/// |##1##|
/// |  0  |
/// |     |
/// |    E|
///  _____
/// where the digits mark the required points in their given order.
fn main() {
    let json = r#"{
        "n": 5,
        "start": [0, 0],
        "end": [4, 4],
        "blocked": [[1, 0], [1, 1], [1, 3], [1, 4]],
        "required": [[2, 2], [1, 2]]
    }"#;
    let snapshot = Snapshot::from_json(json).unwrap();
    let engine = RoutingEngine::default();
    for order in [OrderPolicy::AsSpecified, OrderPolicy::Optimize] {
        for revisit in [RevisitPolicy::Allowed, RevisitPolicy::Forbidden] {
            let config = GridConfig::from_snapshot(snapshot.clone(), order, revisit).unwrap();
            match engine.route(&config) {
                Ok(path) => {
                    println!("{:?}, {:?}: {} steps", order, revisit, path_cost(&path));
                    print!("{}", render(&config, &path));
                }
                Err(e) => println!("{:?}, {:?}: {}", order, revisit, e),
            }
        }
    }
}

/// Draws the grid with `*` for every cell on the path, `S` and `E` for the endpoints.
fn render(config: &GridConfig, path: &[Coord]) -> String {
    let grid = PathingGrid::from_config(config);
    let mut out = String::new();
    for row in 0..config.n as i32 {
        for col in 0..config.n as i32 {
            let c = Coord::new(row, col);
            out.push(if Some(c) == config.start {
                'S'
            } else if Some(c) == config.end {
                'E'
            } else if grid.is_blocked(&c) {
                '#'
            } else if path.contains(&c) {
                '*'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}
