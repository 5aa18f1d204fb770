#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evoflock::simulation::agent::Agent;
use evoflock::simulation::geometric_utils::{Topology, cos_deg, sin_deg};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn agent_at(x: f32, y: f32, heading: f32, speed: f32) -> Agent {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut agent = Agent::new_random(&mut rng, speed, 0.015, 8);
    agent.set_position(x, y);
    agent.heading = heading;
    agent
}

#[test]
fn test_positions_stay_contained() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for bounded in [true, false] {
        let topology = Topology { bounded };
        let mut agents: Vec<Agent> = (0..20)
            .map(|_| Agent::new_random(&mut rng, 0.05, 0.015, 8))
            .collect();

        for _ in 0..500 {
            for agent in &mut agents {
                agent.heading = rng.random_range(0.0..360.0);
                agent.update_position(&topology, &mut rng);
                assert!((0.0..=1.0).contains(&agent.x()), "x escaped: {}", agent.x());
                assert!((0.0..=1.0).contains(&agent.y()), "y escaped: {}", agent.y());
                assert!((0.0..360.0).contains(&agent.heading));
            }
        }
    }
}

#[test]
fn test_screen_convention_moves_up_for_ninety_degrees() {
    let topology = Topology { bounded: true };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut agent = agent_at(0.5, 0.5, 90.0, 0.1);

    agent.update_position(&topology, &mut rng);

    assert!((agent.x() - 0.5).abs() < 1e-5);
    assert!((agent.y() - 0.4).abs() < 1e-5);
}

#[test]
fn test_torus_wraps_without_turning() {
    let topology = Topology { bounded: false };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut agent = agent_at(0.995, 0.5, 0.0, 0.01);

    agent.update_position(&topology, &mut rng);

    assert!((agent.x() - 0.005).abs() < 1e-4, "x was {}", agent.x());
    assert_eq!(agent.heading, 0.0);
}

#[test]
fn test_walls_deflect_back_into_world() {
    let topology = Topology { bounded: true };
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    // (start x, start y, heading): left, right, top, bottom walls
    let cases = [
        (0.005, 0.5, 180.0),
        (0.995, 0.5, 0.0),
        (0.5, 0.005, 90.0),
        (0.5, 0.995, 270.0),
    ];

    for _ in 0..200 {
        for &(x, y, heading) in &cases {
            let mut agent = agent_at(x, y, heading, 0.01);
            agent.update_position(&topology, &mut rng);

            // one more step along the new heading must point inwards
            let dx = cos_deg(agent.heading);
            let dy = -sin_deg(agent.heading);
            let inward = match (x, y) {
                (x, _) if x < 0.1 => dx,
                (x, _) if x > 0.9 => -dx,
                (_, y) if y < 0.1 => dy,
                _ => -dy,
            };
            assert!(inward > -1e-5, "heading {} points out of the world", agent.heading);
            assert!((0.0..=1.0).contains(&agent.x()));
            assert!((0.0..=1.0).contains(&agent.y()));
        }
    }
}

#[test]
fn test_corners_deflect_into_the_inner_quadrant() {
    let topology = Topology { bounded: true };
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    // (start x, start y, heading): top-left, top-right, bottom-left, bottom-right
    let cases = [
        (0.005, 0.005, 135.0),
        (0.995, 0.005, 45.0),
        (0.005, 0.995, 225.0),
        (0.995, 0.995, 315.0),
    ];

    for _ in 0..200 {
        for &(x, y, heading) in &cases {
            let mut agent = agent_at(x, y, heading, 0.01);
            agent.update_position(&topology, &mut rng);

            let dx = cos_deg(agent.heading);
            let dy = -sin_deg(agent.heading);
            let inward_x = if x < 0.5 { dx } else { -dx };
            let inward_y = if y < 0.5 { dy } else { -dy };
            assert!(
                inward_x > -1e-5 && inward_y > -1e-5,
                "heading {} leaves the corner at ({x}, {y})",
                agent.heading
            );
            assert_eq!(agent.x(), if x < 0.5 { 0.0 } else { 1.0 });
            assert_eq!(agent.y(), if y < 0.5 { 0.0 } else { 1.0 });
        }
    }
}

#[test]
fn test_distance_respects_topology() {
    let torus = Topology { bounded: false };
    let bounded = Topology { bounded: true };

    assert!((torus.distance(0.02, 0.98, 0.98, 0.02) - 0.04_f32.hypot(0.04)).abs() < 1e-5);
    assert!((bounded.distance(0.02, 0.98, 0.98, 0.02) - 0.96_f32.hypot(0.96)).abs() < 1e-5);
    assert!(torus.distance(0.3, 0.3, 0.3, 0.3).abs() < f32::EPSILON);
}

#[test]
fn test_spatial_index_sees_across_the_seam() {
    use evoflock::simulation::spatial::SpatialIndex;

    let points = [[0.005, 0.5], [0.995, 0.5], [0.5, 0.5]];

    let torus =
        SpatialIndex::build(&points, &Topology { bounded: false }).expect("finite points");
    assert_eq!(torus.len(), 27);
    assert_eq!(torus.within([0.005, 0.5], 0.02), vec![0, 1]);

    let bounded =
        SpatialIndex::build(&points, &Topology { bounded: true }).expect("finite points");
    assert_eq!(bounded.len(), 3);
    assert_eq!(bounded.within([0.005, 0.5], 0.02), vec![0]);
}

#[test]
fn test_spatial_index_skips_non_finite_points() {
    use evoflock::simulation::spatial::SpatialIndex;

    let points = [[0.5, 0.5], [f32::NAN, 0.5], [0.505, 0.5], [0.5, f32::INFINITY]];

    for bounded in [true, false] {
        let images = if bounded { 1 } else { 9 };
        let index = SpatialIndex::build(&points, &Topology { bounded }).expect("bad points are skipped");
        assert_eq!(index.len(), 2 * images);
        assert_eq!(index.within([0.5, 0.5], 0.02), vec![0, 2]);
    }
}

#[test]
fn test_overlapping_prey_are_pushed_apart() {
    use evoflock::simulation::params::Params;
    use evoflock::simulation::prey::{Body, Prey};

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let params = Params::default();
    let topology = Topology { bounded: true };
    let mut prey = Prey::new_random(&mut rng, &params);
    prey.agent.set_position(0.5, 0.5);

    let size = params.creature_diameter;
    let bodies = [
        Body { x: 0.5, y: 0.5, size },
        Body { x: 0.51, y: 0.5, size },
        Body { x: 0.8, y: 0.8, size },
    ];

    prey.resolve_collisions(0, &bodies, &[0, 1, 2], &topology, &mut rng);

    // full overlap of 0.005 away from the neighbour
    assert!((prey.agent.x() - 0.495).abs() < 1e-5, "x = {}", prey.agent.x());
    assert!((prey.agent.y() - 0.5).abs() < 1e-6);
}

#[test]
fn test_coincident_prey_get_jittered() {
    use evoflock::simulation::params::Params;
    use evoflock::simulation::prey::{Body, Prey};

    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let params = Params::default();
    let topology = Topology { bounded: false };
    let mut prey = Prey::new_random(&mut rng, &params);
    prey.agent.set_position(0.5, 0.5);

    let size = params.creature_diameter;
    let bodies = [Body { x: 0.5, y: 0.5, size }, Body { x: 0.5, y: 0.5, size }];

    prey.resolve_collisions(0, &bodies, &[1], &topology, &mut rng);

    let moved = (prey.agent.x() - 0.5).hypot(prey.agent.y() - 0.5);
    assert!(moved > 0.0);
    assert!(moved < size);
}
