#![allow(missing_docs)]

use evoflock::simulation::params::Params;
use evoflock::simulation::prey::Prey;
use ndarray::Array1;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_params() -> Params {
    Params {
        num_creatures: 10,
        num_eyes: 4,
        ..Params::default()
    }
}

fn prey_with(genotype: Array1<f32>, eyes: [u32; 4], predator_in_eye: usize, heading: f32) -> Prey {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut prey = Prey::new_random(&mut rng, &create_test_params());
    prey.genotype = genotype;
    prey.agent.eyes = eyes.to_vec();
    prey.predator_in_eye = predator_in_eye;
    prey.agent.heading = heading;
    prey
}

#[test]
fn test_heading_reads_the_predator_row() {
    let genotype = Array1::from_shape_fn(16, |i| i as f32);
    let mut prey = prey_with(genotype, [1, 2, 0, 3], 2, 10.0);

    prey.update_heading();

    // row 2 holds genes 8..12: 8*1 + 9*2 + 10*0 + 11*3 = 59
    assert!((prey.agent.heading - 69.0).abs() < 1e-4, "heading {}", prey.agent.heading);
}

#[test]
fn test_heading_row_follows_predator_eye() {
    let genotype = Array1::from_shape_fn(16, |i| i as f32);

    let mut front = prey_with(genotype.clone(), [1, 0, 0, 0], 0, 0.0);
    front.update_heading();
    assert!(front.agent.heading.abs() < 1e-4);

    let mut behind = prey_with(genotype, [1, 0, 0, 0], 3, 0.0);
    behind.update_heading();
    assert!((behind.agent.heading - 12.0).abs() < 1e-4);
}

#[test]
fn test_large_response_wraps_around() {
    let genotype = Array1::from_shape_fn(16, |i| i as f32);
    let mut prey = prey_with(genotype, [10, 10, 10, 10], 3, 10.0);

    prey.update_heading();

    // (12 + 13 + 14 + 15) * 10 + 10 = 550
    assert!((prey.agent.heading - 190.0).abs() < 1e-3, "heading {}", prey.agent.heading);
}

#[test]
fn test_negative_response_wraps_around() {
    let genotype = Array1::from_shape_fn(16, |i| -(i as f32));
    let mut prey = prey_with(genotype, [1, 2, 0, 3], 0, 10.0);

    prey.update_heading();

    // 0*1 - 1*2 - 2*0 - 3*3 = -11
    assert!((prey.agent.heading - 359.0).abs() < 1e-4, "heading {}", prey.agent.heading);
}

#[test]
fn test_no_peers_keeps_heading() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let params = create_test_params();
    let mut prey = Prey::new_random(&mut rng, &params);
    prey.agent.eyes = vec![0; 4];
    prey.agent.heading = 123.0;

    prey.update_heading();

    assert!((prey.agent.heading - 123.0).abs() < 1e-6);
}

#[test]
fn test_lifespan_counts_steps_and_resets_on_respawn() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut prey = Prey::new_random(&mut rng, &create_test_params());
    assert_eq!(prey.lifespan, 0);

    for _ in 0..7 {
        prey.update_lifespan();
    }
    assert_eq!(prey.lifespan, 7);

    let genotype = prey.genotype.clone();
    prey.respawn(&mut rng);

    assert_eq!(prey.lifespan, 0);
    assert_eq!(prey.genotype, genotype);
    assert!((0.0..=1.0).contains(&prey.agent.x()));
    assert!((0.0..=1.0).contains(&prey.agent.y()));

    prey.update_lifespan();
    assert_eq!(prey.lifespan, 1);
}
