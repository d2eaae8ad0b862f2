mod common;

use common::synthetic_frame::{ground_frame, noise_frame, HEIGHT, WIDTH};
use rover_perception::stages::{pix_to_world, rover_coords, to_polar_coords};
use rover_perception::{
    Frame, MapChannel, PerceptionParams, PerceptionPipeline, Pose, RoverState,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn default_pipeline() -> PerceptionPipeline {
    PerceptionPipeline::new(PerceptionParams::default(), WIDTH, HEIGHT)
        .expect("default rig is a valid configuration")
}

fn state_at(pose: Pose) -> RoverState {
    RoverState::new(WIDTH, HEIGHT, 200)
        .expect("valid world size")
        .with_pose(pose)
}

#[test]
fn all_black_frame_is_all_obstacle() {
    init_logging();
    let pipeline = default_pipeline();
    let mut state = state_at(Pose::new(100.0, 100.0, 0.0));
    let step = pipeline
        .process_detailed(&Frame::new(WIDTH, HEIGHT), &mut state)
        .expect("matching frame size");

    assert_eq!(step.masks.navigable.count(), 0);
    assert_eq!(step.masks.obstacle.count(), WIDTH * HEIGHT);
    assert_eq!(step.masks.sample.count(), 0);

    assert_eq!(step.report.navigable.mean_angle_rad, None);
    assert_eq!(step.report.sample.mean_angle_rad, None);
    assert!(step.report.obstacle.mean_angle_rad.is_some());
    assert!(state.nav_angles.is_empty() && state.nav_dists.is_empty());
    assert_eq!(state.mean_nav_angle(), None);

    assert_eq!(state.world_map.observed_cells(MapChannel::Navigable), 0);
    assert_eq!(state.world_map.observed_cells(MapChannel::Sample), 0);
    assert!(state.world_map.observed_cells(MapChannel::Obstacle) > 0);
    assert!(state.vision_image.data.iter().all(|px| *px == [255, 0, 0]));
}

#[test]
fn red_patch_is_detected_on_raw_frame_only() {
    init_logging();
    let pipeline = default_pipeline();
    let (x0, y0) = (150usize, 120usize);
    let mut frame = Frame::new(WIDTH, HEIGHT);
    frame.fill_rect(x0, y0, 10, 10, [200, 100, 50]);

    let mut black_state = state_at(Pose::new(100.0, 100.0, 0.0));
    let black = pipeline
        .process_detailed(&Frame::new(WIDTH, HEIGHT), &mut black_state)
        .unwrap();
    let mut state = state_at(Pose::new(100.0, 100.0, 0.0));
    let step = pipeline.process_detailed(&frame, &mut state).unwrap();

    assert_eq!(step.masks.sample.count(), 100);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let inside = (x0..x0 + 10).contains(&x) && (y0..y0 + 10).contains(&y);
            assert_eq!(step.masks.sample.is_set(x, y), inside, "sample mask at ({x},{y})");
        }
    }
    assert_eq!(step.masks.navigable, black.masks.navigable);
    assert_eq!(step.masks.obstacle, black.masks.obstacle);

    assert_eq!(step.report.sample.pixels, 100);
    // Patch sits left of centre (columns 150..160 < 160), so the bearing is positive.
    let bearing = step.report.sample.mean_angle_rad.expect("sample detected");
    assert!(bearing > 0.0, "bearing {bearing}");
    assert!(state.world_map.observed_cells(MapChannel::Sample) > 0);
    for (x, y) in state.world_map.sample_cells() {
        assert_eq!(state.world_map.get(MapChannel::Sample, x, y), 255);
    }
}

#[test]
fn obstacle_and_navigable_are_complementary() {
    let pipeline = default_pipeline();
    for seed in 1..6 {
        let mut state = state_at(Pose::new(50.0, 150.0, 72.0 * seed as f32));
        let step = pipeline
            .process_detailed(&noise_frame(WIDTH, HEIGHT, seed), &mut state)
            .unwrap();
        let nav = &step.masks.navigable;
        let obs = &step.masks.obstacle;
        for (n, o) in nav.data.iter().zip(obs.data.iter()) {
            assert_eq!(n ^ o, 1, "seed {seed}: masks overlap or leave a gap");
        }
    }
}

#[test]
fn vision_image_and_nav_fields_mirror_masks() {
    let pipeline = default_pipeline();
    let mut frame = ground_frame(WIDTH, HEIGHT, 100);
    frame.fill_rect(60, 130, 10, 10, [220, 60, 20]);
    let mut state = state_at(Pose::new(100.0, 100.0, 30.0));
    let step = pipeline.process_detailed(&frame, &mut state).unwrap();

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let px = state.vision_image.get(x, y);
            assert_eq!(px[0], step.masks.obstacle.get(x, y) * 255);
            assert_eq!(px[1], step.masks.sample.get(x, y) * 255);
            assert_eq!(px[2], step.masks.navigable.get(x, y) * 255);
        }
    }

    let polar = to_polar_coords(&rover_coords(&step.masks.navigable));
    assert!(!polar.is_empty());
    assert_eq!(state.nav_dists, polar.dist);
    assert_eq!(state.nav_angles, polar.angle);
    assert_eq!(step.report.navigable.pixels, polar.len());
}

#[test]
fn world_update_matches_stage_composition() {
    let pipeline = default_pipeline();
    let frame = ground_frame(WIDTH, HEIGHT, 90);
    let pose = Pose::new(0.0, 0.0, 0.0);
    let mut state = state_at(pose);
    let step = pipeline.process_detailed(&frame, &mut state).unwrap();

    let nav = pix_to_world(&rover_coords(&step.masks.navigable), &pose, 200, 10.0);
    let mut expected = vec![0u32; 200 * 200];
    for (x, y) in nav.iter() {
        expected[y * 200 + x] += 1;
    }
    for (i, &count) in expected.iter().enumerate() {
        let got = state.world_map.channel(MapChannel::Navigable)[i];
        assert_eq!(got as u32, count.min(255), "navigable cell {i}");
    }
    // At the origin with yaw 0 everything left of the rover clips to y = 0,
    // and nothing can land behind it.
    for (x, y) in nav.iter() {
        assert!(x <= 16 && y <= 16, "unexpected cell ({x},{y})");
    }
}

#[test]
fn repeated_frames_accumulate_additively() {
    let pipeline = default_pipeline();
    let mut frame = ground_frame(WIDTH, HEIGHT, 105);
    frame.fill_rect(200, 125, 10, 10, [200, 100, 50]);
    let mut state = state_at(Pose::new(120.0, 60.0, 200.0));

    pipeline.process(&frame, &mut state).unwrap();
    let once = state.world_map.clone();
    pipeline.process(&frame, &mut state).unwrap();
    let twice = &state.world_map;

    for channel in [MapChannel::Obstacle, MapChannel::Navigable] {
        let a = once.channel(channel);
        let b = twice.channel(channel);
        for (i, (&v1, &v2)) in a.iter().zip(b.iter()).enumerate() {
            let expected = (2 * v1 as u32).min(255) as u8;
            assert_eq!(v2, expected, "{channel:?} cell {i}: {v1} -> {v2}");
        }
    }
    assert_eq!(once.channel(MapChannel::Sample), twice.channel(MapChannel::Sample));
}

#[test]
fn known_sample_raises_near_sample() {
    let pipeline = default_pipeline();
    let mut frame = Frame::new(WIDTH, HEIGHT);
    frame.fill_rect(150, 120, 10, 10, [200, 100, 50]);

    let mut probe = state_at(Pose::new(100.0, 100.0, 0.0));
    pipeline.process(&frame, &mut probe).unwrap();
    let (sx, sy) = probe
        .world_map
        .sample_cells()
        .next()
        .expect("patch lands on the map");
    assert!(!probe.near_sample);

    let mut state = state_at(Pose::new(100.0, 100.0, 0.0))
        .with_samples(vec![[5.0, 5.0], [sx as f32, sy as f32]]);
    let report = pipeline.process(&frame, &mut state).unwrap();
    assert!(state.near_sample);
    assert_eq!(report.near_sample, Some(1));
}

#[test]
fn report_serializes_to_json() {
    let pipeline = default_pipeline();
    let mut state = state_at(Pose::new(10.0, 20.0, 90.0));
    let report = pipeline
        .process(&ground_frame(WIDTH, HEIGHT, 100), &mut state)
        .unwrap();
    let json = serde_json::to_value(&report).expect("report is serializable");
    assert_eq!(json["input"]["worldSize"], 200);
    assert!(json["navigable"]["pixels"].as_u64().unwrap() > 0);
    assert!(json["timings"]["stages"].as_array().unwrap().len() >= 5);
    assert!(json.get("nearSample").is_none());
}
