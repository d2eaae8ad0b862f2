use rover_perception::config::load_config;
use rover_perception::image::io::{load_frame, save_frame, save_mask, write_json_file};
use rover_perception::{PerceptionPipeline, RoverState};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frame = load_frame(&config.input)?;
    let pipeline = PerceptionPipeline::new(config.params, frame.w, frame.h)
        .map_err(|e| e.to_string())?;
    let mut state = RoverState::new(frame.w, frame.h, config.rover.world_size)
        .map_err(|e| e.to_string())?
        .with_pose(config.rover.pose)
        .with_samples(config.rover.samples_pos);

    let repeat = config.repeat.max(1);
    let mut last = None;
    for _ in 0..repeat {
        let step = pipeline
            .process_detailed(&frame, &mut state)
            .map_err(|e| e.to_string())?;
        last = Some(step);
    }
    let step = last.ok_or("Pipeline did not run")?;

    save_frame(&state.vision_image, &config.output.vision_image)?;
    save_frame(&state.world_map.to_frame(), &config.output.world_map_image)?;
    write_json_file(&config.output.report_json, &step.report)?;

    if let Some(dir) = &config.output.debug_dir {
        save_frame(&step.rectified, &dir.join("rectified.png"))?;
        save_mask(pipeline.rectifier().valid_mask(), &dir.join("valid.png"))?;
        save_mask(&step.masks.navigable, &dir.join("navigable.png"))?;
        save_mask(&step.masks.obstacle, &dir.join("obstacle.png"))?;
        save_mask(&step.masks.sample, &dir.join("sample.png"))?;
        println!("Saved debug images to {}", dir.display());
    }

    println!(
        "Processed {}x{} frame {} time(s): navigable={} obstacle={} sample={}",
        frame.w,
        frame.h,
        repeat,
        step.report.navigable.pixels,
        step.report.obstacle.pixels,
        step.report.sample.pixels
    );
    match step.report.navigable.mean_angle_rad {
        Some(angle) => println!("Mean navigable bearing: {:.2} deg", angle.to_degrees()),
        None => println!("No navigable terrain in view"),
    }
    if state.near_sample {
        println!("Detected sample near a known sample location");
    }
    println!(
        "Saved vision image to {}, world map to {}, report to {}",
        config.output.vision_image.display(),
        config.output.world_map_image.display(),
        config.output.report_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: perception_demo <config.json>".to_string()
}
