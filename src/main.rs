use rover_perception::{Frame, PerceptionParams, PerceptionPipeline, Pose, RoverState};

fn main() {
    env_logger::init();
    // Demo stub: a synthetic frame with a bright ground strip and one sample
    let (w, h) = (320usize, 160usize);
    let mut frame = Frame::new(w, h);
    frame.fill_rect(0, 110, w, h - 110, [190, 180, 170]);
    frame.fill_rect(150, 120, 10, 10, [200, 100, 50]);

    let pipeline = match PerceptionPipeline::new(PerceptionParams::default(), w, h) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let mut state = match RoverState::new(w, h, 200) {
        Ok(s) => s.with_pose(Pose::new(100.0, 100.0, 0.0)),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match pipeline.process(&frame, &mut state) {
        Ok(report) => println!(
            "navigable={} obstacle={} sample={} total_ms={:.3}",
            report.navigable.pixels,
            report.obstacle.pixels,
            report.sample.pixels,
            report.timings.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
