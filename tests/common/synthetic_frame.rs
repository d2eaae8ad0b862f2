use rover_perception::image::Frame;

pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 160;

/// Bright ground below `horizon_row`, dark sky and rocks above it.
pub fn ground_frame(width: usize, height: usize, horizon_row: usize) -> Frame {
    assert!(horizon_row <= height, "horizon must lie inside the frame");
    let mut frame = Frame::filled(width, height, [40, 30, 25]);
    frame.fill_rect(0, horizon_row, width, height - horizon_row, [210, 190, 175]);
    frame
}

/// Pseudo-random frame with a fixed seed, for invariants that must hold on
/// arbitrary content.
pub fn noise_frame(width: usize, height: usize, seed: u32) -> Frame {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let mut next = || {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let mut frame = Frame::new(width, height);
    for px in frame.data.iter_mut() {
        let v = next();
        *px = [v as u8, (v >> 8) as u8, (v >> 16) as u8];
    }
    frame
}
