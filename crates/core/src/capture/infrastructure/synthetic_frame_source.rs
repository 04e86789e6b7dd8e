use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Frame source producing solid-color frames with incrementing indices.
///
/// Stands in for a camera in scripted replays and tests, where only the
/// capture timing matters and the pixel content is irrelevant.
pub struct SyntheticFrameSource {
    width: u32,
    height: u32,
    fill: u8,
    next_index: usize,
}

impl SyntheticFrameSource {
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            fill,
            next_index: 0,
        }
    }
}

impl Default for SyntheticFrameSource {
    fn default() -> Self {
        Self::new(4, 4, 128)
    }
}

impl FrameSource for SyntheticFrameSource {
    fn screenshot(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let pixels = (self.width * self.height * 3) as usize;
        let frame = Frame::new(vec![self.fill; pixels], self.width, self.height, self.next_index);
        self.next_index += 1;
        Ok(frame)
    }
}
