/// One visual snapshot from the frame source: opaque pixel bytes plus an
/// arrival index.
///
/// The core never inspects the pixels; it only carries them into proof
/// captures. Decoding and encoding happen at I/O boundaries outside the
/// library.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Position of this frame in the source's arrival order.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let frame = Frame::new(vec![7u8; 16], 4, 4, 3);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.index(), 3);
        assert_eq!(frame.data(), &[7u8; 16][..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![1, 2, 3], 1, 1, 0);
        let cloned = frame.clone();
        drop(frame);
        assert_eq!(cloned.data(), &[1, 2, 3]);
    }
}
