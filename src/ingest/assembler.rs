// src/ingest/assembler.rs

use crate::common::frame::{Frame, FRAME_HEADER, FRAME_LEN};

/// Discrete states of the frame buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FrameState {
    /// Scanning for the `0x55` header.
    #[default]
    Idle,
    /// Accumulating a frame, cursor in 1..=10.
    Receiving,
    /// A checksum-valid frame was just completed.
    FrameReady,
}

/// Outcome of offering one byte to the state machine.
enum Step {
    /// The byte was used; carries a completed frame if one was closed.
    Consumed(Option<Frame>),
    /// A terminal state was closed; the same byte has to be offered again.
    Replay,
}

/// Running counters, useful for link diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FrameStats {
    pub frames: u32,
    pub checksum_errors: u32,
}

/// Reassembles 11-byte frames from an arbitrary byte stream.
///
/// The assembler keeps its state across calls, so the split of the stream
/// into chunks has no influence on the frames it produces.
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    buffer: [u8; FRAME_LEN],
    cursor: usize,
    state: FrameState,
    stats: FrameStats,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> FrameState {
        self.state
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Drops any partial frame and goes back to scanning for a header.
    pub fn reset(&mut self) {
        self.buffer = [0; FRAME_LEN];
        self.cursor = 0;
        self.state = FrameState::Idle;
    }

    /// Processes one byte, returning a frame when a checksum-valid one completes.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        loop {
            match self.step(byte) {
                Step::Consumed(frame) => return frame,
                Step::Replay => continue,
            }
        }
    }

    fn step(&mut self, byte: u8) -> Step {
        match self.state {
            FrameState::Idle => {
                if byte == FRAME_HEADER {
                    self.buffer[0] = byte;
                    self.cursor = 1;
                    self.state = FrameState::Receiving;
                }
                Step::Consumed(None)
            }
            FrameState::Receiving => {
                self.buffer[self.cursor] = byte;
                self.cursor += 1;
                if self.cursor < FRAME_LEN {
                    return Step::Consumed(None);
                }

                self.cursor = 0;
                match Frame::new(self.buffer) {
                    Some(frame) => {
                        self.state = FrameState::FrameReady;
                        self.stats.frames = self.stats.frames.wrapping_add(1);
                        Step::Consumed(Some(frame))
                    }
                    // A mismatch is counted and dropped; scanning resumes at once.
                    None => {
                        self.state = FrameState::Idle;
                        self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
                        Step::Consumed(None)
                    }
                }
            }
            // Close out the previous frame; the byte is then scanned from Idle.
            FrameState::FrameReady => {
                self.state = FrameState::Idle;
                Step::Replay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(tag: u8, payload: [u8; 8]) -> [u8; FRAME_LEN] {
        *Frame::encode(tag, payload).as_bytes()
    }

    fn collect(assembler: &mut FrameAssembler, bytes: &[u8]) -> Vec<Frame> {
        bytes.iter().filter_map(|b| assembler.push(*b)).collect()
    }

    #[test]
    fn test_single_frame() {
        let mut assembler = FrameAssembler::new();
        let bytes = frame_bytes(0x52, [1, 2, 3, 4, 5, 6, 7, 8]);
        let frames = collect(&mut assembler, &bytes);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_bytes(), &bytes);
        assert_eq!(assembler.state(), FrameState::FrameReady);
        assert_eq!(assembler.cursor(), 0);
    }

    #[test]
    fn test_garbage_before_header_is_skipped() {
        let mut assembler = FrameAssembler::new();
        let mut stream = vec![0x00, 0x13, 0xAA];
        stream.extend_from_slice(&frame_bytes(0x51, [0; 8]));
        assert_eq!(collect(&mut assembler, &stream).len(), 1);
    }

    #[test]
    fn test_back_to_back_frames_are_not_dropped() {
        // The header of the second frame arrives while the first is in FrameReady.
        let mut assembler = FrameAssembler::new();
        let mut stream = Vec::new();
        stream.extend_from_slice(&frame_bytes(0x51, [1; 8]));
        stream.extend_from_slice(&frame_bytes(0x52, [2; 8]));
        stream.extend_from_slice(&frame_bytes(0x53, [3; 8]));
        let tags: Vec<u8> = collect(&mut assembler, &stream).iter().map(|f| f.tag()).collect();
        assert_eq!(tags, vec![0x51, 0x52, 0x53]);
        assert_eq!(assembler.stats().frames, 3);
    }

    #[test]
    fn test_checksum_error_recovers_on_next_header() {
        let mut assembler = FrameAssembler::new();
        let mut bad = frame_bytes(0x52, [9; 8]);
        bad[10] ^= 0xFF;
        assert!(collect(&mut assembler, &bad).is_empty());
        assert_eq!(assembler.state(), FrameState::Idle);
        assert_eq!(assembler.cursor(), 0);
        assert_eq!(assembler.stats().checksum_errors, 1);

        let good = frame_bytes(0x53, [0; 8]);
        let frames = collect(&mut assembler, &good);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tag(), 0x53);
    }

    #[test]
    fn test_header_after_corrupt_frame_is_not_lost() {
        let mut assembler = FrameAssembler::new();
        let mut stream = frame_bytes(0x52, [9; 8]).to_vec();
        stream[10] ^= 0x01;
        stream.extend_from_slice(&frame_bytes(0x54, [1; 8]));
        let tags: Vec<u8> = collect(&mut assembler, &stream).iter().map(|f| f.tag()).collect();
        assert_eq!(tags, vec![0x54]);
        assert_eq!(assembler.stats().checksum_errors, 1);
    }

    #[test]
    fn test_ready_state_returns_to_idle_on_next_byte() {
        let mut assembler = FrameAssembler::new();
        collect(&mut assembler, &frame_bytes(0x51, [0; 8]));
        assert_eq!(assembler.state(), FrameState::FrameReady);
        assert_eq!(assembler.push(0x00), None);
        assert_eq!(assembler.state(), FrameState::Idle);

        collect(&mut assembler, &frame_bytes(0x51, [0; 8]));
        // A header right after a good frame starts the next one immediately.
        assembler.push(FRAME_HEADER);
        assert_eq!(assembler.state(), FrameState::Receiving);
        assert_eq!(assembler.cursor(), 1);
    }

    #[test]
    fn test_cursor_never_exceeds_frame_length() {
        let mut assembler = FrameAssembler::new();
        for i in 0..500u32 {
            assembler.push((i.wrapping_mul(37) % 251) as u8 | 0x01);
            assert!(assembler.cursor() < FRAME_LEN);
        }
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut assembler = FrameAssembler::new();
        let bytes = frame_bytes(0x54, [4; 8]);
        collect(&mut assembler, &bytes[..6]);
        assert_eq!(assembler.state(), FrameState::Receiving);
        assembler.reset();
        assert_eq!(assembler.state(), FrameState::Idle);
        assert_eq!(assembler.cursor(), 0);
        // The tail of the old frame is ignored until a new header shows up.
        assert!(collect(&mut assembler, &bytes[6..]).is_empty());
    }
}
