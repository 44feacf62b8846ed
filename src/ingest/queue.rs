// src/ingest/queue.rs

//! Interrupt-to-main byte hand-off.
//!
//! `feed` must never run concurrently with itself. When bytes arrive in an
//! interrupt, push them into an [`RxQueue`] there and drain the consumer half
//! from the main loop with [`Jy901s::drain`].

use heapless::spsc::{Consumer, Producer, Queue};

use crate::common::{
    error::Jy901sError,
    hal_traits::{ImuSerial, ImuTimer},
};
use crate::driver::Jy901s;

/// Single-producer/single-consumer byte queue. Holds `N - 1` bytes.
pub type RxQueue<const N: usize> = Queue<u8, N>;

/// Bytes moved into `feed` per call while draining.
const DRAIN_CHUNK: usize = 32;

/// Pushes as many bytes as fit, returning how many were dropped.
pub fn push_all<const N: usize>(producer: &mut Producer<'_, u8, N>, bytes: &[u8]) -> usize {
    for (i, byte) in bytes.iter().enumerate() {
        if producer.enqueue(*byte).is_err() {
            return bytes.len() - i;
        }
    }
    0
}

impl<IF> Jy901s<IF>
where
    IF: ImuSerial + ImuTimer,
{
    /// Feeds everything currently queued, returning the number of bytes processed.
    ///
    /// An empty queue is not an error.
    pub fn drain<const N: usize>(
        &mut self,
        consumer: &mut Consumer<'_, u8, N>,
    ) -> Result<usize, Jy901sError<IF::Error>> {
        if !self.is_enabled() {
            return Err(Jy901sError::Disabled);
        }

        let mut total = 0;
        let mut chunk = [0u8; DRAIN_CHUNK];
        loop {
            let mut len = 0;
            while len < DRAIN_CHUNK {
                match consumer.dequeue() {
                    Some(byte) => {
                        chunk[len] = byte;
                        len += 1;
                    }
                    None => break,
                }
            }
            if len == 0 {
                return Ok(total);
            }
            self.feed(&chunk[..len])?;
            total += len;
        }
    }
}
