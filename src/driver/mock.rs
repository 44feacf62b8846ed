// src/driver/mock.rs

//! Test double for the serial channel and clock.

use std::collections::VecDeque;

use crate::common::{
    command::{COMMAND_HEADER, COMMAND_LEN},
    frame::Frame,
    hal_traits::{ImuSerial, ImuTimer},
    register::Register,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockError {
    Bus,
    NotSupported,
}

/// Virtual clock plus a serial port that records writes and serves staged bytes.
#[derive(Debug)]
pub(crate) struct MockInterface {
    pub current_time_ms: u32,
    /// Total virtual time spent in `delay_ms`.
    pub delayed_ms: u64,
    pub write_log: Vec<u8>,
    pub read_queue: VecDeque<u8>,
    pub baud: u32,
    /// Baud rates `set_baud_rate` refuses.
    pub unsupported_bauds: Vec<u32>,
    /// Baud rate at which a register read is answered with a valid frame.
    pub answers_at_baud: Option<u32>,
    /// Bytes queued on every register read at any other baud rate.
    pub noise: Vec<u8>,
    pub block_writes: bool,
    pub fail_writes: bool,
    pub fail_init: bool,
    pub abort_calls: u32,
    pub deinit_calls: u32,
    pub init_calls: u32,
    pub start_receive_calls: u32,
    pub baud_history: Vec<u32>,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            current_time_ms: 0,
            delayed_ms: 0,
            write_log: Vec::new(),
            read_queue: VecDeque::new(),
            baud: 9600,
            unsupported_bauds: Vec::new(),
            answers_at_baud: None,
            noise: Vec::new(),
            block_writes: false,
            fail_writes: false,
            fail_init: false,
            abort_calls: 0,
            deinit_calls: 0,
            init_calls: 0,
            start_receive_calls: 0,
            baud_history: Vec::new(),
        }
    }

    /// Written bytes split into five-byte commands.
    pub fn commands(&self) -> Vec<[u8; COMMAND_LEN]> {
        self.write_log
            .chunks(COMMAND_LEN)
            .map(|c| {
                let mut cmd = [0u8; COMMAND_LEN];
                cmd[..c.len()].copy_from_slice(c);
                cmd
            })
            .collect()
    }

    fn last_command_is_read(&self) -> bool {
        let len = self.write_log.len();
        len >= COMMAND_LEN
            && len % COMMAND_LEN == 0
            && self.write_log[len - COMMAND_LEN..len - 3] == COMMAND_HEADER
            && self.write_log[len - 3] == Register::ReadAddr.addr()
    }

    fn answer_read(&mut self) {
        if self.answers_at_baud == Some(self.baud) {
            // Any decodable packet counts; use an acceleration frame.
            let reply = Frame::encode(0x51, [0x00, 0x08, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00]);
            self.read_queue.extend(reply.as_bytes().iter().copied());
        } else {
            let noise = self.noise.clone();
            self.read_queue.extend(noise);
        }
    }
}

impl ImuTimer for MockInterface {
    fn delay_ms(&mut self, ms: u32) {
        self.current_time_ms = self.current_time_ms.wrapping_add(ms);
        self.delayed_ms += ms as u64;
    }

    fn now_ms(&self) -> u32 {
        self.current_time_ms
    }
}

impl ImuSerial for MockInterface {
    type Error = MockError;

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockError::Bus));
        }
        if self.block_writes {
            return Err(nb::Error::WouldBlock);
        }
        self.write_log.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.last_command_is_read() {
            self.answer_read();
        }
        Ok(())
    }

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn abort_receive(&mut self) {
        self.abort_calls += 1;
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.deinit_calls += 1;
        Ok(())
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        self.init_calls += 1;
        if self.fail_init {
            Err(MockError::Bus)
        } else {
            Ok(())
        }
    }

    fn start_receive(&mut self) -> Result<(), Self::Error> {
        self.start_receive_calls += 1;
        Ok(())
    }

    fn baud_rate(&self) -> u32 {
        self.baud
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        if self.unsupported_bauds.contains(&baud) {
            return Err(MockError::NotSupported);
        }
        self.baud = baud;
        self.baud_history.push(baud);
        Ok(())
    }
}
