//! Fake I2C bus for driver tests
//!
//! Models a register-file device with an auto-incrementing address
//! pointer, which is how both the RTC and the temperature sensor
//! behave on the wire: a write's first byte sets the pointer, any
//! further bytes land in consecutive registers, and reads stream from
//! the pointer onwards.

use core::convert::Infallible;

use embedded_hal::i2c::{ErrorType, I2c, Operation};

const REGISTER_COUNT: usize = 0x20;

pub(crate) struct FakeBus {
    regs: [u8; REGISTER_COUNT],
    pointer: usize,
    pub last_address: u8,
}

impl FakeBus {
    pub fn new() -> FakeBus {
        FakeBus {
            regs: [0; REGISTER_COUNT],
            pointer: 0,
            last_address: 0,
        }
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.regs[register as usize]
    }

    pub fn set_reg(&mut self, register: u8, value: u8) {
        self.regs[register as usize] = value;
    }
}

impl ErrorType for FakeBus {
    type Error = Infallible;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.last_address = address;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((first, rest)) = bytes.split_first() {
                        self.pointer = *first as usize;
                        for byte in rest {
                            self.regs[self.pointer % REGISTER_COUNT] = *byte;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = self.regs[self.pointer % REGISTER_COUNT];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
