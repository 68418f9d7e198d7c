// The marker bit reaches bit 0 after four shifts, so the fifth write knows it's the last.
const EMPTY_SHIFT_REGISTER: u8 = 0b0001_0000;

// MMC1's serial port. Registers are loaded one bit per write, least significant bit first.
pub struct ShiftRegister {
    value: u8,
}

impl ShiftRegister {
    pub fn shift(&mut self, write_value: u8) -> ShiftStatus {
        if write_value & 0b1000_0000 != 0 {
            self.value = EMPTY_SHIFT_REGISTER;
            return ShiftStatus::Clear;
        }

        let is_last_shift = self.value & 1 == 1;
        self.value >>= 1;
        // Copy the low bit of write_value into the top of the five-bit register.
        self.value |= (write_value & 1) << 4;

        if !is_last_shift {
            return ShiftStatus::Continue;
        }

        let finished_value = self.value;
        self.value = EMPTY_SHIFT_REGISTER;
        ShiftStatus::Done { finished_value }
    }

    // How many bits have been loaded since the last commit or clear.
    pub fn pending_bit_count(&self) -> u32 {
        4 - self.value.trailing_zeros().min(4)
    }
}

impl Default for ShiftRegister {
    fn default() -> Self {
        Self { value: EMPTY_SHIFT_REGISTER }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ShiftStatus {
    Clear,
    Continue,
    Done { finished_value: u8 },
}
