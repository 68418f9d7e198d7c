use std::ops::{Index, IndexMut};

use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::cpu::region::WORK_RAM_SIZE;

pub const NMI_VECTOR: CpuAddress = CpuAddress::new(0xFFFA);
pub const RESET_VECTOR: CpuAddress = CpuAddress::new(0xFFFC);
pub const IRQ_VECTOR: CpuAddress = CpuAddress::new(0xFFFE);

const RAM_SIZE: usize = WORK_RAM_SIZE as usize;

// The 2 KiB of work RAM inside the console. Fixed size, never reallocated.
pub struct CpuInternalRam {
    memory: Box<[u8; RAM_SIZE]>,
}

impl CpuInternalRam {
    pub fn new() -> CpuInternalRam {
        CpuInternalRam { memory: Box::new([0; RAM_SIZE]) }
    }

    // Index into the backing store, folding the three mirrors down.
    #[inline]
    pub fn index_of(address: CpuAddress) -> usize {
        address.mirror_index(0x0000, WORK_RAM_SIZE)
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }
}

impl Default for CpuInternalRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for CpuInternalRam {
    type Output = u8;

    fn index(&self, idx: usize) -> &u8 {
        &self.memory[idx]
    }
}

impl IndexMut<usize> for CpuInternalRam {
    fn index_mut(&mut self, idx: usize) -> &mut u8 {
        &mut self.memory[idx]
    }
}
