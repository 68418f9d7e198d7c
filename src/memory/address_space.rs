use std::cell::RefMut;

use log::trace;

use crate::cartridge::cartridge::Cartridge;
use crate::error::BusError;
use crate::memory::cpu::cpu_address::CpuAddress;
use crate::memory::cpu::cpu_internal_ram::{CpuInternalRam, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::memory::cpu::region::{Region, PPU_REGISTERS_START, PPU_REGISTER_COUNT};
use crate::memory::location::{Location, Storage};
use crate::memory::mapper::Mapper;
use crate::memory::mapper_list;
use crate::memory::ppu::ppu_address::PpuAddress;
use crate::ppu::ppu_port::PpuHandle;
use crate::ppu::register::register_type::RegisterType;

// Everything the CPU can see. Routes each access to work RAM, the PPU or the cartridge.
pub struct AddressSpace {
    mapper: Box<dyn Mapper>,
    work_ram: CpuInternalRam,
    ppu: PpuHandle,
}

impl AddressSpace {
    pub fn new(cartridge: &Cartridge, ppu: PpuHandle) -> Result<AddressSpace, BusError> {
        let mapper = mapper_list::create(cartridge.mapper_number(), cartridge, ppu.clone())?;
        Ok(AddressSpace::with_mapper(mapper, ppu))
    }

    pub fn with_mapper(mapper: Box<dyn Mapper>, ppu: PpuHandle) -> AddressSpace {
        AddressSpace { mapper, work_ram: CpuInternalRam::new(), ppu }
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn ppu(&self) -> &PpuHandle {
        &self.ppu
    }

    #[inline]
    pub fn read(&mut self, address: CpuAddress) -> Result<u8, BusError> {
        use Region::*;
        let value = match address.region() {
            WorkingMemory | WorkingMemoryMirror =>
                self.work_ram[CpuInternalRam::index_of(address)],
            PictureUnitRegisters | PictureUnitRegistersMirror =>
                self.ppu.borrow_mut().read_from_cpu(ppu_register_address(address))?,
            region @ (ExpansionIORegisters | ExpansionIOTest) =>
                return Err(BusError::Unimplemented { region, address }),
            CartridgeSpace =>
                self.mapper.read(address)?,
        };

        trace!(target: "busaccess", "Read ${value:02X} from {address}.");
        Ok(value)
    }

    #[inline]
    pub fn write(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
        trace!(target: "busaccess", "Writing ${value:02X} to {address}.");

        use Region::*;
        match address.region() {
            WorkingMemory | WorkingMemoryMirror =>
                self.work_ram[CpuInternalRam::index_of(address)] = value,
            PictureUnitRegisters | PictureUnitRegistersMirror =>
                self.ppu.borrow_mut().write_from_cpu(ppu_register_address(address), value)?,
            region @ (ExpansionIORegisters | ExpansionIOTest) =>
                return Err(BusError::Unimplemented { region, address }),
            CartridgeSpace =>
                self.mapper.write(address, value)?,
        }

        Ok(())
    }

    // Little endian. The high byte comes from $0000 when reading at $FFFF.
    pub fn read16(&mut self, address: CpuAddress) -> Result<u16, BusError> {
        let low = self.read(address)?;
        let high = self.read(address.advance(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    pub fn location(&mut self, address: CpuAddress) -> Result<Location<'_>, BusError> {
        use Region::*;
        match address.region() {
            WorkingMemory | WorkingMemoryMirror => {
                let index = CpuInternalRam::index_of(address);
                Ok(Location::writable(&mut self.work_ram[index], Storage::WorkRam { index }))
            }
            PictureUnitRegisters | PictureUnitRegistersMirror => {
                let register_address = ppu_register_address(address);
                let register_type = RegisterType::from_address(register_address)
                    .ok_or(BusError::AddressOutOfBounds)?;
                let latch = RefMut::filter_map(
                    self.ppu.borrow_mut(),
                    |ppu| ppu.location_from_cpu(register_address).ok(),
                ).map_err(|_| BusError::AddressOutOfBounds)?;
                Ok(Location::shared(latch, Storage::PpuRegister(register_type)))
            }
            region @ (ExpansionIORegisters | ExpansionIOTest) =>
                Err(BusError::Unimplemented { region, address }),
            CartridgeSpace =>
                self.mapper.location(address),
        }
    }

    pub fn pattern_read(&self, address: PpuAddress) -> Result<u8, BusError> {
        self.mapper.ppu_read(address)
    }

    pub fn pattern_write(&mut self, address: PpuAddress, value: u8) -> Result<(), BusError> {
        self.mapper.ppu_write(address, value)
    }

    pub fn nmi_vector(&mut self) -> Result<CpuAddress, BusError> {
        self.address_from_vector(NMI_VECTOR)
    }

    pub fn reset_vector(&mut self) -> Result<CpuAddress, BusError> {
        self.address_from_vector(RESET_VECTOR)
    }

    pub fn irq_vector(&mut self) -> Result<CpuAddress, BusError> {
        self.address_from_vector(IRQ_VECTOR)
    }

    fn address_from_vector(&mut self, vector: CpuAddress) -> Result<CpuAddress, BusError> {
        self.read16(vector).map(CpuAddress::new)
    }
}

// Fold any address in $2000-$3FFF down onto one of the eight real registers.
#[inline]
fn ppu_register_address(address: CpuAddress) -> CpuAddress {
    let offset = address.mirror_index(PPU_REGISTERS_START, PPU_REGISTER_COUNT);
    CpuAddress::new(PPU_REGISTERS_START + offset as u16)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cartridge::test_data;
    use crate::memory::cpu::prg_memory::PrgMemory;
    use crate::memory::ppu::chr_memory::ChrMemory;
    use crate::ppu::name_table_mirroring::NameTableMirroring;
    use crate::ppu::ppu_port::PpuPort;
    use crate::ppu::register::ppu_registers::PpuRegisters;

    #[derive(Default)]
    struct RecordingPpu {
        registers: [u8; 8],
        reads: Vec<CpuAddress>,
        writes: Vec<(CpuAddress, u8)>,
    }

    impl PpuPort for RecordingPpu {
        fn read_from_cpu(&mut self, address: CpuAddress) -> Result<u8, BusError> {
            self.reads.push(address);
            Ok(self.registers[address.mirror_index(0x2000, 8)])
        }

        fn write_from_cpu(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
            self.writes.push((address, value));
            self.registers[address.mirror_index(0x2000, 8)] = value;
            Ok(())
        }

        fn location_from_cpu(&mut self, address: CpuAddress) -> Result<&mut u8, BusError> {
            Ok(&mut self.registers[address.mirror_index(0x2000, 8)])
        }

        fn set_name_table_mirroring(&mut self, _mirroring: NameTableMirroring) {}
    }

    // Answers every read with the low byte of the address and remembers everything it saw.
    struct RecordingMapper {
        prg_memory: PrgMemory,
        chr_memory: ChrMemory,
        reads: Rc<RefCell<Vec<CpuAddress>>>,
        writes: Rc<RefCell<Vec<(CpuAddress, u8)>>>,
    }

    impl Mapper for RecordingMapper {
        fn prg_memory(&self) -> &PrgMemory { &self.prg_memory }
        fn prg_memory_mut(&mut self) -> &mut PrgMemory { &mut self.prg_memory }
        fn chr_memory(&self) -> &ChrMemory { &self.chr_memory }
        fn chr_memory_mut(&mut self) -> &mut ChrMemory { &mut self.chr_memory }
        fn name_table_mirroring(&self) -> NameTableMirroring { NameTableMirroring::Vertical }

        fn read(&mut self, address: CpuAddress) -> Result<u8, BusError> {
            self.reads.borrow_mut().push(address);
            Ok(address.to_raw() as u8)
        }

        fn write(&mut self, address: CpuAddress, value: u8) -> Result<(), BusError> {
            self.writes.borrow_mut().push((address, value));
            Ok(())
        }
    }

    type Log<T> = Rc<RefCell<Vec<T>>>;

    fn recording_space() -> (AddressSpace, Rc<RefCell<RecordingPpu>>, Log<CpuAddress>, Log<(CpuAddress, u8)>) {
        let reads = Rc::new(RefCell::new(Vec::new()));
        let writes = Rc::new(RefCell::new(Vec::new()));
        let mapper = RecordingMapper {
            prg_memory: PrgMemory::new(Vec::new(), 0),
            chr_memory: ChrMemory::new(Vec::new()),
            reads: reads.clone(),
            writes: writes.clone(),
        };
        let ppu = Rc::new(RefCell::new(RecordingPpu::default()));
        let address_space = AddressSpace::with_mapper(Box::new(mapper), ppu.clone());
        (address_space, ppu, reads, writes)
    }

    fn nrom_space() -> AddressSpace {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        AddressSpace::new(&test_data::nrom_cartridge(), ppu).unwrap()
    }

    fn address(raw: u16) -> CpuAddress {
        CpuAddress::new(raw)
    }

    #[test]
    fn work_ram_mirrors() {
        let mut address_space = nrom_space();
        address_space.write(address(0x0000), 0xAB).unwrap();
        assert_eq!(address_space.read(address(0x0800)), Ok(0xAB));
        assert_eq!(address_space.read(address(0x1800)), Ok(0xAB));

        address_space.write(address(0x1FFF), 0xCD).unwrap();
        assert_eq!(address_space.read(address(0x07FF)), Ok(0xCD));
    }

    #[test]
    fn ppu_register_mirrors_reach_the_same_register() {
        let (mut address_space, ppu, _, _) = recording_space();
        address_space.write(address(0x2000), 0x80).unwrap();
        assert_eq!(address_space.read(address(0x2008)), Ok(0x80));
        assert_eq!(address_space.read(address(0x3FF8)), Ok(0x80));

        address_space.write(address(0x3FFF), 0x11).unwrap();
        let ppu = ppu.borrow();
        assert_eq!(ppu.writes, vec![(address(0x2000), 0x80), (address(0x2007), 0x11)]);
        assert_eq!(ppu.reads, vec![address(0x2000), address(0x2000)]);
    }

    #[test]
    fn expansion_regions_are_unimplemented() {
        let mut address_space = nrom_space();
        for raw in [0x4000, 0x4017] {
            assert_eq!(
                address_space.read(address(raw)),
                Err(BusError::Unimplemented { region: Region::ExpansionIORegisters, address: address(raw) }),
            );
        }

        for raw in [0x4018, 0x401F] {
            assert_eq!(
                address_space.write(address(raw), 0),
                Err(BusError::Unimplemented { region: Region::ExpansionIOTest, address: address(raw) }),
            );
        }

        assert!(address_space.location(address(0x4015)).is_err());
    }

    #[test]
    fn cartridge_space_is_delegated_verbatim() {
        let (mut address_space, _, reads, writes) = recording_space();
        assert_eq!(address_space.read(address(0x4020)), Ok(0x20));
        assert_eq!(address_space.read(address(0xFFFF)), Ok(0xFF));
        address_space.write(address(0x6123), 0x45).unwrap();
        address_space.write(address(0x8000), 0x01).unwrap();

        assert_eq!(*reads.borrow(), vec![address(0x4020), address(0xFFFF)]);
        assert_eq!(*writes.borrow(), vec![(address(0x6123), 0x45), (address(0x8000), 0x01)]);
    }

    #[test]
    fn nothing_below_cartridge_space_reaches_the_mapper() {
        let (mut address_space, _, reads, writes) = recording_space();
        for raw in [0x0000, 0x07FF, 0x0800, 0x1FFF, 0x2000, 0x2007, 0x2008, 0x3FFF] {
            address_space.read(address(raw)).unwrap();
            address_space.write(address(raw), 0).unwrap();
        }

        let _ = address_space.read(address(0x401F));
        assert!(reads.borrow().is_empty());
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn read16_is_little_endian() {
        let mut address_space = nrom_space();
        address_space.write(address(0x0010), 0x34).unwrap();
        address_space.write(address(0x0011), 0x12).unwrap();
        assert_eq!(address_space.read16(address(0x0010)), Ok(0x1234));
        // Through the mirror too.
        assert_eq!(address_space.read16(address(0x0810)), Ok(0x1234));
    }

    #[test]
    fn read16_wraps_at_the_top() {
        let (mut address_space, _, reads, _) = recording_space();
        address_space.write(address(0x0000), 0x12).unwrap();
        assert_eq!(address_space.read16(address(0xFFFF)), Ok(0x12FF));
        assert_eq!(*reads.borrow(), vec![address(0xFFFF)]);
    }

    #[test]
    fn vectors_come_from_the_top_of_rom() {
        let mut address_space = nrom_space();
        let expected = |offset: usize| {
            u16::from_le_bytes([test_data::nrom_prg_byte(offset), test_data::nrom_prg_byte(offset + 1)])
        };
        assert_eq!(address_space.nmi_vector(), Ok(address(expected(0x7FFA))));
        assert_eq!(address_space.reset_vector(), Ok(address(expected(0x7FFC))));
        assert_eq!(address_space.irq_vector(), Ok(address(expected(0x7FFE))));
    }

    #[test]
    fn location_matches_read_and_write() {
        let mut address_space = nrom_space();
        {
            let mut location = address_space.location(address(0x1805)).unwrap();
            assert_eq!(location.storage(), Storage::WorkRam { index: 0x005 });
            location.set(0x66);
        }

        assert_eq!(address_space.read(address(0x0005)), Ok(0x66));

        let expected = address_space.read(address(0x9000)).unwrap();
        let location = address_space.location(address(0x9000)).unwrap();
        assert_eq!(location.get(), expected);
        assert!(!location.is_writable());
    }

    #[test]
    fn location_reaches_ppu_latches() {
        let (mut address_space, ppu, _, _) = recording_space();
        {
            let mut location = address_space.location(address(0x200A)).unwrap();
            assert_eq!(location.storage(), Storage::PpuRegister(RegisterType::Status));
            location.set(0x80);
        }

        assert_eq!(ppu.borrow().registers[2], 0x80);
        // Direct access doesn't count as a bus read.
        assert!(ppu.borrow().reads.is_empty());
    }

    #[test]
    fn nrom_rom_ignores_writes() {
        let mut address_space = nrom_space();
        let before = address_space.read(address(0xC000)).unwrap();
        address_space.write(address(0xC000), !before).unwrap();
        assert_eq!(address_space.read(address(0xC000)), Ok(before));
    }

    #[test]
    fn unsupported_mapper_produces_no_address_space() {
        let ppu = Rc::new(RefCell::new(PpuRegisters::new()));
        let result = AddressSpace::new(&test_data::cartridge_with_mapper(99), ppu);
        assert!(matches!(result, Err(BusError::MapperUnsupported(99))));
    }

    #[test]
    fn pattern_accesses_go_to_chr() {
        let mut address_space = nrom_space();
        let expected = test_data::nrom_chr_byte(0x1234);
        assert_eq!(address_space.pattern_read(PpuAddress::from_u16(0x1234)), Ok(expected));
        address_space.pattern_write(PpuAddress::from_u16(0x1234), !expected).unwrap();
        assert_eq!(address_space.pattern_read(PpuAddress::from_u16(0x1234)), Ok(expected));
    }
}
