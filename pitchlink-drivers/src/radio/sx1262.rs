//! SX1262 LoRa transceiver driver
//!
//! Blocking command-interface driver over `embedded-hal` SPI. Only the
//! command subset the link needs is implemented: configure once,
//! single-shot receive armed per frame, blocking transmit.
//!
//! The BUSY line gates every command: high means the chip is still
//! processing, low means it will accept the next command. DIO1 is
//! routed to the receive/transmit completion IRQs and is wired by the
//! board to whatever raises the core's `RxFlag`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{Operation, SpiDevice};

use pitchlink_core::traits::{RadioDriver, RadioError};
use pitchlink_protocol::LinkParams;

// Command opcodes
const OP_SET_STANDBY: u8 = 0x80;
const OP_SET_RX: u8 = 0x82;
const OP_SET_TX: u8 = 0x83;
const OP_SET_RF_FREQUENCY: u8 = 0x86;
const OP_CALIBRATE: u8 = 0x89;
const OP_SET_PACKET_TYPE: u8 = 0x8A;
const OP_SET_MODULATION_PARAMS: u8 = 0x8B;
const OP_SET_PACKET_PARAMS: u8 = 0x8C;
const OP_SET_TX_PARAMS: u8 = 0x8E;
const OP_SET_BUFFER_BASE_ADDRESS: u8 = 0x8F;
const OP_SET_PA_CONFIG: u8 = 0x95;
const OP_SET_DIO3_AS_TCXO: u8 = 0x97;
const OP_SET_DIO_IRQ_PARAMS: u8 = 0x08;
const OP_WRITE_REGISTER: u8 = 0x0D;
const OP_WRITE_BUFFER: u8 = 0x0E;
const OP_GET_IRQ_STATUS: u8 = 0x12;
const OP_GET_RX_BUFFER_STATUS: u8 = 0x13;
const OP_READ_BUFFER: u8 = 0x1E;
const OP_CLEAR_IRQ_STATUS: u8 = 0x02;

const STANDBY_RC: u8 = 0x00;
const PACKET_TYPE_LORA: u8 = 0x01;
const RAMP_200US: u8 = 0x04;

// IRQ bits
const IRQ_TX_DONE: u16 = 0x0001;
const IRQ_RX_DONE: u16 = 0x0002;
const IRQ_HEADER_ERR: u16 = 0x0020;
const IRQ_CRC_ERR: u16 = 0x0040;
const IRQ_TIMEOUT: u16 = 0x0200;
const IRQ_ALL: u16 = 0x03FF;

/// LoRa sync word MSB register
const REG_SYNC_WORD: u16 = 0x0740;

/// BUSY poll budget; the chip settles in microseconds, a full
/// calibration in a few milliseconds
const BUSY_POLL_LIMIT: u32 = 10_000;

/// TX completion poll budget in milliseconds; a 7-byte record at SF10
/// over 125 kHz is on air for roughly a quarter second
const TX_POLL_LIMIT_MS: u32 = 2_000;

/// SX1262 over SPI + RESET + BUSY + delay
pub struct Sx1262<SPI, RST, BUSY, DLY> {
    spi: SPI,
    reset: RST,
    busy: BUSY,
    delay: DLY,
    tcxo_voltage: Option<u8>,
    preamble_len: u16,
}

impl<SPI, RST, BUSY, DLY> Sx1262<SPI, RST, BUSY, DLY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    BUSY: InputPin,
    DLY: DelayNs,
{
    /// Create a driver for a module with a crystal oscillator
    pub fn new(spi: SPI, reset: RST, busy: BUSY, delay: DLY) -> Self {
        Self {
            spi,
            reset,
            busy,
            delay,
            tcxo_voltage: None,
            preamble_len: 0,
        }
    }

    /// Use DIO3 to power a TCXO at the given voltage code
    ///
    /// Most integrated SX1262 modules (including the deployed boards)
    /// need this; 0x02 selects 1.8 V.
    pub fn with_tcxo(mut self, voltage_code: u8) -> Self {
        self.tcxo_voltage = Some(voltage_code);
        self
    }

    fn wait_busy(&mut self) -> Result<(), RadioError> {
        for _ in 0..BUSY_POLL_LIMIT {
            match self.busy.is_low() {
                Ok(true) => return Ok(()),
                Ok(false) => self.delay.delay_us(10),
                Err(_) => return Err(RadioError::NotPresent),
            }
        }
        Err(RadioError::NotPresent)
    }

    fn command(&mut self, opcode: u8, params: &[u8]) -> Result<(), RadioError> {
        self.wait_busy()?;
        self.spi
            .transaction(&mut [Operation::Write(&[opcode]), Operation::Write(params)])
            .map_err(|_| RadioError::NotPresent)
    }

    fn command_read(&mut self, header: &[u8], out: &mut [u8]) -> Result<(), RadioError> {
        self.wait_busy()?;
        self.spi
            .transaction(&mut [Operation::Write(header), Operation::Read(out)])
            .map_err(|_| RadioError::NotPresent)
    }

    fn write_register(&mut self, addr: u16, data: &[u8]) -> Result<(), RadioError> {
        let [hi, lo] = addr.to_be_bytes();
        self.wait_busy()?;
        self.spi
            .transaction(&mut [
                Operation::Write(&[OP_WRITE_REGISTER, hi, lo]),
                Operation::Write(data),
            ])
            .map_err(|_| RadioError::NotPresent)
    }

    fn hardware_reset(&mut self) -> Result<(), RadioError> {
        self.reset.set_low().map_err(|_| RadioError::NotPresent)?;
        self.delay.delay_ms(1);
        self.reset.set_high().map_err(|_| RadioError::NotPresent)?;
        self.delay.delay_ms(5);
        self.wait_busy()
    }

    fn set_packet_params(&mut self, payload_len: u8) -> Result<(), RadioError> {
        let [pre_hi, pre_lo] = self.preamble_len.to_be_bytes();
        // explicit header, CRC on, standard IQ
        self.command(
            OP_SET_PACKET_PARAMS,
            &[pre_hi, pre_lo, 0x00, payload_len, 0x01, 0x00],
        )
    }

    fn irq_status(&mut self) -> Result<u16, RadioError> {
        let mut out = [0u8; 3];
        self.command_read(&[OP_GET_IRQ_STATUS], &mut out)?;
        Ok(u16::from_be_bytes([out[1], out[2]]))
    }

    fn clear_irq(&mut self) -> Result<(), RadioError> {
        self.command(OP_CLEAR_IRQ_STATUS, &IRQ_ALL.to_be_bytes())
    }
}

impl<SPI, RST, BUSY, DLY> RadioDriver for Sx1262<SPI, RST, BUSY, DLY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    BUSY: InputPin,
    DLY: DelayNs,
{
    fn configure(&mut self, params: &LinkParams) -> Result<(), RadioError> {
        let bw = bandwidth_code(params.bandwidth_hz).ok_or(RadioError::Rejected)?;
        let cr = coding_rate_code(params.coding_rate).ok_or(RadioError::Rejected)?;
        if !(5..=12).contains(&params.spreading_factor) {
            return Err(RadioError::Rejected);
        }

        self.preamble_len = params.preamble_len;

        self.hardware_reset()?;
        self.command(OP_SET_STANDBY, &[STANDBY_RC])?;

        if let Some(voltage) = self.tcxo_voltage {
            // 5 ms startup in 15.625 us steps, then recalibrate everything
            self.command(OP_SET_DIO3_AS_TCXO, &[voltage, 0x00, 0x01, 0x40])?;
            self.command(OP_CALIBRATE, &[0x7F])?;
        }

        self.command(OP_SET_PACKET_TYPE, &[PACKET_TYPE_LORA])?;
        self.command(
            OP_SET_RF_FREQUENCY,
            &pll_steps(params.frequency_hz).to_be_bytes(),
        )?;
        // SX1262 high-power PA at full duty
        self.command(OP_SET_PA_CONFIG, &[0x04, 0x07, 0x00, 0x01])?;
        self.command(
            OP_SET_TX_PARAMS,
            &[params.tx_power_dbm as u8, RAMP_200US],
        )?;
        self.command(OP_SET_BUFFER_BASE_ADDRESS, &[0x00, 0x00])?;

        let ldro = low_data_rate_optimize(params.spreading_factor, params.bandwidth_hz);
        self.command(
            OP_SET_MODULATION_PARAMS,
            &[params.spreading_factor, bw, cr, ldro],
        )?;

        self.write_register(REG_SYNC_WORD, &sync_word_registers(params.sync_word))?;

        // TxDone/RxDone/errors on DIO1, nothing on DIO2/DIO3
        let irq_mask = (IRQ_TX_DONE | IRQ_RX_DONE | IRQ_TIMEOUT | IRQ_CRC_ERR).to_be_bytes();
        self.command(
            OP_SET_DIO_IRQ_PARAMS,
            &[
                irq_mask[0], irq_mask[1], irq_mask[0], irq_mask[1], 0x00, 0x00, 0x00, 0x00,
            ],
        )?;

        self.clear_irq()
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<(), RadioError> {
        if frame.is_empty() || frame.len() > 255 {
            return Err(RadioError::Transmit);
        }

        self.command(OP_SET_STANDBY, &[STANDBY_RC])
            .map_err(|_| RadioError::Transmit)?;
        self.set_packet_params(frame.len() as u8)
            .map_err(|_| RadioError::Transmit)?;

        self.wait_busy().map_err(|_| RadioError::Transmit)?;
        self.spi
            .transaction(&mut [
                Operation::Write(&[OP_WRITE_BUFFER, 0x00]),
                Operation::Write(frame),
            ])
            .map_err(|_| RadioError::Transmit)?;

        self.clear_irq().map_err(|_| RadioError::Transmit)?;
        // no hardware timeout; completion is polled below
        self.command(OP_SET_TX, &[0x00, 0x00, 0x00])
            .map_err(|_| RadioError::Transmit)?;

        for _ in 0..TX_POLL_LIMIT_MS {
            let irq = self.irq_status().map_err(|_| RadioError::Transmit)?;
            if irq & IRQ_TX_DONE != 0 {
                self.clear_irq().map_err(|_| RadioError::Transmit)?;
                return Ok(());
            }
            if irq & IRQ_TIMEOUT != 0 {
                self.clear_irq().map_err(|_| RadioError::Transmit)?;
                return Err(RadioError::Transmit);
            }
            self.delay.delay_ms(1);
        }
        Err(RadioError::Transmit)
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        self.command(OP_SET_STANDBY, &[STANDBY_RC])
            .map_err(|_| RadioError::Receive)?;
        // max-length packet params; the real length comes from the
        // buffer status after RxDone
        self.set_packet_params(0xFF)
            .map_err(|_| RadioError::Receive)?;
        self.clear_irq().map_err(|_| RadioError::Receive)?;
        // single-shot mode, no timeout: one RxDone per arm, matching
        // the link adapter's edge-triggered contract
        self.command(OP_SET_RX, &[0x00, 0x00, 0x00])
            .map_err(|_| RadioError::Receive)
    }

    fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, RadioError> {
        let irq = self.irq_status()?;
        self.clear_irq()?;

        if irq & (IRQ_CRC_ERR | IRQ_HEADER_ERR | IRQ_TIMEOUT) != 0 {
            return Err(RadioError::Receive);
        }
        if irq & IRQ_RX_DONE == 0 {
            return Err(RadioError::Receive);
        }

        let mut status = [0u8; 3];
        self.command_read(&[OP_GET_RX_BUFFER_STATUS], &mut status)?;
        let len = status[1] as usize;
        let offset = status[2];

        let n = len.min(buf.len());
        if n > 0 {
            self.command_read(&[OP_READ_BUFFER, offset, 0x00], &mut buf[..n])?;
        }
        Ok(len)
    }
}

/// PLL step count for a carrier frequency: freq * 2^25 / 32 MHz
fn pll_steps(frequency_hz: u32) -> u32 {
    (((frequency_hz as u64) << 25) / 32_000_000) as u32
}

/// Bandwidth register code; only the LoRa bandwidths the link could
/// plausibly run on
fn bandwidth_code(bandwidth_hz: u32) -> Option<u8> {
    match bandwidth_hz {
        62_500 => Some(0x03),
        125_000 => Some(0x04),
        250_000 => Some(0x05),
        500_000 => Some(0x06),
        _ => None,
    }
}

/// Coding rate register code for 4/x
fn coding_rate_code(denominator: u8) -> Option<u8> {
    match denominator {
        5..=8 => Some(denominator - 4),
        _ => None,
    }
}

/// Sync word register pair; each nibble is padded with 0x4
fn sync_word_registers(sync_word: u8) -> [u8; 2] {
    [(sync_word & 0xF0) | 0x04, ((sync_word & 0x0F) << 4) | 0x04]
}

/// Low data rate optimize is required once symbols stretch past 16 ms
fn low_data_rate_optimize(spreading_factor: u8, bandwidth_hz: u32) -> u8 {
    let symbol_us = (1u64 << spreading_factor) * 1_000_000 / bandwidth_hz as u64;
    u8::from(symbol_us > 16_000)
}
