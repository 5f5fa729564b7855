//! Known USB-serial bridge identifiers
//!
//! The sensor hub is an ESP32 devkit; the host never talks USB to the ESP32
//! itself but to the USB-serial bridge chip on the board. Two bridge chips
//! cover the common devkits, so device discovery matches serial ports against
//! their vendor/product identifier pairs.

/// USB-serial bridge chips found on supported sensor hubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbBridge {
    /// Silicon Labs CP210x family (most ESP32 DevKitC boards)
    Cp210x,
    /// WCH CH340 family (most low-cost clone boards)
    Ch340,
}

impl UsbBridge {
    /// All bridges the locator will accept, in match-priority order.
    pub const KNOWN: [UsbBridge; 2] = [UsbBridge::Cp210x, UsbBridge::Ch340];

    /// USB Vendor ID of the bridge chip
    pub fn vid(&self) -> u16 {
        match self {
            UsbBridge::Cp210x => 0x10C4,
            UsbBridge::Ch340 => 0x1A86,
        }
    }

    /// USB Product ID of the bridge chip
    pub fn pid(&self) -> u16 {
        match self {
            UsbBridge::Cp210x => 0xEA60,
            UsbBridge::Ch340 => 0x7523,
        }
    }

    /// Human-readable chip name
    pub fn name(&self) -> &'static str {
        match self {
            UsbBridge::Cp210x => "Silicon Labs CP210x",
            UsbBridge::Ch340 => "WCH CH340",
        }
    }

    /// Match a (vid, pid) pair against the known bridges.
    pub fn matches(vid: u16, pid: u16) -> Option<UsbBridge> {
        Self::KNOWN
            .iter()
            .copied()
            .find(|b| b.vid() == vid && b.pid() == pid)
    }
}

/// Serial baud rate the hub firmware uses
pub const BAUD_RATE: u32 = 115_200;

/// Default serial read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp210x_identifiers() {
        assert_eq!(UsbBridge::Cp210x.vid(), 0x10C4);
        assert_eq!(UsbBridge::Cp210x.pid(), 0xEA60);
    }

    #[test]
    fn test_ch340_identifiers() {
        assert_eq!(UsbBridge::Ch340.vid(), 0x1A86);
        assert_eq!(UsbBridge::Ch340.pid(), 0x7523);
    }

    #[test]
    fn test_matches_known_pairs() {
        assert_eq!(UsbBridge::matches(0x10C4, 0xEA60), Some(UsbBridge::Cp210x));
        assert_eq!(UsbBridge::matches(0x1A86, 0x7523), Some(UsbBridge::Ch340));
    }

    #[test]
    fn test_matches_rejects_unknown_pairs() {
        assert_eq!(UsbBridge::matches(0x0001, 0x0001), None);
        // Pair must match within one bridge, not across bridges
        assert_eq!(UsbBridge::matches(0x10C4, 0x7523), None);
    }

    #[test]
    fn test_baud_rate() {
        assert_eq!(BAUD_RATE, 115_200);
    }
}
