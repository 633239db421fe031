use nix::sys::termios::BaudRate;

/// Standard rates accepted by [`resolve_baud_rate`], in ascending order,
/// paired with the termios speed token each one maps to.
const BAUD_TABLE: [(i32, BaudRate); 31] = [
    (0, BaudRate::B0),
    (50, BaudRate::B50),
    (75, BaudRate::B75),
    (110, BaudRate::B110),
    (134, BaudRate::B134),
    (150, BaudRate::B150),
    (200, BaudRate::B200),
    (300, BaudRate::B300),
    (600, BaudRate::B600),
    (1200, BaudRate::B1200),
    (1800, BaudRate::B1800),
    (2400, BaudRate::B2400),
    (4800, BaudRate::B4800),
    (9600, BaudRate::B9600),
    (19200, BaudRate::B19200),
    (38400, BaudRate::B38400),
    (57600, BaudRate::B57600),
    (115200, BaudRate::B115200),
    (230400, BaudRate::B230400),
    (460800, BaudRate::B460800),
    (500000, BaudRate::B500000),
    (576000, BaudRate::B576000),
    (921600, BaudRate::B921600),
    (1000000, BaudRate::B1000000),
    (1152000, BaudRate::B1152000),
    (1500000, BaudRate::B1500000),
    (2000000, BaudRate::B2000000),
    (2500000, BaudRate::B2500000),
    (3000000, BaudRate::B3000000),
    (3500000, BaudRate::B3500000),
    (4000000, BaudRate::B4000000),
];

/// Every baud rate a port can be opened at
pub const SUPPORTED_BAUD_RATES: [i32; 31] = {
    let mut rates = [0; 31];
    let mut i = 0;
    while i < BAUD_TABLE.len() {
        rates[i] = BAUD_TABLE[i].0;
        i += 1;
    }
    rates
};

/// Map an integer baud rate to its termios speed token.
///
/// Exact match only: `None` is returned for anything outside
/// [`SUPPORTED_BAUD_RATES`], there is no rounding to a nearby rate.
pub fn resolve_baud_rate(baud: i32) -> Option<BaudRate> {
    BAUD_TABLE
        .iter()
        .find(|(rate, _)| *rate == baud)
        .map(|(_, speed)| *speed)
}

/// Reverse lookup used when reporting the speed a descriptor is running at
pub fn baud_rate_value(speed: BaudRate) -> Option<u32> {
    BAUD_TABLE
        .iter()
        .find(|(_, token)| *token == speed)
        .map(|(rate, _)| *rate as u32)
}
