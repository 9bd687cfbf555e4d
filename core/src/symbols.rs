//! DTMF symbol table: 16 symbols over a 4 x 4 grid of frequency pairs
//!
//! Frequency design (standard DTMF keypad):
//! - Low band (rows): 697, 770, 852, 941 Hz
//! - High band (columns): 1209, 1336, 1477, 1633 Hz
//! - Each symbol maps to exactly one (low, high) pair and all 16 pairs
//!   are distinct
//!
//! The table enumeration order is row-major over the keypad
//! (`1 2 3 A`, `4 5 6 B`, ...). Matching walks the table in this order
//! and the first symbol whose pair fits wins, so the order is part of
//! the decode contract.

/// Low frequency band (keypad rows)
pub const LOW_BAND: [f32; 4] = [697.0, 770.0, 852.0, 941.0];

/// High frequency band (keypad columns)
pub const HIGH_BAND: [f32; 4] = [1209.0, 1336.0, 1477.0, 1633.0];

/// All 16 symbols in table enumeration order
pub const SYMBOLS: [char; 16] = [
    '1', '2', '3', 'A', '4', '5', '6', 'B', '7', '8', '9', 'C', '*', '0', '#', 'D',
];

/// Frequency pair for the symbol at table index `index`
fn pair_at(index: usize) -> (f32, f32) {
    (LOW_BAND[index / 4], HIGH_BAND[index % 4])
}

/// Look up the (low, high) frequency pair for a symbol
///
/// Returns `None` for characters outside the DTMF alphabet.
pub fn frequency_pair(symbol: char) -> Option<(f32, f32)> {
    SYMBOLS
        .iter()
        .position(|&s| s == symbol)
        .map(pair_at)
}

/// True when `symbol` belongs to the DTMF alphabet
pub fn is_symbol(symbol: char) -> bool {
    SYMBOLS.contains(&symbol)
}

/// Match a set of detected peak frequencies against the symbol table
///
/// Walks the table in enumeration order and returns the first symbol
/// whose low and high frequencies both have a peak within
/// `tolerance_hz`. When several symbols fit the peak set (a frame with
/// peaks in more than one row or column), the earliest table entry is
/// returned.
pub fn match_peaks(peak_frequencies: &[f32], tolerance_hz: f32) -> Option<char> {
    for (index, &symbol) in SYMBOLS.iter().enumerate() {
        let (low, high) = pair_at(index);
        let low_hit = peak_frequencies.iter().any(|&f| (f - low).abs() <= tolerance_hz);
        let high_hit = peak_frequencies.iter().any(|&f| (f - high).abs() <= tolerance_hz);
        if low_hit && high_hit {
            return Some(symbol);
        }
    }
    None
}
