//! Value renderers used in assertion failure messages.

use std::fmt::{Display, UpperHex};

pub fn decimal<T: Display + ?Sized>(value: &T) -> String {
    value.to_string()
}

pub fn hex<T: UpperHex + ?Sized>(value: &T) -> String {
    format!("0x{:X}", value)
}

/// Six fractional digits, like C's `%f`.
pub fn float(value: &f64) -> String {
    format!("{:.6}", value)
}

pub fn pointer(address: &usize) -> String {
    format!("0x{:X}", address)
}

pub fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_like_printf() {
        assert_eq!(decimal(&-4), "-4");
        assert_eq!(hex(&255u32), "0xFF");
        assert_eq!(float(&0.0004), "0.000400");
        assert_eq!(pointer(&0), "0x0");
        assert_eq!(quoted("Arclamp"), "\"Arclamp\"");
    }
}
