// Timer constants - prescaler set and clock-select bit patterns

use super::CounterWidth;

/// Supported prescaler divisors
///
/// Results are always reported in this declaration order; the set is fixed
/// regardless of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// All supported prescalers, in reporting order
    pub const ALL: [Prescaler; 5] = [
        Prescaler::Div1,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    /// The clock division ratio
    pub fn divisor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// Clock-select bit expression for a prescaler, per counter width
///
/// Standard ATmega mapping for Timer0/Timer1: the 16-bit timer uses CS1x
/// names, the 8-bit timer CS0x names.
pub fn clock_select_bits(width: CounterWidth, prescaler: Prescaler) -> &'static str {
    match (width, prescaler) {
        (CounterWidth::Bits16, Prescaler::Div1) => "(1 << CS10)",
        (CounterWidth::Bits16, Prescaler::Div8) => "(1 << CS11)",
        (CounterWidth::Bits16, Prescaler::Div64) => "(1 << CS11) | (1 << CS10)",
        (CounterWidth::Bits16, Prescaler::Div256) => "(1 << CS12)",
        (CounterWidth::Bits16, Prescaler::Div1024) => "(1 << CS12) | (1 << CS10)",
        (CounterWidth::Bits8, Prescaler::Div1) => "(1 << CS00)",
        (CounterWidth::Bits8, Prescaler::Div8) => "(1 << CS01)",
        (CounterWidth::Bits8, Prescaler::Div64) => "(1 << CS01) | (1 << CS00)",
        (CounterWidth::Bits8, Prescaler::Div256) => "(1 << CS02)",
        (CounterWidth::Bits8, Prescaler::Div1024) => "(1 << CS02) | (1 << CS00)",
    }
}
