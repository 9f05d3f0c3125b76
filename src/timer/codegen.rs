// Timer codegen - C register-configuration snippets for CTC mode

use super::constants::{clock_select_bits, Prescaler};
use super::CounterWidth;

/// Advisory comment returned for durations that do not fit one counter cycle
pub const INFEASIBLE_NOTE: &str = "// Configuration requires software counter or larger prescaler.\n// Hardware timer cannot handle this duration in a single cycle.";

/// Synthesize the CTC configuration snippet for a feasible result
///
/// Register names follow the ATmega328P convention: the 8-bit timer is
/// Timer0 (TCCR0A/TCCR0B/OCR0A/TIMSK0, CTC via WGM01), the 16-bit timer is
/// Timer1 (TCCR1A/TCCR1B/OCR1A/TIMSK1, CTC via WGM12).
pub fn ctc_snippet(width: CounterWidth, prescaler: Prescaler, compare_value: u32) -> String {
    let t = width.timer_index();
    let wgm = width.ctc_mode_bit();
    let cs = clock_select_bits(width, prescaler);
    let divisor = prescaler.divisor();

    format!(
        r#"/*
 * Timer {t} Configuration (CTC Mode)
 * Target: {ticks} ticks @ Prescaler {divisor}
 * CAUTION: Register names (TCCR{t}A, etc.) follow ATmega328P standard.
 * Check your specific MCU datasheet if registers differ (e.g. ATtiny).
 */

// 1. Reset Control Registers
TCCR{t}A = 0;
TCCR{t}B = 0;

// 2. Set CTC Mode (Clear Timer on Compare Match)
TCCR{t}B |= (1 << {wgm});

// 3. Set Prescaler to {divisor}
TCCR{t}B |= {cs};

// 4. Set Compare Match Value
OCR{t}A = {compare_value};

// 5. Enable Compare Match Interrupt
TIMSK{t} |= (1 << OCIE{t}A);

// --- Interrupt Service Routine ---
ISR(TIMER{t}_COMPA_vect) {{
    // Periodic code goes here
}}"#,
        ticks = compare_value as u64 + 1,
    )
}
