// Timer module - CTC timer configuration solver
//
// Given a CPU clock, a target interval and a counter width, evaluates every
// supported prescaler and reports compare-match settings, feasibility and
// quantization error. Pure computation; no I/O, no shared state.

use serde::{Deserialize, Serialize};

pub mod codegen;
pub mod constants;

#[cfg(test)]
mod tests;

pub use codegen::{ctc_snippet, INFEASIBLE_NOTE};
pub use constants::{clock_select_bits, Prescaler};

/// Hardware counter width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterWidth {
    /// 8-bit counter (Timer0 / Timer2), 256 counts per cycle
    Bits8,
    /// 16-bit counter (Timer1), 65536 counts per cycle
    Bits16,
}

impl CounterWidth {
    /// Construct from a bit count
    ///
    /// # Errors
    /// Returns `TimerError::UnsupportedWidth` for anything other than 8 or 16.
    pub fn from_bits(bits: u32) -> Result<Self, TimerError> {
        match bits {
            8 => Ok(CounterWidth::Bits8),
            16 => Ok(CounterWidth::Bits16),
            other => Err(TimerError::UnsupportedWidth(other)),
        }
    }

    /// The counter width in bits
    pub fn bits(self) -> u32 {
        match self {
            CounterWidth::Bits8 => 8,
            CounterWidth::Bits16 => 16,
        }
    }

    /// Counts per full counter cycle (2^bits)
    pub fn counter_range(self) -> u32 {
        1 << self.bits()
    }

    /// ATmega timer index used in register names
    pub fn timer_index(self) -> &'static str {
        match self {
            CounterWidth::Bits8 => "0",
            CounterWidth::Bits16 => "1",
        }
    }

    /// Waveform-generation bit selecting CTC mode
    pub fn ctc_mode_bit(self) -> &'static str {
        match self {
            CounterWidth::Bits8 => "WGM01",
            CounterWidth::Bits16 => "WGM12",
        }
    }
}

/// Errors for non-physical solver input
///
/// All variants are caller-input conditions, rejected when the request is
/// constructed and therefore before any prescaler is evaluated. A request
/// for which no prescaler fits is not an error; it yields five infeasible
/// results.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerError {
    /// CPU frequency must be a positive, finite number of Hz
    NonPositiveFrequency(f64),
    /// Target duration must be a non-negative, finite number of seconds
    NegativeDuration(f64),
    /// Counter width must be 8 or 16 bits
    UnsupportedWidth(u32),
}

impl std::fmt::Display for TimerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerError::NonPositiveFrequency(hz) => {
                write!(f, "Invalid request: CPU frequency {} Hz must be positive", hz)
            }
            TimerError::NegativeDuration(secs) => {
                write!(
                    f,
                    "Invalid request: target duration {} s must not be negative",
                    secs
                )
            }
            TimerError::UnsupportedWidth(bits) => {
                write!(
                    f,
                    "Invalid request: counter width {} bits is not supported (use 8 or 16)",
                    bits
                )
            }
        }
    }
}

impl std::error::Error for TimerError {}

/// A validated timer configuration request
///
/// Validation happens once here, so `solve` itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimerRequest {
    cpu_frequency_hz: f64,
    target_seconds: f64,
    width: CounterWidth,
}

/// Solver outcome for a single prescaler
///
/// Produced fresh per request; a plain record with no identity beyond the
/// caller's immediate use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrescalerResult {
    /// Clock division ratio
    pub prescaler: u32,

    /// Rounded total clock ticks for the whole requested duration
    pub total_ticks: u64,

    /// Full counter cycles the raw tick count spans
    pub overflow_count: u64,

    /// Rounded ticks left after whole overflows
    pub remainder_ticks: u64,

    /// Whether the duration fits one counter cycle with at least one tick
    pub feasible: bool,

    /// Compare register value; set only when feasible
    pub compare_value: Option<u32>,

    /// Actual duration produced by the rounded settings
    pub achieved_seconds: f64,

    /// Signed percentage deviation of achieved vs. requested duration
    pub error_percent: f64,

    /// Register-configuration snippet, or the infeasibility advisory
    pub code: String,
}

impl TimerRequest {
    /// Create a validated request
    ///
    /// # Errors
    /// `TimerError::NonPositiveFrequency` for a zero, negative or non-finite
    /// frequency; `TimerError::NegativeDuration` for a negative or non-finite
    /// duration.
    pub fn new(
        cpu_frequency_hz: f64,
        target_seconds: f64,
        width: CounterWidth,
    ) -> Result<Self, TimerError> {
        if !cpu_frequency_hz.is_finite() || cpu_frequency_hz <= 0.0 {
            return Err(TimerError::NonPositiveFrequency(cpu_frequency_hz));
        }
        if !target_seconds.is_finite() || target_seconds < 0.0 {
            return Err(TimerError::NegativeDuration(target_seconds));
        }

        Ok(TimerRequest {
            cpu_frequency_hz,
            target_seconds,
            width,
        })
    }

    /// Create a validated request from a raw bit count
    pub fn with_width_bits(
        cpu_frequency_hz: f64,
        target_seconds: f64,
        width_bits: u32,
    ) -> Result<Self, TimerError> {
        let width = CounterWidth::from_bits(width_bits)?;
        Self::new(cpu_frequency_hz, target_seconds, width)
    }

    pub fn cpu_frequency_hz(&self) -> f64 {
        self.cpu_frequency_hz
    }

    pub fn target_seconds(&self) -> f64 {
        self.target_seconds
    }

    pub fn width(&self) -> CounterWidth {
        self.width
    }

    /// Evaluate every supported prescaler for this request
    ///
    /// Always returns exactly five results, in the fixed prescaler order
    /// {1, 8, 64, 256, 1024}. A duration that would require the counter to
    /// wrap is reported infeasible rather than scheduled across cycles.
    pub fn solve(&self) -> Vec<PrescalerResult> {
        Prescaler::ALL
            .iter()
            .map(|&p| self.evaluate(p))
            .collect()
    }

    fn evaluate(&self, prescaler: Prescaler) -> PrescalerResult {
        let divisor = prescaler.divisor();
        let counter_range = f64::from(self.width.counter_range());

        // Ticks = Time * (F_CPU / Prescaler)
        let raw_ticks = self.target_seconds * (self.cpu_frequency_hz / f64::from(divisor));

        let overflow_count = (raw_ticks / counter_range).floor() as u64;
        let remainder_ticks = (raw_ticks % counter_range).round() as u64;
        let feasible = overflow_count == 0 && raw_ticks >= 1.0;

        let (compare_value, achieved_seconds) = if feasible {
            // CTC counts 0..compare inclusive, so compare + 1 ticks per match
            let compare = (raw_ticks.round() as i64 - 1).max(0) as u32;
            let achieved =
                f64::from(compare + 1) * f64::from(divisor) / self.cpu_frequency_hz;
            (Some(compare), achieved)
        } else {
            // Best-effort estimate ignoring the wrap
            let achieved = raw_ticks.round() * f64::from(divisor) / self.cpu_frequency_hz;
            (None, achieved)
        };

        let error_percent = if self.target_seconds == 0.0 {
            0.0
        } else {
            (achieved_seconds - self.target_seconds) / self.target_seconds * 100.0
        };

        let code = match compare_value {
            Some(compare) => ctc_snippet(self.width, prescaler, compare),
            None => INFEASIBLE_NOTE.to_string(),
        };

        PrescalerResult {
            prescaler: divisor,
            total_ticks: raw_ticks.round() as u64,
            overflow_count,
            remainder_ticks,
            feasible,
            compare_value,
            achieved_seconds,
            error_percent,
            code,
        }
    }
}
