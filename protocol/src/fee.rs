//! Fee strategies.
//!
//! The network only cares that a transaction announces a `max_fee`; how
//! that number is chosen is up to the caller. A strategy maps the final
//! payload size to a fee.

/// Maps a payload size in bytes to the max fee to announce.
pub trait FeeCalculator: Send + Sync {
    fn calculate(&self, payload_size: usize) -> u64;
}

/// Always zero. Fine for private networks that do not charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFee;

impl FeeCalculator for ZeroFee {
    fn calculate(&self, _payload_size: usize) -> u64 {
        0
    }
}

/// `size * multiplier`, saturating.
#[derive(Debug, Clone, Copy)]
pub struct PerByteFee {
    multiplier: u64,
}

impl PerByteFee {
    pub fn new(multiplier: u64) -> Self {
        Self { multiplier }
    }
}

impl FeeCalculator for PerByteFee {
    fn calculate(&self, payload_size: usize) -> u64 {
        (payload_size as u64).saturating_mul(self.multiplier)
    }
}

impl<F> FeeCalculator for F
where
    F: Fn(usize) -> u64 + Send + Sync,
{
    fn calculate(&self, payload_size: usize) -> u64 {
        self(payload_size)
    }
}
