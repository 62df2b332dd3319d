pub mod payload;
pub mod primes;
pub mod timing;

pub use payload::build_payload;
pub use primes::{count_primes, is_prime};
pub use timing::{round_ms, timed};
