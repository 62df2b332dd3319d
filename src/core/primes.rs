//! Trial-division prime counting.
//!
//! Deliberately naive: the cost is O(n·√n) so the endpoint burns CPU in the
//! same shape as the other benchmark implementations. Do not swap in a sieve.

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    // i <= n / i is i * i <= n without overflow near u64::MAX
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Number of primes in `[2, n]`.
pub fn count_primes(n: u64) -> u64 {
    (2..=n).filter(|&i| is_prime(i)).count() as u64
}
