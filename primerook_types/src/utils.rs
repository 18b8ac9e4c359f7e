/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Maximum number of possible moves that can be generated in any given position.
///
/// Used as the capacity for move lists, so generation never allocates.
pub const MAX_NUM_MOVES: usize = 218;

/// Returns `true` if `n` is a prime number.
///
/// Friendly rooks may only travel a prime number of squares, so on an 8x8
/// board the interesting values are 2, 3, 5, and 7. The test itself is general.
///
/// # Example
/// ```
/// # use primerook_types::is_prime;
/// assert!(is_prime(2));
/// assert!(is_prime(7));
/// assert!(!is_prime(1));
/// assert!(!is_prime(6));
/// ```
#[inline(always)]
pub const fn is_prime(n: u8) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u32;
    let mut i = 2u32;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_are_not_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn test_rook_distances() {
        // The four distances a friendly rook may travel
        for n in [2, 3, 5, 7] {
            assert!(is_prime(n));
        }
        // And the composites it may not
        for n in [4, 6, 8, 9] {
            assert!(!is_prime(n));
        }
    }
}
