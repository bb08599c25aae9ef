//! Security parameters shared by the proofs.

use static_assertions::const_assert;

/// The number of parallel repetitions in $\Pi^{prm}$ and $\Pi^{mod}$
/// (also the number of challenge bits in $\Pi^{prm}$).
pub const PARAM_M: usize = 80;

/// $\ell$: the bit length of a curve scalar.
pub const PARAM_L: u32 = 256;

/// $\varepsilon$: the slack in the sampling ranges of $\Pi^{fac}$ (two curve scalars).
pub const PARAM_E: u32 = 512;

/// The bit length of the symmetric challenge in $\Pi^{fac}$, $e \in \pm (2^{256} - 1)$.
pub(crate) const FACTOR_CHALLENGE_BITS: u32 = 256;

/// Bit length of a SHA-512/256 digest.
pub(crate) const DIGEST_BITS: usize = 256;

const_assert!(PARAM_E == 2 * PARAM_L);
const_assert!(PARAM_M <= DIGEST_BITS);
const_assert!(FACTOR_CHALLENGE_BITS == PARAM_L);
