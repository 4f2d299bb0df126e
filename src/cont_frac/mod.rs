//! Data structures and algorithms related to simple continued fractions
//!
//! [ContinuedFraction] holds a finite sequence of partial quotients. It is produced either
//! exactly from a [Fraction][crate::Fraction] or approximately from a float, and is evaluated
//! back through its convergents.
//!
//! # References:
//! - <https://pi.math.cornell.edu/~gautam/ContinuedFractions.pdf>
//! - <https://crypto.stanford.edu/pbc/notes/contfrac/>

mod block;
mod simple;

pub use simple::*;
