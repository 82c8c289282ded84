//! # Neuroscience-Inspired Retrieval
//!
//! ### Spreading Activation Theory
//!
//! Collins and Loftus proposed that memory is organized as a semantic network where:
//!
//! - Concepts are represented as **nodes**
//! - Related concepts are connected by **associative links**
//! - Activating one concept spreads activation to related concepts
//! - Stronger links spread more activation
//!
//! Recalling "AI" primes "Machine Learning", which in turn primes "Neural
//! Networks" more faintly. The engine models this as a multiplicative walk over
//! association strengths, bounded by depth.
//!
//! ## References
//!
//! - Collins, A. M., & Loftus, E. F. (1975). A spreading-activation theory of semantic
//!   processing. Psychological Review.
//! - Anderson, J. R. (1983). A spreading activation theory of memory. Journal of
//!   Verbal Learning and Verbal Behavior.

pub mod spreading_activation;

pub use spreading_activation::{spread, ActivatedMemory, ActivationTrace, INITIAL_ACTIVATION};
