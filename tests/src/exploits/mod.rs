//! # Attack Simulations
//!
//! Adversarial checkpoint feeds. Every simulation asserts that the attack is
//! named correctly and that the known-good state never moves.

pub mod checkpoint_attacks;
