//! Binary signature detection
//!
//! Identifies a file's true format from its leading bytes, never from the
//! filename. The declared extension of the locator is handled elsewhere and
//! does not influence detection.

pub mod signature;

pub use signature::SignatureScanner;
