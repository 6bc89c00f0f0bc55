//! `gtools` is a small toolkit for mapping gamma-ray peaks to candidate
//! nuclides and predicting the gamma lines of whole decay chains
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use gtools_support as support;

#[cfg(feature = "nuclide")]
#[cfg_attr(docsrs, doc(cfg(feature = "nuclide")))]
#[doc(inline)]
pub use gtools_nuclide as nuclide;

#[cfg(feature = "iaea")]
#[cfg_attr(docsrs, doc(cfg(feature = "iaea")))]
#[doc(inline)]
pub use gtools_iaea as iaea;
