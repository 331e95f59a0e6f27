//! # Feature signatures
//!
//! A [`Signature`] is the canonical, comparable form of the feature labels detected in one
//! frame. Every label is stripped of its digits (instance indices such as the `12` of
//! `"HBA12"`), then all stripped labels are concatenated **in table order** with no
//! delimiter:
//!
//! ```text
//! ["HBA1", "HBD2", "AR3"]  →  "HBAHBDAR"
//! ```
//!
//! Two frames whose labels only differ by their instance indices therefore share the same
//! signature. No whitespace or case normalization is applied: after digit stripping the
//! labels must match byte for byte.
//!
//! ## Complexity proxy
//!
//! [`Signature::complexity`] is the **character length** of the signature. It is used as a
//! coarse stand-in for the number of features of a hypothesis when grouping, filtering and
//! exporting. Label names are not fixed-width, so `"HBAHBD"` (two features) and `"ARARAR"`
//! (three features) both have complexity 6; downstream selection relies on these literal
//! values.
//!
//! ## Example
//!
//! ```rust
//! use dynophore::signature::Signature;
//!
//! let sig = Signature::from_labels(["HB1", "HB2"]);
//! assert_eq!(sig, "HBHB");
//! assert_eq!(sig.complexity(), 4);
//! ```
use std::{borrow::Cow, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Remove every digit from a single feature label.
///
/// Borrowed when the label carries no digit.
pub fn strip_digits(label: &str) -> Cow<'_, str> {
    DIGITS.replace_all(label, "")
}

/// Canonical feature combination of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// Normalize an ordered sequence of raw labels into one signature.
    ///
    /// Arguments
    /// -----------------
    /// * `labels` – Raw labels in table order.
    ///
    /// Return
    /// ----------
    /// * The concatenation of the digit-stripped labels. An empty sequence gives an empty
    ///   signature.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signature = labels.into_iter().fold(String::new(), |mut acc, label| {
            acc.push_str(&strip_digits(label.as_ref()));
            acc
        });
        Signature(signature)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character length, used as the feature-count proxy.
    pub fn complexity(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Signature {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Signature {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
