//! ML-DSA-65 (NIST security category 3).

use crate::params::Params65;
use crate::types::define_variant;

define_variant!(MlDsa65, Params65);
