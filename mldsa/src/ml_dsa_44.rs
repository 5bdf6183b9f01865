//! ML-DSA-44 (NIST security category 2).

use crate::params::Params44;
use crate::types::define_variant;

define_variant!(MlDsa44, Params44);
