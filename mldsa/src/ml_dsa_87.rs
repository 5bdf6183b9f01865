//! ML-DSA-87 (NIST security category 5).

use crate::params::Params87;
use crate::types::define_variant;

define_variant!(MlDsa87, Params87);
