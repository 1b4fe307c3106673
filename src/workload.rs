//! A read-only catalog of synthetic block-address streams, for benchmarking
//! and property testing outside of trace-file-driven runs.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use zipf::ZipfDistribution;

use crate::error::{Error, Result};

/// Default Zipf skew, matching the exponent `haura-benchmarks`' YCSB
/// workload generator uses for its own key-popularity distribution.
pub const DEFAULT_ZIPF_EXPONENT: f64 = 0.99;

enum Inner {
    Uniform(Uniform<i64>),
    Zipf { dist: ZipfDistribution, base: i64 },
}

/// A source of block ids over `[base, base + n)`, drawn either uniformly or
/// from a Zipf distribution skewed toward the low end of the range.
pub struct BlockAddressStream {
    inner: Inner,
}

impl BlockAddressStream {
    pub fn uniform(base: i64, n: i64) -> Self {
        BlockAddressStream {
            inner: Inner::Uniform(Uniform::new(base, base + n)),
        }
    }

    pub fn zipf(base: i64, n: usize, exponent: f64) -> Result<Self> {
        let dist = ZipfDistribution::new(n, exponent)
            .map_err(|_| Error::Configuration("zipf distribution needs n >= 1".into()))?;
        Ok(BlockAddressStream {
            inner: Inner::Zipf { dist, base },
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        match &self.inner {
            Inner::Uniform(dist) => dist.sample(rng),
            // ZipfDistribution samples are 1-indexed.
            Inner::Zipf { dist, base } => base + (dist.sample(rng) - 1) as i64,
        }
    }
}
