//! Uniform, unbiased sampling from finite collections.
//!
//! Every random decision made while building a secret goes through [`SecureSampler`], which only
//! accepts generators marked [`CryptoRng`].

use std::collections::BTreeSet;

use rand::rngs::ThreadRng;
use rand::{CryptoRng, Rng};

use crate::GenerationError;

pub struct SecureSampler<R> {
    rng: R,
}

impl SecureSampler<ThreadRng> {
    /// A sampler over the thread-local CSPRNG, reseeded from the OS.
    pub fn from_thread_rng() -> SecureSampler<ThreadRng> {
        SecureSampler::new(rand::thread_rng())
    }
}

impl<R> SecureSampler<R>
where
    R: Rng + CryptoRng,
{
    pub fn new(rng: R) -> SecureSampler<R> {
        SecureSampler { rng }
    }

    /// Draw an index in `[0, len)` with exactly uniform probability.
    ///
    /// `rand`'s range sampler rejects raw outputs that fall in the zone that would bias a modulo
    /// reduction, and draws again.
    pub fn uniform_index(&mut self, len: usize) -> Result<usize, GenerationError> {
        if len == 0 {
            return Err(GenerationError::EmptyDomain);
        }
        Ok(self.rng.gen_range(0..len))
    }

    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GenerationError> {
        let idx = self.uniform_index(items.len())?;
        Ok(&items[idx])
    }

    /// Pick `k` distinct indices from `[0, len)`, every `k`-subset being equally likely. The
    /// indices are returned in ascending order.
    ///
    /// This is Floyd's algorithm: exactly `k` draws, no redraw-on-collision loop.
    pub fn distinct_indices(
        &mut self,
        len: usize,
        k: usize,
    ) -> Result<Vec<usize>, GenerationError> {
        if k > len {
            return Err(GenerationError::InsufficientPositions {
                requested: k,
                available: len,
            });
        }
        let mut chosen = BTreeSet::new();
        for j in (len - k)..len {
            let t = self.uniform_index(j + 1)?;
            // `j` can't have been picked yet: every earlier draw was below it.
            if !chosen.insert(t) {
                chosen.insert(j);
            }
        }
        log::trace!("picked {} distinct positions out of {}", k, len);
        Ok(chosen.into_iter().collect())
    }
}
