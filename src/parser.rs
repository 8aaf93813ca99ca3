//! Optimal parsing: the minimal-price split of a buffer into literals and matches.
//!
//! The parse is a single-source shortest path over positions `0..=N`. Every
//! position has a literal edge of length 1 and one edge per candidate match
//! reported by the [`MatchFinder`]. Edge weights come from the
//! [`PriceCalculator`].

use crate::error::{CompressionError, Result};
use crate::matches::Match;

/// Supplies candidate back-references at a position.
pub trait MatchFinder {
    /// Positions closer than this to the end of the buffer are never queried.
    fn min_match_size(&self) -> usize;

    /// Returns every match starting at `position`.
    ///
    /// Each returned match must have `position` set to the queried position,
    /// a length of at least [`MatchFinder::min_match_size`], and fit the
    /// container's length and displacement ranges.
    fn find_all_matches(&mut self, buffer: &[u8], position: usize) -> Vec<Match>;
}

/// Prices literals and matches on a shared scale. Lower is better.
pub trait PriceCalculator {
    fn literal_price(&self, value: u8) -> u32;

    fn match_price(&self, candidate: &Match) -> u32;
}

/// One cell of the dynamic programming table.
///
/// Records the cheapest known way to reach an offset: the total price and the
/// edge that got there (`length == 1` for a literal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PriceHistoryEntry {
    price: Option<u64>,
    displacement: usize,
    length: usize,
}

impl PriceHistoryEntry {
    /// Replaces the entry only if `price` is strictly cheaper.
    ///
    /// Ties keep the transition that was discovered first.
    #[inline]
    fn relax(&mut self, price: u64, displacement: usize, length: usize) {
        if self.price.is_none_or(|current| price < current) {
            *self = Self {
                price: Some(price),
                displacement,
                length,
            };
        }
    }
}

/// Finds the cheapest sequence of matches for a buffer.
///
/// The parser owns its finder and calculator for exactly one [`OptimalParser::parse`]
/// call; both are dropped when the call returns.
pub struct OptimalParser<F, C> {
    finder: F,
    calculator: C,
}

impl<F: MatchFinder, C: PriceCalculator> OptimalParser<F, C> {
    pub const fn new(finder: F, calculator: C) -> Self {
        Self { finder, calculator }
    }

    /// Parses `buffer[start_position..]` and returns the chosen matches in
    /// ascending, non-overlapping order. Bytes not covered by a match are literals.
    ///
    /// Matches may reference bytes before `start_position`.
    ///
    /// # Errors
    /// * [`CompressionError::StartOutOfBounds`] if `start_position > buffer.len()`.
    /// * [`CompressionError::InvalidMatchCandidate`] if the finder reports a match that
    ///   is too short, out of range, or runs past the end of the buffer.
    pub fn parse(mut self, buffer: &[u8], start_position: usize) -> Result<Vec<Match>> {
        if start_position > buffer.len() {
            return Err(CompressionError::StartOutOfBounds {
                start: start_position,
                len: buffer.len(),
            });
        }

        let mut history = vec![PriceHistoryEntry::default(); buffer.len() - start_position + 1];
        history[0].price = Some(0);

        self.forward_pass(buffer, start_position, &mut history)?;
        Ok(backward_pass(start_position, &history))
    }

    /// Relaxes every literal and match edge in position order.
    fn forward_pass(
        &mut self,
        buffer: &[u8],
        start_position: usize,
        history: &mut [PriceHistoryEntry],
    ) -> Result<()> {
        let remaining = buffer.len() - start_position;
        let min_match_size = self.finder.min_match_size();

        for i in 0..remaining {
            // Every offset below `remaining` is reachable through literals alone.
            let Some(base) = history[i].price else {
                continue;
            };
            let position = start_position + i;

            let literal_cost = base + u64::from(self.calculator.literal_price(buffer[position]));
            history[i + 1].relax(literal_cost, 0, 1);

            if position + min_match_size > buffer.len() {
                continue;
            }

            for candidate in self.finder.find_all_matches(buffer, position) {
                if candidate.position != position
                    || candidate.length < min_match_size
                    || !candidate.is_representable()
                    || !candidate.fits_within(buffer.len())
                {
                    return Err(CompressionError::InvalidMatchCandidate {
                        position,
                        displacement: candidate.displacement,
                        length: candidate.length,
                    });
                }

                let match_cost = base + u64::from(self.calculator.match_price(&candidate));
                history[i + candidate.length].relax(
                    match_cost,
                    candidate.displacement,
                    candidate.length,
                );
            }
        }

        Ok(())
    }
}

/// Walks the table from the end, collecting the match edges on the cheapest path.
fn backward_pass(start_position: usize, history: &[PriceHistoryEntry]) -> Vec<Match> {
    let mut results = Vec::new();

    let mut i = history.len() - 1;
    while i > 0 {
        let entry = &history[i];
        if entry.length > 1 {
            results.push(Match::new(
                start_position + i - entry.length,
                entry.displacement,
                entry.length,
            ));
            i -= entry.length;
        } else {
            i -= 1;
        }
    }

    results.reverse();
    results
}
