use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plates 1-10 carry a single outcome each.
pub const SINGLE_PLATES: usize = 10;
/// Plates 11-24 carry a (normal, defect) outcome pair each.
pub const PAIRED_PLATES: usize = 14;
pub const RESPONSE_LEN: usize = SINGLE_PLATES + 2 * PAIRED_PLATES;

/// Plates 5-10, scored for red-green errors.
pub const RED_GREEN_RANGE: std::ops::Range<usize> = 4..SINGLE_PLATES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn symbol(self) -> &'static str {
        match self {
            Outcome::Pass => "✓",
            Outcome::Fail => "✗",
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '✓' | 'p' | 'P' | '1' | '+' => Some(Outcome::Pass),
            '✗' | 'f' | 'F' | 'x' | 'X' | '0' | '-' => Some(Outcome::Fail),
            _ => None,
        }
    }

    pub fn is_fail(self) -> bool {
        self == Outcome::Fail
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("expected {} plate responses, got {0}", RESPONSE_LEN)]
    WrongLength(usize),
    #[error("unrecognised response symbol '{symbol}' at position {position}")]
    UnknownSymbol { position: usize, symbol: char },
}

/// The 38 outcomes of one HRR sitting, with paired plates interleaved as
/// (normal, defect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVector {
    outcomes: [Outcome; RESPONSE_LEN],
}

impl ResponseVector {
    pub fn all_pass() -> Self {
        Self {
            outcomes: [Outcome::Pass; RESPONSE_LEN],
        }
    }

    pub fn try_from_outcomes(outcomes: &[Outcome]) -> Result<Self, ResponseError> {
        let outcomes: [Outcome; RESPONSE_LEN] = outcomes
            .try_into()
            .map_err(|_| ResponseError::WrongLength(outcomes.len()))?;
        Ok(Self { outcomes })
    }

    /// Parses one symbol per outcome; whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ResponseError> {
        let mut outcomes = Vec::with_capacity(RESPONSE_LEN);
        for (position, symbol) in input.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let outcome = Outcome::from_symbol(symbol)
                .ok_or(ResponseError::UnknownSymbol { position, symbol })?;
            outcomes.push(outcome);
        }
        Self::try_from_outcomes(&outcomes)
    }

    /// Rebuilds the interleaved vector from the stored column groups.
    pub fn from_groups(
        single: &[Outcome],
        normal: &[Outcome],
        defect: &[Outcome],
    ) -> Result<Self, ResponseError> {
        if single.len() != SINGLE_PLATES
            || normal.len() != PAIRED_PLATES
            || defect.len() != PAIRED_PLATES
        {
            return Err(ResponseError::WrongLength(
                single.len() + normal.len() + defect.len(),
            ));
        }
        let mut outcomes = Vec::with_capacity(RESPONSE_LEN);
        outcomes.extend_from_slice(single);
        for (n, d) in normal.iter().zip(defect) {
            outcomes.push(*n);
            outcomes.push(*d);
        }
        Self::try_from_outcomes(&outcomes)
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, index: usize, outcome: Outcome) {
        self.outcomes[index] = outcome;
    }

    pub fn single(&self) -> &[Outcome] {
        &self.outcomes[..SINGLE_PLATES]
    }

    pub fn red_green(&self) -> &[Outcome] {
        &self.outcomes[RED_GREEN_RANGE]
    }

    /// (normal, defect) per paired plate, plates 11-24 in order.
    pub fn pairs(&self) -> impl Iterator<Item = (Outcome, Outcome)> + '_ {
        self.outcomes[SINGLE_PLATES..]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
    }

    pub fn normal(&self) -> Vec<Outcome> {
        self.pairs().map(|(n, _)| n).collect()
    }

    pub fn defect(&self) -> Vec<Outcome> {
        self.pairs().map(|(_, d)| d).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/response.rs"]
mod tests;
