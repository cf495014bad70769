use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::{is_closing_symbol, is_opening_symbol, matching_opening_symbol};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureParseError {
    #[error("closing symbol '{symbol}' at position {position} has no opening symbol before it")]
    UnseenClosing { symbol: char, position: usize },
    #[error("closing symbol '{symbol}' at position {position} has no unpaired opening symbol")]
    UnmatchedClosing { symbol: char, position: usize },
    #[error("opening symbol '{symbol}' at position {opened_at} is never closed")]
    UnmatchedOpening {
        symbol: char,
        opened_at: usize,
        position: usize,
    },
}

impl StructureParseError {
    /// The position in the notation where parsing failed. For an unclosed
    /// pair this is the length of the notation.
    pub fn position(&self) -> usize {
        match self {
            StructureParseError::UnseenClosing { position, .. }
            | StructureParseError::UnmatchedClosing { position, .. }
            | StructureParseError::UnmatchedOpening { position, .. } => *position,
        }
    }
}

/// A pair of structure positions (0-based), where `five_prime < three_prime`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasePair {
    pub five_prime: usize,
    pub three_prime: usize,
}

impl BasePair {
    pub fn new(five_prime: usize, three_prime: usize) -> Self {
        Self {
            five_prime,
            three_prime,
        }
    }
}

impl Display for BasePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.five_prime, self.three_prime)
    }
}

/// A base pair tagged with the number of the helix it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Helix {
    pub pair: BasePair,
    pub number: usize,
}

/// Collects the base pairs of a structure notation string.
///
/// Every opening symbol gets its own stack of positions; a closing symbol
/// pops the stack of its partner. Pairs come out in the order their closing
/// symbol is read, so nested pairs precede the pairs that enclose them.
pub fn parse_base_pairs(notation: &str) -> Result<Vec<BasePair>, StructureParseError> {
    let mut stacks: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    let mut pairs: Vec<BasePair> = vec![];
    let mut length = 0usize;

    for (position, symbol) in notation.chars().enumerate() {
        length = position + 1;

        if is_opening_symbol(symbol) {
            stacks.entry(symbol).or_default().push(position);
        } else if is_closing_symbol(symbol) {
            let opening = matching_opening_symbol(symbol);

            let stack = match stacks.get_mut(&opening) {
                Some(stack) => stack,
                None => return Err(StructureParseError::UnseenClosing { symbol, position }),
            };

            match stack.pop() {
                Some(five_prime) => pairs.push(BasePair::new(five_prime, position)),
                None => return Err(StructureParseError::UnmatchedClosing { symbol, position }),
            }
        }
    }

    // the map is ordered, so the reported symbol is deterministic
    for (symbol, stack) in stacks.iter() {
        if let Some(opened_at) = stack.last() {
            return Err(StructureParseError::UnmatchedOpening {
                symbol: *symbol,
                opened_at: *opened_at,
                position: length,
            });
        }
    }

    log::trace!("parsed {} base pairs from {length} positions", pairs.len());
    Ok(pairs)
}

/// Groups the base pairs of a structure notation string into numbered helices.
///
/// Pairs are visited in closing order. A new helix starts when a pair opens
/// to the right of the previously visited pair's closing position, or when a
/// pair encloses a pair that was opened after it (and before the previous
/// opener) which isn't already part of the current helix.
pub fn helix_map(notation: &str) -> Result<Vec<Helix>, StructureParseError> {
    let pairs = parse_base_pairs(notation)?;

    let mut helix = 0usize;
    let mut last_open = 0usize;
    let mut last_close = usize::MAX;

    // the helix number assigned to each paired position
    let mut helices: HashMap<usize, usize> = HashMap::new();
    let mut result: Vec<Helix> = Vec::with_capacity(pairs.len());

    for pair in pairs.iter() {
        let open = pair.five_prime;
        let close = pair.three_prime;

        // side by side stems: <<..>>..<<..>>
        if open > last_close {
            helix += 1;
        }

        // a stem closing around branches: <<..<<..>>..<<..>>>>
        for other in pairs.iter().rev() {
            let other_open = other.five_prime;
            if other_open < last_open && other_open > open {
                if helices.get(&other_open) == Some(&helix) {
                    continue;
                }
                helix += 1;
                break;
            }
        }

        helices.insert(open, helix);
        helices.insert(close, helix);

        result.push(Helix {
            pair: *pair,
            number: helix,
        });

        last_open = open;
        last_close = close;
    }

    Ok(result)
}
