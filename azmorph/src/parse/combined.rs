use super::{InflectTarget, Parse, ParseKind};
use crate::constants::{AGREEMENT_GRAMMEMES, COMBINED_PENALTY};
use crate::tag::TagQuery;

/// Two parses joined by a hyphen; the right part carries the grammar.
#[derive(Debug, Clone)]
pub struct CombinedParse {
    left: Parse,
    right: Parse,
}

impl CombinedParse {
    pub(crate) fn create(left: Parse, right: Parse) -> Parse {
        Parse {
            word: format!("{}-{}", left.word, right.word).into(),
            tag: right.tag.clone(),
            score: left.score * right.score * COMBINED_PENALTY,
            stutter: left.stutter + right.stutter,
            typos: left.typos + right.typos,
            parser: None,
            kind: ParseKind::Combined(Box::new(CombinedParse { left, right })),
        }
    }

    /// The part before the hyphen.
    pub fn left(&self) -> &Parse {
        &self.left
    }

    /// The part after the hyphen.
    pub fn right(&self) -> &Parse {
        &self.right
    }

    /// Inflects the right part, then moves the left part to the form that
    /// agrees with it.
    pub(super) fn inflect(&self, parse: &Parse, target: InflectTarget<'_>) -> Option<Parse> {
        let right = self.right.inflect(target)?;

        let left = match target {
            InflectTarget::Form(_) => self.left.inflect(InflectTarget::Matching(TagQuery::Agree(
                &right.tag,
                &AGREEMENT_GRAMMEMES,
            )))?,
            InflectTarget::Matching(_) => self.left.inflect(target)?,
        };

        let mut combined = CombinedParse::create(left, right);
        combined.parser = parse.parser.clone();
        Some(combined)
    }
}
