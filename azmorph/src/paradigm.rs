//! Inflection paradigms.
//!
//! A paradigm with `n` forms is stored as `3n` numbers in three blocks: the
//! suffix id of every form, then its tag id, then its prefix id.
use crate::constants::PARADIGM_PREFIXES;
use crate::thesaurus::ThesaurusError;

/// The forms of one inflection class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paradigm {
    data: Vec<u16>,
}

impl Paradigm {
    /// `None` unless the length is a multiple of three.
    pub fn new(data: Vec<u16>) -> Option<Paradigm> {
        if data.len() % 3 != 0 {
            return None;
        }
        Some(Paradigm { data })
    }

    /// Number of forms.
    #[inline(always)]
    pub fn form_count(&self) -> usize {
        self.data.len() / 3
    }

    /// Index of the form's suffix in the dictionary suffix table.
    #[inline(always)]
    pub fn suffix_id(&self, form: usize) -> Option<usize> {
        if form >= self.form_count() {
            return None;
        }
        self.data.get(form).map(|&x| x as usize)
    }

    /// Index of the form's tag in the dictionary tag table.
    #[inline(always)]
    pub fn tag_id(&self, form: usize) -> Option<usize> {
        if form >= self.form_count() {
            return None;
        }
        self.data.get(self.form_count() + form).map(|&x| x as usize)
    }

    /// Index of the form's paradigm prefix.
    #[inline(always)]
    pub fn prefix_id(&self, form: usize) -> Option<usize> {
        if form >= self.form_count() {
            return None;
        }
        self.data.get(2 * self.form_count() + form).map(|&x| x as usize)
    }

    /// Paradigm prefix string of a form; unknown prefix ids read as empty.
    pub fn prefix(&self, form: usize) -> &'static str {
        self.prefix_id(form)
            .and_then(|id| PARADIGM_PREFIXES.get(id))
            .copied()
            .unwrap_or("")
    }

    /// The raw three-block layout.
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }
}

fn malformed(reason: String) -> ThesaurusError {
    ThesaurusError::MalformedParadigms(reason)
}

/// Every paradigm of a dictionary, by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParadigmTable {
    paradigms: Vec<Paradigm>,
}

impl ParadigmTable {
    /// Wraps already decoded paradigms.
    pub fn new(paradigms: Vec<Paradigm>) -> ParadigmTable {
        ParadigmTable { paradigms }
    }

    /// Decodes the flat layout: the paradigm count, then for every paradigm
    /// its length followed by that many numbers.
    pub fn from_flat(data: &[u16]) -> Result<ParadigmTable, ThesaurusError> {
        let (&count, mut rest) = data
            .split_first()
            .ok_or_else(|| malformed("missing paradigm count".to_string()))?;

        let mut paradigms = Vec::with_capacity(count as usize);

        for i in 0..count {
            let (&len, tail) = rest
                .split_first()
                .ok_or_else(|| malformed(format!("paradigm {} is missing its length", i)))?;

            if tail.len() < len as usize {
                return Err(malformed(format!(
                    "paradigm {} needs {} numbers, {} left",
                    i,
                    len,
                    tail.len()
                )));
            }

            let (body, tail) = tail.split_at(len as usize);
            let paradigm = Paradigm::new(body.to_vec()).ok_or_else(|| {
                malformed(format!("paradigm {} has length {} not divisible by 3", i, len))
            })?;

            paradigms.push(paradigm);
            rest = tail;
        }

        if !rest.is_empty() {
            log::warn!("{} trailing numbers after paradigms", rest.len());
        }

        Ok(ParadigmTable { paradigms })
    }

    /// Inverse of [`ParadigmTable::from_flat`].
    pub fn to_flat(&self) -> Vec<u16> {
        let mut out = vec![self.paradigms.len() as u16];
        for p in &self.paradigms {
            out.push(p.data.len() as u16);
            out.extend_from_slice(&p.data);
        }
        out
    }

    /// The paradigm at `index`.
    pub fn get(&self, index: usize) -> Option<&Paradigm> {
        self.paradigms.get(index)
    }

    /// Number of paradigms.
    pub fn len(&self) -> usize {
        self.paradigms.len()
    }

    /// True for a table without paradigms.
    pub fn is_empty(&self) -> bool {
        self.paradigms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let p = Paradigm::new(vec![16, 16, 12, 22, 0, 2]).unwrap();
        assert_eq!(p.form_count(), 2);
        assert_eq!(p.suffix_id(1), Some(16));
        assert_eq!(p.tag_id(1), Some(22));
        assert_eq!(p.prefix_id(1), Some(2));
        assert_eq!(p.prefix(1), "наи");
        assert_eq!(p.prefix(0), "");
        assert_eq!(p.tag_id(2), None);
        assert!(Paradigm::new(vec![1, 2]).is_none());
    }

    #[test]
    fn flat_layout() {
        let flat = vec![2, 3, 0, 5, 0, 6, 1, 2, 3, 4, 5, 0];
        let table = ParadigmTable::from_flat(&flat).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().tag_id(0), Some(5));
        assert_eq!(table.get(1).unwrap().suffix_id(1), Some(2));
        assert_eq!(table.to_flat(), flat);
    }

    #[test]
    fn malformed_layout() {
        let broken: [&[u16]; 4] = [&[], &[1, 6, 0, 0], &[1, 4, 0, 0, 0, 0], &[2, 3, 0, 0, 0]];
        for flat in broken {
            assert!(matches!(
                ParadigmTable::from_flat(flat),
                Err(ThesaurusError::MalformedParadigms(_))
            ));
        }

        match ParadigmTable::from_flat(&[1, 4, 0, 0, 0, 0]) {
            Err(ThesaurusError::MalformedParadigms(reason)) => {
                assert_eq!(reason, "paradigm 0 has length 4 not divisible by 3")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
