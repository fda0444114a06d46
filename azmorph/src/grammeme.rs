//! Grammeme vocabulary and its parent hierarchy.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Grammemes every table carries, with their external names.
const BUILTIN: [(&str, &str, &str); 5] = [
    ("NUMB", "ЧИСЛО", "число"),
    ("ROMN", "РИМ", "римское число"),
    ("LATN", "ЛАТ", "латиница"),
    ("PNCT", "ЗПР", "пунктуация"),
    ("UNKN", "НЕИЗВ", "неизвестное"),
];

/// On-disk form of a grammeme: `[internal, parent, external, externalFull]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GrammemeRecord(SmolStr, Option<SmolStr>, SmolStr, SmolStr);

/// A single grammeme with its Latin (internal) and Cyrillic (external) names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GrammemeRecord", into = "GrammemeRecord")]
pub struct Grammeme {
    /// Latin name, e.g. `NOUN`.
    pub internal: SmolStr,
    /// Internal name of the parent category, `None` for a root.
    pub parent: Option<SmolStr>,
    /// Cyrillic short name, e.g. `СУЩ`.
    pub external: SmolStr,
    /// Human-readable description.
    pub external_full: SmolStr,
}

impl From<GrammemeRecord> for Grammeme {
    fn from(record: GrammemeRecord) -> Self {
        Grammeme {
            internal: record.0,
            parent: record.1.filter(|p| !p.is_empty()),
            external: record.2,
            external_full: record.3,
        }
    }
}

impl From<Grammeme> for GrammemeRecord {
    fn from(g: Grammeme) -> Self {
        GrammemeRecord(g.internal, g.parent, g.external, g.external_full)
    }
}

impl Grammeme {
    /// Creates a grammeme from its four names.
    pub fn new(internal: &str, parent: Option<&str>, external: &str, external_full: &str) -> Self {
        Grammeme {
            internal: internal.into(),
            parent: parent.map(SmolStr::from),
            external: external.into(),
            external_full: external_full.into(),
        }
    }
}

/// Grammemes indexed by both their internal and external names.
#[derive(Debug, Clone, Default)]
pub struct GrammemeTable {
    records: Vec<Grammeme>,
    index: HashMap<SmolStr, usize>,
}

impl GrammemeTable {
    /// Indexes the given grammemes, adding the built-in ones the list lacks.
    pub fn new(records: Vec<Grammeme>) -> GrammemeTable {
        let mut table = GrammemeTable {
            records: Vec::with_capacity(records.len() + BUILTIN.len()),
            index: HashMap::new(),
        };

        for record in records {
            table.push(record);
        }

        for (internal, external, full) in BUILTIN.iter() {
            if !table.index.contains_key(*internal) {
                table.push(Grammeme::new(internal, Some("POST"), external, full));
            }
        }

        table
    }

    fn push(&mut self, grammeme: Grammeme) {
        let i = self.records.len();

        // Internal names win over external ones when they collide.
        self.index.insert(grammeme.internal.clone(), i);
        self.index.entry(grammeme.external.clone()).or_insert(i);

        self.records.push(grammeme);
    }

    /// Looks a grammeme up by internal or external name.
    pub fn get(&self, name: &str) -> Option<&Grammeme> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// True when `name` is a known grammeme.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Internal name of the parent of `name`.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|g| g.parent.as_deref())
    }

    /// Walks upward from `name`, yielding `(ancestor, child)` pairs: each
    /// ancestor together with the grammeme directly below it on the chain.
    pub fn ancestors<'a>(&'a self, name: &'a str) -> Ancestors<'a> {
        Ancestors {
            table: self,
            current: name,
            remaining: self.records.len(),
        }
    }

    /// Number of grammemes, the built-in ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True for a table without grammemes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All grammemes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Grammeme> {
        self.records.iter()
    }
}

/// Iterator returned by [`GrammemeTable::ancestors`].
pub struct Ancestors<'a> {
    table: &'a GrammemeTable,
    current: &'a str,
    // Bounds the walk on a malformed, cyclic table.
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let child = self.current;
        let parent = self.table.parent_of(child)?;
        self.current = parent;
        Some((parent, child))
    }
}
