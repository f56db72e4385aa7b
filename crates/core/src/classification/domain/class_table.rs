use std::collections::HashMap;
use std::sync::OnceLock;

/// Immutable mapping from detector class id to its short string code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassTable {
    codes: HashMap<i64, String>,
}

/// The detector's output classes. Id 0 is background and carries no defect
/// category.
const STANDARD_ENTRIES: [(i64, &str); 24] = [
    (0, "bg"),
    (1, "seam"),
    (2, "hang"),
    (3, "cut"),
    (4, "reed"),
    (5, "span"),
    (6, "dbl_y"),
    (7, "dbl_x"),
    (8, "weave"),
    (9, "fluff"),
    (10, "strip"),
    (11, "fold"),
    (12, "crease"),
    (13, "leak"),
    (14, "spot"),
    (15, "dirt"),
    (16, "knot"),
    (17, "slub"),
    (18, "thick_y"),
    (19, "thick_x"),
    (20, "diff_y"),
    (21, "diff_x"),
    (22, "short"),
    (23, "sparse"),
];

impl ClassTable {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            codes: entries
                .into_iter()
                .map(|(id, code)| (id, code.into()))
                .collect(),
        }
    }

    /// Process-wide standard table, built on first use.
    pub fn standard() -> &'static ClassTable {
        static TABLE: OnceLock<ClassTable> = OnceLock::new();
        TABLE.get_or_init(|| ClassTable::from_entries(STANDARD_ENTRIES))
    }

    pub fn code(&self, class_id: i64) -> Option<&str> {
        self.codes.get(&class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
