use crate::classification::domain::class_table::ClassTable;
use crate::classification::domain::defect_category::DefectCategory;

/// Total classification: class id → table code → category.
///
/// Ids missing from the table and codes with no known category fall back
/// to `DefectCategory::Default`.
#[derive(Clone, Copy, Debug)]
pub struct DefectClassifier<'t> {
    table: &'t ClassTable,
}

impl<'t> DefectClassifier<'t> {
    pub fn new(table: &'t ClassTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, class_id: i64) -> DefectCategory {
        self.table
            .code(class_id)
            .and_then(DefectCategory::from_code)
            .unwrap_or(DefectCategory::Default)
    }
}

impl Default for DefectClassifier<'static> {
    fn default() -> Self {
        Self::new(ClassTable::standard())
    }
}
