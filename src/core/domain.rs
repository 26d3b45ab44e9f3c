use serde::{Deserialize, Serialize};

// Configuration abstracts config options for the book catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub books_table: String,
    pub books_index: String,
    pub counters_table: String,
    pub scan_page_size: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            books_table: "books".to_string(),
            books_index: "books_ndx".to_string(),
            counters_table: "counters".to_string(),
            scan_page_size: 100,
        }
    }
}
