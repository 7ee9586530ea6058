use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub grade: String,
}

///email -> student, in the order the directory sent them
pub type StudentListing = IndexMap<String, Student>;

///grades offered by the filter control, in display order
pub const GRADES: [&str; 4] = ["9", "10", "11", "12"];
