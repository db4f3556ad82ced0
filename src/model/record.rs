use crate::model::classification::ClassificationResult;
use crate::model::response::ResponseVector;

pub const MAX_AGE: u8 = 120;

/// One completed sitting. Never mutated once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub age: u8,
    pub responses: ResponseVector,
    pub result: ClassificationResult,
}

impl Record {
    pub fn new(id: String, age: u8, responses: ResponseVector) -> Self {
        let result = crate::pipeline::stage1_classify::classify(&responses);
        Self {
            id,
            age,
            responses,
            result,
        }
    }
}
