pub mod catalog;
pub mod question;
pub mod survey;

pub use catalog::{AnswerRow, Category, CategoryLink, ClosedQuestionRow, OpenQuestionRow, Subcategory};
pub use question::{Question, QuestionId, QuestionKind};
pub use survey::{SurveyDraft, SurveyMeta};
