pub mod placeholder;
pub mod session;

pub use session::SurveySession;
