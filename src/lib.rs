pub mod config;
pub mod load;
pub mod render;
pub mod report;
pub mod summary;

pub use config::{Question, SurveyConfig};
pub use load::SurveyExport;
pub use render::{render_svg, Layout};
pub use report::{generate, Report};
pub use summary::{summarize, summarize_survey, QuestionSummary, SurveySummary};
