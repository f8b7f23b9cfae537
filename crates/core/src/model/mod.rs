mod app_settings;
mod ids;
mod kmap;
mod progress;
mod question;
mod session;
mod topic;

pub use app_settings::{
    AppSettings, AppSettingsDraft, AppSettingsError, DEFAULT_FONT_SIZE, FONT_SIZE_RANGE,
};
pub use ids::QuestionId;
pub use kmap::{KMapError, KMapGrid};
pub use progress::{ProgressError, TopicProgress, XP_ATTEMPT, XP_CORRECT, percent};
pub use question::{
    Answer, CorrectAnswer, ParseFormatError, Question, QuestionError, QuestionFormat,
};
pub use session::{
    AnswerRecord, PracticeSession, RecordedAnswer, SessionProgress, SessionState, SessionSummary,
};
pub use topic::{ChapterEntry, ChapterGroup, ParseTopicError, Topic, find_chapter};
